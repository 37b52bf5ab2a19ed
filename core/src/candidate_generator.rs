//! Synthetic job-seeker generation.
//!
//! Two modes share one record shape:
//!   - pool mode: random profession, exclusive skill 3–5, tier salary
//!     plus noise — feeds the talent market.
//!   - targeted mode: fixed profession and skill level, salary blended
//!     toward the requested band — feeds posting applicants.
//!
//! Generation never fails. Name collisions degrade to suffixed names.

use crate::{
    config::CandidateConfig,
    name_generator::NamePool,
    rng::SubsystemRng,
    types::{CandidateId, Position, SkillSet},
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A generated, not-yet-hired job seeker. Immutable once generated;
/// consumed exactly once by a hire operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalentCandidate {
    pub id: CandidateId,
    pub name: String,
    pub position: Position,
    pub skills: SkillSet,
    pub expected_salary: i64,
    pub experience_years: u8,
}

impl TalentCandidate {
    /// The candidate's level in the skill their profession exercises.
    pub fn profession_skill_level(&self) -> u8 {
        self.skills.get(self.position.skill())
    }
}

#[derive(Debug, Clone)]
pub struct CandidateGenerator {
    cfg: CandidateConfig,
    next_id: CandidateId,
}

impl CandidateGenerator {
    pub fn new(cfg: CandidateConfig) -> Self {
        Self { cfg, next_id: 1 }
    }

    /// Pool mode: `count` candidates with random professions. Names are
    /// pairwise distinct and disjoint from `existing_names`.
    pub fn generate(
        &mut self,
        count: usize,
        existing_names: &HashSet<String>,
        rng: &mut SubsystemRng,
    ) -> Vec<TalentCandidate> {
        let mut taken = existing_names.clone();
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            let position = Position::ALL[rng.next_u64_below(Position::ALL.len() as u64) as usize];
            let (lo, hi) = self.cfg.pool_skill_range;
            let level = rng.next_i64_in(lo as i64, hi as i64 + 1) as u8;

            let base = self.base_salary(level);
            let (noise_lo, noise_hi) = self.cfg.salary_noise;
            let salary = base + rng.next_i64_in(noise_lo, noise_hi);

            let name = NamePool::draw_unique(rng, &taken);
            taken.insert(name.clone());

            out.push(TalentCandidate {
                id: self.take_id(),
                name,
                position,
                skills: SkillSet::exclusive(position.skill(), level),
                expected_salary: salary,
                experience_years: self.roll_experience(level, rng),
            });
        }
        out
    }

    /// Targeted mode: a single candidate matching a posting's position,
    /// skill floor, and salary band.
    pub fn generate_for_position(
        &mut self,
        position: Position,
        min_skill_level: u8,
        salary_band: (i64, i64),
        existing_names: &HashSet<String>,
        rng: &mut SubsystemRng,
    ) -> TalentCandidate {
        let level = min_skill_level.min(5);
        let (band_lo, band_hi) = salary_band;
        let midpoint = (band_lo + band_hi) / 2;

        let w = self.cfg.targeted_tier_weight;
        let blended = self.base_salary(level) as f64 * w + midpoint as f64 * (1.0 - w);
        let salary = (blended.round() as i64).clamp(band_lo, band_hi);

        let name = NamePool::draw_unique(rng, existing_names);

        TalentCandidate {
            id: self.take_id(),
            name,
            position,
            skills: SkillSet::exclusive(position.skill(), level),
            expected_salary: salary,
            experience_years: self.roll_experience(level, rng),
        }
    }

    fn take_id(&mut self) -> CandidateId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Tier table lookup. Levels below 1 price at tier 1.
    fn base_salary(&self, level: u8) -> i64 {
        let tier = level.clamp(1, 5) as usize;
        self.cfg.base_salary_by_tier[tier - 1]
    }

    /// Higher skill correlates with more years in the field.
    fn roll_experience(&self, level: u8, rng: &mut SubsystemRng) -> u8 {
        let tier = level.clamp(1, 5) as usize;
        let (lo, hi) = self.cfg.experience_by_tier[tier - 1];
        rng.next_i64_in(lo as i64, hi as i64) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, SubsystemSlot};
    use crate::types::SkillKind;

    fn rng(day: u64) -> SubsystemRng {
        RngBank::new(4242).for_subsystem_at_day(SubsystemSlot::Market, day)
    }

    #[test]
    fn pool_mode_skill_is_exclusive_and_in_range() {
        let mut gen = CandidateGenerator::new(CandidateConfig::default());
        let candidates = gen.generate(50, &HashSet::new(), &mut rng(1));
        for c in &candidates {
            let own = c.profession_skill_level();
            assert!((3..=5).contains(&own), "exclusive skill out of range: {own}");
            for kind in SkillKind::ALL {
                if kind != c.position.skill() {
                    assert_eq!(c.skills.get(kind), 0, "non-profession skill must be 0");
                }
            }
        }
    }

    #[test]
    fn targeted_mode_fixes_the_skill_level() {
        let mut gen = CandidateGenerator::new(CandidateConfig::default());
        for level in 1..=5u8 {
            let c = gen.generate_for_position(
                Position::Programmer,
                level,
                (5000, 9000),
                &HashSet::new(),
                &mut rng(level as u64),
            );
            assert_eq!(c.skills.development, level);
            assert_eq!(c.skills.max_level(), level);
        }
    }

    #[test]
    fn targeted_salary_stays_inside_the_band() {
        let mut gen = CandidateGenerator::new(CandidateConfig::default());
        for day in 1..40 {
            let c = gen.generate_for_position(
                Position::Artist,
                5,
                (4000, 6000),
                &HashSet::new(),
                &mut rng(day),
            );
            // Tier-5 base (15000) blends above the band and must clamp.
            assert!((4000..=6000).contains(&c.expected_salary));
        }
    }

    #[test]
    fn pool_salary_is_tier_base_plus_noise() {
        let cfg = CandidateConfig::default();
        let mut gen = CandidateGenerator::new(cfg.clone());
        for c in gen.generate(200, &HashSet::new(), &mut rng(2)) {
            let tier = c.profession_skill_level() as usize;
            let base = cfg.base_salary_by_tier[tier - 1];
            let (lo, hi) = cfg.salary_noise;
            assert!(
                (base + lo..base + hi).contains(&c.expected_salary),
                "salary {} outside noise window around base {base}",
                c.expected_salary
            );
        }
    }

    #[test]
    fn experience_tracks_skill_tier() {
        let cfg = CandidateConfig::default();
        let mut gen = CandidateGenerator::new(cfg.clone());
        for c in gen.generate(200, &HashSet::new(), &mut rng(3)) {
            let tier = c.profession_skill_level() as usize;
            let (lo, hi) = cfg.experience_by_tier[tier - 1];
            assert!((lo..hi).contains(&c.experience_years));
        }
    }

    #[test]
    fn ids_are_monotonic_within_a_generator() {
        let mut gen = CandidateGenerator::new(CandidateConfig::default());
        let batch = gen.generate(10, &HashSet::new(), &mut rng(4));
        let ids: Vec<_> = batch.iter().map(|c| c.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    }
}
