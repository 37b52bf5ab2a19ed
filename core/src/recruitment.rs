//! Recruitment pricing and the talent market.
//!
//! The pricer is pure: it turns a candidate plus the current roster and
//! funds into a verdict, and mutates nothing. The market owns the
//! browsable candidate pool and applies pricer verdicts to the world.

use crate::{
    candidate_generator::{CandidateGenerator, TalentCandidate},
    config::RecruitmentConfig,
    error::{OpsError, OpsResult},
    event::OpsEvent,
    rng::SubsystemRng,
    subsystem::OpsSubsystem,
    types::{CandidateId, Employee, GameDate, StudioWorld},
};
use chrono::Datelike;

/// The outcome of a successful hire verdict: the employee record to add
/// and the one-time fee to charge. The caller applies both.
#[derive(Debug, Clone)]
pub struct HirePlan {
    pub employee: Employee,
    pub cost: i64,
}

#[derive(Debug, Clone)]
pub struct RecruitmentPricer {
    cfg: RecruitmentConfig,
}

impl RecruitmentPricer {
    pub fn new(cfg: RecruitmentConfig) -> Self {
        Self { cfg }
    }

    /// One-time hiring fee:
    /// clamp(expected_salary × multiplier × skill_multiplier(max level)).
    pub fn fee(&self, candidate: &TalentCandidate) -> i64 {
        let tier = candidate.skills.max_level().clamp(1, 5) as usize;
        let skill_mult = self.cfg.skill_fee_multipliers[tier - 1];
        let raw = candidate.expected_salary as f64 * self.cfg.fee_multiplier * skill_mult;
        (raw.round() as i64).clamp(self.cfg.fee_min, self.cfg.fee_max)
    }

    pub fn can_afford(&self, candidate: &TalentCandidate, funds: i64) -> bool {
        funds >= self.fee(candidate)
    }

    /// Roster capacity at the given funds level: the highest tier at or
    /// below current funds applies.
    pub fn roster_capacity(&self, funds: i64) -> usize {
        self.cfg
            .capacity_tiers
            .iter()
            .filter(|t| funds >= t.min_funds)
            .map(|t| t.capacity)
            .max()
            .unwrap_or(0)
    }

    /// Side-effect-free hire verdict. On success the returned plan holds
    /// a fresh Employee with the next roster id and the fee to charge.
    pub fn plan_hire(
        &self,
        candidate: &TalentCandidate,
        roster: &[Employee],
        funds: i64,
    ) -> OpsResult<HirePlan> {
        let fee = self.fee(candidate);
        if funds < fee {
            return Err(OpsError::InsufficientFunds {
                required: fee,
                available: funds,
            });
        }
        let capacity = self.roster_capacity(funds);
        if roster.len() >= capacity {
            return Err(OpsError::RosterFull { capacity });
        }
        let next_id = roster.iter().map(|e| e.id).max().map_or(1, |id| id + 1);
        Ok(HirePlan {
            employee: Employee {
                id: next_id,
                name: candidate.name.clone(),
                position: candidate.position,
                skills: candidate.skills,
                salary: candidate.expected_salary,
            },
            cost: fee,
        })
    }
}

/// The browsable pool of generated candidates. Refreshes monthly; a
/// candidate is consumed exactly once — hiring removes it.
pub struct TalentMarket {
    generator: CandidateGenerator,
    pricer: RecruitmentPricer,
    pool: Vec<TalentCandidate>,
}

impl TalentMarket {
    pub fn new(generator: CandidateGenerator, pricer: RecruitmentPricer) -> Self {
        Self {
            generator,
            pricer,
            pool: Vec::new(),
        }
    }

    pub fn pool(&self) -> &[TalentCandidate] {
        &self.pool
    }

    pub fn pricer(&self) -> &RecruitmentPricer {
        &self.pricer
    }

    /// Regenerate the pool, replacing unconsumed candidates. Returns the
    /// new pool size.
    pub fn refresh(&mut self, world: &StudioWorld, rng: &mut SubsystemRng) -> usize {
        let existing = world.roster_names();
        let size = self.pricer.cfg.market_pool_size;
        self.pool = self.generator.generate(size, &existing, rng);
        log::debug!("market: refreshed pool with {} candidates", self.pool.len());
        self.pool.len()
    }

    /// Hire a pool candidate: charge the fee, add to the roster, remove
    /// the candidate from the pool.
    pub fn hire(
        &mut self,
        candidate_id: CandidateId,
        world: &mut StudioWorld,
    ) -> OpsResult<(Employee, i64)> {
        let idx = self
            .pool
            .iter()
            .position(|c| c.id == candidate_id)
            .ok_or(OpsError::NotFound {
                entity: "candidate",
                id: candidate_id,
            })?;
        let plan = self.pricer.plan_hire(&self.pool[idx], &world.roster, world.funds)?;
        let candidate = self.pool.remove(idx);
        world.funds -= plan.cost;
        world.roster.push(plan.employee.clone());
        log::info!(
            "market: hired {} ({}) for fee {}",
            candidate.name,
            candidate.position.name(),
            plan.cost
        );
        Ok((plan.employee, plan.cost))
    }
}

impl OpsSubsystem for TalentMarket {
    fn name(&self) -> &'static str {
        "market"
    }

    fn update(
        &mut self,
        date: GameDate,
        world: &mut StudioWorld,
        _events_in: &[OpsEvent],
        rng: &mut SubsystemRng,
    ) -> OpsResult<Vec<OpsEvent>> {
        // Monthly refresh; also fill the very first pool of a run.
        if date.day() == 1 || self.pool.is_empty() {
            let pool_size = self.refresh(world, rng);
            return Ok(vec![OpsEvent::MarketRefreshed { date, pool_size }]);
        }
        Ok(Vec::new())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
