//! Policy configuration for every component.
//!
//! All tunable numbers live here: tier tables, fee bounds, capacity
//! tiers, attractiveness steps, severity policies, retention windows.
//! `OpsConfig::default()` carries the production values; a JSON file in
//! the data directory overrides them wholesale.

use crate::complaint_ops::{ComplaintType, Severity};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpsConfig {
    #[serde(default)]
    pub candidates: CandidateConfig,
    #[serde(default)]
    pub recruitment: RecruitmentConfig,
    #[serde(default)]
    pub postings: PostingConfig,
    #[serde(default)]
    pub complaints: ComplaintConfig,
}

impl OpsConfig {
    /// Load from `{data_dir}/workforce.json`.
    /// In tests, use `OpsConfig::default()`.
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/workforce.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: OpsConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}

// ── Candidate generation ───────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateConfig {
    /// Base monthly salary by skill tier 1..=5.
    pub base_salary_by_tier: [i64; 5],
    /// Uniform noise added to pool-mode salaries, [min, max).
    pub salary_noise: (i64, i64),
    /// Pool-mode exclusive skill range, inclusive.
    pub pool_skill_range: (u8, u8),
    /// Years-of-experience range [lo, hi) by skill tier 1..=5.
    pub experience_by_tier: [(u8, u8); 5],
    /// Targeted-mode salary: weight of the tier base in the blend with
    /// the requested band midpoint.
    pub targeted_tier_weight: f64,
}

impl Default for CandidateConfig {
    fn default() -> Self {
        Self {
            base_salary_by_tier: [3000, 4000, 6000, 9000, 15000],
            salary_noise: (-500, 1000),
            pool_skill_range: (3, 5),
            experience_by_tier: [(0, 3), (1, 5), (3, 9), (6, 16), (10, 26)],
            targeted_tier_weight: 0.7,
        }
    }
}

// ── Recruitment pricing ────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityTier {
    pub min_funds: i64,
    pub capacity: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecruitmentConfig {
    /// Fee = expected salary × this × skill multiplier, clamped.
    pub fee_multiplier: f64,
    /// Fee multiplier by skill tier 1..=5.
    pub skill_fee_multipliers: [f64; 5],
    pub fee_min: i64,
    pub fee_max: i64,
    /// Roster capacity by funds tier. Sorted ascending by `min_funds`;
    /// the highest tier at or below current funds applies.
    pub capacity_tiers: Vec<CapacityTier>,
    /// Candidates offered per talent-market refresh.
    pub market_pool_size: usize,
}

impl Default for RecruitmentConfig {
    fn default() -> Self {
        Self {
            fee_multiplier: 1.5,
            skill_fee_multipliers: [0.8, 1.0, 1.3, 1.8, 2.5],
            fee_min: 2000,
            fee_max: 30_000,
            capacity_tiers: vec![
                CapacityTier { min_funds: 0, capacity: 10 },
                CapacityTier { min_funds: 20_000, capacity: 12 },
                CapacityTier { min_funds: 50_000, capacity: 15 },
                CapacityTier { min_funds: 100_000, capacity: 20 },
            ],
            market_pool_size: 6,
        }
    }
}

// ── Job postings ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryScoreStep {
    pub at_least: i64,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostingConfig {
    /// Attractiveness of a posting's average salary: first step whose
    /// `at_least` the average clears wins, else `salary_score_floor`.
    pub salary_score_steps: Vec<SalaryScoreStep>,
    pub salary_score_floor: f64,
    /// Applicants per successful arrival wave, 1..=this.
    pub max_wave_size: u64,
    /// HR interview pass mark, 0–100.
    pub pass_score: u8,
}

impl Default for PostingConfig {
    fn default() -> Self {
        Self {
            salary_score_steps: vec![
                SalaryScoreStep { at_least: 20_000, score: 1.0 },
                SalaryScoreStep { at_least: 15_000, score: 0.8 },
                SalaryScoreStep { at_least: 10_000, score: 0.6 },
                SalaryScoreStep { at_least: 5_000, score: 0.4 },
            ],
            salary_score_floor: 0.2,
            max_wave_size: 3,
            pass_score: 60,
        }
    }
}

// ── Complaint operations ───────────────────────────────────────────

/// Workload, SLA window, and breach penalty fixed by a severity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SeverityPolicy {
    pub workload: u32,
    pub sla_days: i64,
    /// Fans lost per day once the SLA window is breached.
    pub daily_fan_penalty: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeWeight {
    pub kind: ComplaintType,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeverityWeight {
    pub severity: Severity,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintConfig {
    /// Monthly complaint probability per live product.
    pub monthly_probability_single_player: f64,
    pub monthly_probability_online: f64,
    /// Complaints per successful monthly draw, 1..=this.
    pub max_wave_size: u64,
    pub severity_weights: Vec<SeverityWeight>,
    pub low: SeverityPolicy,
    pub medium: SeverityPolicy,
    pub high: SeverityPolicy,
    /// Type distribution per business model. Online games see server and
    /// payment issues; single-player games never do.
    pub type_weights_single_player: Vec<TypeWeight>,
    pub type_weights_online: Vec<TypeWeight>,
    /// Remaining-workload level above which an agent no longer receives
    /// HIGH tickets by skill preference.
    pub saturation_threshold: u32,
    /// Progress units per day for a tier-1 agent.
    pub base_daily_progress: u32,
    /// Daily-progress multiplier by service skill tier 1..=5.
    pub skill_multipliers: [f64; 5],
    /// Completed tickets kept after each processing pass.
    pub completed_retention: usize,
}

impl ComplaintConfig {
    pub fn policy(&self, severity: Severity) -> SeverityPolicy {
        match severity {
            Severity::Low => self.low,
            Severity::Medium => self.medium,
            Severity::High => self.high,
        }
    }
}

impl Default for ComplaintConfig {
    fn default() -> Self {
        Self {
            monthly_probability_single_player: 0.30,
            monthly_probability_online: 0.50,
            max_wave_size: 2,
            severity_weights: vec![
                SeverityWeight { severity: Severity::Low, weight: 0.50 },
                SeverityWeight { severity: Severity::Medium, weight: 0.35 },
                SeverityWeight { severity: Severity::High, weight: 0.15 },
            ],
            low: SeverityPolicy { workload: 120, sla_days: 3, daily_fan_penalty: 10 },
            medium: SeverityPolicy { workload: 240, sla_days: 5, daily_fan_penalty: 25 },
            high: SeverityPolicy { workload: 480, sla_days: 7, daily_fan_penalty: 60 },
            type_weights_single_player: vec![
                TypeWeight { kind: ComplaintType::Bug, weight: 0.35 },
                TypeWeight { kind: ComplaintType::Balance, weight: 0.25 },
                TypeWeight { kind: ComplaintType::Content, weight: 0.20 },
                TypeWeight { kind: ComplaintType::Other, weight: 0.20 },
            ],
            type_weights_online: vec![
                TypeWeight { kind: ComplaintType::Bug, weight: 0.25 },
                TypeWeight { kind: ComplaintType::Balance, weight: 0.15 },
                TypeWeight { kind: ComplaintType::Content, weight: 0.10 },
                TypeWeight { kind: ComplaintType::Server, weight: 0.25 },
                TypeWeight { kind: ComplaintType::Payment, weight: 0.15 },
                TypeWeight { kind: ComplaintType::Other, weight: 0.10 },
            ],
            saturation_threshold: 1000,
            base_daily_progress: 60,
            skill_multipliers: [1.0, 1.3, 1.7, 2.2, 2.8],
            completed_retention: 30,
        }
    }
}
