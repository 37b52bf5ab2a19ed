//! Complaint operations: support tickets raised against released games.
//!
//! Monthly generation draws per-product Bernoulli trials with weighted
//! type/severity tables. Assignment is greedy and severity-aware.
//! Daily progress scales with the assigned agent's service skill, and
//! tickets past their SLA window drain fans every day until resolved.
//!
//! Tickets live in a ComplaintDesk owned by the caller's engine; no
//! process-wide registry.

use crate::{
    config::ComplaintConfig,
    error::{OpsError, OpsResult},
    event::OpsEvent,
    rng::SubsystemRng,
    subsystem::OpsSubsystem,
    types::{
        BusinessModel, ComplaintId, EmployeeId, GameDate, GameId, ReleasedGame, StudioWorld,
    },
};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintType {
    Bug,
    Balance,
    Content,
    Server,
    Payment,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Assignment priority: HIGH tickets are routed first.
    fn rank(&self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    Pending,
    InProgress,
    Completed,
}

impl ComplaintStatus {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

/// A support ticket. Invariants: progress never exceeds workload;
/// status is COMPLETED iff progress == workload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complaint {
    pub id: ComplaintId,
    pub game_id: GameId,
    pub game_name: String,
    pub kind: ComplaintType,
    pub severity: Severity,
    pub workload: u32,
    pub progress: u32,
    pub assigned_to: Option<EmployeeId>,
    pub status: ComplaintStatus,
    pub opened_on: GameDate,
    pub completed_on: Option<GameDate>,
}

impl Complaint {
    pub fn remaining(&self) -> u32 {
        self.workload - self.progress
    }

    /// Whole days since the ticket was opened.
    pub fn age_days(&self, today: GameDate) -> i64 {
        (today - self.opened_on).num_days()
    }
}

/// What one daily pass did. The caller applies `fans_lost` to the
/// world; everything else is informational.
#[derive(Debug, Clone, Default)]
pub struct DailyServiceReport {
    pub progressed: usize,
    pub completed: Vec<ComplaintId>,
    pub orphaned: Vec<ComplaintId>,
    pub breaching_tickets: usize,
    pub fans_lost: i64,
}

/// In-memory complaint repository plus all ticket operations.
pub struct ComplaintDesk {
    cfg: ComplaintConfig,
    complaints: Vec<Complaint>,
    next_id: ComplaintId,
}

impl ComplaintDesk {
    pub fn new(cfg: ComplaintConfig) -> Self {
        Self {
            cfg,
            complaints: Vec::new(),
            next_id: 1,
        }
    }

    pub fn complaints(&self) -> &[Complaint] {
        &self.complaints
    }

    pub fn get(&self, id: ComplaintId) -> OpsResult<&Complaint> {
        self.complaints
            .iter()
            .find(|c| c.id == id)
            .ok_or(OpsError::NotFound { entity: "complaint", id })
    }

    fn get_mut(&mut self, id: ComplaintId) -> OpsResult<&mut Complaint> {
        self.complaints
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(OpsError::NotFound { entity: "complaint", id })
    }

    // ── Monthly generation ─────────────────────────────────────────

    /// One generation pass over the released catalog. Each live product
    /// rolls once; a success files 1..=max_wave_size tickets with
    /// weighted type and severity. Never fails.
    pub fn generate_monthly(
        &mut self,
        date: GameDate,
        products: &[ReleasedGame],
        rng: &mut SubsystemRng,
    ) -> Vec<ComplaintId> {
        let mut filed = Vec::new();
        for game in products.iter().filter(|g| g.live) {
            let p = match game.business_model {
                BusinessModel::SinglePlayer => self.cfg.monthly_probability_single_player,
                BusinessModel::Online => self.cfg.monthly_probability_online,
            };
            if !rng.chance(p) {
                continue;
            }
            let wave = 1 + rng.next_u64_below(self.cfg.max_wave_size);
            for _ in 0..wave {
                let kind = self.pick_kind(game.business_model, rng);
                let severity = self.pick_severity(rng);
                let policy = self.cfg.policy(severity);
                let id = self.next_id;
                self.next_id += 1;
                self.complaints.push(Complaint {
                    id,
                    game_id: game.id,
                    game_name: game.name.clone(),
                    kind,
                    severity,
                    workload: policy.workload,
                    progress: 0,
                    assigned_to: None,
                    status: ComplaintStatus::Pending,
                    opened_on: date,
                    completed_on: None,
                });
                filed.push(id);
            }
        }
        if !filed.is_empty() {
            log::debug!("service: filed {} complaints", filed.len());
        }
        filed
    }

    fn pick_kind(&self, model: BusinessModel, rng: &mut SubsystemRng) -> ComplaintType {
        let weights = match model {
            BusinessModel::SinglePlayer => &self.cfg.type_weights_single_player,
            BusinessModel::Online => &self.cfg.type_weights_online,
        };
        let total: f64 = weights.iter().map(|w| w.weight).sum();
        let roll = rng.next_f64() * total;
        let mut cumulative = 0.0;
        for w in weights {
            cumulative += w.weight;
            if roll < cumulative {
                return w.kind;
            }
        }
        weights.last().map(|w| w.kind).unwrap_or(ComplaintType::Other)
    }

    fn pick_severity(&self, rng: &mut SubsystemRng) -> Severity {
        let weights = &self.cfg.severity_weights;
        let total: f64 = weights.iter().map(|w| w.weight).sum();
        let roll = rng.next_f64() * total;
        let mut cumulative = 0.0;
        for w in weights {
            cumulative += w.weight;
            if roll < cumulative {
                return w.severity;
            }
        }
        weights.last().map(|w| w.severity).unwrap_or(Severity::Low)
    }

    // ── Assignment ─────────────────────────────────────────────────

    /// Manual assignment. The employee must exist; completed tickets
    /// cannot be assigned. PENDING flips to IN_PROGRESS.
    pub fn assign(
        &mut self,
        complaint_id: ComplaintId,
        employee_id: EmployeeId,
        world: &StudioWorld,
    ) -> OpsResult<&Complaint> {
        if world.employee(employee_id).is_none() {
            return Err(OpsError::NotFound { entity: "employee", id: employee_id });
        }
        let complaint = self.get_mut(complaint_id)?;
        if complaint.status == ComplaintStatus::Completed {
            return Err(OpsError::InvalidState {
                entity: "complaint",
                id: complaint_id,
                state: complaint.status.name().to_string(),
                action: "assign",
            });
        }
        complaint.assigned_to = Some(employee_id);
        if complaint.status == ComplaintStatus::Pending {
            complaint.status = ComplaintStatus::InProgress;
        }
        Ok(complaint)
    }

    /// Greedy bulk assignment of unassigned PENDING tickets to support
    /// agents, severity-aware:
    ///   HIGH:   highest-skill agent below the saturation threshold,
    ///           else least-loaded.
    ///   MEDIUM: least-loaded agent with skill >= 2, else least-loaded.
    ///   LOW:    least-loaded, no skill filter.
    /// Tickets route HIGH first, oldest first. Running load counts
    /// remaining (not total) workload. Returns the number assigned.
    pub fn auto_assign(&mut self, world: &StudioWorld) -> usize {
        let mut agents: Vec<(EmployeeId, u8)> = world
            .support_agents()
            .iter()
            .map(|e| (e.id, e.skills.service))
            .collect();
        if agents.is_empty() {
            return 0;
        }
        // Skill descending; id ascending keeps ties deterministic.
        agents.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let mut load: HashMap<EmployeeId, u32> =
            agents.iter().map(|(id, _)| (*id, 0)).collect();
        for c in &self.complaints {
            if c.status == ComplaintStatus::Completed {
                continue;
            }
            if let Some(emp) = c.assigned_to {
                if let Some(l) = load.get_mut(&emp) {
                    *l += c.remaining();
                }
            }
        }

        let mut order: Vec<usize> = (0..self.complaints.len())
            .filter(|&i| {
                let c = &self.complaints[i];
                c.status == ComplaintStatus::Pending && c.assigned_to.is_none()
            })
            .collect();
        order.sort_by(|&a, &b| {
            let (ca, cb) = (&self.complaints[a], &self.complaints[b]);
            cb.severity
                .rank()
                .cmp(&ca.severity.rank())
                .then(ca.opened_on.cmp(&cb.opened_on))
                .then(ca.id.cmp(&cb.id))
        });

        let mut assigned = 0;
        for idx in order {
            let severity = self.complaints[idx].severity;
            let pick = match severity {
                Severity::High => agents
                    .iter()
                    .find(|(id, _)| load[id] < self.cfg.saturation_threshold)
                    .map(|(id, _)| *id)
                    .unwrap_or_else(|| least_loaded(&agents, &load)),
                Severity::Medium => {
                    let skilled: Vec<(EmployeeId, u8)> = agents
                        .iter()
                        .copied()
                        .filter(|(_, skill)| *skill >= 2)
                        .collect();
                    if skilled.is_empty() {
                        least_loaded(&agents, &load)
                    } else {
                        least_loaded(&skilled, &load)
                    }
                }
                Severity::Low => least_loaded(&agents, &load),
            };
            let complaint = &mut self.complaints[idx];
            complaint.assigned_to = Some(pick);
            complaint.status = ComplaintStatus::InProgress;
            let remaining = complaint.remaining();
            if let Some(l) = load.get_mut(&pick) {
                *l += remaining;
            }
            assigned += 1;
        }
        assigned
    }

    // ── Daily processing ───────────────────────────────────────────

    /// One day of ticket work plus SLA aging. A ticket whose assigned
    /// agent has left the roster is unassigned in place, not an error.
    pub fn process_daily(&mut self, date: GameDate, world: &StudioWorld) -> DailyServiceReport {
        let mut report = DailyServiceReport::default();
        for c in &mut self.complaints {
            if c.status == ComplaintStatus::Completed {
                continue;
            }

            if let Some(emp_id) = c.assigned_to {
                match world.employee(emp_id) {
                    None => {
                        log::warn!(
                            "service: agent {emp_id} left the roster, unassigning ticket #{}",
                            c.id
                        );
                        c.assigned_to = None;
                        c.status = if c.progress > 0 {
                            ComplaintStatus::InProgress
                        } else {
                            ComplaintStatus::Pending
                        };
                        report.orphaned.push(c.id);
                    }
                    Some(agent) => {
                        let tier = agent.skills.service.clamp(1, 5) as usize;
                        let multiplier = self.cfg.skill_multipliers[tier - 1];
                        let daily =
                            (self.cfg.base_daily_progress as f64 * multiplier).floor() as u32;
                        c.progress = (c.progress + daily).min(c.workload);
                        report.progressed += 1;
                        if c.progress == c.workload {
                            c.status = ComplaintStatus::Completed;
                            c.completed_on = Some(date);
                            report.completed.push(c.id);
                        }
                    }
                }
            }

            // SLA aging: each day past the window drains fans.
            if c.status != ComplaintStatus::Completed {
                let policy = self.cfg.policy(c.severity);
                if c.age_days(date) > policy.sla_days {
                    report.breaching_tickets += 1;
                    report.fans_lost += policy.daily_fan_penalty;
                }
            }
        }
        report
    }

    // ── Retention ──────────────────────────────────────────────────

    /// Keep every non-completed ticket plus the most recently completed
    /// `completed_retention`; discard the rest. Returns removed count.
    pub fn prune_completed(&mut self) -> usize {
        let mut done: Vec<(GameDate, ComplaintId)> = self
            .complaints
            .iter()
            .filter(|c| c.status == ComplaintStatus::Completed)
            .map(|c| (c.completed_on.unwrap_or(c.opened_on), c.id))
            .collect();
        if done.len() <= self.cfg.completed_retention {
            return 0;
        }
        done.sort_by(|a, b| b.cmp(a));
        let keep: HashSet<ComplaintId> = done
            .iter()
            .take(self.cfg.completed_retention)
            .map(|(_, id)| *id)
            .collect();
        let before = self.complaints.len();
        self.complaints
            .retain(|c| c.status != ComplaintStatus::Completed || keep.contains(&c.id));
        before - self.complaints.len()
    }
}

fn least_loaded(agents: &[(EmployeeId, u8)], load: &HashMap<EmployeeId, u32>) -> EmployeeId {
    agents
        .iter()
        .min_by_key(|(id, _)| (load[id], *id))
        .map(|(id, _)| *id)
        .expect("least_loaded called with no agents")
}

impl OpsSubsystem for ComplaintDesk {
    fn name(&self) -> &'static str {
        "service"
    }

    fn update(
        &mut self,
        date: GameDate,
        world: &mut StudioWorld,
        _events_in: &[OpsEvent],
        rng: &mut SubsystemRng,
    ) -> OpsResult<Vec<OpsEvent>> {
        let mut events = Vec::new();

        // 1. Monthly generation against the released catalog.
        if date.day() == 1 {
            for id in self.generate_monthly(date, &world.products, rng) {
                let c = self.get(id)?;
                events.push(OpsEvent::ComplaintFiled {
                    date,
                    complaint_id: c.id,
                    game_id: c.game_id,
                    kind: c.kind,
                    severity: c.severity,
                });
            }
        }

        // 2. Daily progress, orphan recovery, and SLA aging.
        let report = self.process_daily(date, world);
        world.fans -= report.fans_lost;
        for id in &report.orphaned {
            events.push(OpsEvent::ComplaintOrphaned { date, complaint_id: *id });
        }
        for id in &report.completed {
            events.push(OpsEvent::ComplaintCompleted { date, complaint_id: *id });
        }
        if report.fans_lost > 0 {
            events.push(OpsEvent::SlaPenaltyAccrued {
                date,
                breaching_tickets: report.breaching_tickets,
                fans_lost: report.fans_lost,
            });
        }

        // 3. Retention pass.
        let removed = self.prune_completed();
        if removed > 0 {
            events.push(OpsEvent::ComplaintsPruned { date, removed });
        }

        let open = self
            .complaints
            .iter()
            .filter(|c| c.status != ComplaintStatus::Completed)
            .count();
        log::debug!(
            "service: progressed={} completed={} breaching={} open={}",
            report.progressed,
            report.completed.len(),
            report.breaching_tickets,
            open,
        );

        Ok(events)
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
