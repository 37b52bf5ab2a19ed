//! The workforce-operations engine.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Talent market      (monthly pool refresh)
//!   2. Posting pipeline   (daily applicant arrival)
//!   3. Complaint desk     (generation, progress, SLA, retention)
//!
//! RULES:
//!   - Subsystems execute in the documented order, every day.
//!   - All randomness flows through the RngBank.
//!   - All state changes surface in the returned event log.
//!   - World state is caller-owned and passed into every call; the
//!     engine holds no copy of roster, products, funds, or fans.

use crate::{
    candidate_generator::CandidateGenerator,
    clock::OpsClock,
    command::PlayerCommand,
    complaint_ops::ComplaintDesk,
    config::OpsConfig,
    error::{OpsError, OpsResult},
    event::OpsEvent,
    posting_pipeline::JobPostingPipeline,
    recruitment::{RecruitmentPricer, TalentMarket},
    rng::{RngBank, SubsystemSlot},
    subsystem::OpsSubsystem,
    types::{GameDate, StudioWorld},
};

pub struct OpsEngine {
    pub clock: OpsClock,
    rng_bank: RngBank,
    seed: u64,
    /// Commands processed so far; seeds one RNG stream per command so
    /// two interviews on the same day roll different dice.
    command_seq: u64,
    pub market: TalentMarket,
    pub postings: JobPostingPipeline,
    pub service: ComplaintDesk,
}

impl OpsEngine {
    /// Build a fully wired engine. Each component gets its own clone of
    /// the relevant config section; repositories start empty.
    pub fn new(config: OpsConfig, start: GameDate, seed: u64) -> Self {
        let market = TalentMarket::new(
            CandidateGenerator::new(config.candidates.clone()),
            RecruitmentPricer::new(config.recruitment.clone()),
        );
        let postings = JobPostingPipeline::new(
            config.postings.clone(),
            CandidateGenerator::new(config.candidates.clone()),
            RecruitmentPricer::new(config.recruitment.clone()),
        );
        let service = ComplaintDesk::new(config.complaints.clone());
        Self {
            clock: OpsClock::new(start),
            rng_bank: RngBank::new(seed),
            seed,
            command_seq: 0,
            market,
            postings,
            service,
        }
    }

    /// Advance one day. This is the core simulation step.
    pub fn tick_day(&mut self, world: &mut StudioWorld) -> OpsResult<Vec<OpsEvent>> {
        assert!(!self.clock.paused, "tick_day() called on paused engine");

        let date = self.clock.advance();
        let day = self.clock.day_index;
        let mut events = vec![OpsEvent::DayStarted { date }];

        // Execute each subsystem in the documented order. Each sees all
        // events emitted so far this day.
        let subsystems: [(SubsystemSlot, &mut dyn OpsSubsystem); 3] = [
            (SubsystemSlot::Market, &mut self.market),
            (SubsystemSlot::Posting, &mut self.postings),
            (SubsystemSlot::Service, &mut self.service),
        ];
        for (slot, subsystem) in subsystems {
            let mut rng = self.rng_bank.for_subsystem_at_day(slot, day);
            let new_events = subsystem.update(date, world, &events, &mut rng)?;
            events.extend(new_events);
        }

        events.push(OpsEvent::DayCompleted { date });
        Ok(events)
    }

    /// Run n days in a loop. Used for testing and fast-forward.
    pub fn run_days(&mut self, world: &mut StudioWorld, n: u64) -> OpsResult<Vec<OpsEvent>> {
        let mut all = Vec::new();
        // Emit RunInitialized on day 0 so seed differences are observable.
        if self.clock.day_index == 0 {
            all.push(OpsEvent::RunInitialized { seed: self.seed });
        }
        self.clock.resume();
        for _ in 0..n {
            all.extend(self.tick_day(world)?);
        }
        self.clock.pause();
        Ok(all)
    }

    /// Dispatch a player command against the current date. Commands use
    /// a dedicated RNG slot so they never perturb subsystem streams.
    pub fn handle_command(
        &mut self,
        command: PlayerCommand,
        world: &mut StudioWorld,
    ) -> OpsResult<Vec<OpsEvent>> {
        let date = self.clock.today;
        self.command_seq += 1;
        let mut rng = self
            .rng_bank
            .for_subsystem_at_day(SubsystemSlot::Command, self.command_seq);

        match command {
            PlayerCommand::Pause => {
                self.clock.pause();
                Ok(Vec::new())
            }
            PlayerCommand::Resume => {
                self.clock.resume();
                Ok(Vec::new())
            }
            PlayerCommand::SetSpeed { speed } => {
                self.clock.set_speed(speed);
                Ok(Vec::new())
            }

            PlayerCommand::RefreshMarket => {
                let pool_size = self.market.refresh(world, &mut rng);
                Ok(vec![OpsEvent::MarketRefreshed { date, pool_size }])
            }
            PlayerCommand::HireFromMarket { candidate_id } => {
                let (employee, fee) = self.market.hire(candidate_id, world)?;
                Ok(vec![OpsEvent::CandidateHired {
                    date,
                    employee_id: employee.id,
                    position: employee.position,
                    fee,
                }])
            }

            PlayerCommand::OpenPosting {
                position,
                min_skill_level,
                salary_min,
                salary_max,
            } => {
                let posting =
                    self.postings
                        .open_posting(position, min_skill_level, salary_min, salary_max);
                Ok(vec![OpsEvent::PostingOpened {
                    date,
                    posting_id: posting.id,
                    position,
                }])
            }
            PlayerCommand::PausePosting { posting_id } => {
                self.postings.pause_posting(posting_id)?;
                Ok(vec![OpsEvent::PostingPaused { date, posting_id }])
            }
            PlayerCommand::ResumePosting { posting_id } => {
                self.postings.resume_posting(posting_id)?;
                Ok(vec![OpsEvent::PostingResumed { date, posting_id }])
            }
            PlayerCommand::ClosePosting { posting_id } => {
                self.postings.close_posting(posting_id)?;
                Ok(vec![OpsEvent::PostingClosed { date, posting_id }])
            }
            PlayerCommand::PlayerInterview {
                posting_id,
                applicant_id,
                accept,
            } => {
                let result =
                    self.postings
                        .player_interview(posting_id, applicant_id, accept, &mut rng)?;
                Ok(vec![OpsEvent::InterviewHeld {
                    date,
                    posting_id,
                    applicant_id,
                    kind: result.kind,
                    score: result.score,
                    passed: result.passed,
                }])
            }
            PlayerCommand::HrInterview {
                posting_id,
                applicant_id,
            } => {
                let result = self.postings.hr_interview(posting_id, applicant_id, &mut rng)?;
                Ok(vec![OpsEvent::InterviewHeld {
                    date,
                    posting_id,
                    applicant_id,
                    kind: result.kind,
                    score: result.score,
                    passed: result.passed,
                }])
            }
            PlayerCommand::HireApplicant {
                posting_id,
                applicant_id,
            } => {
                let (employee, fee) =
                    self.postings.hire_applicant(posting_id, applicant_id, world)?;
                Ok(vec![OpsEvent::ApplicantHired {
                    date,
                    posting_id,
                    applicant_id,
                    employee_id: employee.id,
                    fee,
                }])
            }

            PlayerCommand::AssignComplaint {
                complaint_id,
                employee_id,
            } => {
                self.service.assign(complaint_id, employee_id, world)?;
                Ok(vec![OpsEvent::ComplaintAssigned {
                    date,
                    complaint_id,
                    employee_id,
                }])
            }
            PlayerCommand::AutoAssignComplaints => {
                let assigned = self.service.auto_assign(world);
                Ok(vec![OpsEvent::ComplaintsAutoAssigned { date, assigned }])
            }

            PlayerCommand::DismissEmployee { employee_id } => {
                world
                    .remove_employee(employee_id)
                    .ok_or(OpsError::NotFound { entity: "employee", id: employee_id })?;
                Ok(vec![OpsEvent::EmployeeDismissed { date, employee_id }])
            }
        }
    }
}
