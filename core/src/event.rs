//! The event log — the audit trail of everything the core does.
//!
//! RULE: Subsystems communicate forward through events; a subsystem may
//! never call another subsystem's functions directly. Mutating calls
//! additionally return the updated entity, so callers never re-read.
//! Variants are added per feature — never removed or reordered.

use crate::{
    complaint_ops::{ComplaintType, Severity},
    posting_pipeline::InterviewKind,
    types::{
        ApplicantId, ComplaintId, EmployeeId, GameDate, GameId, PostingId, Position,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OpsEvent {
    // ── Engine events ──────────────────────────────
    DayStarted {
        date: GameDate,
    },
    DayCompleted {
        date: GameDate,
    },
    RunInitialized {
        seed: u64,
    },

    // ── Talent market events ───────────────────────
    MarketRefreshed {
        date: GameDate,
        pool_size: usize,
    },
    CandidateHired {
        date: GameDate,
        employee_id: EmployeeId,
        position: Position,
        fee: i64,
    },

    // ── Posting pipeline events ────────────────────
    PostingOpened {
        date: GameDate,
        posting_id: PostingId,
        position: Position,
    },
    PostingPaused {
        date: GameDate,
        posting_id: PostingId,
    },
    PostingResumed {
        date: GameDate,
        posting_id: PostingId,
    },
    PostingClosed {
        date: GameDate,
        posting_id: PostingId,
    },
    ApplicantsArrived {
        date: GameDate,
        posting_id: PostingId,
        count: usize,
    },
    InterviewHeld {
        date: GameDate,
        posting_id: PostingId,
        applicant_id: ApplicantId,
        kind: InterviewKind,
        score: u8,
        passed: bool,
    },
    ApplicantHired {
        date: GameDate,
        posting_id: PostingId,
        applicant_id: ApplicantId,
        employee_id: EmployeeId,
        fee: i64,
    },

    // ── Complaint operations events ────────────────
    ComplaintFiled {
        date: GameDate,
        complaint_id: ComplaintId,
        game_id: GameId,
        kind: ComplaintType,
        severity: Severity,
    },
    ComplaintAssigned {
        date: GameDate,
        complaint_id: ComplaintId,
        employee_id: EmployeeId,
    },
    ComplaintsAutoAssigned {
        date: GameDate,
        assigned: usize,
    },
    ComplaintCompleted {
        date: GameDate,
        complaint_id: ComplaintId,
    },
    ComplaintOrphaned {
        date: GameDate,
        complaint_id: ComplaintId,
    },
    SlaPenaltyAccrued {
        date: GameDate,
        breaching_tickets: usize,
        fans_lost: i64,
    },
    ComplaintsPruned {
        date: GameDate,
        removed: usize,
    },

    // ── Roster events ──────────────────────────────
    EmployeeDismissed {
        date: GameDate,
        employee_id: EmployeeId,
    },
}
