use crate::{
    clock::SimSpeed,
    types::{ApplicantId, CandidateId, ComplaintId, EmployeeId, PostingId, Position},
};
use serde::{Deserialize, Serialize};

/// All player-issued operations, dispatched by the engine.
/// Variants added per feature — never removed or reordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PlayerCommand {
    // ── Clock control ─────────────────────────────
    Pause,
    Resume,
    SetSpeed { speed: SimSpeed },

    // ── Talent market ─────────────────────────────
    RefreshMarket,
    HireFromMarket { candidate_id: CandidateId },

    // ── Job postings ──────────────────────────────
    OpenPosting {
        position: Position,
        min_skill_level: u8,
        salary_min: i64,
        salary_max: i64,
    },
    PausePosting { posting_id: PostingId },
    ResumePosting { posting_id: PostingId },
    ClosePosting { posting_id: PostingId },
    PlayerInterview {
        posting_id: PostingId,
        applicant_id: ApplicantId,
        accept: bool,
    },
    HrInterview {
        posting_id: PostingId,
        applicant_id: ApplicantId,
    },
    HireApplicant {
        posting_id: PostingId,
        applicant_id: ApplicantId,
    },

    // ── Complaint operations ──────────────────────
    AssignComplaint {
        complaint_id: ComplaintId,
        employee_id: EmployeeId,
    },
    AutoAssignComplaints,

    // ── Roster ────────────────────────────────────
    DismissEmployee { employee_id: EmployeeId },
}
