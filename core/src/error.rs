use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpsError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u32 },

    #[error("{entity} {id} is in state '{state}', cannot {action}")]
    InvalidState {
        entity: &'static str,
        id: u32,
        state: String,
        action: &'static str,
    },

    #[error("Insufficient funds: need {required}, have {available}")]
    InsufficientFunds { required: i64, available: i64 },

    #[error("Roster full: capacity {capacity} at current funds")]
    RosterFull { capacity: usize },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type OpsResult<T> = Result<T, OpsError>;
