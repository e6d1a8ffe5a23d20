use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Lead '{lead_id}' not found")]
    LeadNotFound { lead_id: String },

    #[error("Invalid lead status '{value}'")]
    InvalidStatus { value: String },

    #[error("Invalid solution category '{value}'")]
    InvalidSolution { value: String },

    #[error("Illegal status transition for lead '{lead_id}': {from} -> {to}")]
    IllegalTransition {
        lead_id: String,
        from:    String,
        to:      String,
    },

    #[error("Unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("Requested {requested} {collection}, limit is {max}")]
    CountOutOfBounds {
        collection: &'static str,
        requested:  usize,
        max:        usize,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type DashResult<T> = Result<T, DashError>;
