use larder_ledger::LedgerError;
use larder_store::StoreError;
use larder_types::{RecipeId, Shortfall, TypeError};

/// Errors surfaced at the engine boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// Missing or malformed caller input, including malformed identifier
    /// syntax (which is not NotFound: the id never resolved to a lookup).
    #[error("validation error: {0}")]
    Validation(String),

    #[error("recipe not found: {0}")]
    RecipeNotFound(RecipeId),

    /// Recipe preparation found at least one shortfall; nothing was
    /// deducted. Carries the full list so the caller sees every gap at
    /// once. Never raised by detection-batch consumption, which clamps.
    #[error("insufficient stock for {} ingredient(s)", shortfalls.len())]
    InsufficientStock { shortfalls: Vec<Shortfall> },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl From<TypeError> for EngineError {
    fn from(err: TypeError) -> Self {
        EngineError::Validation(err.to_string())
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
