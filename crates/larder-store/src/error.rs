use larder_types::{ItemId, RecipeId};

/// Errors produced by store operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("stock item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("recipe not found: {0}")]
    RecipeNotFound(RecipeId),

    #[error("name already in use: {0}")]
    NameTaken(String),

    #[error("name must not be empty")]
    InvalidName,

    #[error("quantity must be non-negative, got {0}")]
    InvalidQuantity(f64),

    #[error("threshold must be non-negative, got {0}")]
    InvalidThreshold(f64),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
