use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The combined credit balance cannot cover a purchase.
    #[error("Insufficient credits: {required} required, {available} available")]
    InsufficientCredits { required: i64, available: i64 },

    /// The voter's monthly allowance cannot cover the requested votes.
    #[error("Insufficient votes: {requested} requested, {remaining} remaining")]
    InsufficientVotes { requested: i32, remaining: i32 },

    /// A write lost a race against a concurrent write on the same row and
    /// the automatic retry also failed.
    #[error("Concurrent modification: {0}")]
    ConcurrentModification(String),
}
