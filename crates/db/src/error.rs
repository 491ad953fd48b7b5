use soundope_core::error::CoreError;

/// PostgreSQL error code for a serialization failure.
const SERIALIZATION_FAILURE: &str = "40001";
/// PostgreSQL error code for a detected deadlock.
const DEADLOCK_DETECTED: &str = "40P01";
/// PostgreSQL error code for a unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

/// Failure of a transactional ledger operation (boost or vote).
///
/// Domain rejections and database failures both abort the transaction, so
/// no partial write survives either variant.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The operation was refused by a domain rule.
    #[error(transparent)]
    Rejected(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl LedgerError {
    /// Whether the failure came from losing a race with a concurrent writer.
    pub fn is_concurrency_conflict(&self) -> bool {
        match self {
            LedgerError::Rejected(CoreError::ConcurrentModification(_)) => true,
            LedgerError::Rejected(_) => false,
            LedgerError::Database(sqlx::Error::Database(db_err)) => {
                match db_err.code().as_deref() {
                    Some(SERIALIZATION_FAILURE) | Some(DEADLOCK_DETECTED) => true,
                    Some(UNIQUE_VIOLATION) => db_err
                        .constraint()
                        .is_some_and(|name| name.starts_with("uq_")),
                    _ => false,
                }
            }
            LedgerError::Database(_) => false,
        }
    }
}
