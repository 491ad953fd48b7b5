//! Single automatic retry for ledger transactions.
//!
//! A boost or vote that loses a race against a concurrent write on the same
//! rows is re-run once from scratch. A second loss surfaces as
//! [`CoreError::ConcurrentModification`].

use std::future::Future;

use soundope_core::error::CoreError;

use crate::error::LedgerError;

/// Run `attempt`, re-running it once if it fails with a concurrency conflict.
pub async fn retry_once<T, F, Fut>(
    operation: &'static str,
    mut attempt: F,
) -> Result<T, LedgerError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LedgerError>>,
{
    match attempt().await {
        Err(first) if first.is_concurrency_conflict() => {
            tracing::warn!(operation, error = %first, "Concurrent modification, retrying once");
            match attempt().await {
                Err(second) if second.is_concurrency_conflict() => {
                    tracing::error!(operation, error = %second, "Retry lost the race again");
                    Err(LedgerError::Rejected(CoreError::ConcurrentModification(
                        format!("{operation} conflicted with a concurrent update"),
                    )))
                }
                other => other,
            }
        }
        other => other,
    }
}
