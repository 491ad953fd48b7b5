//! Monthly vote allowance refill.
//!
//! Once a calendar month has begun, every listener whose allowance was last
//! refilled in an earlier month gets it reset to the configured amount. The
//! job checks hourly, so a refill lands within an hour of the month turning.

use std::time::Duration;

use chrono::Utc;
use soundope_db::repositories::UserRepo;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// How often the refill check runs.
const CHECK_INTERVAL: Duration = Duration::from_secs(3600);

/// Run one refill pass. Returns the number of users refilled.
pub async fn refill_once(pool: &PgPool, allowance: i32) -> Result<u64, sqlx::Error> {
    UserRepo::reset_monthly_votes(pool, allowance, Utc::now()).await
}

/// Run the refill loop until `cancel` is triggered.
pub async fn run(pool: PgPool, allowance: i32, cancel: CancellationToken) {
    tracing::info!(
        allowance,
        interval_secs = CHECK_INTERVAL.as_secs(),
        "Vote allowance job started"
    );

    let mut interval = tokio::time::interval(CHECK_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Vote allowance job stopping");
                break;
            }
            _ = interval.tick() => {
                match refill_once(&pool, allowance).await {
                    Ok(refilled) if refilled > 0 => {
                        tracing::info!(refilled, allowance, "Vote allowance: refilled users");
                    }
                    Ok(_) => {
                        tracing::debug!("Vote allowance: nothing to refill");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Vote allowance: refill failed");
                    }
                }
            }
        }
    }
}
