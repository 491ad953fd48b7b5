//! Boost pool expiry sweeper.
//!
//! Only spawned under the `reset_on_expiry` pool policy. Zeroes the stored
//! `boost_pool` of tracks whose boost has lapsed. Discovery already ignores
//! lapsed pools under that policy, so the sweep only keeps stored state in
//! line with what selection sees.

use std::time::Duration;

use chrono::Utc;
use soundope_db::repositories::TrackRepo;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// Run one sweep. Returns the number of tracks reset.
pub async fn sweep_once(pool: &PgPool) -> Result<u64, sqlx::Error> {
    TrackRepo::reset_expired_boost_pools(pool, Utc::now()).await
}

/// Run the sweep loop every `interval_secs` until `cancel` is triggered.
pub async fn run(pool: PgPool, interval_secs: u64, cancel: CancellationToken) {
    tracing::info!(interval_secs, "Boost expiry job started");

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Boost expiry job stopping");
                break;
            }
            _ = interval.tick() => {
                match sweep_once(&pool).await {
                    Ok(reset) if reset > 0 => {
                        tracing::info!(reset, "Boost expiry: reset lapsed pools");
                    }
                    Ok(_) => {
                        tracing::debug!("Boost expiry: no lapsed pools");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Boost expiry: sweep failed");
                    }
                }
            }
        }
    }
}
