//! Handlers for the discovery feed.
//!
//! The draw is read-only: serving a track does not mark it seen. The client
//! reports the outcome through the listen/skip endpoints in
//! [`crate::handlers::track`].

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use soundope_core::discovery::{is_boost_active, select_weighted, Weighted};
use soundope_core::types::Timestamp;
use soundope_db::models::track::EligibleTrack;
use soundope_db::repositories::TrackRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, DiscoveryResponse};
use crate::state::AppState;

/// An eligible track annotated with the weight it was drawn with.
#[derive(Debug, Serialize)]
pub struct WeightedTrack {
    #[serde(flatten)]
    pub track: EligibleTrack,
    pub weight: f64,
    pub boost_active: bool,
}

fn annotate(track: EligibleTrack, now: Timestamp) -> WeightedTrack {
    WeightedTrack {
        weight: track.weight(),
        boost_active: is_boost_active(track.boost_expires, now),
        track,
    }
}

/// GET /api/v1/discover/next
///
/// Draw the next track for the caller, favouring boosted tracks.
/// Returns `data: null, exhausted: true` when nothing is left.
///
/// The draw runs over a lightweight snapshot of the whole eligible pool; only
/// the chosen track is then loaded in full. A track that stopped being
/// eligible between the two reads is dropped and the draw repeated.
pub async fn next_track(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let now = Utc::now();
    let policy = state.config.ledger.boost_pool_policy;

    let mut candidates = TrackRepo::list_candidates(&state.pool, auth.user_id).await?;
    for candidate in &mut candidates {
        candidate.apply_pool_policy(now, policy);
    }
    let pool_size = candidates.len();

    loop {
        let picked = select_weighted(&candidates, &mut rand::rng()).copied();
        let Some(picked) = picked else {
            tracing::debug!(user_id = auth.user_id, "Discovery pool exhausted");
            return Ok(Json(DiscoveryResponse::<WeightedTrack> {
                data: None,
                exhausted: true,
            }));
        };

        match TrackRepo::find_eligible(&state.pool, auth.user_id, picked.id).await? {
            Some(mut track) => {
                track.apply_pool_policy(now, policy);
                tracing::debug!(
                    user_id = auth.user_id,
                    track_id = track.id,
                    pool_size,
                    "Discovery draw",
                );
                return Ok(Json(DiscoveryResponse {
                    data: Some(annotate(track, now)),
                    exhausted: false,
                }));
            }
            None => {
                tracing::debug!(
                    track_id = picked.id,
                    "Drawn track no longer eligible, redrawing"
                );
                candidates.retain(|c| c.id != picked.id);
            }
        }
    }
}

/// GET /api/v1/discover/eligible
///
/// The caller's eligible tracks, by id, with the weight each one carries.
/// Capped at `ELIGIBLE_LIST_LIMIT` rows; the cap does not affect the draw.
pub async fn list_eligible(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let now = Utc::now();
    let ledger = &state.config.ledger;

    let tracks =
        TrackRepo::list_eligible(&state.pool, auth.user_id, ledger.eligible_list_limit).await?;
    let data: Vec<WeightedTrack> = tracks
        .into_iter()
        .map(|mut track| {
            track.apply_pool_policy(now, ledger.boost_pool_policy);
            annotate(track, now)
        })
        .collect();

    Ok(Json(DataResponse { data }))
}

/// Result of clearing the seen-set.
#[derive(Debug, Serialize)]
pub struct ResetSummary {
    pub cleared: u64,
}

/// POST /api/v1/discover/reset
///
/// Clear the caller's seen-set so every eligible track can be served again.
pub async fn reset_seen(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let cleared = TrackRepo::reset_seen(&state.pool, auth.user_id).await?;

    tracing::info!(user_id = auth.user_id, cleared, "Discovery seen-set reset");

    Ok(Json(DataResponse {
        data: ResetSummary { cleared },
    }))
}
