//! Handlers for vote casting.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use soundope_core::types::DbId;
use soundope_core::voting::normalize_vote_type;
use soundope_db::models::vote::CastVote;
use soundope_db::repositories::VoteRepo;

use crate::error::AppResult;
use crate::handlers::track::find_track;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /tracks/{id}/vote`.
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    /// The caller's new total allocation on the track.
    pub count: i32,
    pub vote_type: Option<String>,
}

/// POST /api/v1/tracks/{id}/vote
///
/// Set the caller's allocation on a track. Re-voting replaces the previous
/// allocation and only the difference is charged or refunded. Responds 422
/// when the caller has fewer remaining votes than `count`.
pub async fn cast_vote(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(track_id): Path<DbId>,
    Json(input): Json<VoteRequest>,
) -> AppResult<impl IntoResponse> {
    let vote_type = normalize_vote_type(input.vote_type.as_deref())?;

    let receipt = VoteRepo::cast(
        &state.pool,
        &CastVote {
            track_id,
            voter_id: auth.user_id,
            count: input.count,
            vote_type,
            allowance: state.config.ledger.monthly_vote_allowance,
        },
    )
    .await?;

    Ok(Json(DataResponse { data: receipt }))
}

/// GET /api/v1/tracks/{id}/votes
pub async fn list_votes(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(track_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_track(&state, track_id).await?;

    let votes = VoteRepo::list_by_track(&state.pool, track_id).await?;
    Ok(Json(DataResponse { data: votes }))
}
