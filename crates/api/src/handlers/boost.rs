//! Handlers for boost purchases and the plan catalog.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use soundope_core::boost_plan::{find_plan, BOOST_PLANS};
use soundope_core::ledger::CreditPreference;
use soundope_core::types::DbId;
use soundope_db::models::boost::ApplyBoost;
use soundope_db::repositories::BoostRepo;

use crate::error::AppResult;
use crate::handlers::track::find_track;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /tracks/{id}/boost`.
#[derive(Debug, Deserialize)]
pub struct BoostRequest {
    /// Plan key from the catalog.
    pub plan: String,
    #[serde(default)]
    pub preference: CreditPreference,
}

/// GET /api/v1/boost-plans
pub async fn list_plans(_auth: AuthUser) -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse { data: BOOST_PLANS }))
}

/// POST /api/v1/tracks/{id}/boost
///
/// Spend the caller's credits on a boost for one of their own tracks.
/// Responds 402 when the combined balance falls short; nothing is written
/// in that case.
pub async fn apply_boost(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(track_id): Path<DbId>,
    Json(input): Json<BoostRequest>,
) -> AppResult<impl IntoResponse> {
    let plan = find_plan(input.plan.trim())?;

    let receipt = BoostRepo::apply(
        &state.pool,
        &ApplyBoost {
            track_id,
            user_id: auth.user_id,
            plan: *plan,
            preference: input.preference,
            stacking: state.config.ledger.boost_stacking,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: receipt })))
}

/// GET /api/v1/tracks/{id}/boosts
///
/// Boost purchase history. Visible to the owning artist and admins.
pub async fn list_boosts(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(track_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let track = find_track(&state, track_id).await?;
    auth.require_owner_or_admin(track.artist_id)?;

    let boosts = BoostRepo::list_by_track(&state.pool, track_id).await?;
    Ok(Json(DataResponse { data: boosts }))
}
