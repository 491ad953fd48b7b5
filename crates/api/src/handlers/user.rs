//! Handlers for the caller's balances and admin credit grants.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use soundope_core::error::CoreError;
use soundope_core::types::DbId;
use soundope_db::models::user::GrantCredits;
use soundope_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/me/balances
///
/// Standard and premium credits plus the remaining monthly votes. A caller
/// not yet refilled this month is refilled first.
pub async fn my_balances(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let allowance = state.config.ledger.monthly_vote_allowance;
    if UserRepo::refill_votes_if_due(&state.pool, auth.user_id, allowance).await? {
        tracing::debug!(user_id = auth.user_id, allowance, "Monthly votes refilled on read");
    }

    let balances = UserRepo::find_balances(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    Ok(Json(DataResponse { data: balances }))
}

/// POST /api/v1/admin/users/{id}/credits
///
/// Top up a user's credit balances. Amounts must be non-negative and at
/// least one must be positive.
pub async fn grant_credits(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    Json(input): Json<GrantCredits>,
) -> AppResult<impl IntoResponse> {
    if input.standard < 0 || input.premium < 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Credit grants must not be negative".into(),
        )));
    }
    if input.standard == 0 && input.premium == 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Credit grant must add at least one credit".into(),
        )));
    }

    let balances = UserRepo::grant_credits(&state.pool, user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;

    tracing::info!(
        user_id,
        admin_id = admin.user_id,
        standard = input.standard,
        premium = input.premium,
        "Credits granted",
    );

    Ok(Json(DataResponse { data: balances }))
}
