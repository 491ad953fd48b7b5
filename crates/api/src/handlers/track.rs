//! Handlers for track metadata and listener actions.
//!
//! Uploading and editing belong to the owning artist; deletion and
//! deactivation are also open to admins. Listen and skip feed the
//! listener's seen-set.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use soundope_core::error::CoreError;
use soundope_core::types::DbId;
use soundope_db::models::track::{CreateTrack, Track, UpdateTrack};
use soundope_db::models::track_view::ViewAction;
use soundope_db::repositories::TrackRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireArtist;
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum length of a track title.
const MAX_TITLE_LEN: usize = 200;

fn validate_title(title: &str) -> AppResult<()> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Track title must not be empty".into(),
        )));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Track title must be at most {MAX_TITLE_LEN} characters"
        ))));
    }
    Ok(())
}

/// Fetch a track or fail with 404.
pub(crate) async fn find_track(state: &AppState, id: DbId) -> AppResult<Track> {
    TrackRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Track",
            id,
        }))
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// POST /api/v1/tracks
pub async fn create_track(
    RequireArtist(artist): RequireArtist,
    State(state): State<AppState>,
    Json(input): Json<CreateTrack>,
) -> AppResult<impl IntoResponse> {
    validate_title(&input.title)?;

    let track = TrackRepo::create(&state.pool, artist.user_id, &input).await?;

    tracing::info!(track_id = track.id, artist_id = artist.user_id, "Track created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: track })))
}

/// GET /api/v1/tracks/{id}
pub async fn get_track(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let track = find_track(&state, id).await?;
    Ok(Json(DataResponse { data: track }))
}

/// GET /api/v1/me/tracks
///
/// The caller's own uploads, newest first.
pub async fn list_my_tracks(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<impl IntoResponse> {
    let tracks =
        TrackRepo::list_by_artist(&state.pool, auth.user_id, params.include_inactive).await?;
    Ok(Json(DataResponse { data: tracks }))
}

/// PUT /api/v1/tracks/{id}
///
/// Only the owning artist may edit a track.
pub async fn update_track(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTrack>,
) -> AppResult<impl IntoResponse> {
    if let Some(title) = &input.title {
        validate_title(title)?;
    }

    let existing = find_track(&state, id).await?;
    if existing.artist_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the track's artist can edit it".into(),
        )));
    }

    let track = TrackRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Track",
            id,
        }))?;

    tracing::info!(track_id = id, user_id = auth.user_id, "Track updated");

    Ok(Json(DataResponse { data: track }))
}

/// DELETE /api/v1/tracks/{id}
///
/// Hard delete. Votes, boosts, and seen-set entries cascade.
pub async fn delete_track(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = find_track(&state, id).await?;
    auth.require_owner_or_admin(existing.artist_id)?;

    if !TrackRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Track",
            id,
        }));
    }

    tracing::info!(track_id = id, user_id = auth.user_id, "Track deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/tracks/{id}/deactivate
///
/// Soft removal. Idempotent: deactivating an inactive track succeeds.
pub async fn deactivate_track(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = find_track(&state, id).await?;
    auth.require_owner_or_admin(existing.artist_id)?;

    if TrackRepo::deactivate(&state.pool, id).await? {
        tracing::info!(track_id = id, user_id = auth.user_id, "Track deactivated");
    } else {
        tracing::debug!(track_id = id, "Track already inactive");
    }

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Listener actions
// ---------------------------------------------------------------------------

async fn record(
    auth: &AuthUser,
    state: &AppState,
    id: DbId,
    action: ViewAction,
) -> AppResult<Track> {
    let track = TrackRepo::record_view(&state.pool, auth.user_id, id, action)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Track",
            id,
        }))?;

    tracing::info!(
        track_id = id,
        user_id = auth.user_id,
        action = action.as_str(),
        total_listens = track.total_listens,
        "Track view recorded",
    );

    Ok(track)
}

/// POST /api/v1/tracks/{id}/listen
///
/// Count a listen and mark the track seen.
pub async fn listen(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let track = record(&auth, &state, id, ViewAction::Listen).await?;
    Ok(Json(DataResponse { data: track }))
}

/// POST /api/v1/tracks/{id}/skip
///
/// Mark the track seen without counting a listen.
pub async fn skip(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let track = record(&auth, &state, id, ViewAction::Skip).await?;
    Ok(Json(DataResponse { data: track }))
}
