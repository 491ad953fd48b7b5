use axum::routing::get;
use axum::Router;

use crate::handlers::{track, user};
use crate::state::AppState;

/// Caller-scoped routes, mounted at `/me`.
///
/// ```text
/// GET    /balances   -> my_balances
/// GET    /tracks     -> list_my_tracks
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/balances", get(user::my_balances))
        .route("/tracks", get(track::list_my_tracks))
}
