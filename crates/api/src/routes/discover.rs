//! Route definitions for the discovery feed, mounted at `/discover`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::discovery;
use crate::state::AppState;

/// ```text
/// GET    /next       -> next_track
/// GET    /eligible   -> list_eligible
/// POST   /reset      -> reset_seen
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/next", get(discovery::next_track))
        .route("/eligible", get(discovery::list_eligible))
        .route("/reset", post(discovery::reset_seen))
}
