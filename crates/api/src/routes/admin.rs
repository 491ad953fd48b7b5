use axum::routing::post;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Admin routes, mounted at `/admin`. Every handler requires the admin role.
///
/// ```text
/// POST   /users/{id}/credits   -> grant_credits
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/users/{id}/credits", post(user::grant_credits))
}
