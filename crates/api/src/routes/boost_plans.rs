use axum::routing::get;
use axum::Router;

use crate::handlers::boost;
use crate::state::AppState;

/// Plan catalog, mounted at `/boost-plans`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(boost::list_plans))
}
