pub mod admin;
pub mod boost_plans;
pub mod discover;
pub mod health;
pub mod me;
pub mod tracks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /discover/next                     weighted draw (GET)
/// /discover/eligible                 eligible pool with weights (GET)
/// /discover/reset                    clear seen-set (POST)
///
/// /tracks                            upload metadata (POST, artist)
/// /tracks/{id}                       get, update (owner), delete (owner/admin)
/// /tracks/{id}/deactivate            soft remove (POST, owner/admin)
/// /tracks/{id}/listen                count listen, mark seen (POST)
/// /tracks/{id}/skip                  mark seen (POST)
/// /tracks/{id}/boost                 purchase boost (POST, owner)
/// /tracks/{id}/boosts                boost log (GET, owner/admin)
/// /tracks/{id}/vote                  set vote allocation (POST)
/// /tracks/{id}/votes                 vote records (GET)
///
/// /boost-plans                       plan catalog (GET)
///
/// /me/balances                       credits and remaining votes (GET)
/// /me/tracks                         own uploads (GET)
///
/// /admin/users/{id}/credits          grant credits (POST, admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/discover", discover::router())
        .nest("/tracks", tracks::router())
        .nest("/boost-plans", boost_plans::router())
        .nest("/me", me::router())
        .nest("/admin", admin::router())
}
