//! Route definitions for tracks, mounted at `/tracks`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{boost, track, vote};
use crate::state::AppState;

/// ```text
/// POST   /                   -> create_track
/// GET    /{id}               -> get_track
/// PUT    /{id}               -> update_track
/// DELETE /{id}               -> delete_track
/// POST   /{id}/deactivate    -> deactivate_track
/// POST   /{id}/listen        -> listen
/// POST   /{id}/skip          -> skip
/// POST   /{id}/boost         -> apply_boost
/// GET    /{id}/boosts        -> list_boosts
/// POST   /{id}/vote          -> cast_vote
/// GET    /{id}/votes         -> list_votes
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(track::create_track))
        .route(
            "/{id}",
            get(track::get_track)
                .put(track::update_track)
                .delete(track::delete_track),
        )
        .route("/{id}/deactivate", post(track::deactivate_track))
        .route("/{id}/listen", post(track::listen))
        .route("/{id}/skip", post(track::skip))
        .route("/{id}/boost", post(boost::apply_boost))
        .route("/{id}/boosts", get(boost::list_boosts))
        .route("/{id}/vote", post(vote::cast_vote))
        .route("/{id}/votes", get(vote::list_votes))
}
