//! Vote entity model and ledger DTOs.

use serde::Serialize;
use soundope_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `votes` table. At most one per (track, voter).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vote {
    pub id: DbId,
    pub track_id: DbId,
    pub voter_id: DbId,
    pub vote_count: i32,
    pub vote_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for `VoteRepo::cast`.
#[derive(Debug, Clone)]
pub struct CastVote {
    pub track_id: DbId,
    pub voter_id: DbId,
    /// The voter's new total allocation on the track.
    pub count: i32,
    pub vote_type: String,
    /// Monthly allowance; used for a pending refill and to cap refunds.
    pub allowance: i32,
}

/// Everything a successful vote changed.
#[derive(Debug, Clone, Serialize)]
pub struct VoteReceipt {
    pub vote: Vote,
    /// Net change applied to the track's `total_votes`.
    pub delta: i32,
    pub created: bool,
    pub track_total_votes: i64,
    pub monthly_votes_remaining: i32,
}
