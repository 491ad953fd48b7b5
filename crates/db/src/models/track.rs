//! Track entity model and DTOs.

use serde::{Deserialize, Serialize};
use soundope_core::discovery::{effective_boost_pool, Weighted};
use soundope_core::ledger::BoostPoolPolicy;
use soundope_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `tracks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Track {
    pub id: DbId,
    pub artist_id: DbId,
    pub title: String,
    pub genre: Option<String>,
    pub mood: Option<String>,
    pub total_listens: i64,
    pub total_votes: i64,
    pub boost_pool: i64,
    pub boost_expires: Option<Timestamp>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new track. The artist is the authenticated uploader.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTrack {
    pub title: String,
    pub genre: Option<String>,
    pub mood: Option<String>,
}

/// DTO for updating an existing track. All fields optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTrack {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub mood: Option<String>,
    pub is_active: Option<bool>,
}

/// A track a listener may be served next.
///
/// Produced by `TrackRepo::list_eligible`, already filtered by active flag,
/// ownership, the listener's seen-set, and excluded genres and moods.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EligibleTrack {
    pub id: DbId,
    pub artist_id: DbId,
    pub title: String,
    pub genre: Option<String>,
    pub mood: Option<String>,
    pub total_listens: i64,
    pub boost_pool: i64,
    pub boost_expires: Option<Timestamp>,
}

impl EligibleTrack {
    /// Replace the stored pool with the one that counts under `policy`.
    pub fn apply_pool_policy(&mut self, now: Timestamp, policy: BoostPoolPolicy) {
        self.boost_pool = effective_boost_pool(self.boost_pool, self.boost_expires, now, policy);
    }
}

impl Weighted for EligibleTrack {
    fn boost_pool(&self) -> i64 {
        self.boost_pool
    }

    fn total_listens(&self) -> i64 {
        self.total_listens
    }
}
