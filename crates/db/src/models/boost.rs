//! Boost log model and ledger DTOs.

use serde::Serialize;
use soundope_core::boost_plan::BoostPlan;
use soundope_core::ledger::{BoostStacking, CreditBalances, CreditPreference};
use soundope_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::track::Track;

/// A row from the append-only `boosts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Boost {
    pub id: DbId,
    pub track_id: DbId,
    pub artist_id: DbId,
    pub plan: String,
    pub credits_spent: i64,
    pub premium_credits_used: i64,
    pub standard_credits_used: i64,
    pub boost_duration_hours: i32,
    pub boost_multiplier: f64,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for `BoostRepo::apply`.
#[derive(Debug, Clone)]
pub struct ApplyBoost {
    pub track_id: DbId,
    /// The requesting user; must own the track.
    pub user_id: DbId,
    pub plan: BoostPlan,
    pub preference: CreditPreference,
    pub stacking: BoostStacking,
}

/// Everything a successful boost changed.
#[derive(Debug, Clone, Serialize)]
pub struct BoostReceipt {
    pub boost: Boost,
    pub track: Track,
    pub balances: CreditBalances,
}
