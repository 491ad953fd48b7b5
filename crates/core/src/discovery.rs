//! Weighted discovery selection.
//!
//! Picks the next track to present to a listener from a pool of eligible
//! candidates. Boosted tracks are favoured, but every candidate keeps a
//! non-zero chance of being drawn, and the boost's influence shrinks as the
//! track accumulates organic listens.

use rand::Rng;
use serde::Serialize;

use crate::ledger::BoostPoolPolicy;
use crate::types::{DbId, Timestamp};

/// Weight every candidate starts with, before any boost is applied.
pub const BASE_WEIGHT: f64 = 1.0;

// ---------------------------------------------------------------------------
// Candidates
// ---------------------------------------------------------------------------

/// Anything that can be fed into [`select_weighted`].
pub trait Weighted {
    /// Credits currently applied to the candidate.
    fn boost_pool(&self) -> i64;
    /// Lifetime play count.
    fn total_listens(&self) -> i64;

    /// Selection weight derived from [`selection_weight`].
    fn weight(&self) -> f64 {
        selection_weight(self.boost_pool(), self.total_listens())
    }
}

/// Minimal snapshot of a track's selection-relevant state.
///
/// The draw loads one of these per eligible track, uncapped, so every
/// eligible track keeps a non-zero chance however large the pool grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiscoveryCandidate {
    pub id: DbId,
    pub boost_pool: i64,
    pub total_listens: i64,
    pub boost_expires: Option<Timestamp>,
}

impl DiscoveryCandidate {
    /// Replace the stored pool with the one that counts under `policy`.
    pub fn apply_pool_policy(&mut self, now: Timestamp, policy: BoostPoolPolicy) {
        self.boost_pool = effective_boost_pool(self.boost_pool, self.boost_expires, now, policy);
    }
}

impl Weighted for DiscoveryCandidate {
    fn boost_pool(&self) -> i64 {
        self.boost_pool
    }

    fn total_listens(&self) -> i64 {
        self.total_listens
    }
}

// ---------------------------------------------------------------------------
// Weight policy
// ---------------------------------------------------------------------------

/// Compute `1 + boost_pool / max(total_listens, 1)`.
///
/// Listens are clamped to 1 so unplayed tracks do not divide by zero.
/// A negative pool is treated as empty.
pub fn selection_weight(boost_pool: i64, total_listens: i64) -> f64 {
    let pool = boost_pool.max(0) as f64;
    let listens = total_listens.max(1) as f64;
    BASE_WEIGHT + pool / listens
}

/// Boost pool that should count toward selection under `policy`.
///
/// With [`BoostPoolPolicy::ResetOnExpiry`] a track whose boost has lapsed
/// (or was never boosted) contributes nothing, even if the expiry sweeper
/// has not yet zeroed the stored pool.
pub fn effective_boost_pool(
    boost_pool: i64,
    boost_expires: Option<Timestamp>,
    now: Timestamp,
    policy: BoostPoolPolicy,
) -> i64 {
    match policy {
        BoostPoolPolicy::Permanent => boost_pool,
        BoostPoolPolicy::ResetOnExpiry => match boost_expires {
            Some(expires) if now < expires => boost_pool,
            _ => 0,
        },
    }
}

/// Whether a boost is active at `now`.
pub fn is_boost_active(boost_expires: Option<Timestamp>, now: Timestamp) -> bool {
    boost_expires.is_some_and(|expires| now < expires)
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Roulette-wheel selection over `candidates`.
///
/// Returns `None` when the pool is empty; callers treat that as "nothing
/// left to discover" and typically reset the listener's seen-set.
pub fn select_weighted<'a, T, R>(candidates: &'a [T], rng: &mut R) -> Option<&'a T>
where
    T: Weighted,
    R: Rng + ?Sized,
{
    if candidates.is_empty() {
        return None;
    }

    let total: f64 = candidates.iter().map(Weighted::weight).sum();
    let draw = rng.random_range(0.0..total);
    select_at(candidates, draw)
}

/// Walk the candidates until the running weight exceeds `draw`.
///
/// Falls back to the last candidate if accumulated rounding error lets the
/// walk finish without crossing the threshold.
fn select_at<T: Weighted>(candidates: &[T], draw: f64) -> Option<&T> {
    let mut running = 0.0;
    for candidate in candidates {
        running += candidate.weight();
        if running > draw {
            return Some(candidate);
        }
    }
    candidates.last()
}
