//! Credit ledger policy for boost purchases.
//!
//! Decides how a purchase is split across a user's two credit pools and how
//! a boost changes a track's expiry. The `db` crate applies the result
//! inside a single transaction.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Balances and deduction
// ---------------------------------------------------------------------------

/// A user's spendable credit balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CreditBalances {
    /// Credits earned through platform activity.
    pub standard: i64,
    /// Purchased credits.
    pub premium: i64,
}

impl CreditBalances {
    pub fn total(&self) -> i64 {
        self.standard + self.premium
    }

    /// Balances after `deduction` has been taken out.
    pub fn after(&self, deduction: &Deduction) -> CreditBalances {
        CreditBalances {
            standard: self.standard - deduction.standard_used,
            premium: self.premium - deduction.premium_used,
        }
    }
}

/// Which credit pool a purchase draws from first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditPreference {
    #[default]
    PremiumFirst,
    StandardFirst,
}

/// How many credits to take from each pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Deduction {
    pub premium_used: i64,
    pub standard_used: i64,
}

impl Deduction {
    pub fn total(&self) -> i64 {
        self.premium_used + self.standard_used
    }
}

/// Split `cost` across the two pools.
///
/// The preferred pool is drained first, up to `cost`; the shortfall comes
/// from the other pool. Fails without a partial deduction if the other pool
/// cannot cover the shortfall.
pub fn plan_deduction(
    balances: CreditBalances,
    cost: i64,
    preference: CreditPreference,
) -> Result<Deduction, CoreError> {
    if cost <= 0 {
        return Err(CoreError::Validation(format!(
            "Boost cost must be positive, got {cost}"
        )));
    }

    let (first_balance, second_balance) = match preference {
        CreditPreference::PremiumFirst => (balances.premium, balances.standard),
        CreditPreference::StandardFirst => (balances.standard, balances.premium),
    };

    let first_used = first_balance.max(0).min(cost);
    let second_used = cost - first_used;

    if second_balance < second_used {
        return Err(CoreError::InsufficientCredits {
            required: cost,
            available: balances.total().max(0),
        });
    }

    Ok(match preference {
        CreditPreference::PremiumFirst => Deduction {
            premium_used: first_used,
            standard_used: second_used,
        },
        CreditPreference::StandardFirst => Deduction {
            premium_used: second_used,
            standard_used: first_used,
        },
    })
}

// ---------------------------------------------------------------------------
// Boost policies
// ---------------------------------------------------------------------------

/// What a new boost does to a track whose previous boost is still active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoostStacking {
    /// Add the new duration on top of the remaining active window.
    #[default]
    Extend,
    /// Start a fresh window from now, discarding the remaining time.
    Replace,
}

impl BoostStacking {
    /// Parse a configuration value (`extend` or `replace`).
    pub fn from_str_config(s: &str) -> Result<Self, CoreError> {
        match s {
            "extend" => Ok(Self::Extend),
            "replace" => Ok(Self::Replace),
            _ => Err(CoreError::Validation(format!(
                "Invalid boost stacking '{s}'. Must be one of: extend, replace"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Extend => "extend",
            Self::Replace => "replace",
        }
    }
}

/// Whether a track's accumulated boost pool outlives its boost window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoostPoolPolicy {
    /// The pool is a permanent investment and keeps weighting selection.
    #[default]
    Permanent,
    /// The pool is zeroed once `boost_expires` has passed.
    ResetOnExpiry,
}

impl BoostPoolPolicy {
    /// Parse a configuration value (`permanent` or `reset_on_expiry`).
    pub fn from_str_config(s: &str) -> Result<Self, CoreError> {
        match s {
            "permanent" => Ok(Self::Permanent),
            "reset_on_expiry" => Ok(Self::ResetOnExpiry),
            _ => Err(CoreError::Validation(format!(
                "Invalid boost pool policy '{s}'. Must be one of: permanent, reset_on_expiry"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Permanent => "permanent",
            Self::ResetOnExpiry => "reset_on_expiry",
        }
    }
}

/// Compute a track's boost expiry after a purchase of `duration_hours`.
pub fn next_boost_expiry(
    existing: Option<Timestamp>,
    now: Timestamp,
    duration_hours: i32,
    stacking: BoostStacking,
) -> Timestamp {
    let duration = Duration::hours(i64::from(duration_hours));
    match stacking {
        BoostStacking::Extend => existing.unwrap_or(now).max(now) + duration,
        BoostStacking::Replace => now + duration,
    }
}
