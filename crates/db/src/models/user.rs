//! User entity model and DTOs.
//!
//! Only the credit, vote-allowance, and discovery-preference fields live
//! here; profile data belongs to other services.

use serde::{Deserialize, Serialize};
use soundope_core::ledger::CreditBalances;
use soundope_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub role: String,
    pub standard_credits: i64,
    pub premium_credits: i64,
    pub monthly_votes_remaining: i32,
    pub votes_reset_at: Timestamp,
    pub excluded_genres: Vec<String>,
    pub excluded_moods: Vec<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub role: Option<String>,
    pub standard_credits: Option<i64>,
    pub premium_credits: Option<i64>,
    pub monthly_votes_remaining: Option<i32>,
    pub excluded_genres: Option<Vec<String>>,
    pub excluded_moods: Option<Vec<String>>,
}

/// Spendable balances for a single user.
#[derive(Debug, Clone, Copy, FromRow, Serialize)]
pub struct UserBalances {
    pub user_id: DbId,
    pub standard_credits: i64,
    pub premium_credits: i64,
    pub monthly_votes_remaining: i32,
}

impl UserBalances {
    pub fn credits(&self) -> CreditBalances {
        CreditBalances {
            standard: self.standard_credits,
            premium: self.premium_credits,
        }
    }
}

/// DTO for an admin credit grant. Amounts are added to the balances.
#[derive(Debug, Clone, Deserialize)]
pub struct GrantCredits {
    #[serde(default)]
    pub standard: i64,
    #[serde(default)]
    pub premium: i64,
}
