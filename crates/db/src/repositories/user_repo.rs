//! Repository for the `users` table.

use soundope_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::user::{CreateUser, GrantCredits, User, UserBalances};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, role, standard_credits, premium_credits, \
    monthly_votes_remaining, votes_reset_at, excluded_genres, excluded_moods, \
    is_active, created_at, updated_at";

/// Column list for [`UserBalances`].
const BALANCE_COLUMNS: &str =
    "id AS user_id, standard_credits, premium_credits, monthly_votes_remaining";

/// Provides user lookups and balance maintenance.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// Without an explicit `monthly_votes_remaining` the user starts with no
    /// votes and a reset date in the past, so the configured allowance is
    /// granted on first use. An explicit value counts as this month's refill.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users \
                (username, role, standard_credits, premium_credits, monthly_votes_remaining, \
                 votes_reset_at, excluded_genres, excluded_moods) \
             VALUES ($1, COALESCE($2, 'listener'), COALESCE($3, 0), COALESCE($4, 0), \
                     COALESCE($5::integer, 0), \
                     CASE WHEN $5::integer IS NULL THEN 'epoch'::timestamptz \
                          ELSE date_trunc('month', NOW()) END, \
                     COALESCE($6, '{{}}'), COALESCE($7, '{{}}')) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.role)
            .bind(input.standard_credits)
            .bind(input.premium_credits)
            .bind(input.monthly_votes_remaining)
            .bind(&input.excluded_genres)
            .bind(&input.excluded_moods)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Read a user's current credit and vote balances.
    pub async fn find_balances(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<UserBalances>, sqlx::Error> {
        let query = format!("SELECT {BALANCE_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserBalances>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Add credits to a user's balances.
    ///
    /// Negative amounts are rejected by the `ck_users_*_credits` constraints
    /// if they would drive a balance below zero. Returns `None` if the user
    /// does not exist.
    pub async fn grant_credits(
        pool: &PgPool,
        id: DbId,
        input: &GrantCredits,
    ) -> Result<Option<UserBalances>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET \
                standard_credits = standard_credits + $2, \
                premium_credits = premium_credits + $3 \
             WHERE id = $1 \
             RETURNING {BALANCE_COLUMNS}"
        );
        sqlx::query_as::<_, UserBalances>(&query)
            .bind(id)
            .bind(input.standard)
            .bind(input.premium)
            .fetch_optional(pool)
            .await
    }

    /// Refill one user's monthly votes if their last reset predates the
    /// current calendar month. Returns `true` if a refill happened.
    pub async fn refill_votes_if_due(
        pool: &PgPool,
        id: DbId,
        allowance: i32,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET \
                monthly_votes_remaining = $2, \
                votes_reset_at = date_trunc('month', NOW()) \
             WHERE id = $1 AND votes_reset_at < date_trunc('month', NOW())",
        )
        .bind(id)
        .bind(allowance)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Refill the monthly vote allowance of every user whose last reset
    /// predates the calendar month containing `now`.
    ///
    /// Returns the number of users refilled.
    pub async fn reset_monthly_votes(
        pool: &PgPool,
        allowance: i32,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET \
                monthly_votes_remaining = $1, \
                votes_reset_at = date_trunc('month', $2::timestamptz) \
             WHERE votes_reset_at < date_trunc('month', $2::timestamptz)",
        )
        .bind(allowance)
        .bind(now)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
