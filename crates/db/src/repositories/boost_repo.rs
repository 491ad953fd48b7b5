//! Repository for the append-only `boosts` table and the boost purchase
//! transaction.

use chrono::Utc;
use soundope_core::error::CoreError;
use soundope_core::ledger::{next_boost_expiry, plan_deduction, CreditBalances};
use soundope_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::error::LedgerError;
use crate::models::boost::{ApplyBoost, Boost, BoostReceipt};
use crate::models::track::Track;
use crate::retry::retry_once;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, track_id, artist_id, plan, credits_spent, premium_credits_used, \
    standard_credits_used, boost_duration_hours, boost_multiplier, expires_at, \
    created_at, updated_at";

/// Track columns returned after the boost is applied.
const TRACK_COLUMNS: &str = "id, artist_id, title, genre, mood, total_listens, total_votes, \
    boost_pool, boost_expires, is_active, created_at, updated_at";

/// Provides the boost log and the atomic purchase operation.
pub struct BoostRepo;

impl BoostRepo {
    /// List a track's boost purchases, newest first.
    pub async fn list_by_track(pool: &PgPool, track_id: DbId) -> Result<Vec<Boost>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM boosts WHERE track_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Boost>(&query)
            .bind(track_id)
            .fetch_all(pool)
            .await
    }

    /// Spend the requester's credits on a boost for one of their tracks.
    ///
    /// Deducts the plan cost from the user's balances, adds it to the
    /// track's `boost_pool`, moves `boost_expires`, and appends a boost log
    /// row, all in one transaction. Any rejection leaves every balance and
    /// counter untouched. Retried once on a concurrency conflict.
    pub async fn apply(pool: &PgPool, input: &ApplyBoost) -> Result<BoostReceipt, LedgerError> {
        retry_once("apply_boost", || Self::apply_once(pool, input)).await
    }

    async fn apply_once(pool: &PgPool, input: &ApplyBoost) -> Result<BoostReceipt, LedgerError> {
        let mut tx = pool.begin().await?;
        let now = Utc::now();

        // Lock order is always user row, then track row.
        let (standard, premium): (i64, i64) = sqlx::query_as(
            "SELECT standard_credits, premium_credits FROM users \
             WHERE id = $1 AND is_active = true \
             FOR UPDATE",
        )
        .bind(input.user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: input.user_id,
        })?;

        let (artist_id, boost_expires): (DbId, Option<Timestamp>) = sqlx::query_as(
            "SELECT artist_id, boost_expires FROM tracks \
             WHERE id = $1 AND is_active = true \
             FOR UPDATE",
        )
        .bind(input.track_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Track",
            id: input.track_id,
        })?;

        if artist_id != input.user_id {
            return Err(CoreError::Forbidden("Only the track's artist can boost it".into()).into());
        }

        let balances = CreditBalances { standard, premium };
        let cost = input.plan.credits_required;
        let deduction = plan_deduction(balances, cost, input.preference)?;
        let expires_at = next_boost_expiry(
            boost_expires,
            now,
            input.plan.duration_hours,
            input.stacking,
        );

        sqlx::query(
            "UPDATE users SET \
                standard_credits = standard_credits - $2, \
                premium_credits = premium_credits - $3 \
             WHERE id = $1",
        )
        .bind(input.user_id)
        .bind(deduction.standard_used)
        .bind(deduction.premium_used)
        .execute(&mut *tx)
        .await?;

        let track_query = format!(
            "UPDATE tracks SET boost_pool = boost_pool + $2, boost_expires = $3 \
             WHERE id = $1 \
             RETURNING {TRACK_COLUMNS}"
        );
        let track = sqlx::query_as::<_, Track>(&track_query)
            .bind(input.track_id)
            .bind(cost)
            .bind(expires_at)
            .fetch_one(&mut *tx)
            .await?;

        let boost_query = format!(
            "INSERT INTO boosts \
                (track_id, artist_id, plan, credits_spent, premium_credits_used, \
                 standard_credits_used, boost_duration_hours, boost_multiplier, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        let boost = sqlx::query_as::<_, Boost>(&boost_query)
            .bind(input.track_id)
            .bind(artist_id)
            .bind(input.plan.key)
            .bind(cost)
            .bind(deduction.premium_used)
            .bind(deduction.standard_used)
            .bind(input.plan.duration_hours)
            .bind(input.plan.multiplier)
            .bind(expires_at)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            track_id = input.track_id,
            user_id = input.user_id,
            plan = input.plan.key,
            credits_spent = cost,
            premium_used = deduction.premium_used,
            standard_used = deduction.standard_used,
            expires_at = %expires_at,
            "Boost applied",
        );

        Ok(BoostReceipt {
            boost,
            track,
            balances: balances.after(&deduction),
        })
    }
}
