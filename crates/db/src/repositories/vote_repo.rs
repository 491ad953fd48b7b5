//! Repository for the `votes` table and the vote-casting transaction.

use soundope_core::error::CoreError;
use soundope_core::types::DbId;
use soundope_core::voting::plan_vote;
use sqlx::PgPool;

use crate::error::LedgerError;
use crate::models::vote::{CastVote, Vote, VoteReceipt};
use crate::retry::retry_once;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, track_id, voter_id, vote_count, vote_type, created_at, updated_at";

/// Provides vote lookups and the atomic cast operation.
pub struct VoteRepo;

impl VoteRepo {
    /// Find the vote `voter_id` holds on `track_id`, if any.
    pub async fn find(
        pool: &PgPool,
        track_id: DbId,
        voter_id: DbId,
    ) -> Result<Option<Vote>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM votes WHERE track_id = $1 AND voter_id = $2");
        sqlx::query_as::<_, Vote>(&query)
            .bind(track_id)
            .bind(voter_id)
            .fetch_optional(pool)
            .await
    }

    /// List all votes on a track, largest allocation first.
    pub async fn list_by_track(pool: &PgPool, track_id: DbId) -> Result<Vec<Vote>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM votes WHERE track_id = $1 \
             ORDER BY vote_count DESC, created_at ASC"
        );
        sqlx::query_as::<_, Vote>(&query)
            .bind(track_id)
            .fetch_all(pool)
            .await
    }

    /// Set the voter's allocation on a track to `input.count`.
    ///
    /// Creates the vote record or overwrites the existing one, moves the
    /// net change into the track's `total_votes`, and charges (or refunds)
    /// the voter's monthly votes, all in one transaction. A voter not yet
    /// refilled this month first receives `input.allowance`. Retried once
    /// on a concurrency conflict.
    pub async fn cast(pool: &PgPool, input: &CastVote) -> Result<VoteReceipt, LedgerError> {
        retry_once("cast_vote", || Self::cast_once(pool, input)).await
    }

    async fn cast_once(pool: &PgPool, input: &CastVote) -> Result<VoteReceipt, LedgerError> {
        let mut tx = pool.begin().await?;

        // A voter whose allowance predates this month is refilled before the charge.
        sqlx::query(
            "UPDATE users SET \
                monthly_votes_remaining = $2, \
                votes_reset_at = date_trunc('month', NOW()) \
             WHERE id = $1 AND votes_reset_at < date_trunc('month', NOW())",
        )
        .bind(input.voter_id)
        .bind(input.allowance)
        .execute(&mut *tx)
        .await?;

        // Locking the voter row serializes concurrent casts by the same voter.
        let (remaining,): (i32,) = sqlx::query_as(
            "SELECT monthly_votes_remaining FROM users \
             WHERE id = $1 AND is_active = true \
             FOR UPDATE",
        )
        .bind(input.voter_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: input.voter_id,
        })?;

        sqlx::query("SELECT id FROM tracks WHERE id = $1 AND is_active = true FOR UPDATE")
            .bind(input.track_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Track",
                id: input.track_id,
            })?;

        let previous: Option<(i32,)> = sqlx::query_as(
            "SELECT vote_count FROM votes \
             WHERE track_id = $1 AND voter_id = $2 \
             FOR UPDATE",
        )
        .bind(input.track_id)
        .bind(input.voter_id)
        .fetch_optional(&mut *tx)
        .await?;
        let previous = previous.map(|(count,)| count);

        let plan = plan_vote(previous, input.count, remaining, input.allowance)?;

        // The conflict branch only fires when the stored count still equals
        // the one the plan was computed from; otherwise no row comes back.
        let query = format!(
            "INSERT INTO votes (track_id, voter_id, vote_count, vote_type) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT ON CONSTRAINT uq_votes_track_voter DO UPDATE \
             SET vote_count = EXCLUDED.vote_count, vote_type = EXCLUDED.vote_type \
             WHERE votes.vote_count = $5 \
             RETURNING {COLUMNS}"
        );
        let vote = sqlx::query_as::<_, Vote>(&query)
            .bind(input.track_id)
            .bind(input.voter_id)
            .bind(input.count)
            .bind(&input.vote_type)
            .bind(previous)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| {
                CoreError::ConcurrentModification(format!(
                    "vote on track {} changed while casting",
                    input.track_id
                ))
            })?;

        let (track_total_votes,): (i64,) = sqlx::query_as(
            "UPDATE tracks SET total_votes = total_votes + $2 WHERE id = $1 RETURNING total_votes",
        )
        .bind(input.track_id)
        .bind(i64::from(plan.delta))
        .fetch_one(&mut *tx)
        .await?;

        let (monthly_votes_remaining,): (i32,) = sqlx::query_as(
            "UPDATE users SET monthly_votes_remaining = $2 \
             WHERE id = $1 \
             RETURNING monthly_votes_remaining",
        )
        .bind(input.voter_id)
        .bind(plan.remaining_after)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            track_id = input.track_id,
            voter_id = input.voter_id,
            vote_count = vote.vote_count,
            delta = plan.delta,
            created = plan.created,
            "Vote cast",
        );

        Ok(VoteReceipt {
            vote,
            delta: plan.delta,
            created: plan.created,
            track_total_votes,
            monthly_votes_remaining,
        })
    }
}
