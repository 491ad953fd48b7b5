//! Repository for the `tracks` and `track_views` tables.

use soundope_core::discovery::DiscoveryCandidate;
use soundope_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::track::{CreateTrack, EligibleTrack, Track, UpdateTrack};
use crate::models::track_view::ViewAction;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, artist_id, title, genre, mood, total_listens, total_votes, \
    boost_pool, boost_expires, is_active, created_at, updated_at";

/// Columns of [`EligibleTrack`], qualified for the eligibility join.
const ELIGIBLE_COLUMNS: &str = "t.id, t.artist_id, t.title, t.genre, t.mood, \
    t.total_listens, t.boost_pool, t.boost_expires";

/// Eligibility join and filter for listener `$1`: active, not their own,
/// not in their seen-set, genre and mood not excluded.
const ELIGIBLE_FROM: &str = "FROM tracks t \
    JOIN users u ON u.id = $1 \
    WHERE t.is_active = true \
      AND t.artist_id <> $1 \
      AND NOT EXISTS ( \
          SELECT 1 FROM track_views v \
          WHERE v.user_id = $1 AND v.track_id = t.id \
      ) \
      AND (t.genre IS NULL OR NOT (t.genre = ANY(u.excluded_genres))) \
      AND (t.mood IS NULL OR NOT (t.mood = ANY(u.excluded_moods)))";

/// Provides CRUD, discovery, and seen-set operations for tracks.
pub struct TrackRepo;

impl TrackRepo {
    // ── Standard CRUD ────────────────────────────────────────────────

    /// Insert a new track owned by `artist_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        artist_id: DbId,
        input: &CreateTrack,
    ) -> Result<Track, sqlx::Error> {
        let query = format!(
            "INSERT INTO tracks (artist_id, title, genre, mood) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Track>(&query)
            .bind(artist_id)
            .bind(&input.title)
            .bind(&input.genre)
            .bind(&input.mood)
            .fetch_one(pool)
            .await
    }

    /// Find a track by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Track>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tracks WHERE id = $1");
        sqlx::query_as::<_, Track>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List an artist's tracks, newest first.
    pub async fn list_by_artist(
        pool: &PgPool,
        artist_id: DbId,
        include_inactive: bool,
    ) -> Result<Vec<Track>, sqlx::Error> {
        let query = if include_inactive {
            format!("SELECT {COLUMNS} FROM tracks WHERE artist_id = $1 ORDER BY created_at DESC")
        } else {
            format!(
                "SELECT {COLUMNS} FROM tracks \
                 WHERE artist_id = $1 AND is_active = true \
                 ORDER BY created_at DESC"
            )
        };
        sqlx::query_as::<_, Track>(&query)
            .bind(artist_id)
            .fetch_all(pool)
            .await
    }

    /// Update a track. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTrack,
    ) -> Result<Option<Track>, sqlx::Error> {
        let query = format!(
            "UPDATE tracks SET \
                title = COALESCE($2, title), \
                genre = COALESCE($3, genre), \
                mood = COALESCE($4, mood), \
                is_active = COALESCE($5, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Track>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.genre)
            .bind(&input.mood)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Deactivate a track (set is_active = false).
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE tracks SET is_active = false WHERE id = $1 AND is_active = true")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a track. Votes, boosts, and views cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tracks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ── Discovery ────────────────────────────────────────────────────

    /// Snapshot every track `user_id` may be served next, for the draw.
    ///
    /// Uncapped: only the selection-relevant columns are loaded, and every
    /// eligible track must stay drawable. Returns an empty list for unknown
    /// users.
    pub async fn list_candidates(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<DiscoveryCandidate>, sqlx::Error> {
        let query = format!(
            "SELECT t.id, t.boost_pool, t.total_listens, t.boost_expires \
             {ELIGIBLE_FROM} \
             ORDER BY t.id"
        );
        let rows = sqlx::query_as::<_, (DbId, i64, i64, Option<Timestamp>)>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(
                |(id, boost_pool, total_listens, boost_expires)| DiscoveryCandidate {
                    id,
                    boost_pool,
                    total_listens,
                    boost_expires,
                },
            )
            .collect())
    }

    /// Load one track if it is still eligible for `user_id`.
    pub async fn find_eligible(
        pool: &PgPool,
        user_id: DbId,
        track_id: DbId,
    ) -> Result<Option<EligibleTrack>, sqlx::Error> {
        let query = format!("SELECT {ELIGIBLE_COLUMNS} {ELIGIBLE_FROM} AND t.id = $2");
        sqlx::query_as::<_, EligibleTrack>(&query)
            .bind(user_id)
            .bind(track_id)
            .fetch_optional(pool)
            .await
    }

    /// List up to `limit` tracks `user_id` may be served next, by id.
    ///
    /// Excludes inactive tracks, the user's own uploads, anything already in
    /// the user's seen-set, and tracks whose genre or mood the user has
    /// excluded. Returns an empty list for unknown users.
    pub async fn list_eligible(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<EligibleTrack>, sqlx::Error> {
        let query = format!(
            "SELECT {ELIGIBLE_COLUMNS} {ELIGIBLE_FROM} \
             ORDER BY t.id \
             LIMIT $2"
        );
        sqlx::query_as::<_, EligibleTrack>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Add a track to the user's seen-set.
    ///
    /// A listen also increments `total_listens`. Both writes share one
    /// transaction. Returns `None` if the track does not exist or is
    /// inactive, in which case nothing is written.
    pub async fn record_view(
        pool: &PgPool,
        user_id: DbId,
        track_id: DbId,
        action: ViewAction,
    ) -> Result<Option<Track>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let track = if action == ViewAction::Listen {
            let query = format!(
                "UPDATE tracks SET total_listens = total_listens + 1 \
                 WHERE id = $1 AND is_active = true \
                 RETURNING {COLUMNS}"
            );
            sqlx::query_as::<_, Track>(&query)
                .bind(track_id)
                .fetch_optional(&mut *tx)
                .await?
        } else {
            let query =
                format!("SELECT {COLUMNS} FROM tracks WHERE id = $1 AND is_active = true");
            sqlx::query_as::<_, Track>(&query)
                .bind(track_id)
                .fetch_optional(&mut *tx)
                .await?
        };

        let Some(track) = track else {
            return Ok(None);
        };

        sqlx::query(
            "INSERT INTO track_views (user_id, track_id, action) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, track_id) DO UPDATE SET action = EXCLUDED.action",
        )
        .bind(user_id)
        .bind(track_id)
        .bind(action.as_str())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(track))
    }

    /// Clear the user's seen-set. Returns the number of entries removed.
    pub async fn reset_seen(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM track_views WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    // ── Boost maintenance ────────────────────────────────────────────

    /// Zero the boost pool of every track whose boost has lapsed by `now`.
    ///
    /// Returns the number of tracks reset.
    pub async fn reset_expired_boost_pools(
        pool: &PgPool,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE tracks SET boost_pool = 0 \
             WHERE boost_pool > 0 AND (boost_expires IS NULL OR boost_expires <= $1)",
        )
        .bind(now)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
