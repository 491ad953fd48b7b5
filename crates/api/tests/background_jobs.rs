//! Integration tests for the single-pass bodies of the background jobs.

mod common;

use chrono::{Duration, Utc};
use common::{create_track, create_user};
use soundope_api::background::{boost_expiry, vote_allowance};
use soundope_db::repositories::{TrackRepo, UserRepo};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn refill_restores_allowance_after_month_turns(pool: PgPool) {
    let listener = create_user(&pool, "listener", "listener").await;

    sqlx::query(
        "UPDATE users SET monthly_votes_remaining = 1, votes_reset_at = $2 WHERE id = $1",
    )
    .bind(listener.id)
    .bind(Utc::now() - Duration::days(40))
    .execute(&pool)
    .await
    .unwrap();

    assert_eq!(vote_allowance::refill_once(&pool, 25).await.unwrap(), 1);
    // A second pass in the same month is a no-op.
    assert_eq!(vote_allowance::refill_once(&pool, 25).await.unwrap(), 0);

    let listener = UserRepo::find_by_id(&pool, listener.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(listener.monthly_votes_remaining, 25);
    assert!(listener.votes_reset_at <= Utc::now());
    assert!(listener.votes_reset_at > Utc::now() - Duration::days(32));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sweep_zeroes_only_lapsed_pools(pool: PgPool) {
    let artist = create_user(&pool, "artist", "artist").await;
    let lapsed = create_track(&pool, artist.id, "Lapsed").await;
    let live = create_track(&pool, artist.id, "Live").await;

    let set_boost = "UPDATE tracks SET boost_pool = 20, boost_expires = $2 WHERE id = $1";
    sqlx::query(set_boost)
        .bind(lapsed.id)
        .bind(Utc::now() - Duration::minutes(5))
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query(set_boost)
        .bind(live.id)
        .bind(Utc::now() + Duration::hours(5))
        .execute(&pool)
        .await
        .unwrap();

    assert_eq!(boost_expiry::sweep_once(&pool).await.unwrap(), 1);

    let lapsed = TrackRepo::find_by_id(&pool, lapsed.id).await.unwrap().unwrap();
    let live = TrackRepo::find_by_id(&pool, live.id).await.unwrap().unwrap();
    assert_eq!(lapsed.boost_pool, 0);
    assert_eq!(live.boost_pool, 20);
}
