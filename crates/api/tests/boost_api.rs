//! HTTP-level tests for boost purchases and the plan catalog.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_track, create_user, create_user_with_credits, get_auth,
    post_json_auth, token_for,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn plan_catalog_lists_all_plans(pool: PgPool) {
    let user = create_user(&pool, "browser", "listener").await;
    let token = token_for(user.id, "listener");

    let response = get_auth(build_test_app(pool), "/api/v1/boost-plans", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let plans = json["data"].as_array().unwrap();
    assert_eq!(plans.len(), 3);
    assert_eq!(plans[0]["key"], "spark");
    assert_eq!(plans[0]["credits_required"], 10);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn boost_spends_premium_first_and_returns_receipt(pool: PgPool) {
    let artist = create_user_with_credits(&pool, "artist", 100, 4).await;
    let track = create_track(&pool, artist.id, "Boost Me").await;
    let token = token_for(artist.id, "artist");

    let response = post_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/tracks/{}/boost", track.id),
        &token,
        json!({ "plan": "spark" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["boost"]["credits_spent"], 10);
    assert_eq!(json["data"]["boost"]["premium_credits_used"], 4);
    assert_eq!(json["data"]["boost"]["standard_credits_used"], 6);
    assert_eq!(json["data"]["track"]["boost_pool"], 10);
    assert_eq!(json["data"]["balances"]["premium"], 0);
    assert_eq!(json["data"]["balances"]["standard"], 94);

    let balances = body_json(
        get_auth(build_test_app(pool.clone()), "/api/v1/me/balances", &token).await,
    )
    .await;
    assert_eq!(balances["data"]["standard_credits"], 94);
    assert_eq!(balances["data"]["premium_credits"], 0);

    let log = body_json(
        get_auth(
            build_test_app(pool),
            &format!("/api/v1/tracks/{}/boosts", track.id),
            &token,
        )
        .await,
    )
    .await;
    assert_eq!(log["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn standard_first_preference_is_honoured(pool: PgPool) {
    let artist = create_user_with_credits(&pool, "artist", 100, 40).await;
    let track = create_track(&pool, artist.id, "Thrifty").await;
    let token = token_for(artist.id, "artist");

    let response = post_json_auth(
        build_test_app(pool),
        &format!("/api/v1/tracks/{}/boost", track.id),
        &token,
        json!({ "plan": "surge", "preference": "standard_first" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["balances"]["standard"], 75);
    assert_eq!(json["data"]["balances"]["premium"], 40);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn insufficient_credits_returns_402_and_writes_nothing(pool: PgPool) {
    let artist = create_user_with_credits(&pool, "artist", 5, 4).await;
    let track = create_track(&pool, artist.id, "Broke").await;
    let token = token_for(artist.id, "artist");

    let response = post_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/tracks/{}/boost", track.id),
        &token,
        json!({ "plan": "spark" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
    assert_eq!(body_json(response).await["code"], "INSUFFICIENT_CREDITS");

    let balances = body_json(
        get_auth(build_test_app(pool), "/api/v1/me/balances", &token).await,
    )
    .await;
    assert_eq!(balances["data"]["standard_credits"], 5);
    assert_eq!(balances["data"]["premium_credits"], 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_plan_returns_400(pool: PgPool) {
    let artist = create_user_with_credits(&pool, "artist", 100, 0).await;
    let track = create_track(&pool, artist.id, "Track").await;
    let token = token_for(artist.id, "artist");

    let response = post_json_auth(
        build_test_app(pool),
        &format!("/api/v1/tracks/{}/boost", track.id),
        &token,
        json!({ "plan": "mega" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn boosting_another_artists_track_returns_403(pool: PgPool) {
    let owner = create_user(&pool, "owner", "artist").await;
    let rival = create_user_with_credits(&pool, "rival", 100, 0).await;
    let track = create_track(&pool, owner.id, "Not Yours").await;
    let token = token_for(rival.id, "artist");

    let response = post_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/tracks/{}/boost", track.id),
        &token,
        json!({ "plan": "spark" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The rival cannot read the owner's boost log either.
    let response = get_auth(
        build_test_app(pool),
        &format!("/api/v1/tracks/{}/boosts", track.id),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn boosting_missing_track_returns_404(pool: PgPool) {
    let artist = create_user_with_credits(&pool, "artist", 100, 0).await;
    let token = token_for(artist.id, "artist");

    let response = post_json_auth(
        build_test_app(pool),
        "/api/v1/tracks/123456/boost",
        &token,
        json!({ "plan": "spark" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Admin credit grants
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_grants_credits(pool: PgPool) {
    let admin = create_user(&pool, "admin", "admin").await;
    let artist = create_user(&pool, "artist", "artist").await;
    let token = token_for(admin.id, "admin");

    let response = post_json_auth(
        build_test_app(pool),
        &format!("/api/v1/admin/users/{}/credits", artist.id),
        &token,
        json!({ "standard": 50, "premium": 5 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["user_id"], artist.id);
    assert_eq!(json["data"]["standard_credits"], 50);
    assert_eq!(json["data"]["premium_credits"], 5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_admin_cannot_grant_credits(pool: PgPool) {
    let artist = create_user(&pool, "artist", "artist").await;
    let token = token_for(artist.id, "artist");

    let response = post_json_auth(
        build_test_app(pool),
        &format!("/api/v1/admin/users/{}/credits", artist.id),
        &token,
        json!({ "standard": 1000 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn negative_grant_is_rejected(pool: PgPool) {
    let admin = create_user(&pool, "admin", "admin").await;
    let artist = create_user(&pool, "artist", "artist").await;
    let token = token_for(admin.id, "admin");

    let response = post_json_auth(
        build_test_app(pool),
        &format!("/api/v1/admin/users/{}/credits", artist.id),
        &token,
        json!({ "standard": -5 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
