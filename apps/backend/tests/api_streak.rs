//! Streak snapshot API tests.
//!
//! These tests require a running PostgreSQL database.

mod common;

use axum::http::{header::AUTHORIZATION, StatusCode};
use axum_test::TestServer;
use pretty_assertions::assert_eq;

use common::fixtures;
use common::TestContext;

#[tokio::test]
#[ignore = "requires database"]
async fn test_new_user_has_empty_streak() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user(None).await;

    let response = server
        .get(&format!("/api/users/{user_id}/streak"))
        .add_header(AUTHORIZATION, TestContext::auth_header_value(&token))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["streak_count"], 0);
    assert_eq!(body["best_streak"], 0);
    assert!(body["last_session_date"].is_null());

    ctx.cleanup_user(user_id).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_consecutive_days_extend_streak() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user(None).await;
    let auth = TestContext::auth_header_value(&token);

    for (day, hour) in [(11, 9), (12, 23), (12, 7), (13, 0)] {
        server
            .post(&format!("/api/users/{user_id}/sessions"))
            .add_header(AUTHORIZATION, auth.clone())
            .json(&fixtures::session_request(
                fixtures::local_time(-5, (2024, 3, day), (hour, 15)),
                10,
                8,
            ))
            .await
            .assert_status_ok();
    }

    let response = server
        .get(&format!("/api/users/{user_id}/streak"))
        .add_header(AUTHORIZATION, auth.clone())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["streak_count"], 3);
    assert_eq!(body["best_streak"], 3);
    // 00:15 on the 13th at -05:00 is the latest instant submitted.
    assert_eq!(body["last_session_date"], "2024-03-13T05:15:00Z");

    ctx.cleanup_user(user_id).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_gap_resets_streak_but_keeps_best() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user(None).await;
    let auth = TestContext::auth_header_value(&token);

    for day in [1, 2, 3, 6] {
        server
            .post(&format!("/api/users/{user_id}/sessions"))
            .add_header(AUTHORIZATION, auth.clone())
            .json(&fixtures::session_request(
                fixtures::local_time(0, (2024, 5, day), (12, 0)),
                5,
                5,
            ))
            .await
            .assert_status_ok();
    }

    let body: serde_json::Value = server
        .get(&format!("/api/users/{user_id}/streak"))
        .add_header(AUTHORIZATION, auth.clone())
        .await
        .json();
    assert_eq!(body["streak_count"], 1);
    assert_eq!(body["best_streak"], 3);

    ctx.cleanup_user(user_id).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_other_users_streak_is_not_found() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user(None).await;
    let (other_id, _) = ctx.create_test_user(None).await;

    let response = server
        .get(&format!("/api/users/{other_id}/streak"))
        .add_header(AUTHORIZATION, TestContext::auth_header_value(&token))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);

    ctx.cleanup_user(user_id).await;
    ctx.cleanup_user(other_id).await;
}
