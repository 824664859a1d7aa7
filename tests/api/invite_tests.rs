//! Invite API Tests

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::TestApp;

#[tokio::test]
async fn test_invite_lifecycle() {
    let app = TestApp::new();
    let group_id = app.create_group(1, "Trip").await;
    let code = app.create_invite(group_id, 1).await;
    assert_eq!(code.len(), 16);

    let (status, body) = app
        .post(
            &format!("/api/v1/invites/{code}/join"),
            json!({ "user_id": 2, "nickname": "Sam" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["group_id"], group_id);
    assert_eq!(body["nickname"], "Sam");
    assert!(app.is_member(group_id, 2).await);

    let (status, _) = app
        .post(&format!("/api/v1/invites/{code}/join"), json!({ "user_id": 2 }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let deactivate = format!("/api/v1/invites/{code}/deactivate");
    let (status, _) = app.delete(&deactivate, json!({ "requester_id": 3 })).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.delete(&deactivate, json!({ "requester_id": 1 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["invite_code"], code.as_str());

    let (status, body) = app
        .post(&format!("/api/v1/invites/{code}/join"), json!({ "user_id": 4 }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Invite has been deactivated");
    assert!(!app.is_member(group_id, 4).await);

    let (status, body) = app.get(&format!("/api/v1/invites/{code}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_active"], false);
    assert_eq!(body["uses"], 1);
}

#[tokio::test]
async fn test_only_creator_creates_invites() {
    let app = TestApp::new();
    let group_id = app.create_group(1, "Club").await;
    let uri = format!("/api/v1/groups/{group_id}/invites");

    let (status, _) = app.post(&uri, json!({ "creator_id": 2 })).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .post("/api/v1/groups/404/invites", json!({ "creator_id": 1 }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let past = Utc::now() - Duration::hours(1);
    let (status, _) = app
        .post(&uri, json!({ "creator_id": 1, "expires_at": past }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_active_invites() {
    let app = TestApp::new();
    let group_id = app.create_group(1, "Cinema").await;
    let first = app.create_invite(group_id, 1).await;
    let second = app.create_invite(group_id, 1).await;
    app.delete(
        &format!("/api/v1/invites/{first}/deactivate"),
        json!({ "requester_id": 1 }),
    )
    .await;

    let (status, body) = app
        .get(&format!("/api/v1/groups/{group_id}/invites"))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["invite_count"], 1);
    assert_eq!(body["invites"][0]["code"], second.as_str());
}

#[tokio::test]
async fn test_unknown_invite() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/v1/invites/doesnotexist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Invite not found");

    let (status, _) = app
        .post("/api/v1/invites/doesnotexist/join", json!({ "user_id": 2 }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_expired_invite_cannot_be_used() {
    let app = TestApp::new();
    let group_id = app.create_group(1, "Flash").await;
    let expires_at = Utc::now() + Duration::milliseconds(50);
    let (status, body) = app
        .post(
            &format!("/api/v1/groups/{group_id}/invites"),
            json!({ "creator_id": 1, "expires_at": expires_at }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let code = body["code"].as_str().unwrap().to_string();

    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    let (status, body) = app
        .post(&format!("/api/v1/invites/{code}/join"), json!({ "user_id": 2 }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Invite has expired");

    let (_, body) = app.get(&format!("/api/v1/invites/{code}")).await;
    assert_eq!(body["state"], "expired");
}

#[tokio::test]
async fn test_single_use_invite() {
    let app = TestApp::single_use();
    let group_id = app.create_group(1, "Seminar").await;
    let code = app.create_invite(group_id, 1).await;
    let join = format!("/api/v1/invites/{code}/join");

    // A rejected join does not consume the invite.
    let (status, _) = app.post(&join, json!({ "user_id": 1 })).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app.post(&join, json!({ "user_id": 2 })).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.post(&join, json!({ "user_id": 3 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_join_rejects_long_nickname() {
    let app = TestApp::new();
    let group_id = app.create_group(1, "Quiet").await;
    let code = app.create_invite(group_id, 1).await;

    let (status, _) = app
        .post(
            &format!("/api/v1/invites/{code}/join"),
            json!({ "user_id": 2, "nickname": "n".repeat(60) }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!app.is_member(group_id, 2).await);
}

#[tokio::test]
async fn test_join_outcomes_are_counted() {
    let app = TestApp::new();
    let group_id = app.create_group(1, "Counted").await;
    let code = app.create_invite(group_id, 1).await;
    app.post(&format!("/api/v1/invites/{code}/join"), json!({ "user_id": 2 }))
        .await;

    let (_, body) = app.get("/metrics").await;
    let text = body.as_str().unwrap();

    assert!(text.contains("group_planner_invite_joins_total"));
    assert!(text.contains("outcome=\"joined\""));
}

#[tokio::test]
async fn test_join_with_wrong_typed_user_id() {
    let app = TestApp::new();
    let group_id = app.create_group(1, "Typed").await;
    let code = app.create_invite(group_id, 1).await;

    let (status, body) = app
        .post(&format!("/api/v1/invites/{code}/join"), json!({ "user_id": "two" }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 10002);
    assert!(!app.is_member(group_id, 2).await);
}
