//! Membership API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::TestApp;

#[tokio::test]
async fn test_add_member_and_duplicate() {
    let app = TestApp::new();
    let group_id = app.create_group(1, "Hikers").await;
    let uri = format!("/api/v1/groups/{group_id}/members");

    let (status, body) = app.post(&uri, json!({ "user_id": 2 })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user_id"], 2);
    assert!(app.is_member(group_id, 2).await);

    let (status, body) = app.post(&uri, json!({ "user_id": 2 })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 10005);

    let (status, _) = app
        .post("/api/v1/groups/77/members", json!({ "user_id": 2 }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.post(&uri, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_members_requires_membership() {
    let app = TestApp::new();
    let group_id = app.create_group(1, "Readers").await;
    app.post(
        &format!("/api/v1/groups/{group_id}/members"),
        json!({ "user_id": 2 }),
    )
    .await;

    let (status, body) = app
        .get(&format!("/api/v1/groups/{group_id}/members?requester_id=2"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["member_count"], 2);

    let (status, _) = app
        .get(&format!("/api/v1/groups/{group_id}/members?requester_id=3"))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .get(&format!("/api/v1/groups/{group_id}/members"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_remove_member_rules() {
    let app = TestApp::new();
    let group_id = app.create_group(1, "Runners").await;
    let uri = format!("/api/v1/groups/{group_id}/members");
    app.post(&uri, json!({ "user_id": 2 })).await;
    app.post(&uri, json!({ "user_id": 3 })).await;

    // A member cannot remove someone else.
    let (status, _) = app
        .delete(&uri, json!({ "user_id": 3, "requester_id": 2 }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // A member can leave.
    let (status, body) = app
        .delete(&uri, json!({ "user_id": 2, "requester_id": 2 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], 2);
    assert!(!app.is_member(group_id, 2).await);

    // The creator can remove anyone.
    let (status, _) = app
        .delete(&uri, json!({ "user_id": 3, "requester_id": 1 }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .delete(&uri, json!({ "user_id": 3, "requester_id": 1 }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_nickname_round_trip() {
    let app = TestApp::new();
    let group_id = app.create_group(1, "Painters").await;
    app.post(
        &format!("/api/v1/groups/{group_id}/members"),
        json!({ "user_id": 2 }),
    )
    .await;
    let uri = format!("/api/v1/groups/{group_id}/members/nickname");

    let (status, body) = app
        .put(&uri, json!({ "user_id": 2, "requester_id": 2, "nickname": "Brush" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nickname"], "Brush");

    let (_, members) = app
        .get(&format!("/api/v1/groups/{group_id}/members?requester_id=1"))
        .await;
    let nickname = members["members"]
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["user_id"] == 2)
        .map(|m| m["nickname"].clone());
    assert_eq!(nickname, Some(json!("Brush")));

    let (status, _) = app
        .put(&uri, json!({ "user_id": 2, "requester_id": 3, "nickname": "Nope" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .delete(&uri, json!({ "user_id": 2, "requester_id": 1 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["nickname"].is_null());

    let (status, _) = app
        .put(&uri, json!({ "user_id": 9, "requester_id": 1, "nickname": "Ghost" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_nickname_too_long() {
    let app = TestApp::new();
    let group_id = app.create_group(1, "Poets").await;

    let (status, body) = app
        .put(
            &format!("/api/v1/groups/{group_id}/members/nickname"),
            json!({ "user_id": 1, "requester_id": 1, "nickname": "x".repeat(51) }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "nickname: Nickname cannot be longer than 50 characters"
    );
}

#[tokio::test]
async fn test_malformed_query_is_bad_request() {
    let app = TestApp::new();
    let group_id = app.create_group(1, "Typos").await;

    let (status, body) = app
        .get(&format!("/api/v1/groups/{group_id}/members?requester_id=abc"))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 10002);
    assert!(body["message"].is_string());
}
