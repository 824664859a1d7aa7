//! Group API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::TestApp;

#[tokio::test]
async fn test_create_group_makes_creator_a_member() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/api/v1/groups",
            json!({
                "creator_id": 1,
                "name": "Summer trip",
                "start_date": "2025-07-01",
                "end_date": "2025-07-14",
                "description": "Two weeks by the sea",
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);
    assert_eq!(body["creator_id"], 1);
    assert_eq!(body["member_count"], 1);
    assert_eq!(body["end_date"], "2025-07-14");
    assert!(app.is_member(1, 1).await);
}

#[tokio::test]
async fn test_create_group_requires_fields() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/api/v1/groups", json!({ "creator_id": 1, "name": "No end" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 10002);

    let (status, body) = app
        .post("/api/v1/groups", json!({ "name": "Nobody", "end_date": "2025-01-01" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "creator_id: creator_id is required");
}

#[tokio::test]
async fn test_get_group_members_only() {
    let app = TestApp::new();
    let group_id = app.create_group(1, "Choir").await;

    let (status, body) = app
        .get(&format!("/api/v1/groups/{group_id}?requester_id=1"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Choir");

    let (status, _) = app
        .get(&format!("/api/v1/groups/{group_id}?requester_id=2"))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.get("/api/v1/groups/99?requester_id=1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get("/api/v1/groups/abc?requester_id=1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_group_refuses_rename() {
    let app = TestApp::new();
    let group_id = app.create_group(1, "Chess").await;
    let uri = format!("/api/v1/groups/{group_id}");

    let (status, body) = app.put(&uri, json!({ "name": "Checkers" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Name field cannot be updated");

    let (status, body) = app
        .put(&uri, json!({ "description": "Weekly games", "end_date": "2025-07-31" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Chess");
    assert_eq!(body["description"], "Weekly games");
    assert_eq!(body["end_date"], "2025-07-31");

    let (status, _) = app.put(&uri, json!({ "end_date": "2025-01-01" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.put("/api/v1/groups/42", json!({ "image": "x.png" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_group_cascades() {
    let app = TestApp::new();
    let group_id = app.create_group(1, "Band").await;
    let code = app.create_invite(group_id, 1).await;
    let uri = format!("/api/v1/groups/{group_id}");

    let (status, _) = app.delete(&uri, json!({ "creator_id": 2 })).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.delete(&uri, json!({ "creator_id": 1 })).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = app.get(&format!("{uri}?requester_id=1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.get(&format!("/api/v1/invites/{code}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, body) = app.get("/api/v1/users/1/groups").await;
    assert_eq!(body["group_count"], 0);

    let (status, _) = app.delete(&uri, json!({ "creator_id": 1 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // IDs are not reused after deletion.
    assert_eq!(app.create_group(1, "Band again").await, group_id + 1);
}

#[tokio::test]
async fn test_list_user_groups() {
    let app = TestApp::new();
    let first = app.create_group(1, "First").await;
    let second = app.create_group(2, "Second").await;
    app.post(
        &format!("/api/v1/groups/{second}/members"),
        json!({ "user_id": 1 }),
    )
    .await;

    let (status, body) = app.get("/api/v1/users/1/groups").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["group_count"], 2);
    let ids: Vec<i64> = body["groups"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![first, second]);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/api/v1/groups",
            json!({ "creator_id": 1, "name": "Dates", "end_date": "31/12/2025" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 10002);
    assert!(body["message"].as_str().unwrap().contains("end_date"));

    let (status, body) = app.put("/api/v1/groups/1", json!({ "image": 7 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 10002);
}
