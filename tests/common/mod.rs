//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use group_planner::config::Settings;
use group_planner::startup::{build_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Test application backed by fresh in-memory storage
pub struct TestApp {
    pub router: Router,
}

impl TestApp {
    /// Create a new test application with default settings
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    /// Create a test application with single-use invites
    pub fn single_use() -> Self {
        let mut settings = Settings::default();
        settings.invites.single_use = true;
        Self::with_settings(settings)
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            router: build_router(AppState::new(&settings)),
        }
    }

    /// Send a request and decode the JSON body (`Value::Null` when empty)
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request("GET", uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("POST", uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("PUT", uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("DELETE", uri, Some(body)).await
    }

    /// Create a group owned by `creator_id` and return its ID
    pub async fn create_group(&self, creator_id: i64, name: &str) -> i64 {
        let (status, body) = self
            .post(
                "/api/v1/groups",
                json!({
                    "creator_id": creator_id,
                    "name": name,
                    "start_date": "2025-06-01",
                    "end_date": "2025-06-30",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }

    /// Create a never-expiring invite and return its code
    pub async fn create_invite(&self, group_id: i64, creator_id: i64) -> String {
        let (status, body) = self
            .post(
                &format!("/api/v1/groups/{group_id}/invites"),
                json!({ "creator_id": creator_id }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["code"].as_str().unwrap().to_string()
    }

    /// Whether `user_id` is listed among the members of `group_id`
    pub async fn is_member(&self, group_id: i64, user_id: i64) -> bool {
        let (status, body) = self
            .get(&format!(
                "/api/v1/groups/{group_id}/members?requester_id={user_id}"
            ))
            .await;
        status == StatusCode::OK
            && body["members"]
                .as_array()
                .is_some_and(|members| members.iter().any(|m| m["user_id"] == user_id))
    }
}
