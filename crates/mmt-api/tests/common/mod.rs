#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{DateTime, TimeZone, Utc};
use http_body_util::BodyExt;
use mmt_api::{config::Environment, router, state::ApiState};
use mmt_core::{FixedClock, MethodRegistry, PracticeConfig, SkillRegistry};
use mmt_store::InMemoryProgressStore;
use serde::Deserialize;
use tower::ServiceExt;

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 2, 15, 0, 0).unwrap()
}

/// Test state builder with an in-memory store and a pinned clock
pub struct TestStateBuilder {
    practice: PracticeConfig,
    clock: Arc<FixedClock>,
}

impl TestStateBuilder {
    pub fn new() -> Self {
        Self {
            practice: PracticeConfig::default(),
            clock: Arc::new(FixedClock::new(start_time())),
        }
    }

    pub fn with_practice(mut self, practice: PracticeConfig) -> Self {
        self.practice = practice;
        self
    }

    pub fn with_clock(mut self, clock: Arc<FixedClock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn build(self) -> ApiState {
        ApiState {
            store: Arc::new(Mutex::new(InMemoryProgressStore::default())),
            skills: Arc::new(SkillRegistry::with_default_skills()),
            methods: Arc::new(MethodRegistry::with_default_methods()),
            clock: self.clock,
            practice: self.practice,
            environment: Environment::Development,
        }
    }
}

impl Default for TestStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Router wired to a fresh default state
pub fn test_client() -> TestClient {
    TestClient::new(router::router().with_state(TestStateBuilder::new().build()))
}

/// Helper to make requests to the test app
pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Send a request and get the response
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        TestResponse {
            status,
            body: body_bytes.to_vec(),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }

    /// Send a POST request with JSON body
    pub async fn post_json<T: serde::Serialize>(&self, uri: &str, body: &T) -> TestResponse {
        let json_body = serde_json::to_string(body).expect("Failed to serialize body");

        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json_body))
            .expect("Failed to build request");

        self.request(request).await
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("Response body is not valid UTF-8")
    }

    pub fn json<T: for<'de> Deserialize<'de>>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    pub fn assert_status(&self, expected: StatusCode) {
        assert_eq!(
            self.status,
            expected,
            "Expected status {}, got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
    }
}
