//! Test setup infrastructure - a router over a fresh tracker
#![allow(dead_code)] // Test utilities may not all be used in every test

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use subs::{web, AppState, PlayerConfig, Tracker, TrackerOptions};

pub struct TestSetup {
    pub tracker: Arc<Tracker>,
    pub app: Router,
    _assets: tempfile::TempDir,
}

impl TestSetup {
    /// Sends a request through the full middleware stack
    pub async fn send(&self, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if body.is_some() {
            request = request.header("content-type", "application/json");
        }
        let request = request
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    pub async fn post(&self, uri: &str) -> (StatusCode, Value) {
        self.send("POST", uri, None).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send("GET", uri, None).await
    }
}

pub struct TestSetupBuilder {
    players: Vec<PlayerConfig>,
    options: TrackerOptions,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            players: vec![],
            options: TrackerOptions::default(),
        }
    }

    pub fn with_players(mut self, players: Vec<(&str, i64)>) -> Self {
        self.players = players
            .into_iter()
            .map(|(name, number)| PlayerConfig::new(name, number))
            .collect();
        self
    }

    pub fn with_five_players(self) -> Self {
        self.with_players(vec![
            ("jane", 1),
            ("john", 2),
            ("steve", 3),
            ("mary", 4),
            ("bob", 5),
        ])
    }

    pub fn with_resub_commits_time(mut self) -> Self {
        self.options.resub_commits_time = true;
        self
    }

    pub fn build(self) -> TestSetup {
        let tracker = Arc::new(Tracker::new(self.players, self.options));
        let assets = tempfile::tempdir().unwrap();
        let app = web::router(AppState::new(Arc::clone(&tracker)), assets.path());

        TestSetup {
            tracker,
            app,
            _assets: assets,
        }
    }
}
