//! Test utilities for CLI testing
//!
//! Provides a mock API server speaking the VK-style wire protocol
//! (`req_link + method`, `response`/`error` envelopes) for the unit and
//! integration test suites, plus config/menu fixtures.

use std::collections::HashMap;
use std::net::TcpStream;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};

use vkview_core::api::{Album, ApiError, UserRecord};
use vkview_core::config::{AppConfig, MenuOption};

/// Shared mutable state of the mock server.
#[derive(Debug, Default)]
pub struct MockState {
    /// Known profiles, looked up by id for `users.get`
    pub users: Vec<UserRecord>,
    /// Friend ids returned by `friends.get`
    pub friend_ids: Vec<i64>,
    /// Albums returned by `photos.getAlbums`
    pub albums: Vec<Album>,
    /// Canned `response` payloads for arbitrary other methods
    pub canned: HashMap<String, Value>,
    /// Per-method call indices answered with HTTP 500
    pub http_failures: HashMap<String, Vec<u32>>,
    /// Per-method call indices answered with an error envelope
    pub api_failures: HashMap<String, Vec<(u32, ApiError)>>,
    /// Per-method call counters
    pub calls: HashMap<String, u32>,
    /// Every `user_ids` parameter seen, in call order
    pub seen_user_ids: Vec<String>,
    /// Query parameters of every call, per method, in call order
    pub params_log: HashMap<String, Vec<HashMap<String, String>>>,
}

/// Mock API server handle. Cloning shares the underlying state.
#[derive(Debug, Clone, Default)]
pub struct MockApi {
    state: Arc<Mutex<MockState>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_users(&self, users: Vec<UserRecord>) {
        self.state.lock().unwrap().users = users;
    }

    pub fn seed_friends(&self, ids: Vec<i64>) {
        self.state.lock().unwrap().friend_ids = ids;
    }

    pub fn seed_albums(&self, albums: Vec<Album>) {
        self.state.lock().unwrap().albums = albums;
    }

    pub fn set_canned(&self, method: &str, payload: Value) {
        self.state
            .lock()
            .unwrap()
            .canned
            .insert(method.to_string(), payload);
    }

    /// Answer the `call_index`-th (0-based) call of `method` with a 500.
    pub fn fail_http(&self, method: &str, call_index: u32) {
        self.state
            .lock()
            .unwrap()
            .http_failures
            .entry(method.to_string())
            .or_default()
            .push(call_index);
    }

    /// Answer the `call_index`-th (0-based) call of `method` with an
    /// application error envelope.
    pub fn fail_api(&self, method: &str, call_index: u32, code: i64, msg: &str) {
        self.state
            .lock()
            .unwrap()
            .api_failures
            .entry(method.to_string())
            .or_default()
            .push((
                call_index,
                ApiError {
                    error_code: code,
                    error_msg: msg.to_string(),
                },
            ));
    }

    /// How many calls `method` has received.
    pub fn calls(&self, method: &str) -> u32 {
        self.state
            .lock()
            .unwrap()
            .calls
            .get(method)
            .copied()
            .unwrap_or(0)
    }

    /// Every `user_ids` parameter received, in call order.
    pub fn seen_user_ids(&self) -> Vec<String> {
        self.state.lock().unwrap().seen_user_ids.clone()
    }

    /// Query parameters of the most recent call of `method`.
    pub fn last_params(&self, method: &str) -> Option<HashMap<String, String>> {
        self.state
            .lock()
            .unwrap()
            .params_log
            .get(method)
            .and_then(|log| log.last().cloned())
    }

    /// Start the server on an ephemeral port and return the request link
    /// (ending in `/method/`, ready for use as `req_link`).
    pub fn start(&self) -> Result<String> {
        let app = Router::new()
            .route("/method/:method", get(method_handler))
            .with_state(self.state.clone());

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let listener = runtime.block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))?;
        let addr = listener.local_addr()?;

        std::thread::spawn(move || {
            runtime.block_on(async move {
                if let Err(e) = axum::serve(listener, app).await {
                    eprintln!("Mock server error: {}", e);
                }
            });
        });

        // Give the server a moment to start and verify it's running
        for _ in 0..50 {
            if TcpStream::connect(addr).is_ok() {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }

        Ok(format!("http://{}/method/", addr))
    }
}

/// Profiles with ids over `range` and generated names, all open.
pub fn numbered_users(range: std::ops::RangeInclusive<i64>) -> Vec<UserRecord> {
    range
        .map(|id| UserRecord {
            id,
            first_name: format!("First{id}"),
            last_name: format!("Last{id}"),
            is_closed: false,
        })
        .collect()
}

/// A complete configuration pointing at `link`.
pub fn test_config(link: &str) -> AppConfig {
    let content = format!(
        r#"
[API]
ver = "5.131"
req_link = "{link}"
main_method = "users.get"

[App]
token = "test-token"

[MenuItems]
friends = "Friends"
albums = "Photo albums"

[Methods]
friends = "friends.get"
albums = "photos.getAlbums"
"#
    );
    toml::from_str(&content).expect("test config must parse")
}

/// The menu declared by [`test_config`].
pub fn test_options() -> Vec<MenuOption> {
    vec![
        MenuOption {
            name: "Friends".to_string(),
            method: "friends.get".to_string(),
        },
        MenuOption {
            name: "Photo albums".to_string(),
            method: "photos.getAlbums".to_string(),
        },
    ]
}

async fn method_handler(
    Path(method): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<Mutex<MockState>>>,
) -> Response {
    let mut state = state.lock().unwrap();

    let index = {
        let counter = state.calls.entry(method.clone()).or_insert(0);
        let index = *counter;
        *counter += 1;
        index
    };
    if let Some(ids) = params.get("user_ids") {
        state.seen_user_ids.push(ids.clone());
    }
    state
        .params_log
        .entry(method.clone())
        .or_default()
        .push(params.clone());

    if state
        .http_failures
        .get(&method)
        .is_some_and(|indices| indices.contains(&index))
    {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    if let Some(failures) = state.api_failures.get(&method) {
        if let Some((_, error)) = failures.iter().find(|(i, _)| *i == index) {
            return Json(json!({
                "error": { "error_code": error.error_code, "error_msg": error.error_msg }
            }))
            .into_response();
        }
    }

    let payload = match method.as_str() {
        "users.get" => {
            let requested = params.get("user_ids").cloned().unwrap_or_default();
            let found: Vec<&UserRecord> = requested
                .split(',')
                .filter(|token| !token.is_empty())
                .filter_map(|token| token.parse::<i64>().ok())
                .filter_map(|id| state.users.iter().find(|user| user.id == id))
                .collect();
            serde_json::to_value(found).expect("user records serialize")
        }
        "friends.get" => json!({
            "count": state.friend_ids.len(),
            "items": state.friend_ids,
        }),
        "photos.getAlbums" => json!({
            "count": state.albums.len(),
            "items": state.albums,
        }),
        other => state
            .canned
            .get(other)
            .cloned()
            .unwrap_or_else(|| json!({ "items": [] })),
    };

    Json(json!({ "response": payload })).into_response()
}
