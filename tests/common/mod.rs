//! Mock shipments backend for integration tests
//!
//! An axum router on an ephemeral port that records every request and answers
//! each path with a canned status and body.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::Router;
use tokio::net::TcpListener;

use envios_driver::auth::Credentials;

pub const LIST_PATH: &str = "/wp-json/envios/v1/list";
pub const UPDATE_PATH: &str = "/wp-json/envios/v1/update";

/// A request as seen by the mock backend
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub accept: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Clone, Default)]
struct MockState {
    responses: Arc<Mutex<HashMap<String, (u16, String)>>>,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Handle to a running mock backend
pub struct MockBackend {
    addr: SocketAddr,
    state: MockState,
}

impl MockBackend {
    /// Start a backend; unknown paths answer 404
    pub async fn start() -> Self {
        let state = MockState::default();
        let app = Router::new()
            .fallback(record_and_respond)
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    /// Answer `path` with `status` and `body` from now on
    pub fn respond(&self, path: &str, status: u16, body: &str) {
        self.state
            .responses
            .lock()
            .unwrap()
            .insert(path.to_string(), (status, body.to_string()));
    }

    /// Base URL with a trailing slash, as a driver might type it
    pub fn base_url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// Unsanitized credentials `u` / `p ` against this backend
    pub fn credentials(&self) -> Credentials {
        Credentials {
            base_url: self.base_url(),
            username: "u".to_string(),
            app_password: "p ".to_string(),
        }
    }

    /// Every request received so far, in order
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

async fn record_and_respond(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    state.requests.lock().unwrap().push(CapturedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        authorization: header("authorization"),
        accept: header("accept"),
        content_type: header("content-type"),
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let (status, body) = state
        .responses
        .lock()
        .unwrap()
        .get(uri.path())
        .cloned()
        .unwrap_or((404, "{\"code\":\"rest_no_route\"}".to_string()));

    (StatusCode::from_u16(status).unwrap(), body)
}

/// An address nothing listens on
pub async fn closed_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
