//! In-process GraphQL indexer stub for integration tests.

#![allow(dead_code)]

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::Value;
use std::sync::{Arc, Mutex};

type Responder = dyn Fn(&Value) -> (StatusCode, String) + Send + Sync;

struct StubState {
    requests: Mutex<Vec<Value>>,
    responder: Box<Responder>,
}

/// A running stub; every POST to `/graphql` is recorded and answered by the responder.
pub struct StubIndexer {
    pub base_url: String,
    state: Arc<StubState>,
}

impl StubIndexer {
    pub async fn start<F>(responder: F) -> Self
    where
        F: Fn(&Value) -> (StatusCode, String) + Send + Sync + 'static,
    {
        let state = Arc::new(StubState {
            requests: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        });

        let app = Router::new()
            .route("/graphql", post(graphql))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("stub address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// Stub that always answers with `status` and `body`
    pub async fn fixed(status: StatusCode, body: &str) -> Self {
        let body = body.to_string();
        Self::start(move |_| (status, body.clone())).await
    }

    /// Stub that wraps `data` in a success envelope
    pub async fn data(data: Value) -> Self {
        let body = serde_json::json!({ "data": data }).to_string();
        Self::start(move |_| (StatusCode::OK, body.clone())).await
    }

    pub fn requests(&self) -> Vec<Value> {
        self.state.requests.lock().expect("requests lock").clone()
    }

    pub fn last_variables(&self) -> Value {
        self.requests()
            .last()
            .map(|r| r["variables"].clone())
            .unwrap_or(Value::Null)
    }
}

async fn graphql(State(state): State<Arc<StubState>>, Json(body): Json<Value>) -> (StatusCode, String) {
    let reply = (state.responder)(&body);
    state.requests.lock().expect("requests lock").push(body);
    reply
}
