//! In-process stand-in for the gallery search service.
//!
//! Binds `127.0.0.1:0`, records every query string it receives, and answers:
//! - `q=boom` with a 500,
//! - `q=garbled` with JSON that is not a search result,
//! - `q=nothing` with an empty page,
//! - anything else with one image and `totalItems: 42`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

pub type Seen = Arc<Mutex<Vec<HashMap<String, String>>>>;

pub struct StubServer {
    pub base_url: String,
    pub seen: Seen,
}

impl StubServer {
    pub async fn start() -> Self {
        let seen: Seen = Arc::default();
        let app = Router::new()
            .route("/api/search", get(search))
            .route("/api/search/suggestions", get(suggestions))
            .with_state(seen.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub server");
        let addr = listener.local_addr().expect("stub server address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub server crashed");
        });

        StubServer {
            base_url: format!("http://{addr}"),
            seen,
        }
    }

    pub fn requests(&self) -> Vec<HashMap<String, String>> {
        self.seen.lock().unwrap().clone()
    }
}

async fn search(
    State(seen): State<Seen>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    seen.lock().unwrap().push(params.clone());
    let q = params.get("q").cloned().unwrap_or_default();
    let page: u32 = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let page_size: u32 = params.get("pageSize").and_then(|p| p.parse().ok()).unwrap_or(50);

    match q.as_str() {
        "boom" => Err(StatusCode::INTERNAL_SERVER_ERROR),
        "garbled" => Ok(Json(json!({ "unexpected": true }))),
        "nothing" => Ok(Json(json!({
            "query": q,
            "items": [],
            "totalItems": 0,
            "page": page,
            "pageSize": page_size,
        }))),
        _ => Ok(Json(json!({
            "query": q.trim(),
            "items": [{ "name": "beach.jpg", "path": "/2024/beach.jpg", "type": "image" }],
            "totalItems": 42,
            "page": page,
            "pageSize": page_size,
        }))),
    }
}

async fn suggestions(
    State(seen): State<Seen>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<String>> {
    seen.lock().unwrap().push(params.clone());
    let q = params.get("q").cloned().unwrap_or_default();
    Json(vec![format!("{q} sunset"), format!("{q} beach")])
}
