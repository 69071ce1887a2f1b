//! Shared fixtures: a scripted catalog server and store constructors.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use shopfront::state::Storefront;
use shopfront_catalog::{CatalogClient, CatalogSettings};
use shopfront_db::{Database, DbConfig};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// One scripted reply from the mock catalog.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
    pub delay_ms: u64,
}

impl MockResponse {
    pub fn products(json: &str) -> Self {
        Self {
            status: 200,
            body: json.to_string(),
            delay_ms: 0,
        }
    }

    pub fn error(status: u16) -> Self {
        Self {
            status,
            body: "catalog unavailable".to_string(),
            delay_ms: 0,
        }
    }

    pub fn with_delay(mut self, ms: u64) -> Self {
        self.delay_ms = ms;
        self
    }
}

#[derive(Clone, Default)]
struct MockState {
    hits: Arc<Mutex<usize>>,
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
}

/// `GET /products` server answering from a queue, in request arrival order.
/// An empty queue answers `[]`.
pub struct MockCatalog {
    pub addr: SocketAddr,
    state: MockState,
    shutdown: tokio::sync::watch::Sender<bool>,
}

impl MockCatalog {
    pub async fn start() -> Self {
        let state = MockState::default();
        let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);

        let app = Router::new()
            .route("/products", get(handle_products))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.changed().await;
                })
                .await
                .ok();
        });

        Self {
            addr,
            state,
            shutdown: shutdown_tx,
        }
    }

    pub async fn enqueue(&self, response: MockResponse) {
        self.state.responses.lock().await.push_back(response);
    }

    pub async fn hits(&self) -> usize {
        *self.state.hits.lock().await
    }

    /// Waits until at least `n` requests have arrived.
    pub async fn wait_for_hits(&self, n: usize) {
        for _ in 0..400 {
            if self.hits().await >= n {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("mock catalog never received {n} requests");
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> CatalogClient {
        CatalogClient::new(&CatalogSettings {
            base_url: self.base_url(),
            timeout_secs: 5,
        })
        .unwrap()
    }
}

impl Drop for MockCatalog {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

async fn handle_products(State(state): State<MockState>) -> Response {
    *state.hits.lock().await += 1;

    let mock = state
        .responses
        .lock()
        .await
        .pop_front()
        .unwrap_or_else(|| MockResponse::products("[]"));

    if mock.delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(mock.delay_ms)).await;
    }

    let status = StatusCode::from_u16(mock.status).unwrap();
    (status, [("content-type", "application/json")], mock.body).into_response()
}

/// Products JSON in the remote catalog's shape. `price` is in whole units.
pub fn products_json(items: &[(i64, f64)]) -> String {
    let products: Vec<serde_json::Value> = items
        .iter()
        .map(|(id, price)| {
            serde_json::json!({
                "id": id,
                "title": format!("Product {id}"),
                "price": price,
                "description": "",
                "category": "test",
                "image": format!("https://example.com/{id}.png"),
                "rating": { "rate": 4.5, "count": 10 }
            })
        })
        .collect();
    serde_json::Value::Array(products).to_string()
}

/// Store over an in-memory database whose catalog points at `mock`.
pub async fn store_with(mock: &MockCatalog) -> Storefront {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    Storefront::new(db, mock.client()).await.unwrap()
}

/// Store over an in-memory database with a catalog that is never reachable.
pub async fn offline_store() -> Storefront {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    Storefront::new(db, unreachable_client()).await.unwrap()
}

pub fn unreachable_client() -> CatalogClient {
    CatalogClient::new(&CatalogSettings {
        // Port 9 (discard) on loopback: connection refused
        base_url: "http://127.0.0.1:9".to_string(),
        timeout_secs: 1,
    })
    .unwrap()
}
