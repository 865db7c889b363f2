#![allow(
    clippy::missing_errors_doc,
    clippy::expect_used,
    dead_code,
    missing_docs
)]
//! In-process demo API the integration tests run against.
//!
//! Serves the same surface as the public demo service the suite was written
//! for: JSON login with a token pair, a Bearer-protected current-user
//! endpoint, token refresh, and a carts collection. Plus two probe routes
//! (`/echo`, `/broken-json`) for exercising request construction and lenient
//! payload handling.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use backon::{ExponentialBuilder, Retryable};
use rstest::fixture;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{error, info};

use apiprobe_core::session::{Credentials, SessionConfig};

pub const DEMO_USERNAME: &str = "emilys";
pub const DEMO_PASSWORD: &str = "emilyspass";

type SharedState = Arc<DemoState>;

#[derive(Debug, Default)]
struct DemoState {
    issued_tokens: AtomicU64,
}

/// A demo API server bound to a random localhost port.
///
/// The server task is aborted when the handle is dropped.
#[derive(Debug)]
pub struct DemoApi {
    address: SocketAddr,
    handle: tokio::task::JoinHandle<()>,
}

impl DemoApi {
    pub async fn start() -> anyhow::Result<Self> {
        let listener = std::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0))?;
        listener.set_nonblocking(true)?;
        let address = listener.local_addr()?;
        let listener = tokio::net::TcpListener::from_std(listener)?;

        info!(%address, "launching demo API");
        let handle = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, router()).await {
                error!(?err, "demo API server stopped");
            }
        });

        wait_until_ready(address).await?;
        Ok(Self { address, handle })
    }

    /// Builds a fully-qualified URL for a path on this server.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.address)
    }

    pub fn credentials() -> Credentials {
        Credentials::new(DEMO_USERNAME, DEMO_PASSWORD)
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::new(self.url("/auth/login"), Self::credentials())
            .with_refresh_url(self.url("/auth/refresh"))
    }
}

impl Drop for DemoApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn wait_until_ready(address: SocketAddr) -> anyhow::Result<()> {
    let connect = || async move { tokio::net::TcpStream::connect(address).await };
    connect
        .retry(
            &ExponentialBuilder::default()
                .with_min_delay(Duration::from_millis(10))
                .with_max_delay(Duration::from_millis(500))
                .with_max_times(10),
        )
        .await?;
    Ok(())
}

pub fn init_tracing() {
    // should be run once, fail otherwise, we skip that error
    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

#[fixture]
pub async fn api() -> DemoApi {
    init_tracing();
    match DemoApi::start().await {
        Ok(api) => api,
        Err(err) => panic!("fail to start demo API: {err:?}"),
    }
}

fn router() -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/login-partial", post(login_partial))
        .route("/auth/me", get(current_user))
        .route("/auth/refresh", post(refresh))
        .route("/carts", get(list_carts))
        .route("/carts/{id}", get(cart_by_id))
        .route("/carts/user/{id}", get(carts_by_user))
        .route("/echo", get(echo).post(echo).put(echo).delete(echo))
        .route("/broken-json", get(broken_json))
        .with_state(SharedState::default())
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

fn emily_profile() -> Value {
    json!({
        "id": 1,
        "username": "emilys",
        "email": "emily.johnson@x.dummyjson.com",
        "firstName": "Emily",
        "lastName": "Johnson",
        "gender": "female",
        "image": "https://dummyjson.com/icon/emilys/128"
    })
}

async fn login(State(state): State<SharedState>, Json(body): Json<LoginRequest>) -> Response {
    if body.username != DEMO_USERNAME || body.password != DEMO_PASSWORD {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Invalid credentials"})),
        )
            .into_response();
    }

    let serial = state.issued_tokens.fetch_add(1, Ordering::SeqCst) + 1;
    let mut payload = emily_profile();
    if let Some(object) = payload.as_object_mut() {
        object.insert("accessToken".into(), json!(format!("access-token-{serial}")));
        object.insert(
            "refreshToken".into(),
            json!(format!("refresh-token-{serial}")),
        );
    }
    Json(payload).into_response()
}

/// Answers 200 with a token payload missing `refreshToken`.
async fn login_partial() -> Json<Value> {
    Json(json!({"accessToken": "access-token-partial"}))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

async fn current_user(headers: HeaderMap) -> Response {
    match bearer_token(&headers) {
        Some(token) if token.starts_with("access-token-") => {
            Json(emily_profile()).into_response()
        }
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid/Expired Token!"})),
        )
            .into_response(),
    }
}

async fn refresh(State(state): State<SharedState>, Json(body): Json<Value>) -> Response {
    let token = body.get("refreshToken").and_then(Value::as_str);
    match token {
        Some(token) if token.starts_with("refresh-token-") => {
            let serial = state.issued_tokens.fetch_add(1, Ordering::SeqCst) + 1;
            Json(json!({
                "accessToken": format!("access-token-{serial}"),
                "refreshToken": format!("refresh-token-{serial}"),
            }))
            .into_response()
        }
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid refresh token"})),
        )
            .into_response(),
    }
}

fn sample_carts() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "products": [
                {
                    "id": 168,
                    "title": "Charger SXT RWD",
                    "price": 32999.99,
                    "quantity": 3,
                    "total": 98999.97,
                    "discountPercentage": 13.39,
                    "discountedPrice": 85743.87,
                    "thumbnail": "https://cdn.dummyjson.com/products/images/vehicle/charger-sxt-rwd/thumbnail.png"
                },
                {
                    "id": 78,
                    "title": "Apple MacBook Pro 14 Inch Space Grey",
                    "price": 1999.99,
                    "quantity": 2,
                    "total": 3999.98,
                    "discountPercentage": 18.52,
                    "discountedPrice": 3259.18,
                    "thumbnail": "https://cdn.dummyjson.com/products/images/laptops/apple-macbook-pro-14/thumbnail.png"
                }
            ],
            "total": 102999.95,
            "discountedTotal": 89003.05,
            "userId": 1,
            "totalProducts": 2,
            "totalQuantity": 5
        }),
        json!({
            "id": 2,
            "products": [
                {
                    "id": 144,
                    "title": "Cricket Helmet",
                    "price": 44.99,
                    "quantity": 4,
                    "total": 179.96,
                    "discountPercentage": 10.75,
                    "discountedPrice": 160.61,
                    "thumbnail": "https://cdn.dummyjson.com/products/images/sports-accessories/cricket-helmet/thumbnail.png"
                }
            ],
            "total": 179.96,
            "discountedTotal": 160.61,
            "userId": 42,
            "totalProducts": 1,
            "totalQuantity": 4
        }),
    ]
}

fn page(carts: Vec<Value>) -> Value {
    let total = carts.len();
    json!({
        "carts": carts,
        "total": total,
        "skip": 0,
        "limit": total
    })
}

async fn list_carts() -> Json<Value> {
    Json(page(sample_carts()))
}

async fn cart_by_id(Path(id): Path<u64>) -> Response {
    let cart = sample_carts()
        .into_iter()
        .find(|cart| cart.get("id").and_then(Value::as_u64) == Some(id));
    match cart {
        Some(cart) => Json(cart).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": format!("Cart with id '{id}' not found")})),
        )
            .into_response(),
    }
}

async fn carts_by_user(Path(id): Path<u64>) -> Json<Value> {
    let carts = sample_carts()
        .into_iter()
        .filter(|cart| cart.get("userId").and_then(Value::as_u64) == Some(id))
        .collect();
    Json(page(carts))
}

/// Reflects the request back so tests can assert on what was actually sent.
async fn echo(RawQuery(query): RawQuery, headers: HeaderMap, body: String) -> Json<Value> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    Json(json!({
        "query": query,
        "contentType": content_type,
        "body": body,
    }))
}

/// Advertises JSON but serves a body that does not parse.
async fn broken_json() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], "{not-json")
}
