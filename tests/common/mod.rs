//! In-process mock of the storefront REST backend
//!
//! Implements `/api/auth/login`, `/api/auth/register` and `/api/products*`
//! with bearer-token checks and `__v` version conflicts, and records every
//! request so tests can assert what reached the network.

#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::{HeaderMap, Method, StatusCode},
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use storefront::auth::SessionStorage;
use storefront::{AppContext, Config};

pub const ADMIN_TOKEN: &str = "admin-token";
pub const CUSTOMER_TOKEN: &str = "customer-token";

#[derive(Debug, Clone, Serialize)]
pub struct MockProduct {
    pub _id: String,
    pub name: String,
    pub description: String,
    pub qty: u32,
    pub price: f64,
    pub __v: i64,
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
}

#[derive(Debug, Default)]
pub struct MockState {
    pub valid_tokens: HashSet<String>,
    pub products: Vec<MockProduct>,
    pub registered: Vec<Value>,
    pub requests: Vec<RecordedRequest>,
}

type Shared = Arc<Mutex<MockState>>;

pub struct MockBackend {
    pub base_url: String,
    state: Shared,
    handle: tokio::task::JoinHandle<()>,
}

impl MockBackend {
    /// Start the backend on an ephemeral port
    pub async fn start() -> Self {
        let mut state = MockState::default();
        state.valid_tokens.insert(ADMIN_TOKEN.to_string());
        state.valid_tokens.insert(CUSTOMER_TOKEN.to_string());
        let state = Arc::new(Mutex::new(state));

        let app = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/auth/register", post(register))
            .route("/api/products", get(list_products).post(create_product))
            .route("/api/products/{id}", put(update_product).delete(delete_product))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/api", addr),
            state,
            handle,
        }
    }

    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.api.base_url = self.base_url.clone();
        config
    }

    /// Application context talking to this backend
    pub fn context(&self, storage: impl SessionStorage + 'static) -> AppContext {
        AppContext::with_storage(self.config(), storage).unwrap()
    }

    pub fn seed_product(&self, name: &str, qty: u32, price: f64) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.state.lock().unwrap().products.push(MockProduct {
            _id: id.clone(),
            name: name.to_string(),
            description: format!("{} description", name),
            qty,
            price,
            __v: 0,
        });
        id
    }

    /// Stop accepting a token, as if it expired server-side
    pub fn revoke(&self, token: &str) {
        self.state.lock().unwrap().valid_tokens.remove(token);
    }

    pub fn products(&self) -> Vec<MockProduct> {
        self.state.lock().unwrap().products.clone()
    }

    pub fn registered(&self) -> Vec<Value> {
        self.state.lock().unwrap().registered.clone()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    /// Bump a product's version behind the client's back
    pub fn touch_product(&self, id: &str) {
        let mut state = self.state.lock().unwrap();
        if let Some(product) = state.products.iter_mut().find(|p| p._id == id) {
            product.__v += 1;
        }
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Poll `check` until it holds or a second passes
pub async fn eventually(mut check: impl FnMut() -> bool) -> bool {
    for _ in 0..100 {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check()
}

type Reply = (StatusCode, Json<Value>);

fn record(state: &mut MockState, method: Method, path: String, headers: &HeaderMap) {
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.requests.push(RecordedRequest {
        method,
        path,
        authorization,
    });
}

fn authorized(state: &MockState, headers: &HeaderMap) -> Result<(), Reply> {
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match token {
        Some(token) if state.valid_tokens.contains(token) => Ok(()),
        _ => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Unauthorized" })),
        )),
    }
}

async fn login(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Reply {
    let mut state = state.lock().unwrap();
    record(&mut state, Method::POST, "/auth/login".into(), &headers);

    let user = body["user_name"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    let (token, role) = match (user, password) {
        ("admin", "adminpass") => (ADMIN_TOKEN, "admin"),
        ("jane", "janepass") => (CUSTOMER_TOKEN, "customer"),
        _ => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Invalid credentials" })),
            )
        }
    };

    (
        StatusCode::OK,
        Json(json!({
            "token": token,
            "user": { "_id": format!("user-{}", user), "user_name": user, "role": role }
        })),
    )
}

async fn register(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let mut state = state.lock().unwrap();
    record(&mut state, Method::POST, "/auth/register".into(), &headers);

    let taken = body["user_name"] == "admin"
        || state
            .registered
            .iter()
            .any(|u| u["user_name"] == body["user_name"]);
    if taken {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Username already exists" })),
        );
    }

    state.registered.push(body);
    (StatusCode::CREATED, Json(json!({ "message": "User registered" })))
}

async fn list_products(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    let mut state = state.lock().unwrap();
    record(&mut state, Method::GET, "/products".into(), &headers);
    if let Err(reply) = authorized(&state, &headers) {
        return reply;
    }
    (StatusCode::OK, Json(json!(state.products)))
}

async fn create_product(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let mut state = state.lock().unwrap();
    record(&mut state, Method::POST, "/products".into(), &headers);
    if let Err(reply) = authorized(&state, &headers) {
        return reply;
    }

    let product = MockProduct {
        _id: uuid::Uuid::new_v4().to_string(),
        name: body["name"].as_str().unwrap_or_default().to_string(),
        description: body["description"].as_str().unwrap_or_default().to_string(),
        qty: body["qty"].as_u64().unwrap_or_default() as u32,
        price: body["price"].as_f64().unwrap_or_default(),
        __v: 0,
    };
    state.products.push(product.clone());
    (StatusCode::CREATED, Json(json!(product)))
}

async fn update_product(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let mut state = state.lock().unwrap();
    record(&mut state, Method::PUT, format!("/products/{}", id), &headers);
    if let Err(reply) = authorized(&state, &headers) {
        return reply;
    }

    let Some(product) = state.products.iter_mut().find(|p| p._id == id) else {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "Product not found" })));
    };
    if body["__v"].as_i64() != Some(product.__v) {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "message": "Product has been modified" })),
        );
    }

    product.name = body["name"].as_str().unwrap_or_default().to_string();
    product.description = body["description"].as_str().unwrap_or_default().to_string();
    product.qty = body["qty"].as_u64().unwrap_or_default() as u32;
    product.price = body["price"].as_f64().unwrap_or_default();
    product.__v += 1;
    let updated = product.clone();
    (StatusCode::OK, Json(json!(updated)))
}

async fn delete_product(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Reply {
    let mut state = state.lock().unwrap();
    record(&mut state, Method::DELETE, format!("/products/{}", id), &headers);
    if let Err(reply) = authorized(&state, &headers) {
        return reply;
    }

    let before = state.products.len();
    state.products.retain(|p| p._id != id);
    if state.products.len() == before {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "Product not found" })));
    }
    (StatusCode::OK, Json(json!({ "message": "Product deleted" })))
}
