//! Router-level test harness
//!
//! Each test gets its own in-memory database and drives the full router
//! through `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, to_bytes};
use http::{Method, Request, StatusCode};
use qrmenu_server::{AppState, Config, api};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@qrmenu.com";
pub const ADMIN_PASSWORD: &str = "admin123";

pub struct TestApp {
    pub state: AppState,
    router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        let state = AppState::new(Config::for_tests()).await.unwrap();
        let router = api::build_router(state.clone());
        Self { state, router }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, token, None).await
    }

    /// Log in and return the session token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .post(
                "/api/auth/login",
                None,
                json!({"email": email, "password": password}),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["data"]["token"].as_str().unwrap().to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    /// POST a create request and return the new id
    pub async fn create(&self, uri: &str, token: &str, body: Value) -> i64 {
        let (status, response) = self.post(uri, Some(token), body).await;
        assert_eq!(status, StatusCode::OK, "create {uri} failed: {response}");
        response["data"]["id"].as_i64().unwrap()
    }

    pub async fn restaurant(&self, token: &str, name: &str) -> i64 {
        self.create(
            "/api/admin/restaurants",
            token,
            json!({"name": name, "address": "1 Main St", "phone": "555-0100"}),
        )
        .await
    }

    pub async fn branch(&self, token: &str, restaurant_id: i64, name: &str) -> i64 {
        self.create(
            "/api/admin/branches",
            token,
            json!({
                "restaurant_id": restaurant_id,
                "name": name,
                "address": "2 Side St",
                "phone": "555-0101"
            }),
        )
        .await
    }

    pub async fn category(&self, token: &str, restaurant_id: i64, name: &str) -> i64 {
        self.create(
            "/api/admin/menu/categories",
            token,
            json!({"restaurant_id": restaurant_id, "name": name}),
        )
        .await
    }

    pub async fn item(
        &self,
        token: &str,
        restaurant_id: i64,
        category_id: i64,
        name: &str,
        price: f64,
    ) -> i64 {
        self.create(
            "/api/admin/menu/items",
            token,
            json!({
                "restaurant_id": restaurant_id,
                "category_id": category_id,
                "name": name,
                "price": price
            }),
        )
        .await
    }

    /// Create a staff account and log it in
    pub async fn staff(
        &self,
        token: &str,
        email: &str,
        role: &str,
        restaurant_id: i64,
        branch_id: Option<i64>,
    ) -> String {
        self.create(
            "/api/admin/users",
            token,
            json!({
                "name": role,
                "email": email,
                "password": "secret123",
                "role": role,
                "restaurant_id": restaurant_id,
                "branch_id": branch_id
            }),
        )
        .await;
        self.login(email, "secret123").await
    }

    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.state.pool)
            .await
            .unwrap()
    }
}
