#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use geofeature_api::config::ApiConfig;
use geofeature_api::database::MemoryFeatureStore;
use geofeature_api::{app, AppState};

pub struct TestApp {
    pub router: Router,
    pub store: MemoryFeatureStore,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body)
            .unwrap_or_else(|e| panic!("body is not JSON ({}): {}", e, self.body))
    }
}

/// Router over a fresh in-memory store
pub fn spawn_app() -> TestApp {
    spawn_app_with(ApiConfig::default())
}

pub fn spawn_app_with(api: ApiConfig) -> TestApp {
    let store = MemoryFeatureStore::new();
    let router = app(AppState::new(store.clone()).with_api_config(api));
    TestApp { router, store }
}

impl TestApp {
    pub async fn request(&self, method: Method, uri: &str, body: Option<String>) -> TestResponse {
        let content_type = body.as_ref().map(|_| "application/json");
        self.send(method, uri, body, content_type).await
    }

    /// POST `body` as-is, with whatever content type is given
    pub async fn post_raw(&self, uri: &str, body: &str, content_type: Option<&str>) -> TestResponse {
        self.send(Method::POST, uri, Some(body.to_string()), content_type).await
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<String>,
        content_type: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let request = builder
            .body(body.map(Body::from).unwrap_or_else(Body::empty))
            .expect("request");

        let response = self.router.clone().oneshot(request).await.expect("router is infallible");
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");

        TestResponse {
            status,
            content_type,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body.to_string())).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }

    /// POST /features and return the new id
    pub async fn create(&self, kind: &str, geometry: Value) -> i64 {
        let res = self
            .post_json("/features", &serde_json::json!({ "geometry": geometry, "type": kind }))
            .await;
        assert_eq!(res.status, StatusCode::OK, "create failed: {}", res.body);
        res.json()["id"].as_i64().expect("id")
    }
}

pub fn point(x: f64, y: f64) -> Value {
    serde_json::json!({"type": "Point", "coordinates": [x, y]})
}

pub fn line() -> Value {
    serde_json::json!({"type": "LineString", "coordinates": [[30.0, 50.0], [30.5, 50.5], [31.0, 50.2]]})
}

pub fn square() -> Value {
    serde_json::json!({
        "type": "Polygon",
        "coordinates": [[[30.0, 50.0], [31.0, 50.0], [31.0, 51.0], [30.0, 51.0], [30.0, 50.0]]]
    })
}
