mod common;

use axum::http::StatusCode;
use common::{point, spawn_app};

#[tokio::test]
async fn root_describes_service() {
    let app = spawn_app();

    let res = app.get("/").await;

    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["endpoints"]["features"].is_string());
}

#[tokio::test]
async fn healthy_store_reports_ok() {
    let app = spawn_app();

    let res = app.get("/health").await;

    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn closed_store_is_unavailable() {
    let app = spawn_app();
    app.create("Point", point(0.0, 0.0)).await;
    app.store.close();

    let res = app.get("/health").await;
    assert_eq!(res.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(res.json()["status"], "degraded");

    for uri in ["/features", "/stats", "/dashboard"] {
        let res = app.get(uri).await;
        assert_eq!(res.status, StatusCode::SERVICE_UNAVAILABLE, "{}", uri);
        assert_eq!(res.json()["code"], "SERVICE_UNAVAILABLE");
    }

    let res = app
        .post_json(
            "/features",
            &serde_json::json!({"geometry": point(1.0, 1.0), "type": "Point"}),
        )
        .await;
    assert_eq!(res.status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = spawn_app();

    assert_eq!(app.get("/nope").await.status, StatusCode::NOT_FOUND);
}
