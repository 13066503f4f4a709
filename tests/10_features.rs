mod common;

use axum::http::{Method, StatusCode};
use common::{line, point, spawn_app, spawn_app_with, square};
use geofeature_api::config::ApiConfig;
use serde_json::json;

#[tokio::test]
async fn empty_store_lists_empty_collection() {
    let app = spawn_app();

    let res = app.get("/features").await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), json!({"type": "FeatureCollection", "features": []}));
}

#[tokio::test]
async fn create_then_list_point() {
    let app = spawn_app();

    let res = app
        .post_json(
            "/features",
            &json!({"geometry": {"type": "Point", "coordinates": [30.5234, 50.4501]}, "type": "Point"}),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    assert_eq!(res.json(), json!({"id": 1}));

    let body = app.get("/features").await.json();
    assert_eq!(body["type"], "FeatureCollection");
    let features = body["features"].as_array().expect("features array");
    assert_eq!(features.len(), 1);
    assert_eq!(features[0]["type"], "Feature");
    assert_eq!(features[0]["geometry"], json!({"type": "Point", "coordinates": [30.5234, 50.4501]}));
    assert_eq!(features[0]["properties"], json!({"id": 1, "type": "Point"}));
}

#[tokio::test]
async fn every_kind_round_trips() {
    let app = spawn_app();
    let cases = [("Point", point(-0.1276, 51.5072)), ("LineString", line()), ("Polygon", square())];

    for (kind, geometry) in &cases {
        app.create(kind, geometry.clone()).await;
    }

    let body = app.get("/features").await.json();
    let features = body["features"].as_array().unwrap();
    assert_eq!(features.len(), cases.len());
    for (kind, geometry) in &cases {
        let matching: Vec<_> = features
            .iter()
            .filter(|f| &f["geometry"] == geometry && f["properties"]["type"] == *kind)
            .collect();
        assert_eq!(matching.len(), 1, "expected exactly one {} feature", kind);
    }
}

#[tokio::test]
async fn ids_increase_and_are_not_reused() {
    let app = spawn_app();

    let first = app.create("Point", point(0.0, 0.0)).await;
    let second = app.create("Point", point(1.0, 1.0)).await;
    assert!(second > first);

    assert_eq!(app.delete(&format!("/features/{}", second)).await.status, StatusCode::OK);
    let third = app.create("Point", point(2.0, 2.0)).await;
    assert!(third > second, "id {} was reused", third);
}

#[tokio::test]
async fn declared_kind_is_stored_verbatim() {
    let app = spawn_app();

    // The declared kind is not checked against the geometry
    app.create("Point", square()).await;

    let body = app.get("/features").await.json();
    assert_eq!(body["features"][0]["properties"]["type"], "Point");
    assert_eq!(body["features"][0]["geometry"]["type"], "Polygon");
}

#[tokio::test]
async fn shape_violations_are_rejected() {
    let app = spawn_app();

    for payload in [
        json!({"type": "Point"}),
        json!({"geometry": {"type": "Point", "coordinates": [0, 0]}}),
        json!({"geometry": {"type": "Point", "coordinates": [0, 0]}, "type": "Circle"}),
        json!({"geometry": {"type": "Point", "coordinates": [0, 0]}, "type": "point"}),
        json!({"geometry": "POINT(0 0)", "type": "Point"}),
        json!({"geometry": [0, 0], "type": "Point"}),
    ] {
        let res = app.post_json("/features", &payload).await;
        assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY, "accepted {}", payload);
        assert_eq!(res.json()["code"], "UNPROCESSABLE_ENTITY");
    }

    assert_eq!(app.get("/stats").await.json(), json!({"points": 0, "lines": 0, "polygons": 0}));
}

#[tokio::test]
async fn invalid_geometry_is_rejected() {
    let app = spawn_app();

    for geometry in [
        json!({"type": "Point", "coordinates": [1.0]}),
        json!({"type": "LineString", "coordinates": [[0.0, 0.0]]}),
        json!({"type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]}),
        json!({"type": "MultiPoint", "coordinates": [[0.0, 0.0], [1.0, 1.0]]}),
        json!({"type": "Hexagon", "coordinates": [0.0, 0.0]}),
        json!({}),
    ] {
        let res = app
            .post_json("/features", &json!({"geometry": geometry, "type": "Point"}))
            .await;
        assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY, "accepted {}", geometry);
        let body = res.json();
        assert!(body["field_errors"]["geometry"].is_string(), "{}", body);
    }

    let body = app.get("/features").await.json();
    assert_eq!(body["features"], json!([]));
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = spawn_app();

    let res = app
        .request(Method::POST, "/features", Some("{\"geometry\": ".to_string()))
        .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json()["code"], "INVALID_JSON");
}

#[tokio::test]
async fn missing_content_type_is_bad_request() {
    let app = spawn_app();
    let body = json!({"geometry": point(0.0, 0.0), "type": "Point"}).to_string();

    let res = app.post_raw("/features", &body, None).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json()["code"], "BAD_REQUEST");

    let res = app.post_raw("/features", &body, Some("text/plain")).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    assert_eq!(app.get("/features").await.json()["features"], json!([]));
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let app = spawn_app_with(ApiConfig {
        max_request_size_bytes: 256,
        ..ApiConfig::default()
    });
    let coordinates: Vec<[f64; 2]> = (0..100).map(|i| [i as f64, 0.5]).collect();
    let payload = json!({"geometry": {"type": "LineString", "coordinates": coordinates}, "type": "LineString"});
    assert!(payload.to_string().len() > 256);

    let res = app.post_json("/features", &payload).await;
    assert_eq!(res.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(res.json()["code"], "PAYLOAD_TOO_LARGE");

    // small bodies still go through
    app.create("Point", point(1.0, 2.0)).await;
    assert_eq!(app.get("/stats").await.json()["points"], 1);
}

#[tokio::test]
async fn open_polygon_ring_is_stored_closed() {
    let app = spawn_app();
    let open_square = json!({
        "type": "Polygon",
        "coordinates": [[[30.0, 50.0], [31.0, 50.0], [31.0, 51.0], [30.0, 51.0]]]
    });

    app.create("Polygon", open_square).await;

    let body = app.get("/features").await.json();
    assert_eq!(body["features"][0]["geometry"], square());
}

#[tokio::test]
async fn cors_is_open() {
    let app = spawn_app();

    let request = axum::http::Request::builder()
        .method(Method::OPTIONS)
        .uri("/features")
        .header("origin", "https://elsewhere.example")
        .header("access-control-request-method", "POST")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router.clone(), request).await.unwrap();

    assert!(response.status().is_success());
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}
