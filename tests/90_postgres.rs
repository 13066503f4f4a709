//! Repository flow against a live PostGIS database.
//!
//! Skipped unless `GEOFEATURES_TEST_DATABASE_URL` points at a database the
//! test may write to. The `features` table is emptied first.

use geofeature_api::config::DatabaseConfig;
use geofeature_api::database::{DatabaseManager, FeatureRepository, PgFeatureStore, RepositoryError};
use geofeature_api::geometry::GeometryKind;
use serde_json::json;

fn database_url() -> Option<String> {
    std::env::var("GEOFEATURES_TEST_DATABASE_URL").ok()
}

#[tokio::test]
async fn postgis_repository_flow() -> anyhow::Result<()> {
    let Some(url) = database_url() else {
        eprintln!("GEOFEATURES_TEST_DATABASE_URL not set; skipping");
        return Ok(());
    };

    let config = DatabaseConfig {
        url: Some(url),
        max_connections: 2,
        connection_timeout: 10,
        enable_query_logging: false,
        ensure_schema: true,
    };
    let pool = DatabaseManager::connect(&config).await?;
    DatabaseManager::ensure_schema(&pool).await?;
    sqlx::query("TRUNCATE features").execute(&pool).await?;

    let store = PgFeatureStore::new(pool.clone());
    let mut repo = FeatureRepository::open(&store).await?;

    // more decimals than PostGIS prints by default
    let point = json!({"type": "Point", "coordinates": [30.123456789012, 0.1234567891234]});
    let square = json!({
        "type": "Polygon",
        "coordinates": [[[30.0, 50.0], [31.0, 50.0], [31.0, 51.0], [30.0, 51.0], [30.0, 50.0]]]
    });
    let p = repo.create(&point, GeometryKind::Point).await?;
    let q = repo.create(&square, GeometryKind::Polygon).await?;
    assert!(q > p);

    let records = repo.list_all().await?;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, p);
    assert_eq!(records[0].kind, "Point");
    assert_eq!(serde_json::to_value(&records[0].geometry)?, point);

    let stats = repo.count_by_kind().await?;
    assert_eq!((stats.points, stats.lines, stats.polygons), (1, 0, 1));

    let recent = repo.recent_features(10).await?;
    assert_eq!(recent.iter().map(|r| r.id).collect::<Vec<_>>(), vec![q, p]);

    repo.delete_by_id(p).await?;
    assert!(matches!(repo.delete_by_id(p).await, Err(RepositoryError::NotFound(_))));
    assert_eq!(repo.list_all().await?.len(), 1);

    drop(repo);
    pool.close().await;
    Ok(())
}
