use anyhow::{bail, Context, Result};
use reqwest::{RequestBuilder, StatusCode};
use serde_json::{json, Value};
use url::Url;

use crate::database::FeatureStats;
use crate::geometry::GeometryKind;

/// Thin HTTP client for the feature API
pub struct FeatureClient {
    base: Url,
    http: reqwest::Client,
}

impl FeatureClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base = Url::parse(base_url).with_context(|| format!("invalid server URL: {}", base_url))?;
        // Url::join replaces the last segment unless the path ends with '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            base,
            http: reqwest::Client::new(),
        })
    }

    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .with_context(|| format!("invalid endpoint path: {}", path))
    }

    /// GET /features
    pub async fn list(&self) -> Result<Value> {
        let url = self.endpoint("features")?;
        Self::send(self.http.get(url)).await
    }

    /// POST /features, returning the new id
    pub async fn create(&self, kind: GeometryKind, geometry: Value) -> Result<i64> {
        let url = self.endpoint("features")?;
        let body = json!({ "geometry": geometry, "type": kind });
        let response = Self::send(self.http.post(url).json(&body)).await?;
        response
            .get("id")
            .and_then(Value::as_i64)
            .with_context(|| format!("response carried no id: {}", response))
    }

    /// DELETE /features/:id
    pub async fn delete(&self, id: i32) -> Result<()> {
        let url = self.endpoint(&format!("features/{}", id))?;
        Self::send(self.http.delete(url)).await?;
        Ok(())
    }

    /// GET /stats
    pub async fn stats(&self) -> Result<FeatureStats> {
        let url = self.endpoint("stats")?;
        let value = Self::send(self.http.get(url)).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// GET /health. A degraded server is reported, not treated as an error.
    pub async fn health(&self) -> Result<Value> {
        let url = self.endpoint("health")?;
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body: Value = response.json().await?;
        if status == StatusCode::OK || status == StatusCode::SERVICE_UNAVAILABLE {
            return Ok(body);
        }
        bail!("unexpected health status {}: {}", status, body)
    }

    async fn send(request: RequestBuilder) -> Result<Value> {
        let response = request.send().await.context("request failed")?;
        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);
        if !status.is_success() {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("no error message");
            bail!("server returned {}: {}", status, message);
        }
        Ok(body)
    }
}
