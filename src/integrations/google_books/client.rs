// src/integrations/google_books/client.rs
//
// Google Books API Integration
//
// ARCHITECTURE:
// - REST client for the Google Books volumes API
// - Handles API key, request spacing, timeouts
// - Maps provider JSON -> ExternalBookRecord (NO persistence)
// - Used by the book services through `BookCatalogGateway`
//
// RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Never touches the catalog store
// - No automatic retries

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use super::normalize::normalize;
use crate::config::GatewayConfig;
use crate::domain::ExternalBookRecord;
use crate::error::{AppError, AppResult};
use crate::integrations::gateway::{BookCatalogGateway, ExternalSearchResult};

/// Keeps provider requests at least `min_interval` apart
struct RateLimiter {
    last_request: Option<Instant>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: None,
            min_interval,
        }
    }

    async fn wait_if_needed(&mut self) {
        if self.min_interval.is_zero() {
            return;
        }
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        self.last_request = Some(Instant::now());
    }
}

/// Google Books API Client
pub struct GoogleBooksClient {
    base_url: String,
    api_key: Option<String>,
    http_client: Client,
    rate_limiter: Mutex<RateLimiter>,
}

impl GoogleBooksClient {
    pub fn new(config: &GatewayConfig) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            http_client,
            rate_limiter: Mutex::new(RateLimiter::new(config.min_request_interval)),
        })
    }

    // ========================================================================
    // INTERNAL: HTTP Execution
    // ========================================================================

    /// GET a provider path and decode the JSON body.
    /// Returns `Ok(None)` on 404 so callers decide what "missing" means.
    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> AppResult<Option<Value>> {
        self.rate_limiter.lock().await.wait_if_needed().await;

        let mut request = self
            .http_client
            .get(format!("{}{}", self.base_url, path))
            .header(header::ACCEPT, "application/json")
            .query(query);

        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key)]);
        }

        let response = request.send().await.map_err(|e| {
            log::warn!("Google Books request to {} failed: {}", path, e);
            AppError::GatewayUnavailable(format!("request failed: {}", e))
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            log::warn!("Google Books returned {} for {}", status, path);
            return Err(AppError::GatewayUnavailable(format!(
                "provider returned status {}",
                status
            )));
        }

        let body = response.json::<Value>().await.map_err(|e| {
            log::warn!("Undecodable Google Books response for {}: {}", path, e);
            AppError::GatewayUnavailable(format!("failed to parse response: {}", e))
        })?;

        Ok(Some(body))
    }
}

#[async_trait]
impl BookCatalogGateway for GoogleBooksClient {
    async fn search(&self, query: &str, limit: u32, offset: u32) -> AppResult<ExternalSearchResult> {
        log::debug!("Searching Google Books for {:?} (limit {}, offset {})", query, limit, offset);

        let params = [
            ("q", query.to_string()),
            ("maxResults", limit.to_string()),
            ("startIndex", offset.to_string()),
        ];

        let body = self
            .get_json("/volumes", &params)
            .await?
            .ok_or_else(|| AppError::GatewayUnavailable("search endpoint not found".to_string()))?;

        let items = body["items"]
            .as_array()
            .map(|volumes| {
                volumes
                    .iter()
                    .map(normalize)
                    .filter(|record| !record.external_id.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(ExternalSearchResult {
            items,
            total: body["totalItems"].as_u64().unwrap_or(0),
        })
    }

    async fn get_by_id(&self, external_id: &str) -> AppResult<ExternalBookRecord> {
        log::debug!("Fetching Google Books volume {}", external_id);

        let not_found = || AppError::ExternalBookNotFound(external_id.to_string());

        // Path segment must not smuggle extra path components
        if external_id.is_empty() || external_id.contains(['/', '?', '#']) {
            return Err(not_found());
        }

        let body = self
            .get_json(&format!("/volumes/{}", external_id), &[])
            .await?
            .ok_or_else(not_found)?;

        let record = normalize(&body);
        if record.external_id.is_empty() {
            return Err(AppError::GatewayUnavailable(
                "volume response carried no id".to_string(),
            ));
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Path, Query};
    use axum::http::StatusCode as HttpStatus;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    /// Serve a tiny fake of the volumes API on an ephemeral port
    async fn fake_provider() -> String {
        async fn volume(Path(id): Path<String>) -> Result<Json<Value>, HttpStatus> {
            match id.as_str() {
                "known" => Ok(Json(json!({
                    "id": "known",
                    "volumeInfo": { "title": "Known Book", "authors": ["A. Writer"] }
                }))),
                "broken" => Err(HttpStatus::INTERNAL_SERVER_ERROR),
                _ => Err(HttpStatus::NOT_FOUND),
            }
        }

        async fn volumes(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
            Json(json!({
                "totalItems": 120,
                "items": [
                    { "id": "one", "volumeInfo": { "title": params.get("q").cloned().unwrap_or_default() } },
                    { "volumeInfo": { "title": "no id, dropped" } },
                    { "id": "two", "volumeInfo": { "title": params.get("key").cloned().unwrap_or_default() } }
                ]
            }))
        }

        let app = Router::new()
            .route("/volumes", get(volumes))
            .route("/volumes/:id", get(volume));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client(base_url: String, api_key: Option<&str>) -> GoogleBooksClient {
        GoogleBooksClient::new(&GatewayConfig {
            base_url,
            api_key: api_key.map(str::to_string),
            ..GatewayConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_get_by_id_normalizes_volume() {
        let client = client(fake_provider().await, None);
        let record = client.get_by_id("known").await.unwrap();
        assert_eq!(record.external_id, "known");
        assert_eq!(record.title, "Known Book");
        assert_eq!(record.author, "A. Writer");
    }

    #[tokio::test]
    async fn test_provider_404_is_external_not_found() {
        let client = client(fake_provider().await, None);
        let err = client.get_by_id("missing").await.unwrap_err();
        assert!(matches!(err, AppError::ExternalBookNotFound(id) if id == "missing"));
    }

    #[tokio::test]
    async fn test_provider_failure_is_gateway_unavailable() {
        let client = client(fake_provider().await, None);
        let err = client.get_by_id("broken").await.unwrap_err();
        assert!(matches!(err, AppError::GatewayUnavailable(_)));
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_gateway_unavailable() {
        // Port 9 (discard) is not served on loopback in test environments
        let client = client("http://127.0.0.1:9".to_string(), None);
        let err = client.get_by_id("known").await.unwrap_err();
        assert!(matches!(err, AppError::GatewayUnavailable(_)));
    }

    #[tokio::test]
    async fn test_search_forwards_query_and_key() {
        let client = client(fake_provider().await, Some("secret"));
        let result = client.search("dune", 10, 0).await.unwrap();

        assert_eq!(result.total, 120);
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.items[0].title, "dune");
        assert_eq!(result.items[1].title, "secret");
    }

    #[tokio::test]
    async fn test_path_like_ids_are_not_forwarded() {
        let client = client(fake_provider().await, None);
        let err = client.get_by_id("known/../x").await.unwrap_err();
        assert!(matches!(err, AppError::ExternalBookNotFound(_)));
    }

    #[tokio::test]
    async fn test_rate_limiter_spaces_requests() {
        let mut limiter = RateLimiter::new(Duration::from_millis(50));
        let start = Instant::now();
        limiter.wait_if_needed().await;
        limiter.wait_if_needed().await;
        assert!(start.elapsed() >= Duration::from_millis(50));
    }
}
