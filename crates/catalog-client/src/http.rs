//! reqwest implementation of `CatalogService`.
//!
//! Endpoint family (all `GET`, all answering `{"meals": ...}`):
//! - `filter.php?a=<origin>` / `?c=<category>` / `?i=<ingredient>`
//! - `lookup.php?i=<id>`
//! - `random.php`

use std::time::Duration;

use async_trait::async_trait;
use model::wire::{parse_details, parse_summaries};
use model::{DetailRecord, SummaryRecord};
use reqwest::{Client, Url};
use tracing::{debug, error, info};

use crate::config::CatalogConfig;
use crate::{CatalogError, CatalogService, Result};

/// HTTP client for a TheMealDB-compatible catalog.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct HttpCatalogClient {
    client: Client,
    config: CatalogConfig,
}

impl HttpCatalogClient {
    /// Build a client for the configured catalog.
    ///
    /// Fails only when the base URL can't be parsed or the TLS backend can't
    /// be initialised; no request is made here.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        Url::parse(&config.base_url).map_err(|e| {
            CatalogError::InvalidConfig(format!("bad base URL '{}': {}", config.base_url, e))
        })?;

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| CatalogError::InvalidConfig(format!("Failed to create HTTP client: {e}")))?;

        info!("Catalog client ready for {}", config.base_url);
        Ok(Self { client, config })
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Issue a GET and hand back the body of a 2xx response.
    async fn get(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<String> {
        let url = self.config.endpoint(endpoint);
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                error!("Request to {} failed: {}", endpoint, e);
                CatalogError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Catalog answered {} for {}", status, endpoint);
            return Err(CatalogError::Status {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| CatalogError::Transport(e.to_string()))
    }

    async fn filter(&self, key: &str, value: &str) -> Result<Vec<SummaryRecord>> {
        let body = self.get("filter.php", &[(key, value)]).await?;
        let summaries = parse_summaries(&body)?;
        debug!("filter.php?{}={} -> {} summaries", key, value, summaries.len());
        Ok(summaries)
    }
}

#[async_trait]
impl CatalogService for HttpCatalogClient {
    async fn filter_by_origin(&self, origin: &str) -> Result<Vec<SummaryRecord>> {
        self.filter("a", origin).await
    }

    async fn filter_by_category(&self, category: &str) -> Result<Vec<SummaryRecord>> {
        self.filter("c", category).await
    }

    async fn filter_by_ingredient(&self, term: &str) -> Result<Vec<SummaryRecord>> {
        self.filter("i", term).await
    }

    async fn lookup_by_id(&self, id: &str) -> Result<DetailRecord> {
        let body = self.get("lookup.php", &[("i", id)]).await?;
        parse_details(&body)?
            .into_iter()
            .next()
            .ok_or_else(|| CatalogError::RecordNotFound { id: id.to_string() })
    }

    async fn random_record(&self) -> Result<DetailRecord> {
        let body = self.get("random.php", &[]).await?;
        parse_details(&body)?
            .into_iter()
            .next()
            .ok_or_else(|| CatalogError::MalformedResponse("random.php returned no record".into()))
    }
}
