use crate::config::Config;
use crate::error::SourceError;
use crate::listing::{Listing, ListingsPage};
use anyhow::{Context, Result};
use reqwest::{Client, StatusCode, Url};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Anything that can list a shop's active listings
pub trait ListingSource: Send + Sync {
    /// Fetch the active listings of a shop.
    ///
    /// Returns `SourceError::NotFound` when the shop is unknown or has no
    /// listings, and `SourceError::Connectivity` when the backend is unreachable.
    fn fetch_active_listings(
        &self,
        shop: &str,
    ) -> impl Future<Output = Result<Vec<Listing>, SourceError>> + Send;
}

/// Client for the Etsy v2 active-listings endpoint
#[derive(Debug, Clone)]
pub struct EtsyClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl EtsyClient {
    pub fn new(base_url: &str, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid listing API base URL {}", base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Listing API base URL {} cannot carry a path", base_url);
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.api_base_url,
            config.api_key.clone(),
            config.request_timeout(),
        )
    }

    /// `{base}/shops/{shop}/listings/active`
    fn listings_url(&self, shop: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["shops", shop, "listings", "active"]);
        }
        url
    }
}

impl ListingSource for EtsyClient {
    async fn fetch_active_listings(&self, shop: &str) -> Result<Vec<Listing>, SourceError> {
        let url = self.listings_url(shop);
        tracing::debug!(shop, path = url.path(), "fetching active listings");

        let response = self
            .client
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| SourceError::Connectivity(e.to_string()))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(SourceError::Upstream {
                shop: shop.to_string(),
                status: status.as_u16(),
            });
        }
        if status != StatusCode::OK {
            tracing::debug!(shop, %status, "listing API rejected shop");
            return Err(SourceError::not_found(shop));
        }

        let page: ListingsPage = match response.json().await {
            Ok(page) => page,
            Err(e) if e.is_decode() => {
                tracing::warn!(shop, error = %e, "malformed listings response");
                return Err(SourceError::not_found(shop));
            }
            Err(e) => return Err(SourceError::Connectivity(e.to_string())),
        };

        if page.results.is_empty() {
            return Err(SourceError::not_found(shop));
        }

        tracing::info!(shop, listings = page.results.len(), "fetched active listings");
        Ok(page.results)
    }
}

/// Fixed listings held in memory (for testing)
#[derive(Debug, Default)]
pub struct InMemorySource {
    shops: HashMap<String, Vec<Listing>>,
    failures_left: AtomicUsize,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shop(mut self, shop: impl Into<String>, listings: Vec<Listing>) -> Self {
        self.shops.insert(shop.into(), listings);
        self
    }

    /// Make the next `count` fetches fail as if offline
    pub fn fail_next(self, count: usize) -> Self {
        self.failures_left.store(count, Ordering::SeqCst);
        self
    }
}

impl ListingSource for InMemorySource {
    async fn fetch_active_listings(&self, shop: &str) -> Result<Vec<Listing>, SourceError> {
        let offline = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if offline {
            return Err(SourceError::Connectivity("network unreachable".to_string()));
        }

        match self.shops.get(shop) {
            Some(listings) if !listings.is_empty() => Ok(listings.clone()),
            _ => Err(SourceError::not_found(shop)),
        }
    }
}
