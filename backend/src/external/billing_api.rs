//! Billing API client for fetching the product and purchase collections
//!
//! Both collections are served as `{"success": bool, "data": [...]}` and
//! require the caller's bearer token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{ApiEnvelope, ProductRecord, PurchaseRecord, SourceKind};

use crate::error::{AppError, AppResult};

/// Anything that can hand over the two source collections
#[async_trait]
pub trait InventorySource: Send + Sync {
    async fn fetch_products(&self, token: &str) -> AppResult<Vec<ProductRecord>>;

    async fn fetch_purchases(&self, token: &str) -> AppResult<Vec<PurchaseRecord>>;

    /// Human-readable location, for health output and logs
    fn describe(&self) -> String;
}

/// Billing API client
#[derive(Clone)]
pub struct BillingApiClient {
    client: Client,
    base_url: String,
}

impl BillingApiClient {
    /// Create a new BillingApiClient with a per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(client, base_url))
    }

    /// Create a new BillingApiClient around an existing reqwest client
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn fetch_collection<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
        collection: SourceKind,
    ) -> AppResult<Vec<T>> {
        let unavailable = |message: String| AppError::SourceUnavailable {
            collection,
            message,
        };

        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| unavailable(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(unavailable(format!("{} - {}", status, body)));
        }

        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|e| unavailable(format!("failed to parse response: {}", e)))?;

        if !envelope.success {
            tracing::warn!(%collection, "billing API reported failure; treating as empty");
        }

        let records = envelope.into_records();
        tracing::debug!(%collection, count = records.len(), "fetched collection");
        Ok(records)
    }
}

#[async_trait]
impl InventorySource for BillingApiClient {
    async fn fetch_products(&self, token: &str) -> AppResult<Vec<ProductRecord>> {
        self.fetch_collection("product", token, SourceKind::Product)
            .await
    }

    async fn fetch_purchases(&self, token: &str) -> AppResult<Vec<PurchaseRecord>> {
        self.fetch_collection("purchase", token, SourceKind::Purchase)
            .await
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}
