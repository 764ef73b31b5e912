//! Inventory service: fetches both source collections, reconciles them and
//! falls back to the company's cached ledger when the billing API fails

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use shared::{
    build_view, reconcile, CoercionWarning, InventoryFilter, InventorySettings, InventoryView,
    LineItem, SnapshotSource,
};

use crate::error::AppResult;
use crate::external::InventorySource;
use crate::services::cache::{validate_tenant_id, CacheRepository};

/// A merged ledger together with where it came from
#[derive(Debug, Clone)]
pub struct Ledger {
    pub items: Vec<LineItem>,
    pub source: SnapshotSource,
    pub cached_at: Option<DateTime<Utc>>,
    pub warnings: Vec<CoercionWarning>,
}

impl Ledger {
    fn unavailable() -> Self {
        Self {
            items: Vec::new(),
            source: SnapshotSource::Unavailable,
            cached_at: None,
            warnings: Vec::new(),
        }
    }
}

/// Inventory service for reconciling stock across products and purchases
#[derive(Clone)]
pub struct InventoryService {
    source: Arc<dyn InventorySource>,
    cache: Arc<dyn CacheRepository>,
    settings: InventorySettings,
}

impl InventoryService {
    /// Create a new InventoryService instance
    pub fn new(
        source: Arc<dyn InventorySource>,
        cache: Arc<dyn CacheRepository>,
        settings: InventorySettings,
    ) -> Self {
        Self {
            source,
            cache,
            settings,
        }
    }

    pub fn settings(&self) -> &InventorySettings {
        &self.settings
    }

    pub fn upstream(&self) -> String {
        self.source.describe()
    }

    /// Load the merged ledger for a company
    pub async fn load_ledger(&self, tenant_id: &str, token: &str) -> AppResult<Ledger> {
        self.load_ledger_on(tenant_id, token, Utc::now().date_naive())
            .await
    }

    /// Load the merged ledger, using `today` for records without a date.
    ///
    /// Both collections are requested concurrently and reconciled only once
    /// both have answered. If either fails, the last cached ledger is served
    /// instead; a failing cache degrades to an empty ledger.
    pub async fn load_ledger_on(
        &self,
        tenant_id: &str,
        token: &str,
        today: NaiveDate,
    ) -> AppResult<Ledger> {
        validate_tenant_id(tenant_id)?;

        let (products, purchases) = tokio::join!(
            self.source.fetch_products(token),
            self.source.fetch_purchases(token)
        );

        let (products, purchases) = match (products, purchases) {
            (Ok(products), Ok(purchases)) => (products, purchases),
            (products, purchases) => {
                for err in [products.err(), purchases.err()].into_iter().flatten() {
                    tracing::warn!(tenant_id, error = %err, "inventory source fetch failed");
                }
                return Ok(self.fallback(tenant_id).await);
            }
        };

        let reconciliation = reconcile(&products, &purchases, today, &self.settings);

        if let Err(e) = self.cache.store(tenant_id, &reconciliation.items).await {
            tracing::warn!(tenant_id, error = %e, "failed to cache inventory snapshot");
        }

        Ok(Ledger {
            items: reconciliation.items,
            source: SnapshotSource::Live,
            cached_at: None,
            warnings: reconciliation.warnings,
        })
    }

    async fn fallback(&self, tenant_id: &str) -> Ledger {
        match self.cache.load(tenant_id).await {
            Ok(Some(snapshot)) => {
                tracing::warn!(
                    tenant_id,
                    cached_at = %snapshot.cached_at,
                    items = snapshot.items.len(),
                    "serving cached inventory"
                );
                Ledger {
                    items: snapshot.items,
                    source: SnapshotSource::Cached,
                    cached_at: Some(snapshot.cached_at),
                    warnings: Vec::new(),
                }
            }
            Ok(None) => {
                tracing::warn!(tenant_id, "no cached inventory; serving empty ledger");
                Ledger::unavailable()
            }
            Err(e) => {
                tracing::warn!(tenant_id, error = %e, "cache unreadable; serving empty ledger");
                Ledger::unavailable()
            }
        }
    }

    /// Filtered, valued view of a company's inventory
    pub async fn inventory_view(
        &self,
        tenant_id: &str,
        token: &str,
        filter: &InventoryFilter,
    ) -> AppResult<InventoryView> {
        filter.validate()?;
        let ledger = self.load_ledger(tenant_id, token).await?;
        Ok(self.view_of(ledger, filter))
    }

    /// Distinct categories of the unfiltered ledger
    pub async fn categories(&self, tenant_id: &str, token: &str) -> AppResult<Vec<String>> {
        let ledger = self.load_ledger(tenant_id, token).await?;
        Ok(shared::distinct_categories(&ledger.items))
    }

    /// Only the low-stock items of the unfiltered ledger
    pub async fn low_stock(&self, tenant_id: &str, token: &str) -> AppResult<InventoryView> {
        let ledger = self.load_ledger(tenant_id, token).await?;
        let mut view = self.view_of(ledger, &InventoryFilter::default());
        view.valuation.items.retain(|v| v.is_low_stock);
        view.valuation.total_stock_value = view
            .valuation
            .items
            .iter()
            .fold(Decimal::ZERO, |total, v| total.saturating_add(v.stock_value));
        Ok(view)
    }

    fn view_of(&self, ledger: Ledger, filter: &InventoryFilter) -> InventoryView {
        let mut view = build_view(
            &ledger.items,
            filter,
            &self.settings,
            ledger.source,
            ledger.cached_at,
        );
        view.warnings = ledger.warnings;
        view
    }
}
