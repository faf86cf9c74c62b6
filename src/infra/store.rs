//! Market data and sales ledger backed by a single JSON document on disk.
//!
//! - `MarketDirectory` and `SalesLedger` are the seams the view-models talk to.
//! - `JsonMarketStore` implements both; every mutation rewrites the document.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs, io,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tokio::sync::Mutex;

use crate::domain::{
    entities::ProduceName, Market, MarketListing, ProduceOffering, Quota, SaleRecord,
    SaleSubmission,
};

pub const STORE_FILENAME: &str = "store.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed store document: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("timestamp error: {0}")]
    Timestamp(#[from] time::error::Format),
    #[error("market {0} not found")]
    MarketNotFound(String),
    #[error("{0} is not sold at this market")]
    UnknownProduce(String),
    #[error("only {available} {produce} left, cannot sell {requested}")]
    InsufficientInventory {
        produce: String,
        requested: u32,
        available: u32,
    },
    #[error("ledger error: {0}")]
    Ledger(String),
}

/// Source of market data for both screens.
#[async_trait]
pub trait MarketDirectory: Send + Sync {
    async fn list_markets(&self) -> Result<Vec<Market>, StoreError>;
    async fn load_listing(&self, market_id: &str) -> Result<MarketListing, StoreError>;
    async fn produce_catalog(&self) -> Result<Vec<ProduceName>, StoreError>;
    async fn save_market(&self, market: Market) -> Result<Market, StoreError>;
}

/// Receives finalized sales and hands them back per market.
#[async_trait]
pub trait SalesLedger: Send + Sync {
    async fn record_sale(&self, sale: &SaleSubmission) -> Result<SaleRecord, StoreError>;
    /// Sales booked for `market_id`, newest first.
    async fn list_sales(&self, market_id: &str) -> Result<Vec<SaleRecord>, StoreError>;
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(default)]
    pub markets: Vec<Market>,
    /// Units on hand keyed by produce name.
    #[serde(default)]
    pub inventory: BTreeMap<ProduceName, u32>,
    #[serde(default)]
    pub quotas: BTreeMap<ProduceName, Quota>,
    #[serde(default)]
    pub sales: Vec<SaleRecord>,
}

impl StoreDocument {
    /// Starter data for a fresh install.
    pub fn seeded() -> Self {
        let inventory = BTreeMap::from([
            ("Apple".to_string(), 120),
            ("Carrot".to_string(), 80),
            ("Corn".to_string(), 60),
            ("Potato".to_string(), 200),
            ("Tomato".to_string(), 10),
        ]);
        let quotas = BTreeMap::from([
            ("Tomato".to_string(), Quota { goal: 20, progress: 15 }),
            ("Potato".to_string(), Quota { goal: 150, progress: 40 }),
        ]);
        let markets = vec![Market {
            id: uuid::Uuid::new_v4().to_string(),
            name: "Riverside Farmers Market".to_string(),
            prices: BTreeMap::from([
                ("Apple".to_string(), 1.25),
                ("Potato".to_string(), 0.80),
                ("Tomato".to_string(), 2.50),
            ]),
        }];
        Self {
            markets,
            inventory,
            quotas,
            sales: Vec::new(),
        }
    }

    fn market(&self, market_id: &str) -> Result<&Market, StoreError> {
        self.markets
            .iter()
            .find(|market| market.id == market_id)
            .ok_or_else(|| StoreError::MarketNotFound(market_id.to_string()))
    }

    pub fn listing(&self, market_id: &str) -> Result<MarketListing, StoreError> {
        let market = self.market(market_id)?.clone();
        let offerings = market
            .prices
            .iter()
            .map(|(name, price)| {
                let stock = self.inventory.get(name).copied().unwrap_or_default();
                let offering = ProduceOffering::new(name.clone(), *price, stock);
                match self.quotas.get(name) {
                    Some(quota) => offering.with_quota(quota.goal, quota.progress),
                    None => offering,
                }
            })
            .collect();
        Ok(MarketListing { market, offerings })
    }

    pub fn catalog(&self) -> Vec<ProduceName> {
        self.inventory
            .keys()
            .chain(self.quotas.keys())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn sales_for(&self, market_id: &str) -> Result<Vec<SaleRecord>, StoreError> {
        self.market(market_id)?;
        Ok(self
            .sales
            .iter()
            .rev()
            .filter(|sale| sale.market_id == market_id)
            .cloned()
            .collect())
    }

    pub fn upsert_market(&mut self, market: Market) {
        match self.markets.iter_mut().find(|existing| existing.id == market.id) {
            Some(existing) => *existing = market,
            None => self.markets.push(market),
        }
    }

    /// Checks a sale against prices and stock, then books it.
    pub fn apply_sale(
        &mut self,
        sale: &SaleSubmission,
        recorded_at: OffsetDateTime,
    ) -> Result<SaleRecord, StoreError> {
        let market = self.market(&sale.market_id)?;
        for (produce, requested) in &sale.counts {
            if !market.prices.contains_key(produce) {
                return Err(StoreError::UnknownProduce(produce.clone()));
            }
            let available = self.inventory.get(produce).copied().unwrap_or_default();
            if *requested > available {
                return Err(StoreError::InsufficientInventory {
                    produce: produce.clone(),
                    requested: *requested,
                    available,
                });
            }
        }

        for (produce, sold) in &sale.counts {
            if let Some(stock) = self.inventory.get_mut(produce) {
                *stock -= sold;
            }
            if let Some(quota) = self.quotas.get_mut(produce) {
                quota.progress = quota.progress.saturating_add(*sold);
            }
        }

        let record = SaleRecord {
            id: uuid::Uuid::new_v4().to_string(),
            market_id: sale.market_id.clone(),
            counts: sale.counts.clone(),
            total_earnings: sale.total_earnings,
            recorded_at: recorded_at.format(&Rfc3339)?,
        };
        self.sales.push(record.clone());
        Ok(record)
    }
}

pub struct JsonMarketStore {
    path: PathBuf,
    document: Mutex<StoreDocument>,
}

impl JsonMarketStore {
    /// Opens the store file in `data_dir`, seeding it on first use.
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        let path = data_dir.join(STORE_FILENAME);
        let document = if path.exists() {
            let content = fs::read_to_string(&path)?;
            let document: StoreDocument = serde_json::from_str(&content)?;
            tracing::info!(
                path = %path.display(),
                markets = document.markets.len(),
                sales = document.sales.len(),
                "loaded market store"
            );
            document
        } else {
            fs::create_dir_all(data_dir)?;
            let document = StoreDocument::seeded();
            fs::write(&path, serde_json::to_string_pretty(&document)?)?;
            tracing::info!(path = %path.display(), "created seeded market store");
            document
        };
        Ok(Self {
            path,
            document: Mutex::new(document),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write(&self, document: &StoreDocument) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(document)?;
        let staging = self.path.with_extension("json.tmp");
        tokio::fs::write(&staging, content).await?;
        tokio::fs::rename(&staging, &self.path).await?;
        tracing::debug!(path = %self.path.display(), "store written");
        Ok(())
    }

    /// Applies `change` to a copy, persists it, then commits it in memory.
    async fn commit<T, F>(&self, change: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut StoreDocument) -> Result<T, StoreError> + Send,
        T: Send,
    {
        let mut guard = self.document.lock().await;
        let mut draft = guard.clone();
        let value = change(&mut draft)?;
        self.write(&draft).await?;
        *guard = draft;
        Ok(value)
    }
}

#[async_trait]
impl MarketDirectory for JsonMarketStore {
    async fn list_markets(&self) -> Result<Vec<Market>, StoreError> {
        Ok(self.document.lock().await.markets.clone())
    }

    async fn load_listing(&self, market_id: &str) -> Result<MarketListing, StoreError> {
        self.document.lock().await.listing(market_id)
    }

    async fn produce_catalog(&self) -> Result<Vec<ProduceName>, StoreError> {
        Ok(self.document.lock().await.catalog())
    }

    async fn save_market(&self, market: Market) -> Result<Market, StoreError> {
        let saved = market.clone();
        self.commit(move |document| {
            document.upsert_market(market);
            Ok(())
        })
        .await?;
        Ok(saved)
    }
}

#[async_trait]
impl SalesLedger for JsonMarketStore {
    async fn record_sale(&self, sale: &SaleSubmission) -> Result<SaleRecord, StoreError> {
        let now = OffsetDateTime::now_utc();
        let record = self.commit(|document| document.apply_sale(sale, now)).await?;
        tracing::info!(
            sale = %record.id,
            market = %record.market_id,
            total = record.total_earnings,
            "sale written to ledger"
        );
        Ok(record)
    }

    async fn list_sales(&self, market_id: &str) -> Result<Vec<SaleRecord>, StoreError> {
        self.document.lock().await.sales_for(market_id)
    }
}
