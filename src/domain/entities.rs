use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identifier for markets stored by the market directory.
pub type MarketId = String;

/// Produce names double as offering keys within a market.
pub type ProduceName = String;

/// A market and the price it pays per unit of each produce.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Market {
    pub id: MarketId,
    pub name: String,
    /// Unit price keyed by produce name.
    #[serde(default)]
    pub prices: BTreeMap<ProduceName, f64>,
}

/// Cumulative sales target for one produce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quota {
    pub goal: u32,
    #[serde(default)]
    pub progress: u32,
}

/// A produce type available for sale at a market.
#[derive(Clone, Debug, PartialEq)]
pub struct ProduceOffering {
    pub name: ProduceName,
    pub unit_price: f64,
    /// Maximum number of units that may be sold in one sale.
    pub inventory_limit: u32,
    /// `None` when the produce has no quota.
    pub quota_goal: Option<u32>,
    /// Units already sold toward the goal.
    pub quota_progress: u32,
}

impl ProduceOffering {
    pub fn new(name: impl Into<String>, unit_price: f64, inventory_limit: u32) -> Self {
        Self {
            name: name.into(),
            unit_price: sanitize_price(unit_price),
            inventory_limit,
            quota_goal: None,
            quota_progress: 0,
        }
    }

    pub fn with_quota(mut self, goal: u32, progress: u32) -> Self {
        self.quota_goal = Some(goal);
        self.quota_progress = progress;
        self
    }
}

/// A market together with everything the sell screen needs to render it.
#[derive(Clone, Debug, PartialEq)]
pub struct MarketListing {
    pub market: Market,
    pub offerings: Vec<ProduceOffering>,
}

/// Prices are non-negative decimals; anything else is treated as free.
pub fn sanitize_price(price: f64) -> f64 {
    if price.is_finite() && price > 0.0 {
        price
    } else {
        0.0
    }
}

/// A sale as accepted by the sales ledger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: String,
    pub market_id: MarketId,
    /// Units sold keyed by produce name. Empty for a zero sale.
    pub counts: BTreeMap<ProduceName, u32>,
    pub total_earnings: f64,
    /// RFC 3339 timestamp.
    pub recorded_at: String,
}
