#![allow(dead_code)]

//! View-model behind the sell produce screen.

use std::collections::BTreeMap;

use thiserror::Error;

use super::{
    cart::{CountChange, ProduceCart, QuotaProgress},
    entities::{Market, MarketId, MarketListing, ProduceName, SaleRecord},
    submit::{SubmitGate, SubmitStatus},
};
use crate::infra::store::{SalesLedger, StoreError};

/// Finalized cart contents handed to the sales ledger.
#[derive(Clone, Debug, PartialEq)]
pub struct SaleSubmission {
    pub ticket: u64,
    pub market_id: MarketId,
    pub counts: BTreeMap<ProduceName, u32>,
    pub total_earnings: f64,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("a submission is already in progress")]
    InFlight,
    #[error("submission result arrived after the session moved on")]
    Discarded,
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SellSession {
    market: Market,
    cart: ProduceCart,
    status: SubmitStatus,
    gate: SubmitGate,
}

impl SellSession {
    pub fn new(listing: MarketListing) -> Self {
        Self {
            cart: ProduceCart::new(listing.offerings),
            market: listing.market,
            status: SubmitStatus::Idle,
            gate: SubmitGate::default(),
        }
    }

    pub fn market_id(&self) -> &str {
        &self.market.id
    }

    pub fn market_name(&self) -> &str {
        &self.market.name
    }

    pub fn title(&self) -> String {
        format!("Sell - {}", self.market.name)
    }

    pub fn cart(&self) -> &ProduceCart {
        &self.cart
    }

    pub fn submit_status(&self) -> &SubmitStatus {
        &self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.gate.is_open()
    }

    pub fn total_earnings(&self) -> f64 {
        self.cart.total_earnings()
    }

    pub fn quota_progress(&self, name: &str) -> Option<QuotaProgress> {
        self.cart.quota_progress(name)
    }

    pub fn set_count(&mut self, name: &str, count: i64) -> CountChange {
        self.mutate(|cart| cart.set_count(name, count))
    }

    pub fn set_count_from_input(&mut self, name: &str, raw: &str) -> CountChange {
        self.mutate(|cart| cart.set_count_from_input(name, raw))
    }

    pub fn increment(&mut self, name: &str) -> CountChange {
        self.mutate(|cart| cart.increment(name))
    }

    pub fn decrement(&mut self, name: &str) -> CountChange {
        self.mutate(|cart| cart.decrement(name))
    }

    fn mutate(&mut self, op: impl FnOnce(&mut ProduceCart) -> CountChange) -> CountChange {
        if self.gate.is_open() {
            return CountChange::Locked;
        }
        let change = op(&mut self.cart);
        if matches!(change, CountChange::Updated { .. } | CountChange::Clamped { .. })
            && self.status != SubmitStatus::Idle
        {
            // Editing after a success or failure starts a fresh attempt.
            self.status = SubmitStatus::Idle;
        }
        change
    }

    /// Freezes the cart and returns its snapshot, or `None` while a submission is pending.
    pub fn begin_submit(&mut self) -> Option<SaleSubmission> {
        let ticket = self.gate.open()?;
        self.status = SubmitStatus::Loading;
        let submission = SaleSubmission {
            ticket,
            market_id: self.market.id.clone(),
            counts: self.cart.snapshot(),
            total_earnings: self.cart.total_earnings(),
        };
        tracing::info!(
            market = %self.market.name,
            ticket,
            lines = submission.counts.len(),
            total = submission.total_earnings,
            "submitting sale"
        );
        Some(submission)
    }

    /// Applies a ledger response. Responses for a ticket that is no longer pending are dropped.
    pub fn finish_submit(
        &mut self,
        submission: &SaleSubmission,
        result: Result<SaleRecord, StoreError>,
    ) -> Result<SaleRecord, SubmitError> {
        if !self.gate.close(submission.ticket) {
            tracing::debug!(ticket = submission.ticket, "discarding stale sale result");
            return Err(SubmitError::Discarded);
        }
        match result {
            Ok(record) => {
                self.cart.settle(&submission.counts);
                self.status = SubmitStatus::Success;
                tracing::info!(sale = %record.id, "sale recorded");
                Ok(record)
            }
            Err(err) => {
                tracing::warn!(error = %err, "sale submission failed; cart kept");
                self.status = SubmitStatus::Error(err.to_string());
                Err(SubmitError::Store(err))
            }
        }
    }

    pub async fn submit<L>(&mut self, ledger: &L) -> Result<SaleRecord, SubmitError>
    where
        L: SalesLedger + ?Sized,
    {
        let submission = self.begin_submit().ok_or(SubmitError::InFlight)?;
        let result = ledger.record_sale(&submission).await;
        self.finish_submit(&submission, result)
    }
}
