//! View-model behind the add/edit market form.

use std::collections::{BTreeMap, HashSet};

use thiserror::Error;

use super::{
    entities::{sanitize_price, Market, ProduceName},
    submit::SubmitStatus,
};
use crate::{
    infra::store::{MarketDirectory, StoreError},
    util::generate_id,
};

/// Catalog size from which the produce dropdown offers a search box.
pub const DROPDOWN_SEARCH_MIN: usize = 4;

#[derive(Clone, Debug, PartialEq)]
pub struct ProduceRow {
    pub id: String,
    pub produce: Option<ProduceName>,
    pub price: f64,
}

impl ProduceRow {
    fn blank() -> Self {
        Self {
            id: generate_id("row"),
            produce: None,
            price: 0.0,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum MarketFormError {
    #[error("enter a market name")]
    EmptyName,
    #[error("select at least one produce")]
    NoProduce,
    #[error("{0} is listed more than once")]
    DuplicateProduce(String),
}

#[derive(Debug, Error)]
pub enum SaveMarketError {
    #[error("a save is already in progress")]
    InFlight,
    #[error(transparent)]
    Invalid(#[from] MarketFormError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarketForm {
    selected_market: Option<Market>,
    market_name: String,
    catalog: Vec<ProduceName>,
    rows: Vec<ProduceRow>,
    status: SubmitStatus,
}

impl MarketForm {
    pub fn new_market(catalog: Vec<ProduceName>) -> Self {
        Self {
            selected_market: None,
            market_name: String::new(),
            catalog,
            rows: vec![ProduceRow::blank()],
            status: SubmitStatus::Idle,
        }
    }

    /// Prefills the form from an existing market. Its name becomes read-only.
    pub fn edit(market: Market, catalog: Vec<ProduceName>) -> Self {
        let mut rows: Vec<ProduceRow> = market
            .prices
            .iter()
            .map(|(name, price)| ProduceRow {
                id: generate_id("row"),
                produce: Some(name.clone()),
                price: *price,
            })
            .collect();
        if rows.is_empty() {
            rows.push(ProduceRow::blank());
        }
        Self {
            market_name: market.name.clone(),
            selected_market: Some(market),
            catalog,
            rows,
            status: SubmitStatus::Idle,
        }
    }

    pub fn title(&self) -> String {
        match &self.selected_market {
            Some(market) => format!("Edit - {}", market.name),
            None => "Add Market".to_string(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.selected_market.is_some()
    }

    pub fn market_name(&self) -> &str {
        &self.market_name
    }

    pub fn catalog(&self) -> &[ProduceName] {
        &self.catalog
    }

    pub fn rows(&self) -> &[ProduceRow] {
        &self.rows
    }

    pub fn status(&self) -> &SubmitStatus {
        &self.status
    }

    pub fn search_enabled(&self) -> bool {
        self.catalog.len() >= DROPDOWN_SEARCH_MIN
    }

    /// Rows can only be removed while more than one remains.
    pub fn can_remove_rows(&self) -> bool {
        self.rows.len() > 1
    }

    pub fn set_market_name(&mut self, name: &str) {
        if self.is_editing() {
            return;
        }
        self.market_name = name.to_string();
        self.touch();
    }

    pub fn add_produce_row(&mut self) -> &str {
        self.rows.push(ProduceRow::blank());
        self.touch();
        &self.rows[self.rows.len() - 1].id
    }

    pub fn remove_produce_row(&mut self, row_id: &str) -> bool {
        if !self.can_remove_rows() {
            return false;
        }
        let before = self.rows.len();
        self.rows.retain(|row| row.id != row_id);
        let removed = self.rows.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    pub fn select_produce(&mut self, row_id: &str, produce: &str) -> bool {
        if !self.catalog.iter().any(|name| name == produce) {
            tracing::debug!(produce, "produce not in catalog");
            return false;
        }
        let Some(row) = self.rows.iter_mut().find(|row| row.id == row_id) else {
            return false;
        };
        row.produce = Some(produce.to_string());
        self.touch();
        true
    }

    /// `None`, negative or non-finite prices leave the row untouched.
    pub fn set_produce_price(&mut self, row_id: &str, price: Option<f64>) -> bool {
        let Some(price) = price.filter(|value| value.is_finite() && *value >= 0.0) else {
            return false;
        };
        let Some(row) = self.rows.iter_mut().find(|row| row.id == row_id) else {
            return false;
        };
        row.price = sanitize_price(price);
        self.touch();
        true
    }

    pub fn set_produce_price_from_input(&mut self, row_id: &str, raw: &str) -> bool {
        let cleaned: String = raw
            .trim()
            .trim_start_matches('$')
            .chars()
            .filter(|ch| *ch != ',')
            .collect();
        self.set_produce_price(row_id, cleaned.parse::<f64>().ok())
    }

    pub fn build(&self) -> Result<Market, MarketFormError> {
        let name = self.market_name.trim();
        if name.is_empty() {
            return Err(MarketFormError::EmptyName);
        }

        let mut seen = HashSet::new();
        let mut prices = BTreeMap::new();
        for row in &self.rows {
            let Some(produce) = &row.produce else {
                continue;
            };
            if !seen.insert(produce.clone()) {
                return Err(MarketFormError::DuplicateProduce(produce.clone()));
            }
            prices.insert(produce.clone(), row.price);
        }
        if prices.is_empty() {
            return Err(MarketFormError::NoProduce);
        }

        let id = self
            .selected_market
            .as_ref()
            .map(|market| market.id.clone())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        Ok(Market {
            id,
            name: name.to_string(),
            prices,
        })
    }

    /// Validates the form and marks it as saving.
    pub fn begin_save(&mut self) -> Result<Market, SaveMarketError> {
        if self.status.is_loading() {
            return Err(SaveMarketError::InFlight);
        }
        match self.build() {
            Ok(market) => {
                self.status = SubmitStatus::Loading;
                Ok(market)
            }
            Err(err) => {
                self.status = SubmitStatus::Error(err.to_string());
                Err(err.into())
            }
        }
    }

    pub fn finish_save(
        &mut self,
        result: Result<Market, StoreError>,
    ) -> Result<Market, SaveMarketError> {
        match result {
            Ok(saved) => {
                tracing::info!(market = %saved.name, produce = saved.prices.len(), "market saved");
                self.market_name = saved.name.clone();
                self.selected_market = Some(saved.clone());
                self.status = SubmitStatus::Success;
                Ok(saved)
            }
            Err(err) => {
                tracing::warn!(error = %err, "saving market failed");
                self.status = SubmitStatus::Error(err.to_string());
                Err(err.into())
            }
        }
    }

    pub async fn submit<D>(&mut self, directory: &D) -> Result<Market, SaveMarketError>
    where
        D: MarketDirectory + ?Sized,
    {
        let market = self.begin_save()?;
        let result = directory.save_market(market).await;
        self.finish_save(result)
    }

    fn touch(&mut self) {
        if !self.status.is_loading() {
            self.status = SubmitStatus::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<String> {
        ["Carrot", "Kale", "Potato", "Tomato"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn new_form_has_one_blank_row() {
        let form = MarketForm::new_market(catalog());
        assert_eq!(form.title(), "Add Market");
        assert_eq!(form.rows().len(), 1);
        assert!(!form.can_remove_rows());
        assert!(form.search_enabled());
    }

    #[test]
    fn search_needs_four_entries() {
        let form = MarketForm::new_market(vec!["Kale".into(), "Leek".into()]);
        assert!(!form.search_enabled());
    }

    #[test]
    fn last_row_cannot_be_removed() {
        let mut form = MarketForm::new_market(catalog());
        let only = form.rows()[0].id.clone();
        assert!(!form.remove_produce_row(&only));
        let added = form.add_produce_row().to_string();
        assert!(form.remove_produce_row(&added));
        assert_eq!(form.rows().len(), 1);
    }

    #[test]
    fn builds_market_from_rows() {
        let mut form = MarketForm::new_market(catalog());
        form.set_market_name("  Riverside ");
        let first = form.rows()[0].id.clone();
        assert!(form.select_produce(&first, "Kale"));
        assert!(form.set_produce_price_from_input(&first, "$4.25"));
        let second = form.add_produce_row().to_string();
        form.select_produce(&second, "Tomato");
        form.set_produce_price(&second, Some(2.5));
        form.add_produce_row();

        let market = form.build().expect("valid form");
        assert_eq!(market.name, "Riverside");
        assert_eq!(market.prices.len(), 2);
        assert_eq!(market.prices.get("Kale"), Some(&4.25));
        assert_eq!(market.prices.get("Tomato"), Some(&2.5));
    }

    #[test]
    fn rejects_bad_prices_and_unknown_produce() {
        let mut form = MarketForm::new_market(catalog());
        let row = form.rows()[0].id.clone();
        assert!(!form.select_produce(&row, "Durian"));
        assert!(!form.set_produce_price(&row, None));
        assert!(!form.set_produce_price(&row, Some(-1.0)));
        assert!(!form.set_produce_price_from_input(&row, "abc"));
        assert_eq!(form.rows()[0].price, 0.0);
    }

    #[test]
    fn validation_errors() {
        let mut form = MarketForm::new_market(catalog());
        assert_eq!(form.build(), Err(MarketFormError::EmptyName));
        form.set_market_name("Riverside");
        assert_eq!(form.build(), Err(MarketFormError::NoProduce));
        let first = form.rows()[0].id.clone();
        let second = form.add_produce_row().to_string();
        form.select_produce(&first, "Kale");
        form.select_produce(&second, "Kale");
        assert_eq!(
            form.build(),
            Err(MarketFormError::DuplicateProduce("Kale".into()))
        );
    }

    #[test]
    fn editing_keeps_id_and_locks_name() {
        let market = Market {
            id: "m-7".into(),
            name: "Hilltop".into(),
            prices: BTreeMap::from([("Potato".to_string(), 1.2)]),
        };
        let mut form = MarketForm::edit(market, catalog());
        assert_eq!(form.title(), "Edit - Hilltop");
        form.set_market_name("Renamed");
        assert_eq!(form.market_name(), "Hilltop");
        let built = form.build().expect("valid");
        assert_eq!(built.id, "m-7");
        assert_eq!(built.prices.get("Potato"), Some(&1.2));
    }

    #[tokio::test]
    async fn submit_saves_and_switches_to_edit_mode() {
        use crate::infra::store::JsonMarketStore;

        let dir = tempfile::tempdir().expect("temp dir");
        let store = JsonMarketStore::open(dir.path()).expect("open store");
        let mut form = MarketForm::new_market(catalog());
        form.set_market_name("Hilltop");
        let row = form.rows()[0].id.clone();
        form.select_produce(&row, "Potato");
        form.set_produce_price(&row, Some(0.9));

        let saved = form.submit(&store).await.expect("saved");
        assert_eq!(form.status(), &SubmitStatus::Success);
        assert_eq!(form.title(), "Edit - Hilltop");
        let listing = store.load_listing(&saved.id).await.expect("stored");
        assert_eq!(listing.market.prices.get("Potato"), Some(&0.9));
    }

    #[tokio::test]
    async fn invalid_form_is_not_sent() {
        use crate::infra::store::JsonMarketStore;

        let dir = tempfile::tempdir().expect("temp dir");
        let store = JsonMarketStore::open(dir.path()).expect("open store");
        let mut form = MarketForm::new_market(catalog());
        let err = form.submit(&store).await.expect_err("empty name");
        assert!(matches!(err, SaveMarketError::Invalid(MarketFormError::EmptyName)));
        assert_eq!(form.status().error(), Some("enter a market name"));
        assert_eq!(store.list_markets().await.expect("markets").len(), 1);
    }
}
