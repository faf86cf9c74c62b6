use std::time::SystemTime;

use super::entities::{Market, ProduceName};

/// App-wide data shared by every page through a signal.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub markets: Vec<Market>,
    /// Produce the farm can sell, used to fill the market form dropdowns.
    pub catalog: Vec<ProduceName>,
    pub loaded_at: Option<SystemTime>,
}

impl AppState {
    /// Inserts or replaces a market, keeping the list sorted by name.
    pub fn upsert_market(&mut self, market: Market) {
        match self.markets.iter_mut().find(|existing| existing.id == market.id) {
            Some(existing) => *existing = market,
            None => self.markets.push(market),
        }
        sort_by_name(&mut self.markets);
    }

    /// Swaps in a freshly loaded market list and catalog.
    pub fn replace(
        &mut self,
        mut markets: Vec<Market>,
        catalog: Vec<ProduceName>,
        fetched_at: SystemTime,
    ) {
        sort_by_name(&mut markets);
        self.markets = markets;
        self.catalog = catalog;
        self.loaded_at = Some(fetched_at);
    }

    /// Catalog for the market form, or `None` before the first load.
    pub fn loaded_catalog(&self) -> Option<Vec<ProduceName>> {
        self.loaded_at.map(|_| self.catalog.clone())
    }
}

fn sort_by_name(markets: &mut [Market]) {
    markets.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn market(id: &str, name: &str) -> Market {
        Market {
            id: id.into(),
            name: name.into(),
            prices: Default::default(),
        }
    }

    #[test]
    fn upsert_replaces_and_sorts() {
        let mut state = AppState::default();
        state.upsert_market(market("b", "Riverside"));
        state.upsert_market(market("a", "hilltop"));
        state.upsert_market(market("b", "Bayview"));
        let names: Vec<_> = state.markets.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Bayview", "hilltop"]);
    }

    #[test]
    fn replace_records_load_time_and_catalog() {
        let mut state = AppState::default();
        assert_eq!(state.loaded_catalog(), None);
        state.replace(
            vec![market("z", "Zeta"), market("a", "Alpha")],
            vec!["Kale".into(), "Leek".into()],
            SystemTime::now(),
        );
        assert!(state.loaded_at.is_some());
        assert_eq!(state.markets[0].name, "Alpha");
        assert_eq!(
            state.loaded_catalog(),
            Some(vec!["Kale".to_string(), "Leek".to_string()])
        );
    }

    #[test]
    fn empty_catalog_after_load_is_still_loaded() {
        let mut state = AppState::default();
        state.replace(Vec::new(), Vec::new(), SystemTime::now());
        assert_eq!(state.loaded_catalog(), Some(Vec::new()));
    }
}
