//! Per-offering sale counts for the sell screen.
//!
//! Counts always stay within `0..=inventory_limit`. Totals and quota figures
//! are derived on every call, never cached.

use std::collections::{BTreeMap, HashSet};

use super::entities::{ProduceName, ProduceOffering};

/// Result of a count mutation, so callers can tell a clamp from a rejection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountChange {
    Updated { count: u32 },
    Clamped { requested: i64, count: u32 },
    /// The request was valid but the count was already at that value or bound.
    Unchanged { count: u32 },
    /// Negative or unparsable input; the prior count is kept.
    Rejected,
    NotFound,
    /// A submission is in flight and the cart is frozen.
    Locked,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CartLine {
    pub offering: ProduceOffering,
    pub count: u32,
}

impl CartLine {
    pub fn line_total(&self) -> f64 {
        self.count as f64 * self.offering.unit_price
    }

    pub fn quota_progress(&self) -> Option<QuotaProgress> {
        self.offering.quota_goal.map(|goal| QuotaProgress {
            current: self.offering.quota_progress,
            pending: self.count,
            goal,
        })
    }
}

/// Quota standing of one offering including the not yet submitted count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuotaProgress {
    pub current: u32,
    pub pending: u32,
    pub goal: u32,
}

impl QuotaProgress {
    /// Progress including the pending count. May exceed the goal.
    pub fn progress(&self) -> u32 {
        self.current.saturating_add(self.pending)
    }

    /// Fill ratio of already recorded sales, clamped to `[0, 1]` for drawing.
    pub fn recorded_ratio(&self) -> f32 {
        ratio(self.current, self.goal)
    }

    /// Fill ratio once the pending count is sold, clamped to `[0, 1]`.
    pub fn expected_ratio(&self) -> f32 {
        ratio(self.progress(), self.goal)
    }

    pub fn label(&self) -> String {
        format!("Quota Progress: {}/{}", self.progress(), self.goal)
    }
}

pub const NO_QUOTA_LABEL: &str = "No Quota Available";

fn ratio(value: u32, goal: u32) -> f32 {
    // A zero goal is met by definition.
    if goal == 0 {
        return 1.0;
    }
    (value as f32 / goal as f32).clamp(0.0, 1.0)
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProduceCart {
    lines: Vec<CartLine>,
}

impl ProduceCart {
    /// Builds a cart with every count at zero. Duplicate names keep the first offering.
    pub fn new(offerings: impl IntoIterator<Item = ProduceOffering>) -> Self {
        let mut seen = HashSet::new();
        let mut lines = Vec::new();
        for offering in offerings {
            if !seen.insert(offering.name.clone()) {
                tracing::warn!(produce = %offering.name, "duplicate offering ignored");
                continue;
            }
            lines.push(CartLine { offering, count: 0 });
        }
        Self { lines }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, name: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.offering.name == name)
    }

    fn line_mut(&mut self, name: &str) -> Option<&mut CartLine> {
        let line = self.lines.iter_mut().find(|line| line.offering.name == name);
        if line.is_none() {
            tracing::debug!(produce = name, "cart operation on unknown offering ignored");
        }
        line
    }

    pub fn count(&self, name: &str) -> Option<u32> {
        self.line(name).map(|line| line.count)
    }

    pub fn set_count(&mut self, name: &str, requested: i64) -> CountChange {
        let Some(line) = self.line_mut(name) else {
            return CountChange::NotFound;
        };
        if requested < 0 {
            return CountChange::Rejected;
        }
        let limit = line.offering.inventory_limit;
        let clamped = requested.min(limit as i64) as u32;
        let previous = line.count;
        line.count = clamped;

        if clamped as i64 != requested {
            CountChange::Clamped {
                requested,
                count: clamped,
            }
        } else if previous == clamped {
            CountChange::Unchanged { count: clamped }
        } else {
            CountChange::Updated { count: clamped }
        }
    }

    /// Parses text from a quantity field. Anything but a non-negative integer is ignored.
    pub fn set_count_from_input(&mut self, name: &str, raw: &str) -> CountChange {
        if self.line(name).is_none() {
            return CountChange::NotFound;
        }
        match raw.trim().parse::<i64>() {
            Ok(requested) => self.set_count(name, requested),
            Err(_) => CountChange::Rejected,
        }
    }

    pub fn increment(&mut self, name: &str) -> CountChange {
        let Some(line) = self.line_mut(name) else {
            return CountChange::NotFound;
        };
        if line.count < line.offering.inventory_limit {
            line.count += 1;
            CountChange::Updated { count: line.count }
        } else {
            CountChange::Unchanged { count: line.count }
        }
    }

    pub fn decrement(&mut self, name: &str) -> CountChange {
        let Some(line) = self.line_mut(name) else {
            return CountChange::NotFound;
        };
        if line.count > 0 {
            line.count -= 1;
            CountChange::Updated { count: line.count }
        } else {
            CountChange::Unchanged { count: 0 }
        }
    }

    pub fn total_earnings(&self) -> f64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn quota_progress(&self, name: &str) -> Option<QuotaProgress> {
        self.line(name).and_then(CartLine::quota_progress)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| line.count == 0)
    }

    /// Nonzero counts keyed by produce name.
    pub fn snapshot(&self) -> BTreeMap<ProduceName, u32> {
        self.lines
            .iter()
            .filter(|line| line.count > 0)
            .map(|line| (line.offering.name.clone(), line.count))
            .collect()
    }

    /// Folds a recorded sale into the offerings and resets every count.
    pub fn settle(&mut self, sold: &BTreeMap<ProduceName, u32>) {
        for line in &mut self.lines {
            if let Some(units) = sold.get(&line.offering.name) {
                line.offering.inventory_limit = line.offering.inventory_limit.saturating_sub(*units);
                if line.offering.quota_goal.is_some() {
                    line.offering.quota_progress = line.offering.quota_progress.saturating_add(*units);
                }
            }
            line.count = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tomato() -> ProduceOffering {
        ProduceOffering::new("Tomato", 2.50, 10).with_quota(20, 15)
    }

    fn cart() -> ProduceCart {
        ProduceCart::new(vec![tomato(), ProduceOffering::new("Kale", 4.0, 3)])
    }

    #[test]
    fn starts_with_zero_counts() {
        let cart = cart();
        assert_eq!(cart.count("Tomato"), Some(0));
        assert_eq!(cart.count("Kale"), Some(0));
        assert!(cart.is_empty());
        assert_eq!(cart.total_earnings(), 0.0);
    }

    #[test]
    fn six_increments_push_quota_over_goal() {
        let mut cart = cart();
        for _ in 0..6 {
            cart.increment("Tomato");
        }
        assert_eq!(cart.count("Tomato"), Some(6));
        let quota = cart.quota_progress("Tomato").expect("tomato has a quota");
        assert_eq!(quota.progress(), 21);
        assert_eq!(quota.goal, 20);
        assert_eq!(quota.label(), "Quota Progress: 21/20");
        assert_eq!(quota.expected_ratio(), 1.0);
        assert_eq!(quota.recorded_ratio(), 0.75);
        assert_eq!(cart.total_earnings(), 15.0);
    }

    #[test]
    fn increment_stops_at_inventory_limit() {
        let mut cart = cart();
        for _ in 0..3 {
            cart.increment("Kale");
        }
        assert_eq!(
            cart.increment("Kale"),
            CountChange::Unchanged { count: 3 }
        );
        assert_eq!(cart.count("Kale"), Some(3));
    }

    #[test]
    fn decrement_stops_at_zero() {
        let mut cart = cart();
        assert_eq!(cart.decrement("Kale"), CountChange::Unchanged { count: 0 });
        cart.increment("Kale");
        assert_eq!(cart.decrement("Kale"), CountChange::Updated { count: 0 });
    }

    #[test]
    fn set_count_clamps_above_limit() {
        let mut cart = cart();
        assert_eq!(
            cart.set_count("Kale", 50),
            CountChange::Clamped {
                requested: 50,
                count: 3
            }
        );
        assert_eq!(cart.count("Kale"), Some(3));
    }

    #[test]
    fn negative_count_keeps_prior_value() {
        let mut cart = cart();
        cart.set_count("Tomato", 4);
        assert_eq!(cart.set_count("Tomato", -5), CountChange::Rejected);
        assert_eq!(cart.count("Tomato"), Some(4));
    }

    #[test]
    fn unparsable_input_keeps_prior_value() {
        let mut cart = cart();
        cart.set_count_from_input("Tomato", " 7 ");
        assert_eq!(cart.count("Tomato"), Some(7));
        assert_eq!(cart.set_count_from_input("Tomato", "seven"), CountChange::Rejected);
        assert_eq!(cart.set_count_from_input("Tomato", "-5"), CountChange::Rejected);
        assert_eq!(cart.set_count_from_input("Tomato", ""), CountChange::Rejected);
        assert_eq!(cart.count("Tomato"), Some(7));
    }

    #[test]
    fn unknown_offering_is_ignored() {
        let mut cart = cart();
        let before = cart.clone();
        assert_eq!(cart.increment("Durian"), CountChange::NotFound);
        assert_eq!(cart.decrement("Durian"), CountChange::NotFound);
        assert_eq!(cart.set_count("Durian", 2), CountChange::NotFound);
        assert_eq!(cart.set_count_from_input("Durian", "2"), CountChange::NotFound);
        assert_eq!(cart.quota_progress("Durian"), None);
        assert_eq!(cart, before);
    }

    #[test]
    fn counts_stay_in_bounds_over_mixed_sequences() {
        let mut cart = cart();
        let ops: [(&str, i64); 8] = [
            ("inc", 0),
            ("set", 9),
            ("inc", 0),
            ("set", -1),
            ("dec", 0),
            ("set", 1_000),
            ("dec", 0),
            ("set", 0),
        ];
        for name in ["Tomato", "Kale"] {
            for (op, value) in ops {
                match op {
                    "inc" => cart.increment(name),
                    "dec" => cart.decrement(name),
                    _ => cart.set_count(name, value),
                };
                let line = cart.line(name).expect("line exists");
                assert!(line.count <= line.offering.inventory_limit);
            }
        }
    }

    #[test]
    fn total_is_stable_without_mutation() {
        let mut cart = cart();
        cart.set_count("Tomato", 3);
        cart.set_count("Kale", 2);
        let first = cart.total_earnings();
        assert_eq!(first, 15.5);
        for _ in 0..5 {
            assert_eq!(cart.total_earnings(), first);
        }
    }

    #[test]
    fn offering_without_quota_reports_none() {
        let cart = cart();
        assert_eq!(cart.quota_progress("Kale"), None);
    }

    #[test]
    fn zero_goal_does_not_divide_by_zero() {
        let cart = ProduceCart::new(vec![ProduceOffering::new("Leek", 1.0, 5).with_quota(0, 0)]);
        let quota = cart.quota_progress("Leek").expect("quota present");
        assert_eq!(quota.recorded_ratio(), 1.0);
        assert_eq!(quota.expected_ratio(), 1.0);
    }

    #[test]
    fn duplicate_offerings_collapse() {
        let cart = ProduceCart::new(vec![
            ProduceOffering::new("Kale", 4.0, 3),
            ProduceOffering::new("Kale", 9.0, 30),
        ]);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.line("Kale").map(|l| l.offering.unit_price), Some(4.0));
    }

    #[test]
    fn settle_updates_inventory_and_quota() {
        let mut cart = cart();
        cart.set_count("Tomato", 6);
        cart.set_count("Kale", 1);
        let sold = cart.snapshot();
        cart.settle(&sold);
        assert!(cart.is_empty());
        let tomato = cart.line("Tomato").expect("tomato line");
        assert_eq!(tomato.offering.inventory_limit, 4);
        assert_eq!(tomato.offering.quota_progress, 21);
        let kale = cart.line("Kale").expect("kale line");
        assert_eq!(kale.offering.inventory_limit, 2);
        assert_eq!(kale.offering.quota_progress, 0);
    }

    #[test]
    fn snapshot_omits_zero_lines() {
        let mut cart = cart();
        assert!(cart.snapshot().is_empty());
        cart.increment("Kale");
        let snapshot = cart.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get("Kale"), Some(&1));
    }
}
