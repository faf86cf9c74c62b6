use dioxus::prelude::*;

use crate::{
    app::Services,
    domain::{AppState, SaleRecord},
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        shell::Shell,
        theme,
    },
    util::format::{format_counts, format_currency, format_timestamp},
};

/// One ledger entry ready for display.
#[derive(Clone, Debug, PartialEq)]
struct SaleRow {
    id: String,
    when: String,
    produce: String,
    total: String,
}

impl SaleRow {
    fn new(record: &SaleRecord, currency: &str) -> Self {
        Self {
            id: record.id.clone(),
            when: format_timestamp(&record.recorded_at),
            produce: format_counts(&record.counts),
            total: format_currency(currency, record.total_earnings),
        }
    }
}

#[component]
pub fn TransactionsPage(market_id: String) -> Element {
    let services = use_context::<Services>();
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let sales = use_resource({
        let services = services.clone();
        let market_id = market_id.clone();
        move || {
            let services = services.clone();
            let market_id = market_id.clone();
            async move {
                match services.ledger.list_sales(&market_id).await {
                    Ok(sales) => {
                        tracing::debug!(market = %market_id, sales = sales.len(), "transactions loaded");
                        Some(sales)
                    }
                    Err(err) => {
                        tracing::error!(market = %market_id, error = %err, "failed to load transactions");
                        push_toast(toasts, ToastKind::Error, format!("Failed to load transactions: {err}"));
                        None
                    }
                }
            }
        }
    });

    let title = state
        .read()
        .markets
        .iter()
        .find(|market| market.id == market_id)
        .map(|market| format!("Transactions - {}", market.name))
        .unwrap_or_else(|| "Transactions".to_string());

    // `None` until the ledger answers; a failed load shows as an empty list.
    let loaded: Option<(Vec<SaleRow>, String)> = sales.read().as_ref().map(|result| {
        let records = result.as_deref().unwrap_or_default();
        let rows = records
            .iter()
            .map(|record| SaleRow::new(record, &services.currency_symbol))
            .collect();
        let sum: f64 = records.iter().map(|record| record.total_earnings).sum();
        (rows, format_currency(&services.currency_symbol, sum))
    });

    let Some((rows, grand_total)) = loaded else {
        return rsx! {
            Shell { title, show_back: true,
                div { class: "spinner spinner-large" }
            }
        };
    };

    rsx! {
        Shell { title, show_back: true,
            if rows.is_empty() {
                p { class: theme::text_muted(), "No sales recorded for this market yet." }
            } else {
                ul { class: "sale-list",
                    for row in rows {
                        li { key: "{row.id}", class: "sale-row",
                            div {
                                p { class: "sale-when", "{row.when}" }
                                p { class: theme::text_muted(), "{row.produce}" }
                            }
                            span { class: "total-value", "{row.total}" }
                        }
                    }
                }
                div { class: theme::divider() }
                div { class: "total-row",
                    span { class: "total-label", "Total Earnings:" }
                    span { class: "total-value", "{grand_total}" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn sale_row_formats_record() {
        let record = SaleRecord {
            id: "s-1".into(),
            market_id: "m-1".into(),
            counts: BTreeMap::from([("Tomato".to_string(), 6)]),
            total_earnings: 15.0,
            recorded_at: "2026-10-19T09:05:00Z".into(),
        };
        let row = SaleRow::new(&record, "$");
        assert_eq!(row.when, "2026-10-19 09:05 UTC");
        assert_eq!(row.produce, "Tomato × 6");
        assert_eq!(row.total, "$15.00");
    }
}
