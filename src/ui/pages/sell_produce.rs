use dioxus::prelude::*;

use crate::{
    app::{Route, Services},
    domain::{CountChange, SellSession, SubmitError},
    ui::{
        components::{
            quantity_picker::QuantityPicker,
            quota_bar::{QuotaBar, QuotaView},
            submit_button::SubmitButton,
            toast::{push_toast, ToastKind, ToastMessage},
        },
        shell::Shell,
        theme,
    },
    util::format::format_currency,
};

#[component]
pub fn SellProducePage(market_id: String) -> Element {
    let services = use_context::<Services>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let nav = use_navigator();
    let mut session = use_signal(|| None::<SellSession>);

    let _listing = use_resource({
        let services = services.clone();
        let market_id = market_id.clone();
        move || {
            let services = services.clone();
            let market_id = market_id.clone();
            let mut session = session;
            async move {
                match services.markets.load_listing(&market_id).await {
                    Ok(listing) => {
                        tracing::debug!(
                            market = %listing.market.name,
                            offerings = listing.offerings.len(),
                            "sell screen loaded"
                        );
                        session.set(Some(SellSession::new(listing)));
                    }
                    Err(err) => {
                        tracing::error!(market = %market_id, error = %err, "failed to load market");
                        push_toast(toasts, ToastKind::Error, format!("Failed to load market: {err}"));
                    }
                }
            }
        }
    });

    let currency = services.currency_symbol.clone();

    let on_submit = {
        let services = services.clone();
        let currency = currency.clone();
        move |_: ()| {
            let Some(submission) =
                session.with_mut(|s| s.as_mut().and_then(SellSession::begin_submit))
            else {
                return;
            };
            let ledger = services.ledger.clone();
            let currency = currency.clone();
            // Dropped with the page, so a late result never reaches a torn-down screen.
            let mut session = session;
            spawn(async move {
                let result = ledger.record_sale(&submission).await;
                let outcome =
                    session.with_mut(|s| s.as_mut().map(|s| s.finish_submit(&submission, result)));
                match outcome {
                    Some(Ok(record)) => push_toast(
                        toasts,
                        ToastKind::Success,
                        format!(
                            "Sale recorded: {}",
                            format_currency(&currency, record.total_earnings)
                        ),
                    ),
                    Some(Err(SubmitError::Store(err))) => {
                        push_toast(toasts, ToastKind::Error, format!("Sale failed: {err}"))
                    }
                    _ => {}
                }
            });
        }
    };

    let Some(current) = session() else {
        return rsx! {
            Shell { title: "Sell".to_string(), show_back: true,
                div { class: "spinner spinner-large" }
            }
        };
    };

    let locked = current.is_submitting();
    let total = format_currency(&currency, current.total_earnings());
    let edit_id = current.market_id().to_string();
    let history_id = edit_id.clone();
    let edit_title = format!("Edit {} Market", current.market_name());

    rsx! {
        Shell {
            title: current.title(),
            show_back: true,
            actions: rsx! {
                button {
                    class: theme::btn_icon(),
                    title: edit_title,
                    onclick: move |_| { nav.push(Route::EditMarket { market_id: edit_id.clone() }); },
                    "✎"
                }
                button {
                    class: theme::btn_icon(),
                    title: "Transactions",
                    onclick: move |_| { nav.push(Route::Transactions { market_id: history_id.clone() }); },
                    "☰"
                }
            },
            ul { class: "produce-list",
                for line in current.cart().lines().iter().cloned() {
                    ProduceLine {
                        key: "{line.offering.name}",
                        name: line.offering.name.clone(),
                        line_total: format_currency(&currency, line.line_total()),
                        count: line.count,
                        limit: line.offering.inventory_limit,
                        quota: QuotaView::from(line.quota_progress()),
                        disabled: locked,
                        session,
                    }
                }
            }
            div { class: theme::divider() }
            div { class: "total-row",
                span { class: "total-label", "Total Earnings:" }
                span { class: "total-value", "{total}" }
            }
            div { class: theme::divider() }
            SubmitButton {
                status: current.submit_status().clone(),
                label: "Sell".to_string(),
                onclick: on_submit,
            }
        }
    }
}

#[component]
fn ProduceLine(
    name: String,
    line_total: String,
    count: u32,
    limit: u32,
    quota: QuotaView,
    disabled: bool,
    session: Signal<Option<SellSession>>,
) -> Element {
    let mut session = session;
    let mut apply = move |name: &str, op: fn(&mut SellSession, &str) -> CountChange| {
        let change = session.with_mut(|s| s.as_mut().map(|s| op(s, name)));
        if let Some(change @ (CountChange::Rejected | CountChange::Clamped { .. })) = change {
            tracing::debug!(produce = name, ?change, "quantity input adjusted");
        }
    };

    let inc_name = name.clone();
    let dec_name = name.clone();
    let input_name = name.clone();

    rsx! {
        li { class: "produce-line",
            div { class: "produce-head",
                span { class: "produce-name", "{name}" }
                span { class: "produce-price", "{line_total}" }
            }
            QuantityPicker {
                count,
                limit,
                disabled,
                on_increment: move |_| apply(&inc_name, SellSession::increment),
                on_decrement: move |_| apply(&dec_name, SellSession::decrement),
                on_input: move |raw: String| {
                    let change = session
                        .with_mut(|s| s.as_mut().map(|s| s.set_count_from_input(&input_name, &raw)));
                    if let Some(CountChange::Rejected) = change {
                        tracing::debug!(produce = %input_name, raw = %raw, "ignored quantity input");
                    }
                },
            }
            QuotaBar { quota }
        }
    }
}
