use dioxus::prelude::*;

use crate::{
    app::{refresh_markets, Route, Services},
    domain::AppState,
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        shell::Shell,
        theme,
    },
};

#[component]
pub fn MarketsPage() -> Element {
    let services = use_context::<Services>();
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let nav = use_navigator();

    let markets: Vec<_> = state.with(|st| {
        st.markets
            .iter()
            .map(|market| (market.clone(), market.prices.len()))
            .collect()
    });
    let loaded = state.with(|st| st.loaded_at.is_some());

    let on_refresh = move |_: MouseEvent| {
        let services = services.clone();
        spawn(async move {
            if refresh_markets(&services, state, toasts).await {
                push_toast(toasts, ToastKind::Info, "Market list refreshed.");
            }
        });
    };

    rsx! {
        Shell {
            title: "Markets".to_string(),
            actions: rsx! {
                button {
                    class: theme::btn_icon(),
                    title: "Refresh markets",
                    onclick: on_refresh,
                    "⟳"
                }
                button {
                    class: theme::btn_icon(),
                    title: "Add Market",
                    onclick: move |_| { nav.push(Route::AddMarket {}); },
                    "+"
                }
            },
            if !loaded {
                div { class: "spinner spinner-large" }
            } else if markets.is_empty() {
                p { class: theme::text_muted(), "No markets yet. Add one to start selling." }
            } else {
                ul { class: "market-list",
                    for (market, produce_count) in markets {
                        li { key: "{market.id}", class: "market-row",
                            div {
                                p { class: "market-name", "{market.name}" }
                                p { class: theme::text_muted(), "{produce_count} produce" }
                            }
                            div { class: "market-actions",
                                button {
                                    class: theme::btn_outline(),
                                    onclick: {
                                        let id = market.id.clone();
                                        move |_: MouseEvent| { nav.push(Route::EditMarket { market_id: id.clone() }); }
                                    },
                                    "Edit"
                                }
                                button {
                                    class: "btn btn-primary",
                                    onclick: {
                                        let id = market.id.clone();
                                        move |_: MouseEvent| { nav.push(Route::SellProduce { market_id: id.clone() }); }
                                    },
                                    "Sell"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
