use std::{sync::Arc, time::SystemTime};

use dioxus::{prelude::*, signals::Signal};

use crate::{
    domain::AppState,
    infra::store::{MarketDirectory, SalesLedger},
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::{AddEditMarketPage, FormMode, MarketsPage, SellProducePage, TransactionsPage},
    },
    util::assets,
};

/// Collaborators handed to the UI at launch.
#[derive(Clone)]
pub struct Services {
    pub markets: Arc<dyn MarketDirectory>,
    pub ledger: Arc<dyn SalesLedger>,
    pub currency_symbol: String,
}

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Markets {},
    #[route("/markets/new")]
    AddMarket {},
    #[route("/markets/:market_id/edit")]
    EditMarket { market_id: String },
    #[route("/markets/:market_id/sell")]
    SellProduce { market_id: String },
    #[route("/markets/:market_id/transactions")]
    Transactions { market_id: String },
}

#[component]
pub fn App() -> Element {
    let services = use_context::<Services>();

    let state = use_signal(AppState::default);
    use_context_provider(|| state);

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    let _markets = use_resource(move || {
        let services = services.clone();
        async move { refresh_markets(&services, state, toasts).await }
    });

    rsx! {
        document::Link { rel: "icon", href: assets::favicon_data_uri() }
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

/// Reloads the market list and produce catalog into the shared state.
pub async fn refresh_markets(
    services: &Services,
    mut state: Signal<AppState>,
    toasts: Signal<Vec<ToastMessage>>,
) -> bool {
    let markets = match services.markets.list_markets().await {
        Ok(markets) => markets,
        Err(err) => {
            tracing::error!(error = %err, "failed to load markets");
            push_toast(toasts, ToastKind::Error, format!("Failed to load markets: {err}"));
            return false;
        }
    };
    let catalog = match services.markets.produce_catalog().await {
        Ok(catalog) => catalog,
        Err(err) => {
            tracing::warn!(error = %err, "failed to load produce catalog");
            Vec::new()
        }
    };

    tracing::debug!(markets = markets.len(), produce = catalog.len(), "market list refreshed");
    state.with_mut(|st| st.replace(markets, catalog, SystemTime::now()));
    true
}

#[component]
pub fn Markets() -> Element {
    rsx! { MarketsPage {} }
}

#[component]
pub fn AddMarket() -> Element {
    rsx! { AddEditMarketPage { mode: FormMode::Add } }
}

#[component]
pub fn EditMarket(market_id: String) -> Element {
    rsx! { AddEditMarketPage { mode: FormMode::Edit(market_id) } }
}

#[component]
pub fn SellProduce(market_id: String) -> Element {
    rsx! { SellProducePage { market_id } }
}

#[component]
pub fn Transactions(market_id: String) -> Element {
    rsx! { TransactionsPage { market_id } }
}
