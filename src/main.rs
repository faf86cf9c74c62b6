#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod app;
mod domain;
mod infra;
mod ui;
mod util;

use std::{process::ExitCode, sync::Arc};

use dioxus::prelude::*;

#[cfg(feature = "desktop")]
use dioxus_desktop::{tao::window::WindowBuilder, Config as DesktopConfig};
use tracing_subscriber::EnvFilter;

use crate::{
    app::Services,
    infra::store::JsonMarketStore,
    util::{config::AppConfig, version::window_title},
};

fn main() -> ExitCode {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Wayland explicit-sync crashes on some drivers; fall back to GL unless the caller opts in.
    if std::env::var("WAYLAND_DISPLAY").is_ok() && std::env::var("WGPU_BACKEND").is_err() {
        std::env::set_var("WGPU_BACKEND", "gl");
    }

    let store = match JsonMarketStore::open(&config.data_dir) {
        Ok(store) => Arc::new(store),
        Err(err) => {
            tracing::error!(dir = %config.data_dir.display(), error = %err, "failed to open market store");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(store = %store.path().display(), "starting {}", window_title());

    let services = Services {
        markets: store.clone(),
        ledger: store,
        currency_symbol: config.currency_symbol.clone(),
    };

    let builder = LaunchBuilder::new().with_context(services);

    #[cfg(feature = "desktop")]
    let builder = {
        let config = desktop! {
            DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title(window_title())
            )
        };
        builder.with_cfg(config)
    };

    builder.launch(app::App);
    ExitCode::SUCCESS
}
