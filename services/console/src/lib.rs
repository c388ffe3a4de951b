//! NetWatch console
//!
//! Sends start/stop commands to the detection backend and polls its log
//! streams, rendering status indicators and log panels through an injected
//! view.

pub mod backend_client;
pub mod config;
pub mod controller;
pub mod demo;
pub mod error;
pub mod io;
pub mod poller;
pub mod state;
pub mod subsystem;
pub mod term;
pub mod view;

pub use config::{load_config, Config};
pub use error::{ConsoleError, Result};

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::backend_client::BackendClient;
use crate::config::ViewConfig;
use crate::controller::Controller;
use crate::io::ReqwestHttpClient;
use crate::poller::Poller;
use crate::state::new_status_handle;
use crate::term::TerminalView;
use crate::view::View;

/// Build the configured view.
///
/// `clear_screen` is true for the live dashboard and false for one-shot
/// commands, where wiping the caller's terminal would be rude.
pub fn build_view(config: &Config, clear_screen: bool) -> Arc<dyn View> {
    match &config.view {
        ViewConfig::Terminal { color } => Arc::new(TerminalView::stdout(*color, clear_screen)),
    }
}

/// Build a controller over the production HTTP client
pub fn build_controller(config: &Config, view: Arc<dyn View>) -> Controller {
    let http: Arc<dyn io::HttpClient> = Arc::new(ReqwestHttpClient::default());
    let backend = BackendClient::new(config.backend.base_url.clone(), http);
    Controller::new(backend, view, new_status_handle())
}

/// Run the polling dashboard with the given configuration until ctrl-c
pub async fn run(config: Config) -> Result<()> {
    let view = build_view(&config, true);
    let controller = Arc::new(build_controller(&config, view));
    let cancel = CancellationToken::new();

    // Setup shutdown handler
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for ctrl-c");
        tracing::info!("Shutdown signal received");
        cancel_for_signal.cancel();
    });

    let poller = Poller::new(
        controller,
        Duration::from_millis(config.poller.interval_ms),
        cancel,
    );

    tracing::info!(
        "Console started, polling {} every {} ms",
        config.backend.base_url,
        config.poller.interval_ms
    );
    poller.run().await;
    tracing::info!("Console stopped");

    Ok(())
}
