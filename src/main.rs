// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Atelier Chain Collective

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use artisan_market_server::api::router;
use artisan_market_server::config::{
    engine_config_from_env, HOST_ENV, LOG_FORMAT_ENV, PORT_ENV, SNAPSHOT_PATH_ENV,
};
use artisan_market_server::market::{snapshot, MarketCore};
use artisan_market_server::signer::{SignerGateway, SimulatedSigner};
use artisan_market_server::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let snapshot_path = env::var(SNAPSHOT_PATH_ENV).ok().map(PathBuf::from);
    let core = match &snapshot_path {
        Some(path) if path.exists() => match snapshot::load(path) {
            Ok(core) => {
                tracing::info!(path = %path.display(), "Restored market state from snapshot");
                core
            }
            Err(err) => {
                tracing::error!(path = %path.display(), error = %err, "Failed to load snapshot, starting empty");
                MarketCore::new()
            }
        },
        _ => MarketCore::new(),
    };

    let signer: Arc<dyn SignerGateway> = Arc::new(SimulatedSigner::new());
    let state = AppState::new(core, Some(signer), engine_config_from_env());
    let app = router(state.clone());

    let host = env::var(HOST_ENV).unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var(PORT_ENV)
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .expect("Failed to parse bind address");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server address");
    tracing::info!("Artisan Market server listening on http://{addr} (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");

    if let Some(path) = snapshot_path {
        let market = state.market.read().await;
        match snapshot::save(&market, &path) {
            Ok(()) => tracing::info!(path = %path.display(), "Saved market snapshot"),
            Err(err) => {
                tracing::error!(path = %path.display(), error = %err, "Failed to save snapshot")
            }
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    let json = env::var(LOG_FORMAT_ENV).is_ok_and(|format| format.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
