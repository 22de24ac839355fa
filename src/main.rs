// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{env, net::SocketAddr, process, time::Duration};

use axum_server::Handle;
use gasless_relayer::{
    api::router,
    config::{RelayerConfig, DEFAULT_LOG_FILTER, LOG_FORMAT_ENV},
    relayer::Relayer,
    state::AppState,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// How long in-flight requests get to finish after Ctrl+C.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    if env::var(LOG_FORMAT_ENV).is_ok_and(|format| format == "json") {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    let config = match RelayerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            process::exit(1);
        }
    };
    let addr = match config.bind_addr() {
        Ok(addr) => addr,
        Err(e) => {
            error!(error = %e, "Invalid bind address");
            process::exit(1);
        }
    };

    info!(
        network = %config.network,
        chain_id = config.chain_id,
        forwarder = %config.forwarder,
        proxy_factory = %config.proxy_factory,
        "Starting gasless relayer"
    );

    let relayer = match Relayer::from_config(config) {
        Ok(relayer) => relayer,
        Err(e) => {
            error!(error = %e, "Failed to initialize relayer");
            process::exit(1);
        }
    };
    info!(admin = %relayer.admin(), "Administrative signer loaded");

    let app = router(AppState::new(relayer));

    let handle = Handle::<SocketAddr>::new();
    tokio::spawn(shutdown_on_ctrl_c(handle.clone()));

    info!(%addr, "Listening (docs at /docs)");
    if let Err(e) = axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await
    {
        error!(error = %e, "HTTP server failed");
        process::exit(1);
    }
}

async fn shutdown_on_ctrl_c(handle: Handle<SocketAddr>) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            info!("Received Ctrl+C, shutting down");
            handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
        }
        Err(e) => error!(error = %e, "Failed to listen for Ctrl+C"),
    }
}
