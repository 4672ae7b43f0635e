use std::{io, net::SocketAddr, path::PathBuf, time::Duration};

use anyhow::Error;

use axum_server::Handle;

use clap::Parser as _;

use mtgfinder_server::{
    app::AppState,
    cli::{Args, run_command},
    config::Config,
    routes,
};

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();

    let args = Args::parse();

    // load config
    let config_path = args.config.unwrap_or_else(|| PathBuf::from("./mtgfinder.toml"));
    let config = Config::load(config_path)?;

    let default_level = if config.server.debug { "debug" } else { "info" };
    tracing_subscriber::fmt::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let state = AppState::new(&config)?;

    // Execute command if it exists
    if let Some(command) = args.command {
        return run_command(&command, &state).await;
    }

    let addr: SocketAddr = ([0, 0, 0, 0], state.port).into();
    let router = routes::router(state);

    let handle = Handle::new();
    tokio::spawn(shutdown_on_ctrl_c(handle.clone()));

    // Serve HTTP
    tracing::info!(
        "listening on {} (http), searching {}",
        addr,
        config.scryfall.base_url
    );

    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .map_err(From::from)
}

async fn shutdown_on_ctrl_c(handle: Handle) {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(?err, "failed to listen for shutdown signal");
        return;
    }

    tracing::info!("shutting down");
    handle.graceful_shutdown(Some(Duration::from_secs(10)));
}
