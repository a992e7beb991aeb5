use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;

use chulbitso::app::api::{AppState, router};
use chulbitso::config::ProviderConfig;
use chulbitso::provider::AladinProvider;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct AppArgs {
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: SocketAddr,
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return std::process::ExitCode::FAILURE;
    }
    std::process::ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    chulbitso::logging::init()?;

    let args = AppArgs::parse();
    tracing::info!(?args, "starting chulbitso-app");

    let config = ProviderConfig::from_env().context("load provider config")?;
    tracing::info!(base_url = %config.base_url, version = %config.version, "using book search provider");

    let state = AppState {
        provider: Arc::new(AladinProvider::new(config)),
    };
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .map_err(|err| anyhow::anyhow!("bind {}: {err}", args.addr))?;
    tracing::info!(addr = %args.addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(?err, "listen for ctrl-c failed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
