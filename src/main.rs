use anyhow::{Context, Result};
use autosales::{
    config::Config,
    fetch,
    server::{self, AppState},
};
use reqwest::Client;
use std::{net::SocketAddr, sync::Arc};
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();

    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info").add_directive(cfg.log_level.parse().unwrap_or(Level::INFO.into()))
    });
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!(?cfg, "startup");

    // ─── 2) load the dataset (fatal on any failure) ──────────────────
    let client = Client::new();
    let table = fetch::load_sales_table(&client, &cfg.data_url)
        .await
        .context("loading sales data")?;

    // ─── 3) serve ────────────────────────────────────────────────────
    let state = Arc::new(AppState::new(Arc::new(table)));
    let addr = SocketAddr::new(cfg.host, cfg.port);
    server::serve(state, addr).await;

    Ok(())
}
