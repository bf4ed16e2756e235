// Copyright (c) 2026 Pulse Security Oy. All rights reserved.
// This software is proprietary and confidential.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

use pulse_scanner::api::{self, ApiState};
use pulse_scanner::config::AppConfig;
use pulse_scanner::http_client::HttpClient;
use pulse_scanner::lifecycle::ScanLifecycle;
use pulse_scanner::scanner::ProbeEngine;
use pulse_scanner::store::{MemoryStore, PostgresStore, ScanStore};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    println!("   ___  __  __/ /__ ___");
    println!("  / _ \\/ / / / (_-</ -_)");
    println!(" / .__/\\_,_/_/_/___/\\__/");
    println!("/_/     scan backend v{}", env!("CARGO_PKG_VERSION"));
    println!();

    info!("Pulse scan backend starting");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(num_cpus::get())
        .thread_name("pulse-worker")
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    let config = AppConfig::from_env().context("failed to load configuration")?;
    info!(
        host = %config.server.host,
        port = config.server.port,
        database_enabled = config.database.enabled,
        "configuration loaded"
    );

    let store: Arc<dyn ScanStore> = if config.database.enabled {
        let store = PostgresStore::connect(&config.database.url, config.database.pool_size)
            .await
            .context("failed to connect to PostgreSQL")?;
        store
            .init_schema()
            .await
            .context("failed to initialize database schema")?;
        Arc::new(store)
    } else {
        warn!("PostgreSQL disabled, scans will not survive a restart");
        Arc::new(MemoryStore::new())
    };

    let http_client = Arc::new(HttpClient::new(
        config.scanner.probe_timeout_secs,
        config.scanner.max_body_bytes,
    )?);
    let engine = Arc::new(ProbeEngine::new(http_client));
    let lifecycle = Arc::new(ScanLifecycle::new(store));

    let state = Arc::new(ApiState { lifecycle, engine });
    let app = api::router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(addr = %addr, "listening");

    axum::serve(listener, app)
        .await
        .context("server terminated")?;

    Ok(())
}
