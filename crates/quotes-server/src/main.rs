mod config;

use std::sync::Arc;

use tracing::{info, warn};

use quotes_api::{AppState, AppStateInner};
use quotes_core::QuoteService;
use quotes_db::Database;

use crate::config::Config;

const DEFAULT_LOG_FILTER: &str =
    "quotes=debug,quotes_api=debug,quotes_core=debug,quotes_db=info,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();

    let config = Config::from_env()?;

    // Init database
    let db = Arc::new(Database::open(&config.db_path)?);
    provision_tokens(&db, &config)?;

    // Shared state
    let app_state: AppState = Arc::new(AppStateInner {
        quotes: QuoteService::new(db),
        base_url: config.base_url.clone(),
        random_limit: config.random_limit,
    });

    let app = quotes_api::app(app_state, config.request_timeout);

    let addr = config.addr()?;
    info!("Quotes server listening on {}", addr);
    info!(
        "Random quote limit: {}, request timeout: {:?}",
        config.random_limit, config.request_timeout
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Registers the bootstrap token, then applies revocations. A token named in
/// both ends up revoked.
fn provision_tokens(db: &Database, config: &Config) -> anyhow::Result<()> {
    if let Some(token) = &config.bootstrap_token {
        if db.insert_token(token)? {
            info!("Registered bootstrap token");
        }
    }
    for token in &config.revoke_tokens {
        if db.set_token_active(token, false)? {
            info!("Revoked token ending in {}", token_hint(token));
        } else {
            warn!("Cannot revoke unknown token ending in {}", token_hint(token));
        }
    }
    Ok(())
}

fn token_hint(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    chars[chars.len().saturating_sub(4)..].iter().collect()
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(sigterm) => sigterm,
                Err(e) => {
                    warn!("Failed to install SIGTERM handler: {}", e);
                    ctrl_c.await.ok();
                    info!("Received Ctrl+C, shutting down...");
                    return;
                }
            };
        tokio::select! {
            _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
