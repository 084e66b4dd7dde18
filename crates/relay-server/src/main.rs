//! Trading relay HTTP server
//!
//! Relays browser requests to Deriv (market data, trade placement) and
//! DeepSeek (market analysis).

use anyhow::Result;
use relay_server::config::{LogFormat, RelayConfig};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = RelayConfig::load()?;

    // Initialize tracing
    init_tracing(&config)?;
    info!("Loaded configuration: {:?}", config);

    if config.allowed_origins.is_empty() {
        info!("No allowed origins configured, cross-origin requests will be refused");
    }

    let app = relay_server::create_app(&config)?;

    // Start server
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    info!("  Health check: GET http://{}/health", addr);
    info!("  Market data:  POST http://{}/api/market-data", addr);
    info!("  AI analysis:  POST http://{}/api/ai-analysis", addr);
    info!("  Place trade:  POST http://{}/api/place-trade", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing(config: &RelayConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "relay_server={level},relay_llm={level},tower_http=debug",
            level = config.log_level
        )
        .into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.log_format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))
}
