use mcp_mealie::{config::MealieConfig, server::MealieMcpServer};
use rmcp::transport::sse_server::{SseServer, SseServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".to_string().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = MealieConfig::from_env()?;

    if config.api_token.is_none() {
        tracing::warn!("MEALIE_API_TOKEN is not set; requests will be sent unauthenticated");
    }

    // Probe the API once so misconfiguration shows up at startup
    tracing::info!("Testing API access to {}...", config.base_url);
    let probe = MealieMcpServer::new(&config);
    match probe.test_api_access().await {
        Ok(_) => {
            tracing::info!("API access test passed");
        }
        Err(e) => {
            tracing::warn!("API access test failed: {}", e);
            tracing::warn!("Please verify:");
            tracing::warn!("  - MEALIE_BASE_URL is correct: {}", config.base_url);
            tracing::warn!("  - MEALIE_API_TOKEN belongs to a user of the household");
            tracing::warn!("  - Mealie server is running and accessible");
            tracing::warn!("The server will continue, but tool calls may fail.");
        }
    }

    let sse_config = SseServerConfig {
        bind: config.bind_addr.parse()?,
        sse_path: "/sse".to_string(),
        post_path: "/message".to_string(),
        ct: tokio_util::sync::CancellationToken::new(),
        sse_keep_alive: None,
    };

    tracing::info!("Mealie MCP Server listening on {}", sse_config.bind);

    // serve_with_config handles binding, axum server setup, and graceful shutdown internally
    let sse_server = SseServer::serve_with_config(sse_config).await?;

    let ct = sse_server.with_service(move || MealieMcpServer::new(&config));

    tracing::info!("Mealie MCP Server started successfully");

    // Wait for Ctrl+C
    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down...");
    ct.cancel();

    Ok(())
}
