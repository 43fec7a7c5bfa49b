use std::future::IntoFuture;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use weather_mcp_http::{constants::MCP_PATH, transport, Config, NwsClient, SessionFactory};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_mcp_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::parse();
    let addr = config.bind_addr()?;

    let upstream = NwsClient::builder()
        .base_url(&config.nws_api_base)
        .user_agent(&config.user_agent)
        .timeout(config.upstream_timeout())
        .build()?;
    let factory = SessionFactory::new(Arc::new(upstream));
    let app = transport::router(move || factory.create());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        "MCP Stateless Streamable HTTP Server listening on http://{}{}",
        listener.local_addr()?,
        MCP_PATH
    );

    tokio::select! {
        result = axum::serve(listener, app).into_future() => result?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down server...");
        }
    }

    Ok(())
}
