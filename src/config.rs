use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;

use crate::constants::{NWS_API_BASE, USER_AGENT};

/// Runtime settings for the weather MCP server
#[derive(Debug, Clone, Parser)]
#[command(name = "weather-mcp-http", version, about = "MCP weather server over streamable HTTP")]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// National Weather Service API base URL
    #[arg(long, env = "NWS_API_BASE", default_value = NWS_API_BASE)]
    pub nws_api_base: String,

    /// User-Agent header sent to the weather API
    #[arg(long, env = "NWS_USER_AGENT", default_value = USER_AGENT)]
    pub user_agent: String,

    /// Timeout for each upstream request; the HTTP client default applies when unset
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS")]
    pub upstream_timeout_secs: Option<u64>,
}

impl Config {
    /// Socket address built from `host` and `port`
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port).parse()?;
        Ok(addr)
    }

    /// Upstream request timeout, if one was configured
    pub fn upstream_timeout(&self) -> Option<Duration> {
        self.upstream_timeout_secs.map(Duration::from_secs)
    }
}
