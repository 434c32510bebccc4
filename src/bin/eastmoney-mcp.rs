//! MCP server exposing `stock_us_hist`, `stock_hk_hist` and `stock_zh_a_hist`.
//!
//! # Usage
//!
//! ```sh
//! # HTTP+SSE (default): GET /sse, POST /messages?session_id=...
//! HOST=0.0.0.0 PORT=8005 cargo run --bin eastmoney-mcp
//!
//! # stdio, for MCP clients that spawn the server
//! TRANSPORT=stdio cargo run --bin eastmoney-mcp
//! ```

use std::sync::Arc;

use eastmoney_mcp::config::{ServerConfig, Transport};
use eastmoney_mcp::server::McpServer;
use eastmoney_mcp::server::tools::ToolRegistry;
use eastmoney_mcp::server::sse::serve_sse;
use eastmoney_mcp::server::transport::serve_stdio;
use eastmoney_mcp::{EastmoneyClient, MarketConfig, logging};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> eastmoney_mcp::error::Result<()> {
    let config = ServerConfig::from_env()?;
    logging::init(&config.log_dir)?;

    tracing::info!(name = %config.server_name, "starting");
    tracing::info!(transport = %config.transport, "transport");

    let client = EastmoneyClient::with_base_url(&config.base_url)?;
    let registry = ToolRegistry::new(MarketConfig::eastmoney_all(&client));
    tracing::info!(tools = ?registry.names().collect::<Vec<_>>(), "tools registered");
    let server = Arc::new(McpServer::new(&config.server_name, registry));

    let run = async {
        match config.transport {
            Transport::Stdio => serve_stdio(server).await,
            Transport::Sse => {
                let listener = TcpListener::bind(config.address()).await?;
                tracing::info!(addr = %config.address(), "listening");
                serve_sse(server, listener).await
            }
        }
    };

    tokio::select! {
        res = run => {
            if let Err(e) = &res {
                tracing::error!("server failed: {e}");
            }
            res
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted, shutting down");
            Ok(())
        }
    }
}
