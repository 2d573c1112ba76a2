//! Rulesync MCP Server
//!
//! Exposes instruction-file management to AI agents via MCP protocol.
//!
//! ## Tools
//!
//! - `read` - Read all instruction files in a project
//! - `update` - Add an instruction to all files (preview by default)
//! - `validate` - Check cross-file consistency
//! - `list` - List instruction files with metadata
//! - `context` - Analyze project languages, frameworks and test tooling
//!
//! ## Usage
//!
//! Add to your MCP client configuration:
//! ```json
//! {
//!   "mcpServers": {
//!     "rulesync": {
//!       "command": "rulesync-mcp"
//!     }
//!   }
//! }
//! ```

use anyhow::Result;
use rmcp::transport::stdio;
use rmcp::ServiceExt;

mod tools;

use tools::RulesyncService;

#[tokio::main]
async fn main() -> Result<()> {
    // Configure logging to stderr only (stdout is for MCP protocol)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    log::info!("Starting rulesync MCP server");

    let service = RulesyncService::new();
    let server = service.serve(stdio()).await?;

    server.waiting().await?;

    log::info!("rulesync MCP server stopped");
    Ok(())
}
