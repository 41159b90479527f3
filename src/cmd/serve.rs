//! HTTP server command — `plantdesk serve`.

use anyhow::Result;

use plantdesk::config::PlantdeskConfig;
use plantdesk::refdata::server::{ServerConfig, start_server};

pub async fn cmd_serve(config: &PlantdeskConfig) -> Result<()> {
    start_server(ServerConfig::from(config)).await
}
