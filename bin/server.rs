// Location Check - Web Server
// REST API with Axum

use anyhow::{Context, Result};
use location_check::api::{router, AppState};
use location_check::config::{init_logging, ServerConfig};
use location_check::RuleEngine;
use tracing::info;

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    init_logging("info,tower_http=debug");

    println!("🌐 Location Check - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config = ServerConfig::from_env()?;

    let engine = RuleEngine::standard();
    info!(rules = engine.rule_count(), "rule engine loaded");

    let app = router(AppState::new(engine));

    // Start server
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.addr))?;

    println!("\n🚀 Server running on http://{}", config.addr);
    println!("   API: http://{}/api/locations/CA12", config.addr);
    println!("   UI:  http://{}", config.addr);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
