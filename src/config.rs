// ⚙️ Configuration
// Environment-driven settings for the binaries

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

pub const ADDR_VAR: &str = "LOCATION_CHECK_ADDR";
pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
}

impl ServerConfig {
    /// Read `LOCATION_CHECK_ADDR`, falling back to the default address
    pub fn from_env() -> Result<Self> {
        let raw = std::env::var(ADDR_VAR).ok();
        Self::from_addr(raw.as_deref())
    }

    fn from_addr(raw: Option<&str>) -> Result<Self> {
        let raw = raw.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(DEFAULT_ADDR);
        let addr = raw
            .parse()
            .with_context(|| format!("Invalid {} value: {:?}", ADDR_VAR, raw))?;
        Ok(ServerConfig { addr })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
        }
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `default_level`.
pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second call (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
