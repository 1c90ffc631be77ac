//! Bridge configuration with validation.
//!
//! There is no configuration file: the bridge runs next to the browser on
//! the operator's machine, so everything has a sane compiled-in default.
//! Host and port can be overridden through the environment for unusual
//! setups.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use thiserror::Error;

/// Environment override for the bind host.
pub const ENV_HOST: &str = "NFC_BRIDGE_HOST";
/// Environment override for the bind port.
pub const ENV_PORT: &str = "NFC_BRIDGE_PORT";

/// Bridge configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Bind address (default: 127.0.0.1, the bridge is a local helper)
    pub host: IpAddr,
    /// Port (default: 8765)
    pub port: u16,
    /// How long the hardware waits for a card on one scan
    pub scan_timeout_secs: u64,
    /// How long `/scan` and `/poll` wait for a pending result
    pub wait_timeout_secs: u64,
    /// Interval between mailbox checks while waiting
    pub poll_interval_ms: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8765,
            scan_timeout_secs: 30,
            wait_timeout_secs: 30,
            poll_interval_ms: 100,
        }
    }
}

impl BridgeConfig {
    /// Defaults with optional `NFC_BRIDGE_HOST` / `NFC_BRIDGE_PORT`
    /// environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(host) = std::env::var(ENV_HOST) {
            config.host = host
                .parse()
                .map_err(|_| ConfigError::InvalidHost(host.clone()))?;
        }
        if let Ok(port) = std::env::var(ENV_PORT) {
            config.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(
                "scan_timeout_secs cannot be 0".into(),
            ));
        }
        if self.wait_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(
                "wait_timeout_secs cannot be 0".into(),
            ));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidTimeout(
                "poll_interval_ms cannot be 0".into(),
            ));
        }
        if Duration::from_millis(self.poll_interval_ms) >= self.wait_timeout() {
            return Err(ConfigError::InvalidTimeout(
                "poll interval must be shorter than the wait timeout".into(),
            ));
        }
        Ok(())
    }

    /// Socket address to bind the listener on
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn scan_timeout(&self) -> Duration {
        Duration::from_secs(self.scan_timeout_secs)
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("invalid bind host: {0}")]
    InvalidHost(String),
    #[error("invalid port: {0}")]
    InvalidPort(String),
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
}
