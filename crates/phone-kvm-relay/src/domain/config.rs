//! Relay server settings.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

/// Address the relay listens on unless overridden.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:6666";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Listening socket; every interface by default so the phone can reach it.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 6666))
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}
