//! HTTP server configuration.

use std::net::SocketAddr;

use serde::Deserialize;

use crate::error::ConfigError;

/// Where the HTTP API listens.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allow cross-origin requests from any origin (browser dashboards).
    #[serde(default = "default_cors_permissive")]
    pub cors_permissive: bool,
}

impl ServerConfig {
    /// Parsed listen address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                field: "server.host",
                reason: format!("'{}' is not a valid IP address", self.host),
            })
    }
}

fn default_host() -> String {
    "0.0.0.0".into()
}

const fn default_port() -> u16 {
    5000
}

const fn default_cors_permissive() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_permissive: default_cors_permissive(),
        }
    }
}
