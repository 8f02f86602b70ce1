//! HTTP server configuration

use crate::error::{ApiError, ApiResult};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for the HTTP listener
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Requests running longer than this are answered with 408.
    pub request_timeout: Duration,
}

impl ServerConfig {
    /// Build a config from a textual IP address and a port.
    pub fn new(host: &str, port: u16, request_timeout: Duration) -> ApiResult<Self> {
        let ip: IpAddr = host
            .parse()
            .map_err(|e| ApiError::config(format!("Invalid host '{}': {}", host, e)))?;
        if request_timeout.is_zero() {
            return Err(ApiError::config("Request timeout must be greater than zero"));
        }
        Ok(Self {
            bind_addr: SocketAddr::new(ip, port),
            request_timeout,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), DEFAULT_PORT),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}
