//! Client endpoint configuration

use alloc::format;
use alloc::string::{String, ToString};

/// Default collector host
pub const DEFAULT_HOST: &str = "localhost";

/// Default collector UDP port
pub const DEFAULT_PORT: u16 = 19091;

/// Where the client sends its frames
///
/// With the `serde` feature, missing fields fall back to their defaults, so
/// an empty table yields `localhost:19091`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClientConfig {
    /// Collector host name or IPv4 address
    pub host: String,
    /// Collector UDP port
    pub port: u16,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ClientConfig {
    /// Create a config for the given endpoint
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// `host:port` string
    #[inline]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
