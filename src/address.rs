//! Server address parsing and formatting.
//!
//! A ComfyUI server is addressed as `host[:port]`; when no port is given
//! the ComfyUI default 8188 applies. Parsing produces a [`ServerAddress`]
//! that is replaced wholesale on reconfiguration, so a half-updated
//! address is never observable.

use std::fmt;
use std::str::FromStr;

use crate::error::ClientError;

/// Default port a ComfyUI server listens on.
pub const DEFAULT_PORT: u16 = 8188;

/// Resolved network address of a ComfyUI server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerAddress {
    hostname: String,
    port: u16,
}

impl ServerAddress {
    /// Parse a raw `host[:port]` string.
    ///
    /// Splits on the first colon. Without a colon the whole input is the
    /// hostname and the port is [`DEFAULT_PORT`]. With a colon, the
    /// entire remainder must be a positive integer port; anything else
    /// fails with [`ClientError::InvalidAddress`].
    pub fn parse(raw: &str) -> Result<Self, ClientError> {
        let Some((hostname, port_segment)) = raw.split_once(':') else {
            return Ok(Self {
                hostname: raw.to_string(),
                port: DEFAULT_PORT,
            });
        };

        let port: u16 = port_segment
            .parse()
            .map_err(|_| ClientError::InvalidAddress {
                address: raw.to_string(),
                reason: format!("port segment '{port_segment}' is not a valid port number"),
            })?;

        if port == 0 {
            return Err(ClientError::InvalidAddress {
                address: raw.to_string(),
                reason: "port must be non-zero".to_string(),
            });
        }

        Ok(Self {
            hostname: hostname.to_string(),
            port,
        })
    }

    /// Hostname part of the address.
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// TCP port the server listens on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Base HTTP URL, e.g. `http://host:8188`.
    pub fn api_url(&self) -> String {
        format!("http://{}:{}", self.hostname, self.port)
    }
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.hostname, self.port)
    }
}

impl FromStr for ServerAddress {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
