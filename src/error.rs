//! Error taxonomy for the ComfyUI client.
//!
//! Four kinds, one per failure surface: a malformed address string, no
//! response at all, an explicit server-side failure, and a response that
//! does not match the expected shape. Call sites branch on the variant;
//! there is no catch-all kind to hide behind.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors surfaced by the ComfyUI client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The `host[:port]` address string could not be parsed.
    #[error("Invalid server address '{address}': {reason}")]
    InvalidAddress {
        /// The raw string as supplied.
        address: String,
        /// What made it unparseable.
        reason: String,
    },

    /// No response was obtained from the server (refused, DNS, timeout).
    #[error("Failed to connect to ComfyUI at {address}: {source}")]
    Connection {
        /// Target `hostname:port` the request was aimed at.
        address: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status, or with an explicit
    /// error payload in an otherwise successful response.
    #[error("ComfyUI server error ({status}): {message}")]
    Server {
        /// HTTP status code of the response.
        status: u16,
        /// Response body or error field content, for diagnostics.
        message: String,
    },

    /// A response arrived but its shape is not the expected one
    /// (malformed JSON, missing fields, unexpected structure).
    #[error("Unexpected response from ComfyUI: {0}")]
    Protocol(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_address_display_names_the_input() {
        let err = ClientError::InvalidAddress {
            address: "host:abc".into(),
            reason: "port segment 'abc' is not a number".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid server address 'host:abc': port segment 'abc' is not a number"
        );
    }

    #[test]
    fn server_error_display_carries_status() {
        let err = ClientError::Server {
            status: 502,
            message: "bad gateway".into(),
        };
        assert_eq!(err.to_string(), "ComfyUI server error (502): bad gateway");
    }

    #[test]
    fn protocol_error_display() {
        let err = ClientError::Protocol("no prompt_id field".into());
        assert_eq!(
            err.to_string(),
            "Unexpected response from ComfyUI: no prompt_id field"
        );
    }

    #[test]
    fn connection_error_display_names_the_address() {
        // Build a reqwest error from an invalid URL.
        let source = reqwest::blocking::Client::new()
            .get("://bad")
            .build()
            .unwrap_err();
        let err = ClientError::Connection {
            address: "localhost:8188".into(),
            source,
        };
        assert!(err.to_string().contains("localhost:8188"));
    }
}
