//! Scoped, blocking HTTP transport.
//!
//! Each call builds a fresh [`reqwest::blocking::Client`] with the
//! caller's timeout, performs one request against the server's base URL,
//! reads the body, and tears everything down. No connection state
//! survives between calls, so a server restart between requests is
//! invisible here.
//!
//! Any received HTTP status is a transport success; interpreting the
//! status is the API layer's job. Only failing to obtain a response at
//! all (refused, DNS, timeout, stream cut mid-body) is an error.

use std::time::Duration;

use crate::address::ServerAddress;
use crate::error::{ClientError, Result};

/// A raw HTTP exchange result: whatever the server said, verbatim.
#[derive(Debug)]
pub(crate) struct RawResponse {
    /// HTTP status code of the response.
    pub status: u16,
    /// Full response body as text.
    pub body: String,
}

/// Perform a `GET` against `path` (e.g. `/history/abc`) on the server.
pub(crate) fn get(address: &ServerAddress, path: &str, timeout: Duration) -> Result<RawResponse> {
    let client = build_client(address, timeout)?;
    let url = format!("{}{}", address.api_url(), path);

    let response = client
        .get(&url)
        .send()
        .map_err(|e| connection_error(address, e))?;

    read_response(address, response)
}

/// Perform a `POST` with a JSON body against `path` on the server.
pub(crate) fn post_json(
    address: &ServerAddress,
    path: &str,
    body: &serde_json::Value,
    timeout: Duration,
) -> Result<RawResponse> {
    let client = build_client(address, timeout)?;
    let url = format!("{}{}", address.api_url(), path);

    let response = client
        .post(&url)
        .json(body)
        .send()
        .map_err(|e| connection_error(address, e))?;

    read_response(address, response)
}

// ---- private helpers ----

/// Build a one-shot blocking client with a total request timeout.
fn build_client(address: &ServerAddress, timeout: Duration) -> Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| connection_error(address, e))
}

/// Capture status and body text from a response. A body that cannot be
/// read counts as a connection failure, not a server answer.
fn read_response(
    address: &ServerAddress,
    response: reqwest::blocking::Response,
) -> Result<RawResponse> {
    let status = response.status().as_u16();
    let body = response.text().map_err(|e| connection_error(address, e))?;
    Ok(RawResponse { status, body })
}

fn connection_error(address: &ServerAddress, source: reqwest::Error) -> ClientError {
    ClientError::Connection {
        address: address.to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn address_of(server: &mockito::ServerGuard) -> ServerAddress {
        ServerAddress::parse(&server.host_with_port()).unwrap()
    }

    /// An address nothing listens on: bind an ephemeral port, note it,
    /// release it.
    fn dead_address() -> ServerAddress {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        ServerAddress::parse(&format!("127.0.0.1:{port}")).unwrap()
    }

    #[test]
    fn error_status_is_still_a_transport_success() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/history/x")
            .with_status(500)
            .with_body("boom")
            .create();

        let response = get(&address_of(&server), "/history/x", Duration::from_secs(5)).unwrap();
        assert_eq!(response.status, 500);
        assert_eq!(response.body, "boom");
        mock.assert();
    }

    #[test]
    fn refused_connection_is_a_connection_error() {
        let address = dead_address();
        let err = get(&address, "/", Duration::from_secs(5)).unwrap_err();
        match err {
            ClientError::Connection { address: named, .. } => {
                assert_eq!(named, address.to_string());
            }
            other => panic!("Expected Connection, got {other:?}"),
        }
    }

    #[test]
    fn post_sends_the_json_body() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/prompt")
            .match_body(mockito::Matcher::Json(serde_json::json!({"k": "v"})))
            .with_status(200)
            .with_body("{}")
            .create();

        let response = post_json(
            &address_of(&server),
            "/prompt",
            &serde_json::json!({"k": "v"}),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(response.status, 200);
        mock.assert();
    }

    #[test]
    fn refused_post_is_a_connection_error() {
        let err = post_json(
            &dead_address(),
            "/prompt",
            &serde_json::json!({}),
            Duration::from_secs(5),
        )
        .unwrap_err();
        assert_matches!(err, ClientError::Connection { .. });
    }

    #[test]
    fn response_debug_format_carries_status_and_body() {
        let response = RawResponse {
            status: 418,
            body: "teapot".to_string(),
        };
        let rendered = format!("{response:?}");
        assert!(rendered.contains("418"));
        assert!(rendered.contains("teapot"));
    }
}
