//! TCP connectivity probe.
//!
//! Attempts a plain TCP handshake against the endpoint's host and port,
//! bounded by the supplied timeout. No data is exchanged and no
//! authentication happens; the connection is dropped as soon as it is
//! established. DNS resolution runs inside the connect attempt and is
//! covered by the same timeout bound.

use std::time::Duration;

use async_trait::async_trait;
use repoprobe_core::{ConnectivityProbe, Endpoint};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

/// Probe backed by `tokio::net::TcpStream`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpProbe;

impl TcpProbe {
    /// Create a new TCP probe.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ConnectivityProbe for TcpProbe {
    async fn check(&self, endpoint: &Endpoint, limit: Duration) -> bool {
        let Some((host, port)) = endpoint.host_and_port() else {
            debug!(
                url = endpoint.url(),
                "no dialable host and port, treating as unreachable"
            );
            return false;
        };

        debug!(
            url = endpoint.url(),
            host,
            port,
            timeout = ?limit,
            "attempting connection"
        );
        match timeout(limit, TcpStream::connect((host, port))).await {
            Ok(Ok(_stream)) => true,
            Ok(Err(err)) => {
                debug!(url = endpoint.url(), error = %err, "connection failed");
                false
            }
            Err(_elapsed) => {
                debug!(url = endpoint.url(), "connection timed out");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::net::TcpListener;

    use super::*;

    #[tokio::test]
    async fn test_reachable_listener() {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let endpoint = Endpoint::new(format!("http://127.0.0.1:{port}"));

        assert!(
            TcpProbe::new()
                .check(&endpoint, Duration::from_millis(500))
                .await
        );
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Bind to grab a free port, then drop the listener so nothing is
        // listening on it
        let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let endpoint = Endpoint::new(format!("http://127.0.0.1:{port}"));
        assert!(
            !TcpProbe::new()
                .check(&endpoint, Duration::from_millis(500))
                .await
        );
    }

    #[tokio::test]
    async fn test_timeout_collapses_to_unreachable() {
        // TEST-NET-1 (RFC 5737) is reserved; the connect either times out
        // or is rejected, and both collapse to false
        let endpoint = Endpoint::new("http://192.0.2.1:9999");
        assert!(
            !TcpProbe::new()
                .check(&endpoint, Duration::from_millis(50))
                .await
        );
    }

    #[tokio::test]
    async fn test_malformed_url_never_dials() {
        let endpoint = Endpoint::new("not a url");
        assert!(
            !TcpProbe::new()
                .check(&endpoint, Duration::from_millis(500))
                .await
        );
    }

    #[tokio::test]
    async fn test_file_url_never_dials() {
        let endpoint = Endpoint::new("file:///var/cache/repos");
        assert!(
            !TcpProbe::new()
                .check(&endpoint, Duration::from_millis(500))
                .await
        );
    }
}
