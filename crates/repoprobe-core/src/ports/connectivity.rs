//! Connectivity probe port.

use std::time::Duration;

use async_trait::async_trait;

use crate::endpoint::Endpoint;

/// Bounded-timeout reachability check against a single endpoint.
///
/// Implementations attempt a connection handshake only: no data transfer,
/// no authentication. Every failure mode (malformed URL, connection refused
/// or reset, DNS failure, timeout) is an ordinary `false`, never an error;
/// nothing endpoint-level crosses this boundary as an `Err`.
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    /// Returns whether `endpoint` accepted a connection within `timeout`.
    async fn check(&self, endpoint: &Endpoint, timeout: Duration) -> bool;
}
