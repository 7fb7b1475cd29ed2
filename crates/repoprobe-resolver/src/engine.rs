//! Endpoint resolution engine.
//!
//! Drains a [`RuleQueue`] once, probing each rule's endpoints with a
//! bounded-timeout connectivity check and accumulating the reachable ones.
//! Local endpoints are accepted without probing and never stop the pass; a
//! successful check on an exclusive rule halts everything after it.
//!
//! Probes run sequentially, one at a time, even across independent rules;
//! worst-case latency is the sum of the visited probe timeouts.

use std::sync::Arc;

use repoprobe_core::{ConnectivityProbe, Endpoint, Locality};
use tracing::{debug, info};

use crate::queue::RuleQueue;

/// Outcome of one resolution pass.
///
/// Local endpoints in encounter order, remote endpoints in probe-success
/// order. Failed endpoints are absent; their absence is the only trace a
/// failed probe leaves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedEndpoints {
    local: Vec<Endpoint>,
    remote: Vec<Endpoint>,
}

impl ResolvedEndpoints {
    /// Local endpoints, accepted without probing, in encounter order.
    #[must_use]
    pub fn local(&self) -> &[Endpoint] {
        &self.local
    }

    /// Reachable remote endpoints, in probe order.
    #[must_use]
    pub fn remote(&self) -> &[Endpoint] {
        &self.remote
    }

    /// Total number of resolved endpoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.local.len() + self.remote.len()
    }

    /// Check whether nothing resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.local.is_empty() && self.remote.is_empty()
    }

    /// All resolved endpoints, locals first, then remotes in probe order.
    #[must_use]
    pub fn into_ordered(self) -> Vec<Endpoint> {
        let mut ordered = self.local;
        ordered.extend(self.remote);
        ordered
    }
}

/// Single-shot resolver over a rule queue.
///
/// The queue is consumed by value: resolving the same queue twice is a
/// compile error, not a runtime one.
pub struct EndpointResolver {
    probe: Arc<dyn ConnectivityProbe>,
}

impl EndpointResolver {
    /// Create a resolver with the given connectivity probe.
    pub fn new(probe: Arc<dyn ConnectivityProbe>) -> Self {
        Self { probe }
    }

    /// Drain `queue` and return the reachable endpoints.
    pub async fn resolve(&self, mut queue: RuleQueue) -> ResolvedEndpoints {
        let mut resolved = ResolvedEndpoints::default();
        let mut halt = false;

        while !halt {
            let Some(rule) = queue.pop() else { break };
            debug!(
                sequence = rule.sequence(),
                exclusive = rule.is_exclusive(),
                "checking rule"
            );

            for endpoint in rule.endpoints() {
                if halt {
                    // A prior exclusive success already ended the pass;
                    // nothing further in this rule is probed.
                    break;
                }
                match endpoint.locality() {
                    Locality::Local => {
                        debug!(url = endpoint.url(), "adding local repository, no probe");
                        resolved.local.push(endpoint.clone());
                    }
                    Locality::Unknown => {
                        debug!(
                            url = endpoint.url(),
                            "endpoint URL did not parse, treating as unreachable"
                        );
                    }
                    Locality::Remote => {
                        if self.probe.check(endpoint, rule.timeout()).await {
                            debug!(url = endpoint.url(), "adding repository");
                            resolved.remote.push(endpoint.clone());
                            if rule.is_exclusive() {
                                debug!(
                                    url = endpoint.url(),
                                    "exclusive endpoint reachable, stopping resolution"
                                );
                                halt = true;
                            }
                        } else {
                            info!(
                                url = endpoint.url(),
                                "filtered repository, connection did not succeed"
                            );
                        }
                    }
                }
            }
        }

        info!(
            local = resolved.local.len(),
            remote = resolved.remote.len(),
            "resolution pass finished"
        );
        resolved
    }
}
