//! Probe rule variants and priority weights.
//!
//! A [`ProbeRule`] is one unit of resolution policy: either a single
//! exclusive endpoint that stops the whole pass when reachable, or an
//! ordered fallback group whose reachable members all accumulate. The two
//! variants are a tagged union dispatched on the tag; the invariants
//! (exclusive implies `CheckFirst`, groups imply `CheckLater`) are fixed by
//! the accessors rather than stored.

use std::slice;
use std::time::Duration;

use crate::endpoint::Endpoint;

/// Priority class deciding queue drain order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PriorityWeight {
    /// Drained before everything else, regardless of registration order.
    CheckFirst = 0,
    /// Drained once every `CheckFirst` rule has been consumed.
    CheckLater = 1,
}

impl PriorityWeight {
    /// Numeric ordinal used as the primary queue key.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }
}

/// One unit of resolution policy, consumed exactly once per pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeRule {
    /// Single endpoint checked ahead of all fallback groups; a successful
    /// connectivity check stops the whole resolution pass.
    Exclusive {
        /// The primary endpoint.
        endpoint: Endpoint,
        /// Connect timeout for this endpoint's probe.
        timeout: Duration,
        /// Registration-order tie-breaker.
        sequence: u64,
    },
    /// Ordered group of endpoints that are all checked; successes
    /// accumulate and never stop the pass.
    FallbackGroup {
        /// The group members, in probe order.
        endpoints: Vec<Endpoint>,
        /// Connect timeout applied to every member.
        timeout: Duration,
        /// Registration-order tie-breaker.
        sequence: u64,
    },
}

impl ProbeRule {
    /// Priority class of this rule.
    #[must_use]
    pub const fn weight(&self) -> PriorityWeight {
        match self {
            Self::Exclusive { .. } => PriorityWeight::CheckFirst,
            Self::FallbackGroup { .. } => PriorityWeight::CheckLater,
        }
    }

    /// Registration sequence number, unique per queue.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        match self {
            Self::Exclusive { sequence, .. } | Self::FallbackGroup { sequence, .. } => *sequence,
        }
    }

    /// Connect timeout for each probe issued by this rule.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        match self {
            Self::Exclusive { timeout, .. } | Self::FallbackGroup { timeout, .. } => *timeout,
        }
    }

    /// Whether a single success halts the entire resolution pass.
    #[must_use]
    pub const fn is_exclusive(&self) -> bool {
        matches!(self, Self::Exclusive { .. })
    }

    /// The rule's endpoints in probe order.
    #[must_use]
    pub fn endpoints(&self) -> &[Endpoint] {
        match self {
            Self::Exclusive { endpoint, .. } => slice::from_ref(endpoint),
            Self::FallbackGroup { endpoints, .. } => endpoints,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exclusive(url: &str, sequence: u64) -> ProbeRule {
        ProbeRule::Exclusive {
            endpoint: Endpoint::new(url),
            timeout: Duration::from_millis(500),
            sequence,
        }
    }

    fn fallback(urls: &[&str], sequence: u64) -> ProbeRule {
        ProbeRule::FallbackGroup {
            endpoints: urls.iter().map(|url| Endpoint::new(*url)).collect(),
            timeout: Duration::from_millis(500),
            sequence,
        }
    }

    #[test]
    fn test_exclusive_rule_invariants() {
        let rule = exclusive("http://repo1.example.com", 0);
        assert_eq!(rule.weight(), PriorityWeight::CheckFirst);
        assert!(rule.is_exclusive());
        assert_eq!(rule.endpoints().len(), 1);
        assert_eq!(rule.sequence(), 0);
    }

    #[test]
    fn test_fallback_group_invariants() {
        let rule = fallback(&["http://a.example.com", "http://b.example.com"], 3);
        assert_eq!(rule.weight(), PriorityWeight::CheckLater);
        assert!(!rule.is_exclusive());
        assert_eq!(rule.endpoints().len(), 2);
        assert_eq!(rule.sequence(), 3);
    }

    #[test]
    fn test_weight_ordinals_order_check_first_first() {
        assert_eq!(PriorityWeight::CheckFirst.ordinal(), 0);
        assert_eq!(PriorityWeight::CheckLater.ordinal(), 1);
        assert!(PriorityWeight::CheckFirst < PriorityWeight::CheckLater);
    }

    #[test]
    fn test_fallback_group_preserves_member_order() {
        let rule = fallback(&["http://a.example.com", "http://b.example.com"], 0);
        let urls: Vec<_> = rule.endpoints().iter().map(Endpoint::url).collect();
        assert_eq!(urls, vec!["http://a.example.com", "http://b.example.com"]);
    }
}
