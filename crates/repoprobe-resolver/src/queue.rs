//! Rule registration and priority ordering.
//!
//! Rules drain in weight order (`CheckFirst` before `CheckLater`), then in
//! insertion order within a weight class. The sequence counter is owned by
//! the queue and shared across both registration paths, so interleaved
//! registrations stay deterministic regardless of which kind came first.
//!
//! The queue is drained destructively by a single resolution pass; `pop` is
//! crate-internal so only the engine consumes it.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

use repoprobe_core::{Endpoint, ProbeRule, ResolverSettings};

/// Heap entry keyed on (weight ordinal, sequence) only.
///
/// Equality and ordering deliberately ignore the rule payload; sequences
/// are unique per queue, so ties cannot occur.
#[derive(Debug)]
struct Slot {
    key: (u8, u64),
    rule: ProbeRule,
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Slot {}

impl PartialOrd for Slot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Slot {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Priority queue of probe rules.
///
/// This is a sync type with no internal locking; it is built by one caller
/// and then moved into the resolution pass.
#[derive(Debug)]
pub struct RuleQueue {
    heap: BinaryHeap<Reverse<Slot>>,
    counter: u64,
    default_timeout: Duration,
}

impl RuleQueue {
    /// Create a queue with the default probe timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(&ResolverSettings::with_defaults())
    }

    /// Create a queue whose default probe timeout comes from `settings`.
    #[must_use]
    pub fn with_settings(settings: &ResolverSettings) -> Self {
        Self {
            heap: BinaryHeap::new(),
            counter: 0,
            default_timeout: settings.effective_probe_timeout(),
        }
    }

    /// Register a primary endpoint checked ahead of every fallback group;
    /// the first one found reachable stops the whole pass.
    ///
    /// Uses the queue's default probe timeout.
    pub fn register_exclusive(&mut self, endpoint: Endpoint) {
        let timeout = self.default_timeout;
        self.register_exclusive_with_timeout(endpoint, timeout);
    }

    /// Same as [`Self::register_exclusive`], with a caller-chosen timeout.
    pub fn register_exclusive_with_timeout(&mut self, endpoint: Endpoint, timeout: Duration) {
        let sequence = self.next_sequence();
        self.push(ProbeRule::Exclusive {
            endpoint,
            timeout,
            sequence,
        });
    }

    /// Register an ordered group of secondary endpoints; every reachable
    /// member accumulates and none of them stops the pass.
    pub fn register_fallback_group(&mut self, endpoints: Vec<Endpoint>) {
        let sequence = self.next_sequence();
        self.push(ProbeRule::FallbackGroup {
            endpoints,
            timeout: self.default_timeout,
            sequence,
        });
    }

    /// Number of registered rules still in the queue.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Check whether the queue holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Pop the highest-priority rule: least weight ordinal, then least
    /// sequence.
    pub(crate) fn pop(&mut self) -> Option<ProbeRule> {
        self.heap.pop().map(|Reverse(slot)| slot.rule)
    }

    fn next_sequence(&mut self) -> u64 {
        let sequence = self.counter;
        self.counter += 1;
        sequence
    }

    fn push(&mut self, rule: ProbeRule) {
        let key = (rule.weight().ordinal(), rule.sequence());
        self.heap.push(Reverse(Slot { key, rule }));
    }
}

impl Default for RuleQueue {
    fn default() -> Self {
        Self::new()
    }
}
