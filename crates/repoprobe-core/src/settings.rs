//! Resolver settings and validation.
//!
//! Pure domain types with no infrastructure dependencies. All fields are
//! optional to support partial updates and graceful defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default connect timeout for a single connectivity check, in milliseconds.
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 500;

/// Resolver settings structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ResolverSettings {
    /// Connect timeout for a single connectivity check, in milliseconds.
    pub probe_timeout_ms: Option<u64>,
}

impl ResolverSettings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub const fn with_defaults() -> Self {
        Self {
            probe_timeout_ms: Some(DEFAULT_PROBE_TIMEOUT_MS),
        }
    }

    /// Get the effective probe timeout in milliseconds (with default fallback).
    #[must_use]
    pub const fn effective_probe_timeout_ms(&self) -> u64 {
        match self.probe_timeout_ms {
            Some(ms) => ms,
            None => DEFAULT_PROBE_TIMEOUT_MS,
        }
    }

    /// Get the effective probe timeout as a [`Duration`].
    #[must_use]
    pub const fn effective_probe_timeout(&self) -> Duration {
        Duration::from_millis(self.effective_probe_timeout_ms())
    }

    /// Merge another settings into this one, only updating fields that are Some.
    pub fn merge(&mut self, other: &Self) {
        if let Some(ms) = other.probe_timeout_ms {
            self.probe_timeout_ms = Some(ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ResolverSettings::with_defaults();
        assert_eq!(settings.probe_timeout_ms, Some(500));
        assert_eq!(
            settings.effective_probe_timeout(),
            Duration::from_millis(500)
        );
    }

    #[test]
    fn test_effective_timeout_falls_back_when_unset() {
        let settings = ResolverSettings::default();
        assert_eq!(settings.probe_timeout_ms, None);
        assert_eq!(settings.effective_probe_timeout_ms(), 500);
    }

    #[test]
    fn test_deserialize_partial() {
        let settings: ResolverSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, ResolverSettings::default());

        let settings: ResolverSettings =
            serde_json::from_str(r#"{"probe_timeout_ms": 250}"#).unwrap();
        assert_eq!(settings.effective_probe_timeout_ms(), 250);
    }

    #[test]
    fn test_merge_only_updates_set_fields() {
        let mut settings = ResolverSettings::with_defaults();
        settings.merge(&ResolverSettings::default());
        assert_eq!(settings.probe_timeout_ms, Some(500));

        settings.merge(&ResolverSettings {
            probe_timeout_ms: Some(100),
        });
        assert_eq!(settings.probe_timeout_ms, Some(100));
    }
}
