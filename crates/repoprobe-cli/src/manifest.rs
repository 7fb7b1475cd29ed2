//! Rule manifest loading.
//!
//! The manifest is the declarative form of the registration API: a JSON
//! document listing exclusive endpoints and fallback groups, in the order
//! they should be registered, plus optional resolver settings.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use repoprobe_core::{Endpoint, ResolverSettings};
use repoprobe_resolver::RuleQueue;
use serde::Deserialize;

/// Top-level manifest document.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Manifest {
    /// Resolver settings; absent fields fall back to defaults.
    #[serde(default)]
    pub settings: ResolverSettings,
    /// Resolution rules, registered in listed order.
    pub rules: Vec<RuleSpec>,
}

/// One declarative resolution rule.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RuleSpec {
    /// Primary endpoint; the first reachable one wins the whole pass.
    Exclusive {
        /// The endpoint to check first.
        endpoint: EndpointSpec,
        /// Optional per-rule connect timeout override, in milliseconds.
        #[serde(default)]
        timeout_ms: Option<u64>,
    },
    /// Secondary group checked after every exclusive rule.
    Fallback {
        /// Group members, in probe order.
        endpoints: Vec<EndpointSpec>,
    },
}

/// Declarative endpoint: URL plus optional credentials.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EndpointSpec {
    /// Repository URL.
    pub url: String,
    /// Username to pass through on application.
    #[serde(default)]
    pub username: Option<String>,
    /// Password to pass through on application.
    #[serde(default)]
    pub password: Option<String>,
}

impl EndpointSpec {
    fn into_endpoint(self) -> Endpoint {
        Endpoint::with_credentials(self.url, self.username, self.password)
    }
}

impl Manifest {
    /// Load and parse a manifest file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest {}", path.display()))?;
        let manifest: Self = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse manifest {}", path.display()))?;
        tracing::debug!(path = %path.display(), rules = manifest.rules.len(), "loaded manifest");
        Ok(manifest)
    }

    /// Build the rule queue this manifest describes.
    #[must_use]
    pub fn into_queue(self) -> RuleQueue {
        let mut queue = RuleQueue::with_settings(&self.settings);
        for rule in self.rules {
            match rule {
                RuleSpec::Exclusive {
                    endpoint,
                    timeout_ms: Some(ms),
                } => queue.register_exclusive_with_timeout(
                    endpoint.into_endpoint(),
                    Duration::from_millis(ms),
                ),
                RuleSpec::Exclusive {
                    endpoint,
                    timeout_ms: None,
                } => queue.register_exclusive(endpoint.into_endpoint()),
                RuleSpec::Fallback { endpoints } => queue.register_fallback_group(
                    endpoints.into_iter().map(EndpointSpec::into_endpoint).collect(),
                ),
            }
        }
        queue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "settings": { "probe_timeout_ms": 250 },
        "rules": [
            {
                "type": "exclusive",
                "endpoint": { "url": "https://proxy.example.com" },
                "timeout_ms": 100
            },
            {
                "type": "fallback",
                "endpoints": [
                    { "url": "https://a.example.com", "username": "deploy", "password": "hunter2" },
                    { "url": "file:///var/cache/repos" }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_sample_manifest() {
        let manifest: Manifest = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(manifest.settings.probe_timeout_ms, Some(250));
        assert_eq!(manifest.rules.len(), 2);
        assert!(matches!(
            manifest.rules[0],
            RuleSpec::Exclusive {
                timeout_ms: Some(100),
                ..
            }
        ));
    }

    #[test]
    fn test_settings_block_is_optional() {
        let manifest: Manifest = serde_json::from_str(r#"{"rules": []}"#).unwrap();
        assert_eq!(manifest.settings, ResolverSettings::default());
    }

    #[test]
    fn test_into_queue_registers_in_listed_order() {
        let manifest: Manifest = serde_json::from_str(SAMPLE).unwrap();
        let queue = manifest.into_queue();
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("repos.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(manifest.rules.len(), 2);

        let missing = Manifest::load(&dir.path().join("absent.json"));
        assert!(missing.is_err());
    }

    #[test]
    fn test_unknown_rule_type_is_rejected() {
        let result: Result<Manifest, _> = serde_json::from_str(
            r#"{"rules": [{"type": "mystery", "endpoints": []}]}"#,
        );
        assert!(result.is_err());
    }
}
