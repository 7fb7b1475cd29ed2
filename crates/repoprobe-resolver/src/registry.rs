//! Applying resolved endpoints into a host repository registry.
//!
//! The engine only decides which endpoints are usable; this module is the
//! glue that pushes them into whatever repository container the host owns,
//! passing credentials through when present.

use repoprobe_core::{Credentials, RegistryError, RepositoryRegistrar};
use serde::Serialize;
use tracing::info;

use crate::engine::ResolvedEndpoints;

/// Apply every resolved endpoint into `registrar`, locals first.
///
/// Local endpoints require no network validation, so they are applied
/// independently of (and ahead of) the probed remotes. Credentials are
/// passed through when the endpoint carries either a username or a
/// password.
pub fn apply_resolved(
    resolved: &ResolvedEndpoints,
    registrar: &mut dyn RepositoryRegistrar,
) -> Result<(), RegistryError> {
    for endpoint in resolved.local().iter().chain(resolved.remote()) {
        info!(url = endpoint.url(), "adding repository to the registry");
        registrar.register(endpoint.url(), endpoint.credentials())?;
    }
    Ok(())
}

/// One applied repository entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredRepository {
    /// Repository URL.
    pub url: String,
    /// Username passed through from the endpoint, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Password passed through from the endpoint, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Ordered, duplicate-rejecting registrar backed by a `Vec`.
///
/// Used by the CLI and by tests; hosts with a real repository container
/// implement [`RepositoryRegistrar`] themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryRegistry {
    repositories: Vec<RegisteredRepository>,
}

impl InMemoryRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The applied repositories, in application order.
    #[must_use]
    pub fn repositories(&self) -> &[RegisteredRepository] {
        &self.repositories
    }

    /// Number of applied repositories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    /// Check whether no repository has been applied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }
}

impl RepositoryRegistrar for InMemoryRegistry {
    fn register(
        &mut self,
        url: &str,
        credentials: Option<Credentials<'_>>,
    ) -> Result<(), RegistryError> {
        if self.repositories.iter().any(|repo| repo.url == url) {
            return Err(RegistryError::already_registered(url));
        }
        self.repositories.push(RegisteredRepository {
            url: url.to_string(),
            username: credentials.and_then(|c| c.username.map(str::to_string)),
            password: credentials.and_then(|c| c.password.map(str::to_string)),
        });
        Ok(())
    }
}
