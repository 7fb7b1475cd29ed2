//! Repository registrar port.
//!
//! The host owns a repository container (a build tool's repository list, a
//! package manager's mirror set). Resolved endpoints are applied into it
//! through this trait; the engine itself never touches it.

use thiserror::Error;

use crate::endpoint::Credentials;

/// Errors surfaced by a host registry while applying resolved endpoints.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The URL is already present in the registry.
    #[error("already registered: {url}")]
    AlreadyRegistered {
        /// The duplicate URL.
        url: String,
    },

    /// The host refused the repository for its own reasons.
    #[error("rejected {url}: {reason}")]
    Rejected {
        /// The refused URL.
        url: String,
        /// Host-supplied refusal reason.
        reason: String,
    },
}

impl RegistryError {
    /// Create an already registered error.
    pub fn already_registered(url: impl Into<String>) -> Self {
        Self::AlreadyRegistered { url: url.into() }
    }

    /// Create a rejection error.
    pub fn rejected(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// Host-side repository container that resolved endpoints are applied into.
pub trait RepositoryRegistrar {
    /// Add a repository URL, with credentials passed through when present.
    fn register(
        &mut self,
        url: &str,
        credentials: Option<Credentials<'_>>,
    ) -> Result<(), RegistryError>;
}
