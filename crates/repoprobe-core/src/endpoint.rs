//! Repository endpoint value type.
//!
//! An [`Endpoint`] is an immutable URL plus optional credentials. The URL is
//! parsed exactly once at construction; a malformed URL does not fail the
//! constructor, it degrades to an endpoint that is never local and can never
//! be reached.

use std::fmt;

use serde::Serialize;
use url::Url;

/// URL scheme that denotes a local filesystem repository.
const FILE_SCHEME: &str = "file";

/// Where an endpoint lives relative to the resolving host.
///
/// `Unknown` means the URL did not parse. Such endpoints behave like
/// unreachable remotes in the control flow, but the state is kept distinct
/// from a confirmed `Remote`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locality {
    /// Filesystem-scheme URL; accepted without a connectivity check.
    Local,
    /// Parsed URL with any non-filesystem scheme.
    Remote,
    /// URL failed to parse.
    Unknown,
}

impl Locality {
    /// Check whether this is a confirmed local endpoint.
    #[must_use]
    pub const fn is_local(self) -> bool {
        matches!(self, Self::Local)
    }
}

/// Borrowed credential pair for passing through to a host registry.
///
/// Only constructed when the endpoint carries at least one of the two
/// fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credentials<'a> {
    /// Username, if the endpoint carries one.
    pub username: Option<&'a str>,
    /// Password, if the endpoint carries one.
    pub password: Option<&'a str>,
}

/// A network or local-filesystem repository location with optional
/// credentials.
///
/// Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<String>,
    #[serde(skip)]
    resolved: Option<Url>,
}

impl Endpoint {
    /// Create an endpoint without credentials.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_credentials(url, None, None)
    }

    /// Create an endpoint with optional credentials.
    ///
    /// Never fails; a URL that does not parse yields an endpoint with
    /// [`Locality::Unknown`] that is silently dropped during resolution.
    pub fn with_credentials(
        url: impl Into<String>,
        username: Option<String>,
        password: Option<String>,
    ) -> Self {
        let url = url.into();
        let resolved = Url::parse(&url).ok();
        Self {
            url,
            username,
            password,
            resolved,
        }
    }

    /// The endpoint URL as given by the caller.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Username, if any.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Password, if any.
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Locality classification computed at construction.
    #[must_use]
    pub fn locality(&self) -> Locality {
        match &self.resolved {
            Some(parsed) if parsed.scheme() == FILE_SCHEME => Locality::Local,
            Some(_) => Locality::Remote,
            None => Locality::Unknown,
        }
    }

    /// Check whether this is a confirmed local endpoint.
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.locality().is_local()
    }

    /// Host and port to dial for a connectivity check.
    ///
    /// `None` for local, unparseable, host-less, or port-less URLs; such
    /// endpoints cannot be probed and count as unreachable.
    #[must_use]
    pub fn host_and_port(&self) -> Option<(&str, u16)> {
        let parsed = self.resolved.as_ref()?;
        if parsed.scheme() == FILE_SCHEME {
            return None;
        }
        let host = parsed.host_str()?;
        let port = parsed.port_or_known_default()?;
        Some((host, port))
    }

    /// Credential pair, present when either field is set.
    #[must_use]
    pub fn credentials(&self) -> Option<Credentials<'_>> {
        if self.username.is_some() || self.password.is_some() {
            Some(Credentials {
                username: self.username.as_deref(),
                password: self.password.as_deref(),
            })
        } else {
            None
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
