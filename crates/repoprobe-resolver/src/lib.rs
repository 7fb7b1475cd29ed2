//! Fail-fast repository endpoint resolution.
//!
//! Turns a declarative list of "try this first, else fall back to these"
//! rules into an ordered list of reachable repository endpoints. Exclusive
//! rules are drained ahead of fallback groups regardless of registration
//! order, so a fast-fail primary check never waits behind a slower fallback
//! probe; the first reachable exclusive endpoint stops the whole pass.
//!
//! - `queue` - rule registration and priority ordering
//! - `engine` - the single-pass resolution state machine
//! - `probe` - bounded-timeout TCP connectivity adapter
//! - `registry` - applying resolved endpoints into a host registry

pub mod engine;
pub mod probe;
pub mod queue;
pub mod registry;

pub use engine::{EndpointResolver, ResolvedEndpoints};
pub use probe::TcpProbe;
pub use queue::RuleQueue;
pub use registry::{InMemoryRegistry, RegisteredRepository, apply_resolved};

// Re-export core types for convenience
pub use repoprobe_core::{
    ConnectivityProbe, Credentials, Endpoint, Locality, PriorityWeight, ProbeRule, RegistryError,
    RepositoryRegistrar, ResolverSettings,
};
