//! CLI entry point - the composition root.
//!
//! This is the only place where the TCP probe, the resolver and a registry
//! are wired together. The library crates stay host-agnostic.

mod manifest;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use repoprobe_resolver::{EndpointResolver, InMemoryRegistry, TcpProbe, apply_resolved};

use manifest::Manifest;

#[derive(Parser)]
#[command(
    name = "repoprobe",
    about = "Fail-fast repository endpoint resolution",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe the manifest's endpoints and print the reachable repositories
    Resolve {
        /// Path to the JSON rule manifest
        #[arg(long)]
        manifest: PathBuf,
        /// Emit the resolved repositories as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Resolve { manifest, json } => resolve_command(&manifest, json).await,
    }
}

async fn resolve_command(path: &Path, json: bool) -> anyhow::Result<()> {
    let manifest = Manifest::load(path)?;
    let queue = manifest.into_queue();

    let resolver = EndpointResolver::new(Arc::new(TcpProbe::new()));
    let resolved = resolver.resolve(queue).await;

    let mut registry = InMemoryRegistry::new();
    apply_resolved(&resolved, &mut registry)?;

    if json {
        println!("{}", serde_json::to_string_pretty(registry.repositories())?);
    } else if registry.is_empty() {
        println!("No reachable repositories.");
    } else {
        for repo in registry.repositories() {
            match repo.username.as_deref() {
                Some(user) => println!("{} (as {user})", repo.url),
                None => println!("{}", repo.url),
            }
        }
    }
    Ok(())
}
