//! Permission trie diagnostics
//!
//! Loads a JSON permission list and either dumps the resulting trie or
//! answers a single query against it.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cretoai_accesscontrol::{types::permissions_from_json, TrieBuilder, TrieConfig};
use std::path::PathBuf;
use tracing::info;

/// Permission trie diagnostics CLI
#[derive(Parser)]
#[command(name = "trie-dump")]
#[command(about = "Build a permission trie from a JSON file and inspect it")]
#[command(version)]
struct Cli {
    /// JSON file containing `[{"action": .., "scope": ..}]`
    #[arg(short, long, env = "CRETOAI_PERMISSIONS")]
    permissions: PathBuf,

    /// Optional TOML file overriding the scope syntax
    #[arg(short, long, env = "CRETOAI_TRIE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Query to run (defaults to dumping the trie)
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the trie as JSON
    Dump,

    /// Check whether an action is granted on a scope
    Check {
        action: String,
        /// Leave empty for a scope-less check
        #[arg(default_value = "")]
        scope: String,
    },

    /// List every action held on a scope
    Metadata { scope: String },

    /// List identifiers under a prefix that grant an action
    Identifiers { action: String, prefix: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},cretoai_accesscontrol=debug", log_level).into()),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let config = match &cli.config {
        Some(path) => TrieConfig::from_file(path)
            .with_context(|| format!("Failed to load trie config from {:?}", path))?,
        None => TrieConfig::default(),
    };

    let content = std::fs::read_to_string(&cli.permissions)
        .with_context(|| format!("Failed to read permissions from {:?}", cli.permissions))?;
    let permissions = permissions_from_json(&content)
        .with_context(|| format!("Invalid permission list in {:?}", cli.permissions))?;
    info!("Loaded {} permissions from {:?}", permissions.len(), cli.permissions);

    let mut builder = TrieBuilder::with_config(config)?;
    builder.extend(&permissions);
    let trie = builder.build();
    info!(
        "Built trie with {} nodes (delimiter '{}', wildcard '{}')",
        trie.node_count(),
        trie.config().delimiter,
        trie.config().wildcard
    );

    match cli.command.unwrap_or(Command::Dump) {
        Command::Dump => {
            println!("{}", trie.to_json_pretty()?);
        }
        Command::Check { action, scope } => {
            let allowed = trie.has_access(&action, &scope);
            println!("{}", allowed);
        }
        Command::Metadata { scope } => {
            let mut actions: Vec<String> = trie.metadata(&scope).into_keys().collect();
            actions.sort_unstable();
            println!("{}", serde_json::to_string_pretty(&actions)?);
        }
        Command::Identifiers { action, prefix } => {
            let result = trie.identifiers(&action, &prefix);
            if result.has_wildcard {
                println!("*");
            } else {
                for id in result.ids {
                    println!("{}", id);
                }
            }
        }
    }

    Ok(())
}
