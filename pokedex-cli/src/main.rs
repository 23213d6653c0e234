//! Pokedex CLI
//!
//! Interactive REPL for browsing PokeAPI location areas and catching Pokemon.

mod commands;
mod pokedex;
mod repl;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pokedex_api::{ApiConfig, PokeApiClient};
use pokedex_cache::{CacheConfig, TtlCache};
use pokedex_core::constants::{DEFAULT_CACHE_INTERVAL_MS, DEFAULT_HTTP_TIMEOUT_SECS, POKEAPI_BASE_URL};

use commands::Session;
use pokedex::CatchPolicy;

/// Pokedex - explore the Pokemon world from your terminal
#[derive(Parser)]
#[command(name = "pokedex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// PokeAPI root URL
    #[arg(long, env = "POKEAPI_BASE_URL", default_value = POKEAPI_BASE_URL)]
    base_url: String,

    /// Response cache interval in milliseconds (entry TTL and sweep period)
    #[arg(long, env = "POKEDEX_CACHE_INTERVAL_MS", default_value_t = DEFAULT_CACHE_INTERVAL_MS)]
    cache_interval_ms: u64,

    /// HTTP request timeout in seconds
    #[arg(long, env = "POKEDEX_HTTP_TIMEOUT", default_value_t = DEFAULT_HTTP_TIMEOUT_SECS)]
    timeout: u64,

    /// Run a single command (e.g. `explore pastoria-city-area`) instead of the REPL
    #[arg(trailing_var_arg = true)]
    command: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "pokedex=debug,warn"
    } else {
        "pokedex=warn,error"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cache = TtlCache::with_config(&CacheConfig::new(Duration::from_millis(cli.cache_interval_ms)));
    let config = ApiConfig::new(&cli.base_url).with_timeout(cli.timeout);
    let client = PokeApiClient::new(config, cache.clone())
        .context("Failed to create PokeAPI client")?;

    let mut session = Session::new(client, CatchPolicy::default());
    let mut stdout = std::io::stdout();

    let outcome = if cli.command.is_empty() {
        println!("{}", "Welcome to the Pokedex! Type 'help' for a list of commands.".cyan());
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        repl::run(&mut session, stdin, &mut stdout).await
    } else {
        repl::execute_line(&mut session, &cli.command.join(" "), &mut stdout)
            .await
            .map(|_| ())
    };

    cache.shutdown().await;
    outcome
}
