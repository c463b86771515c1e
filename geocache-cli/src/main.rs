//! Geocache CLI
//!
//! Command-line interface for cached forward and reverse geocoding.

use std::net::IpAddr;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use geocache_api::{ApiConfig, ApiServer, AppState};

/// Geocache - geocoding with access-time tracked result caches
#[derive(Parser)]
#[command(name = "geocache")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Geocoding provider API key
    #[arg(long, global = true, env = "GEOCODING_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: IpAddr,
    },

    /// Resolve an address to coordinates
    Geocode {
        /// Address to look up
        address: String,
        /// Repeat the lookup to show cache hits
        #[arg(short, long, default_value = "1")]
        repeat: usize,
    },

    /// Resolve coordinates to an address
    Reverse {
        /// Latitude in degrees
        #[arg(allow_hyphen_values = true)]
        latitude: f64,
        /// Longitude in degrees
        #[arg(allow_hyphen_values = true)]
        longitude: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "geocache=debug,info"
    } else {
        "geocache=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = ApiConfig::from_env();
    if let Some(key) = cli.api_key {
        config.api_key = key;
    }

    match cli.command {
        Commands::Serve { port, bind } => cmd_serve(config, bind, port).await,
        Commands::Geocode { address, repeat } => cmd_geocode(config, &address, repeat).await,
        Commands::Reverse { latitude, longitude } => cmd_reverse(config, latitude, longitude).await,
    }
}

/// Run API server
async fn cmd_serve(config: ApiConfig, bind: IpAddr, port: u16) -> Result<()> {
    println!("{}", "🚀 Starting Geocache API server...".cyan().bold());
    println!("   {} http://{}:{}", "Listening on:".green(), bind, port);
    println!("   {} http://{}:{}/health", "Health check:".dimmed(), bind, port);
    println!(
        "   {} {} entries, {}s idle",
        "Cache policy:".dimmed(),
        config.max_entries,
        config.ttl_seconds
    );
    println!("\n   Press Ctrl+C to stop.\n");

    let server = ApiServer::new(config).context("Invalid server configuration")?;
    server.run((bind, port)).await?;

    Ok(())
}

/// Forward lookup
async fn cmd_geocode(config: ApiConfig, address: &str, repeat: usize) -> Result<()> {
    println!("{} {}", "🔍 Geocoding:".cyan().bold(), address);

    let state = AppState::new(config).context("Invalid configuration")?;

    for attempt in 1..=repeat.max(1) {
        let start = Instant::now();
        let location = state
            .service
            .get_geocoding(address)
            .await
            .context("Geocoding failed")?;
        debug!(attempt, elapsed = ?start.elapsed(), "Lookup complete");

        if attempt == 1 {
            println!("\n{}", "✅ Location:".green().bold());
            println!("   {} {}", "Latitude:".yellow(), location.latitude);
            println!("   {} {}", "Longitude:".yellow(), location.longitude);
        }
        println!("   {} #{} in {:?}", "Lookup".dimmed(), attempt, start.elapsed());
    }

    Ok(())
}

/// Reverse lookup
async fn cmd_reverse(config: ApiConfig, latitude: f64, longitude: f64) -> Result<()> {
    println!(
        "{} {}, {}",
        "🔍 Reverse geocoding:".cyan().bold(),
        latitude,
        longitude
    );

    let state = AppState::new(config).context("Invalid configuration")?;
    let address = state
        .service
        .get_reverse_geocoding(latitude, longitude)
        .await
        .context("Reverse geocoding failed")?;

    println!("\n{}", "✅ Address:".green().bold());
    println!("   {}", address.address);

    Ok(())
}
