//! nftfeed: collection data CLI
//!
//! Queries the collection data service and drives a terminal gallery.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use nftfeed::config::Config;
use nftfeed::{FeedError, GallerySink, RotationDriver, TokenRecord, Transition};
use tracing::info;

/// nftfeed CLI
#[derive(Parser)]
#[command(name = "nftfeed")]
#[command(version = nftfeed::PKG_VERSION)]
#[command(about = "NFT collection data loader")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long, env = "NFTFEED_CONFIG")]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show collection statistics
    Stats,

    /// List tokens
    Tokens {
        /// Number of tokens
        #[arg(short, long, default_value_t = 12)]
        limit: usize,
        /// Return a random sample instead of the live list
        #[arg(long)]
        cycle: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Run the rotating gallery in the terminal
    Rotate {
        /// Number of tokens per set (default: rotation.default_limit)
        #[arg(short, long)]
        limit: Option<usize>,
        /// Stop after this many rotations
        #[arg(long, default_value_t = 3)]
        cycles: u32,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing (default: nftfeed=info; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("nftfeed=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;
    let rotation = config.rotation_config();
    let feed = config.into_builder().build()?;

    info!(version = nftfeed::version_string(), "nftfeed starting");

    match args.command {
        Command::Stats => {
            let data = feed.get_collection_data().await;
            let stats = feed.get_collection_stats().await;
            println!("collection:   {}", data.name);
            if !data.description.is_empty() {
                println!("description:  {}", data.description);
            }
            println!("total supply: {}", stats.total_supply);
            println!("floor price:  {}", stats.floor_price);
            println!("volume:       {}", stats.volume);
            println!("owners:       {}", stats.owners);
            println!("listed:       {}", stats.listed);
        }

        Command::Tokens { limit, cycle, json } => {
            let tokens = feed.get_collection_nfts(limit, cycle).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&tokens)?);
            } else if tokens.is_empty() {
                println!("no tokens");
            } else {
                for token in &tokens {
                    print_token(token);
                }
            }
        }

        Command::Rotate { limit, cycles } => {
            let limit = limit.unwrap_or(rotation.default_limit);
            let period = rotation.period;
            let driver = RotationDriver::new(Arc::new(feed), Arc::new(TerminalSink), rotation)?;
            driver.render(limit).await?;
            if driver.is_rotating() {
                // Half a period of slack so the last swap lands before destroy
                tokio::time::sleep(period * cycles + period / 2).await;
            }
            driver.destroy();
        }
    }

    Ok(())
}

fn print_token(token: &TokenRecord) {
    let price = token
        .price
        .as_deref()
        .map(|p| format!("  {p} STX"))
        .unwrap_or_default();
    println!("#{:<6} {}{price}", token.id, token.name);
    println!("        {}", token.image);
    println!("        {}", token.permalink);
}

/// Prints each set to stdout.
struct TerminalSink;

impl GallerySink for TerminalSink {
    fn show_loading(&self) {
        println!("loading...");
    }

    fn show_tokens(&self, tokens: &[TokenRecord], transition: Transition) {
        if transition == Transition::Swap {
            println!("\n--- rotated ---");
        }
        for token in tokens {
            print_token(token);
        }
    }

    fn show_empty(&self) {
        println!("no tokens to show");
    }

    fn show_error(&self, error: &FeedError) {
        eprintln!("failed to load gallery: {error}");
    }

    fn detach(&self) {
        println!("gallery closed");
    }
}
