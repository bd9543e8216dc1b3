//! Clipper main entry point
//!
//! Command-line interface for the clipper news harvester.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use clipper::config::load_config_with_hash;
use clipper::crawler::{harvest, print_report};

/// Clipper: an incremental news-article harvester
///
/// Clipper crawls a single news site, extracts structured article records,
/// and remembers every URL it has processed so repeated runs only touch new
/// content.
#[derive(Parser, Debug)]
#[command(name = "clipper")]
#[command(version = "1.0.0")]
#[command(about = "An incremental news-article harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be harvested without fetching
    #[arg(long, conflicts_with = "export_corpus")]
    dry_run: bool,

    /// Write the prose-only corpus projection to PATH and exit
    #[arg(long, value_name = "PATH", conflicts_with = "dry_run")]
    export_corpus: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else if let Some(out_path) = &cli.export_corpus {
        handle_export_corpus(&config, out_path)?;
    } else {
        handle_harvest(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("clipper=info,warn"),
            1 => EnvFilter::new("clipper=debug,info"),
            2 => EnvFilter::new("clipper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would run
fn handle_dry_run(config: &clipper::Config) -> anyhow::Result<()> {
    println!("=== Clipper Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  User agent: {}", config.crawler.user_agent);
    println!(
        "  Max concurrent fetches: {}",
        config.crawler.max_concurrent_fetches
    );
    println!("  Fetch timeout: {}s", config.crawler.fetch_timeout_secs);

    println!("\nSite:");
    println!("  Allowed domains ({}):", config.site.allowed_domains.len());
    for domain in &config.site.allowed_domains {
        println!("    - {}", domain);
    }
    println!("  Seeds ({}):", config.site.seeds.len());
    for seed in &config.site.seeds {
        println!("    - {}", seed);
    }
    println!(
        "  Article link rules ({}):",
        config.site.article_link_rules.len()
    );
    for rule in &config.site.article_link_rules {
        println!("    - contains \"{}\"", rule);
    }

    println!("\nPage Markers:");
    println!("  Article: class=\"{}\"", config.markers.article);
    println!("  List: class=\"{}\"", config.markers.list);

    println!("\nStorage:");
    println!("  Visited URLs: {}", config.storage.visited_path);
    println!("  Articles: {}", config.storage.articles_path);

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would start harvesting from {} seed URLs",
        config.site.seeds.len()
    );

    Ok(())
}

/// Handles --export-corpus: writes the prose-only projection and exits
fn handle_export_corpus(config: &clipper::Config, out_path: &Path) -> anyhow::Result<()> {
    println!("=== Exporting Corpus ===\n");
    println!("Article store: {}", config.storage.articles_path);
    println!("Output: {}", out_path.display());
    println!();

    let count =
        clipper::corpus::export_corpus(Path::new(&config.storage.articles_path), out_path)?;

    println!("✓ Exported {} articles to: {}", count, out_path.display());

    Ok(())
}

/// Handles the main harvest operation
async fn handle_harvest(config: clipper::Config) -> anyhow::Result<()> {
    tracing::info!(
        "Starting harvest: {} seeds, {} allowed domains",
        config.site.seeds.len(),
        config.site.allowed_domains.len()
    );

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    };

    match harvest(config, shutdown).await {
        Ok(report) => {
            tracing::info!("Harvest completed successfully");
            print_report(&report);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}
