//! bg-cars - search cars.bg listings from the command line

use anyhow::Result;
use bg_cars::carsbg::models::MAX_PAGES;
use bg_cars::carsbg::Brand;
use bg_cars::commands::SearchCommand;
use bg_cars::config::{Config, OutputFormat};
use bg_cars::SearchRequest;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "bg-cars",
    version,
    about = "Search cars.bg listings from the command line",
    long_about = "Walks cars.bg search results page by page and prints each listing with a normalized price."
)]
struct Cli {
    /// Site root to search against
    #[arg(long, global = true, env = "BG_CARS_BASE_URL")]
    base_url: Option<String>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "BG_CARS_PROXY")]
    proxy: Option<String>,

    /// Delay between page requests in milliseconds
    #[arg(long, global = true, env = "BG_CARS_DELAY")]
    delay: Option<u64>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "BG_CARS_TIMEOUT", value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Maximum number of listings to print
    #[arg(short, long, global = true)]
    max: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for cars
    #[command(alias = "s")]
    Search {
        /// Car brand (e.g. BMW, Audi); all brands if omitted
        brand: Option<String>,

        /// Car model (e.g. 5series); all models if omitted
        model: Option<String>,

        /// Number of result pages to search (clamped to 1-10)
        #[arg(short, long)]
        pages: Option<u32>,
    },

    /// List brands that can be used as a search filter
    Brands,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(delay) = cli.delay {
        config.delay_ms = delay;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(max) = cli.max {
        config.max_results = max;
    }

    match cli.command {
        Commands::Search { brand, model, pages } => {
            let request = SearchRequest::new(
                brand.as_deref(),
                model.as_deref(),
                Some(pages.unwrap_or(config.pages)),
            );
            debug!("Search request: {:?}", request);

            let cmd = SearchCommand::new(config);
            let shutdown = async {
                if tokio::signal::ctrl_c().await.is_err() {
                    std::future::pending::<()>().await;
                }
            };

            let output = cmd.execute(request, |ack| eprintln!("{}\n", ack), shutdown).await?;
            println!("{}", output);
        }

        Commands::Brands => {
            println!("Supported brands (searches can cover up to {} pages):\n", MAX_PAGES);
            println!("{:<12} {:<6}", "Brand", "Code");
            println!("{:-<12} {:-<6}", "", "");

            for brand in Brand::all() {
                println!("{:<12} {:<6}", brand.to_string(), brand.code());
            }
        }
    }

    Ok(())
}
