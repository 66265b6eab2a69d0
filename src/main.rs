use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use tokio::io::BufReader;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use mint_cost::cli::{render_estimate, run_interactive};
use mint_cost::common::{Environment, QuantityPolicy};
use mint_cost::{Config, Estimator, MintCostServer, PriceCache, Quantity};

#[derive(Debug, Parser)]
#[command(
    name = "mint-cost",
    about = "How much does it cost to mint photos on sloika.xyz?"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the estimate for one quantity and exit
    Estimate {
        /// Number of photos, as typed
        #[arg(default_value = "100")]
        quantity: String,
    },
    /// Read quantities from stdin, one per line
    Interactive,
    /// Serve estimates over JSON-RPC
    Serve {
        /// Overrides MINT_COST_RPC_ADDR
        #[arg(long)]
        addr: Option<SocketAddr>,
    },
}

fn init_tracing(environment: Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(environment.default_log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(environment.is_development())
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(config.environment);

    match cli.command {
        Command::Estimate { quantity } => {
            let cache = PriceCache::new(config.gas_price_feed()?);
            if let Err(e) = cache.refresh().await {
                warn!("❌ Could not fetch gas price: {}", e);
            }

            let quantity = match config.quantity_policy() {
                QuantityPolicy::Lenient => Quantity::parse_lenient(&quantity),
                QuantityPolicy::Strict => quantity.parse()?,
            };
            println!("{}", render_estimate(&Estimator::default(), &cache, quantity));
        }
        Command::Interactive => {
            let cache = PriceCache::new(config.gas_price_feed()?);
            let refresh = cache.spawn_refresh(config.refresh_interval());
            if config.refresh_interval().is_none() {
                // fetch once before the first estimate is shown
                refresh.await?;
            }

            run_interactive(
                &Estimator::default(),
                &cache,
                config.quantity_policy(),
                BufReader::new(tokio::io::stdin()),
                tokio::io::stdout(),
            )
            .await?;
        }
        Command::Serve { addr } => {
            let server = MintCostServer::from_config(&config, addr)?;
            server.run().await?;
        }
    }

    Ok(())
}
