//! Shop CLI - drive the storefront cart, favorites and checkout state from a
//! terminal.
//!
//! Commands:
//! - `shop cart` - Add, adjust, remove and list cart lines
//! - `shop favorites` - Manage favorited products
//! - `shop checkout` - Edit the checkout form, quote and build the order
//! - `shop config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::{CartArgs, CheckoutArgs, ConfigArgs, FavoritesArgs};
use config::{LogFormat, LoggingConfig};

/// Shop CLI - storefront cart, favorites and checkout state
#[derive(Parser)]
#[command(name = "shop")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the shopping cart
    Cart(CartArgs),

    /// Manage favorites
    Favorites(FavoritesArgs),

    /// Checkout form, quote and order
    Checkout(CheckoutArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Install the tracing subscriber. Logs go to stderr so `--json` output on
/// stdout stays parseable.
fn init_tracing(logging: &LoggingConfig, verbose: bool) {
    let fallback = if verbose { "debug" } else { logging.filter.as_str() };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));

    let json = logging.format == LogFormat::Json;
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    init_tracing(&ctx.config.logging, cli.verbose);

    // Execute command
    let result = match cli.command {
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Favorites(args) => commands::favorites::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_negative_delta_parses() {
        let cli = Cli::try_parse_from(["shop", "cart", "qty", "7", "-2"]).unwrap();
        match cli.command {
            Commands::Cart(CartArgs {
                command: commands::CartCommand::Qty { product_id, delta },
            }) => {
                assert_eq!(product_id, 7);
                assert_eq!(delta, -2);
            }
            _ => panic!("expected cart qty"),
        }
    }

    #[test]
    fn test_product_requires_id_or_file() {
        assert!(Cli::try_parse_from(["shop", "cart", "add", "--price", "20"]).is_err());
        assert!(Cli::try_parse_from(["shop", "cart", "add", "--id", "7", "--price", "20"]).is_ok());
    }
}
