//! RocketShoes cart CLI.
//!
//! Drives the persistent cart of a RocketShoes session against a live
//! storefront API.
//!
//! Commands:
//! - `rocketcart show` - List the cart
//! - `rocketcart add` - Add one unit of a product
//! - `rocketcart remove` - Remove a product
//! - `rocketcart update` - Set a product's quantity
//! - `rocketcart summary` - Priced totals
//! - `rocketcart clear` - Empty the cart
//! - `rocketcart config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rocket_observability::{init_logging, LogLevel};

use commands::{AddArgs, ConfigArgs, RemoveArgs, UpdateArgs};

/// RocketShoes cart from the terminal
#[derive(Parser)]
#[command(name = "rocketcart")]
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
    /// Show the cart contents
    Show,

    /// Add one unit of a product
    Add(AddArgs),

    /// Remove a product from the cart
    Remove(RemoveArgs),

    /// Set the quantity of a product in the cart
    Update(UpdateArgs),

    /// Show line subtotals and the cart total
    Summary,

    /// Empty the cart
    Clear,

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    let mut logging = ctx.config.logging.clone();
    if cli.verbose && logging.level > LogLevel::Debug {
        logging.level = LogLevel::Debug;
    }
    init_logging(&logging);

    // Execute command
    let result = match cli.command {
        Commands::Show => commands::cart::show(&ctx).await,
        Commands::Add(args) => commands::cart::add(args, &ctx).await,
        Commands::Remove(args) => commands::cart::remove(args, &ctx).await,
        Commands::Update(args) => commands::cart::update(args, &ctx).await,
        Commands::Summary => commands::cart::summary(&ctx).await,
        Commands::Clear => commands::cart::clear(&ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
