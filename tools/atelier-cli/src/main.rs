//! Atelier CLI - inspect and edit a storefront cart from the shell.
//!
//! Commands:
//! - `atelier list` - Show the cart
//! - `atelier add` - Add an in-stock piece
//! - `atelier preorder` - Add a piece as a preorder
//! - `atelier set` - Change a line's quantity
//! - `atelier remove` - Remove a line
//! - `atelier clear` - Empty the cart
//! - `atelier checkout` - Print the WhatsApp order link and clear the cart

mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AddArgs, CheckoutArgs, PreorderArgs, RemoveArgs, SetArgs};

/// Atelier CLI - manage a gallery storefront cart
#[derive(Parser)]
#[command(name = "atelier")]
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
    /// Show the cart
    List,

    /// Add an in-stock piece
    Add(AddArgs),

    /// Add a piece as a preorder
    Preorder(PreorderArgs),

    /// Change a line's quantity (0 removes it)
    Set(SetArgs),

    /// Remove a line
    Remove(RemoveArgs),

    /// Empty the cart
    Clear,

    /// Send the order and clear the cart
    Checkout(CheckoutArgs),
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let mut ctx = context::Context::load(config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::List => commands::cart::list(&ctx),
        Commands::Add(args) => commands::cart::add(args, &mut ctx),
        Commands::Preorder(args) => commands::cart::preorder(args, &mut ctx),
        Commands::Set(args) => commands::cart::set(args, &mut ctx),
        Commands::Remove(args) => commands::cart::remove(args, &mut ctx),
        Commands::Clear => commands::cart::clear(&mut ctx),
        Commands::Checkout(args) => commands::checkout::run(args, &mut ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
