mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    block, init, render, tokens, validate, BlockCommand, InitArgs, RenderArgs, TokensArgs,
    ValidateArgs,
};
use tracing_subscriber::EnvFilter;

/// Storefront CLI - theme and layout tools for storefront pages
#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize config and a default theme
    Init(InitArgs),

    /// Render a page to HTML
    Render(RenderArgs),

    /// Inspect and edit layout blocks
    Block {
        #[command(subcommand)]
        command: BlockCommand,
    },

    /// Show or update theme tokens
    Tokens(TokensArgs),

    /// Check the theme for problems
    Validate(ValidateArgs),
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| match cli.command {
            Command::Init(args) => init(args, &cwd),
            Command::Render(args) => render(args, &cwd),
            Command::Block { command } => block(command, &cwd),
            Command::Tokens(args) => tokens(args, &cwd),
            Command::Validate(args) => validate(args, &cwd),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
