mod commands;
mod config;

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    clear, export, render, sanitize, save, ExportArgs, RenderArgs, SanitizeArgs, SaveArgs,
};
use tracing_subscriber::EnvFilter;

/// Folio CLI - block documents, project cards and paginated export
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Clean a JSON block document
    Sanitize(SanitizeArgs),

    /// Print the output-node tree for a document
    Render(RenderArgs),

    /// Export a document through the page renderer
    Export(ExportArgs),

    /// Store a document under the configured key
    Save(SaveArgs),

    /// Remove the stored document
    Clear,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()
        .context("Cannot get current directory")?
        .display()
        .to_string();

    match command {
        Command::Sanitize(args) => sanitize(args, &cwd),
        Command::Render(args) => render(args, &cwd),
        Command::Export(args) => export(args, &cwd),
        Command::Save(args) => save(args, &cwd),
        Command::Clear => clear(&cwd),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli.command) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
