//! Outfit CLI - classify outfit photos from the command line.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod commands;
mod exit_codes;

use exit_codes::ExitCode;

#[derive(Parser)]
#[command(name = "outfit")]
#[command(author, version, about = "Outfit photo analysis", long_about = None)]
#[command(after_help = "Exit codes:
  0   Success
  1   General error
  65  File larger than 10MB
  66  Input file unreadable
  69  Model or storage provider failed")]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify the outfit in a photo
    Analyze {
        /// Path to the image file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Skip the suggestion image
        #[arg(long)]
        no_suggest: bool,

        /// Use mock providers instead of Gemini (for testing)
        #[arg(long)]
        mock: bool,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "outfit_cli=debug,outfit_core=debug"
    } else {
        "outfit_cli=warn,outfit_core=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Analyze {
            file,
            no_suggest,
            mock,
            json,
        } => {
            let options = commands::analyze::AnalyzeOptions {
                suggest: !no_suggest,
                mock,
                json,
            };
            commands::analyze::execute(file, options).await
        }
    };

    let exit = match result {
        Ok(()) => ExitCode::success(),
        Err(err) => ExitCode::from_anyhow(&err),
    };

    if let Some(message) = &exit.message {
        eprintln!("{} {}", "Error:".red().bold(), message);
    }
    std::process::exit(exit.code);
}
