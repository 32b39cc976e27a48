#![deny(missing_docs)]

//! # blocwrap CLI
//!
//! Batch runner that wraps Flutter `build` methods in a `BlocBuilder`.
//!
//! Supported Commands:
//! - `run`: Rewrite the target files in place.
//! - `check`: Report which files still need wrapping; exits non-zero if any do.

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod error;
mod run;

#[derive(Parser, Debug)]
#[clap(author, version, about = "BlocBuilder injection for Flutter screens")]
struct Cli {
    /// Enable debug diagnostics on stderr.
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Wrap build methods in the target files.
    Run(run::RunArgs),
    /// Dry run that fails when any target still needs wrapping.
    Check(run::RunArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "blocwrap=debug,blocwrap_core=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::Run(args) => run::execute(args, false),
        Commands::Check(args) => run::execute(args, true),
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
