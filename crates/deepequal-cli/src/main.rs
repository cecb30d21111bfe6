//! deepequal-gen CLI - DeepEqual method generator
//!
//! Commands:
//! - `deepequal-gen generate` - Write `DeepEqual` methods for annotated packages
//! - `deepequal-gen check` - Run the full pass without writing anything

use clap::{ArgAction, Parser, Subcommand};
use deepequal_core::{GenError, LogLevel};
use std::path::PathBuf;
use std::process::ExitCode;

mod check;
mod common;
mod generate;

#[derive(Parser)]
#[command(name = "deepequal-gen")]
#[command(author, version, about = "Generate DeepEqual methods for Go types", long_about = None)]
struct Cli {
    /// Raise log verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate DeepEqual methods for every package that requests them
    Generate(generate::GenerateArgs),

    /// Validate declarations and directives without writing files
    Check {
        /// Declaration file describing the scanned packages
        #[arg(short, long)]
        input: PathBuf,

        /// Path to deepequal.toml (default: ./deepequal.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Verbosity flags applied on top of the configured level
#[derive(Debug, Clone, Copy)]
pub struct Verbosity {
    pub verbose: u8,
    pub quiet: bool,
}

impl Verbosity {
    pub fn level(self, configured: LogLevel) -> LogLevel {
        if self.quiet {
            LogLevel::Error
        } else {
            configured.raised_by(self.verbose)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbosity = Verbosity {
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    // The configured level is applied through the reload handle once the
    // config file has been read.
    deepequal_logging::init_logging(verbosity.level(LogLevel::Info));

    let result = match cli.command {
        Commands::Generate(args) => generate::run(&args, verbosity),
        Commands::Check { input, config } => check::run(&input, config.as_deref(), verbosity),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err
                .downcast_ref::<GenError>()
                .map(GenError::exit_code)
                .unwrap_or(1);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
