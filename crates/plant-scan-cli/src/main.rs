//! Plant Scan CLI - Quality gate for plant photos.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{check::CheckArgs, Cli, Commands, ExitCode};
use config::AppConfig;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let args = match cli.command {
        Some(Commands::Check(args)) => args,
        None => cli.check,
    };

    if args.paths.is_empty() {
        eprintln!("error: No paths specified. Use --help for usage information.");
        return ExitCode::Error.into();
    }

    let config = AppConfig::load();
    let args = CheckArgs::with_config(args, &config);

    let exit_code = match commands::check::run(&args) {
        Ok(result) => result.exit_code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::Error
        }
    };

    exit_code.into()
}
