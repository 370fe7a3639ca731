use clap::Parser;
use colored::*;
use seqprune::cli::{Cli, Commands};
use seqprune::PruneError;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // SEQPRUNE_LOG sets the default filter; RUST_LOG still wins when present
    let log_level = std::env::var("SEQPRUNE_LOG").unwrap_or_else(|_| "warn".to_string());

    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => log_level,
        1 => "info".to_string(),
        _ => "debug".to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);

        let exit_code = match e.downcast_ref::<PruneError>() {
            Some(PruneError::Config(_)) | Some(PruneError::ParameterRange(_)) => 2,
            Some(PruneError::Io(_)) => 3,
            Some(PruneError::InputValidation(_)) | Some(PruneError::Csv(_)) => 4,
            Some(PruneError::WorkerFailure(_)) => 5,
            None => 1,
        };
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Prune(mut args) => {
            args.threads = cli.threads;
            seqprune::cli::commands::prune::run(args)
        }
        Commands::Stats(args) => seqprune::cli::commands::stats::run(args),
        Commands::Config(args) => seqprune::cli::commands::config::run(args),
    }
}
