// Polyclinic - In-process clinic registry and route dispatcher
// Copyright (c) 2025 Polyclinic Contributors
// Licensed under the MIT License

use clap::Parser;
use polyclinic::cli::{Cli, Commands};
use polyclinic::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Optional; a missing .env is ignored
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let (log_level, logging) = cli.logging_settings();
    let guard = match init_logging(&log_level, &logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Polyclinic");

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    drop(guard);
    process::exit(exit_code);
}

async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    let config = cli.config.as_deref();
    match &cli.command {
        Commands::Request(args) => args.execute(config).await,
        Commands::Replay(args) => args.execute(config).await,
        Commands::ValidateConfig(args) => args.execute(config).await,
    }
}
