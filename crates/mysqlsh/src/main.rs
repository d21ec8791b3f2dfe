//! mysqlsh CLI - interactive MySQL shell

use clap::{CommandFactory, Parser};
use colored::Colorize;
use mysqlsh::{Config, ConnectionManager, Shell, TableStyle};
use std::io;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

/// Log filter, e.g. `MYSQLSH_LOG=mysqlsh=debug`.
const LOG_ENV: &str = "MYSQLSH_LOG";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = Config::parse();
    init_logging();

    let manager = match ConnectionManager::connect(&config).await {
        Ok(manager) => manager,
        Err(err) => {
            println!("{}", err.to_string().red());
            eprintln!("{}", Config::command().render_usage());
            std::process::exit(1);
        }
    };

    let code = match interactive(manager).await {
        Ok(()) => 0,
        Err(err) => {
            println!("{}", err.to_string().red());
            1
        }
    };

    // The stdin reader thread can still be parked in a read; skip waiting for it.
    std::process::exit(code);
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn interactive(manager: ConnectionManager) -> anyhow::Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut shell = Shell::new(manager, stdin, io::stdout(), TableStyle::from_locale());

    let outcome = tokio::select! {
        result = shell.run() => result,
        _ = tokio::signal::ctrl_c() => {
            println!();
            Ok(())
        }
    };

    if let Err(err) = shell.into_session().close().await {
        tracing::warn!("failed to close connection: {}", err);
    }
    outcome?;
    Ok(())
}
