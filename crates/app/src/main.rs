//! sigcodec: command-line front end for the 7-bit signature codec.

mod commands;
mod config;
mod input_gen;
mod report;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use config::{Cli, Command};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let ok = match &cli.command {
        Command::Encode(io) => commands::run_encode(io).map(|()| true)?,
        Command::Decode { io, modified_utf8 } => {
            commands::run_decode(io, *modified_utf8).map(|()| true)?
        }
        Command::Check { input } => commands::run_check(input.as_deref())?,
        Command::Stats { len, input } => commands::run_stats(*len, input.as_deref()).map(|()| true)?,
        Command::Selftest(args) => commands::run_selftest(args)?,
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
