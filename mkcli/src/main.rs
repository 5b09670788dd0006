//! CLI entrypoint for `mkcli`.

mod cli;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Args;

const LOG_ENV: &str = "MKCLI_LOG";

fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();
    run()
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let request = Args::parse().into_request();
    let report = mkcli::driver::build(&request)?;
    for path in report.files() {
        info!(path = %path, "generated");
    }
    Ok(())
}
