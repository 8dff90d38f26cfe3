//! # Execution Module
//!
//! The entry point that ties the command-line interface to the match
//! registry and protocol driver: parses arguments, installs a subscriber,
//! builds a [`ggp::registry::MatchRegistry`] for the chosen player type, and
//! serves GGP requests until interrupted.

use std::process;
use std::sync::Arc;

use clap::Parser;

use ggp::interface::cli::Cli;
use ggp::registry::MatchRegistry;

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_new(&cli.log).unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")))
        .init();

    let seed = cli.seed.unwrap_or(0);
    let port = cli.port;
    let factory = cli.player.into_factory();
    tracing::info!(player = factory.name(), port, "starting GGP player server");

    let registry = Arc::new(MatchRegistry::new(factory, seed));

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("failed to start async runtime: {e}");
            process::exit(exitcode::OSERR);
        },
    };

    let result = runtime.block_on(ggp::protocol::serve(registry, port));
    match result {
        Ok(()) => process::exit(exitcode::OK),
        Err(e) => {
            eprintln!("server error: {e}");
            process::exit(exitcode::OSERR);
        },
    }
}
