//! CLI entry point for photomosaic creation

use clap::Parser;
use photomosaic::io::cli::{Cli, MosaicRunner};

fn main() -> photomosaic::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let runner = MosaicRunner::new(cli);
    runner.run().map(|_| ())
}
