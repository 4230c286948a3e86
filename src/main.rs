use clap::Parser;
use tracing_subscriber::EnvFilter;

use image5d::cli::{self, Cli};

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(error) = cli::run(cli) {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
