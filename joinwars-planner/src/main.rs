mod cli;
mod reports;
mod util;

use anyhow::Result;
use clap::Parser;

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    cli::run(&args)
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}
