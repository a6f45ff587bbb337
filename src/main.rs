use clap::Parser;
use restroute::cli::{run_cli, Cli};
use restroute::logging::init_logging;

fn main() -> anyhow::Result<()> {
    init_logging()?;
    run_cli(Cli::parse())
}
