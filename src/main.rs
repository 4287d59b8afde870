use anyhow::Result;
use clap::Parser;
use evenly::cli::Cli;
use evenly::logging::init_logger;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    cli.run()
}
