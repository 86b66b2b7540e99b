use anyhow::Result;
use clap::Parser;
use denaro::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
