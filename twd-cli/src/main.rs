//! TWD CLI - Command line tool for estimating tourist destination water demand.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "twd-cli",
    version,
    about = "Tourist destination water demand toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: twd_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("Starting twd-cli");
    twd_cmd::run(cli.command)
}
