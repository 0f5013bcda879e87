//! luft - poll a local sensor.community air-quality/weather sensor pair,
//! persist merged readings, and render rolling charts.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "luft",
    version,
    about = "Local air-quality and weather sensor monitor"
)]
struct Cli {
    #[command(subcommand)]
    command: luft_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    luft_cmd::run(cli.command).await
}
