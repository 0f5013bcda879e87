//! Command implementations for the luft CLI.
//!
//! Provides the `once` / `watch` / `chart` subcommands around the
//! fetch-merge-persist-render cycle.

use clap::{Args, Subcommand};

pub mod cycle;
pub mod watch;

/// Default particulate sensor id on data.sensor.community
pub const DEFAULT_POLLUTION_SENSOR: u32 = 56949;
/// Default weather sensor id on data.sensor.community
pub const DEFAULT_WEATHER_SENSOR: u32 = 56950;
/// Default path of the JSON record file
pub const DEFAULT_STORAGE_PATH: &str = "local-sensor.json";
/// Default directory the SVG charts are written to
pub const DEFAULT_CHARTS_DIR: &str = "charts";
/// Default seconds between polling cycles
pub const DEFAULT_INTERVAL_SECONDS: u64 = 300;

/// Options shared by the polling commands.
#[derive(Args, Debug, Clone)]
pub struct PollOptions {
    /// Particulate sensor id
    #[arg(long, default_value_t = DEFAULT_POLLUTION_SENSOR)]
    pub pollution_sensor: u32,

    /// Weather sensor id
    #[arg(long, default_value_t = DEFAULT_WEATHER_SENSOR)]
    pub weather_sensor: u32,

    /// Path of the JSON record file
    #[arg(short, long, default_value = DEFAULT_STORAGE_PATH)]
    pub storage: String,

    /// Directory the SVG charts are written to
    #[arg(short, long, default_value = DEFAULT_CHARTS_DIR)]
    pub charts_dir: String,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run one fetch-merge-persist-render cycle and exit
    Once {
        #[command(flatten)]
        options: PollOptions,
    },

    /// Poll the sensors on a fixed interval until terminated
    Watch {
        #[command(flatten)]
        options: PollOptions,

        /// Seconds between polling cycles
        #[arg(short, long, default_value_t = DEFAULT_INTERVAL_SECONDS)]
        interval: u64,
    },

    /// Re-render charts from the persisted records without fetching
    Chart {
        /// Path of the JSON record file
        #[arg(short, long, default_value = DEFAULT_STORAGE_PATH)]
        storage: String,

        /// Directory the SVG charts are written to
        #[arg(short, long, default_value = DEFAULT_CHARTS_DIR)]
        charts_dir: String,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Once { options } => {
            let client = luft_sensor::client::build_client()?;
            cycle::run_cycle(&client, &options).await
        }
        Command::Watch { options, interval } => watch::run_watch(&options, interval).await,
        Command::Chart {
            storage,
            charts_dir,
        } => {
            let store = luft_store::RecordStore::load(std::path::Path::new(&storage))?;
            cycle::render_charts(&store, &charts_dir)
        }
    }
}
