//! The periodic polling loop.

use crate::cycle::run_cycle;
use crate::PollOptions;
use log::{info, warn};
use luft_sensor::SensorError;
use tokio::time::{interval, MissedTickBehavior};

/// Poll the sensors on a fixed interval until externally terminated.
///
/// Cycles never overlap: the next tick is not awaited until the current
/// cycle finishes, and a cycle that overruns the interval delays the next
/// tick instead of stacking missed ones. Fetch failures are logged and the
/// cycle skipped; anything else (malformed readings, persistence failures)
/// terminates the loop and surfaces to the operator.
pub async fn run_watch(options: &PollOptions, interval_seconds: u64) -> anyhow::Result<()> {
    let client = luft_sensor::client::build_client()?;
    info!(
        "Polling sensors {} and {} every {}s",
        options.pollution_sensor, options.weather_sensor, interval_seconds
    );

    let mut ticker = interval(std::time::Duration::from_secs(interval_seconds));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        if let Err(e) = run_cycle(&client, options).await {
            if is_fetch_failure(&e) {
                warn!("Fetch failed, skipping this cycle: {:#}", e);
                continue;
            }
            return Err(e);
        }
    }
}

/// True for network/HTTP errors, which are recoverable by waiting for the
/// next tick.
fn is_fetch_failure(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<SensorError>(),
        Some(SensorError::HttpRequest(_))
    )
}
