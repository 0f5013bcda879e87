//! One fetch-merge-persist-render cycle.

use crate::PollOptions;
use anyhow::Context;
use chrono::{Duration, Local};
use log::info;
use luft_data::gaps::{insert_gap_markers, DEFAULT_GAP_THRESHOLD_MINUTES};
use luft_data::series::{extract, Field};
use luft_sensor::client::fetch_readings;
use luft_sensor::merge::merge;
use luft_store::RecordStore;
use reqwest::Client;
use std::path::Path;

/// Run one full cycle: fetch both streams, merge, persist, render.
///
/// Fetch and persistence errors propagate to the caller; the watch loop
/// decides which of them are recoverable.
pub async fn run_cycle(client: &Client, options: &PollOptions) -> anyhow::Result<()> {
    let pollution = fetch_readings(client, options.pollution_sensor).await?;
    let weather = fetch_readings(client, options.weather_sensor).await?;
    info!(
        "Fetched {} pollution and {} weather readings",
        pollution.len(),
        weather.len()
    );

    let new_records = merge(&pollution, &weather)?;

    let storage = Path::new(&options.storage);
    let mut store = RecordStore::load(storage)?;
    store.append(new_records);
    store.persist(storage)?;

    render_charts(&store, &options.charts_dir)?;

    if let Some(latest) = store.latest() {
        match (latest.temperature, latest.pressure, latest.humidity) {
            (Some(temperature), Some(pressure), Some(humidity)) => info!(
                "Latest reading at {}: pm2.5={} pm10={} temperature={} pressure={} humidity={}",
                latest.timestamp, latest.pm25, latest.pm10, temperature, pressure, humidity
            ),
            _ => info!(
                "Latest reading at {}: pm2.5={} pm10={} (no weather match)",
                latest.timestamp, latest.pm25, latest.pm10
            ),
        }
    }
    Ok(())
}

/// Render the full chart set from the store: every field over the rolling
/// 24-hour and 7-day windows, gap-resampled, one SVG per combination.
pub fn render_charts(store: &RecordStore, charts_dir: &str) -> anyhow::Result<()> {
    std::fs::create_dir_all(charts_dir)
        .with_context(|| format!("Failed to create charts directory {}", charts_dir))?;

    let now = Local::now().naive_local();
    let windows = [
        ("24h", "last 24 hours", Duration::hours(24)),
        ("7d", "last 7 days", Duration::days(7)),
    ];

    for field in Field::ALL {
        for (suffix, window_label, lookback) in windows {
            let (timestamps, values) = extract(store.records(), now, lookback, field);
            let (timestamps, values) = insert_gap_markers(
                &timestamps,
                &values,
                Duration::minutes(DEFAULT_GAP_THRESHOLD_MINUTES),
            );
            let path = Path::new(charts_dir).join(format!("{}_{}.svg", field.name(), suffix));
            let title = format!("{}, {}", field.label(), window_label);
            luft_chart::render_series(&path, &title, &timestamps, &values)?;
        }
    }
    info!("Charts written to {}", charts_dir);
    Ok(())
}
