//! SVG chart rendering for extracted sensor series.
//!
//! Takes the (timestamps, values) pairs produced by the extraction and
//! resampling pipeline and draws them as time-series line charts. NAN gap
//! markers split a series into segments; each segment is drawn as its own
//! line so sampling gaps show up as visible breaks in the chart.

use anyhow::Result;
use chrono::{Duration, NaiveDateTime};
use log::info;
use plotters::coord::types::RangedDateTime;
use plotters::prelude::*;
use std::path::Path;

/// Output size of a rendered chart in pixels.
pub const CHART_SIZE: (u32, u32) = (800, 600);

/// Tick label format on the time axis.
const X_LABEL_FORMAT: &str = "%m-%d %H:%M";

fn chart_err<E: std::fmt::Display>(e: E) -> anyhow::Error {
    anyhow::anyhow!("Chart rendering failed: {}", e)
}

/// Split a series into contiguous segments at NAN gap markers.
///
/// The markers themselves are dropped; what remains is one point vector
/// per stretch of uninterrupted sampling.
pub fn split_at_gap_markers(
    timestamps: &[NaiveDateTime],
    values: &[f64],
) -> Vec<Vec<(NaiveDateTime, f64)>> {
    let mut segments = Vec::new();
    let mut current: Vec<(NaiveDateTime, f64)> = Vec::new();
    for (&timestamp, &value) in timestamps.iter().zip(values.iter()) {
        if value.is_nan() {
            if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        } else {
            current.push((timestamp, value));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Render one series to an SVG file.
///
/// An empty series renders nothing; the chart is skipped with a log line
/// rather than producing an empty axis frame.
pub fn render_series(
    path: &Path,
    title: &str,
    timestamps: &[NaiveDateTime],
    values: &[f64],
) -> Result<()> {
    if timestamps.is_empty() {
        info!("No data for {:?}; chart skipped", title);
        return Ok(());
    }

    let segments = split_at_gap_markers(timestamps, values);

    let (x_min, x_max) = x_bounds(timestamps);
    let (y_min, y_max) = y_bounds(values);
    let x_range: RangedDateTime<NaiveDateTime> = (x_min..x_max).into();

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 20))
        .margin(20i32)
        .x_label_area_size(30u32)
        .y_label_area_size(50u32)
        .build_cartesian_2d(x_range, y_min..y_max)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_labels(8_usize)
        .x_label_formatter(&|timestamp| timestamp.format(X_LABEL_FORMAT).to_string())
        .draw()
        .map_err(chart_err)?;

    for segment in segments {
        chart
            .draw_series(LineSeries::new(segment, &BLUE))
            .map_err(chart_err)?;
    }

    root.present().map_err(chart_err)?;
    Ok(())
}

/// Time-axis bounds; a single-point series gets a padded range so the
/// coordinate system stays non-degenerate.
fn x_bounds(timestamps: &[NaiveDateTime]) -> (NaiveDateTime, NaiveDateTime) {
    let first = timestamps[0];
    let last = timestamps[timestamps.len() - 1];
    let (min, max) = if first <= last { (first, last) } else { (last, first) };
    if min == max {
        (min - Duration::minutes(30), max + Duration::minutes(30))
    } else {
        (min, max)
    }
}

/// Value-axis bounds over the finite values, padded by 5%.
fn y_bounds(values: &[f64]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &value in values.iter().filter(|v| v.is_finite()) {
        min = min.min(value);
        max = max.max(value);
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if min == max {
        return (min - 1.0, max + 1.0);
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}
