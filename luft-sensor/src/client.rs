/// HTTP client for the sensor.community airrohr API.
use crate::error::Result;
use crate::reading::RawReading;
use log::debug;
use reqwest::Client;

/// Base URL of the airrohr per-sensor endpoint
pub const API_BASE: &str = "https://data.sensor.community/airrohr/v1/sensor";

/// Bounded request timeout; expiry is a recoverable fetch failure, handled
/// by skipping the cycle and retrying on the next tick.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Build a client with the bounded request timeout applied.
pub fn build_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()?;
    Ok(client)
}

/// Fetch the recent raw readings for one sensor.
///
/// The endpoint returns the sensor's last few readings as a JSON array.
/// Non-success statuses and undecodable bodies are fetch failures.
pub async fn fetch_readings(client: &Client, sensor_id: u32) -> Result<Vec<RawReading>> {
    let url = format!("{}/{}/", API_BASE, sensor_id);
    debug!("GET {}", url);
    let response = client.get(&url).send().await?.error_for_status()?;
    let readings = response.json::<Vec<RawReading>>().await?;
    Ok(readings)
}
