//! GBFS `station_information` and `station_status` feeds.
//!
//! A feed source is either a local JSON file or an HTTP(S) URL fetched with
//! a single GET request.

use crate::error::{ProcessingError, Result};
use crate::models::{StationInfo, StationStatus};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Path(PathBuf),
    Url(String),
}

impl FeedSource {
    pub fn parse(source: &str) -> Self {
        let trimmed = source.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            FeedSource::Url(trimmed.to_string())
        } else {
            FeedSource::Path(PathBuf::from(trimmed))
        }
    }
}

impl From<&Path> for FeedSource {
    fn from(path: &Path) -> Self {
        FeedSource::Path(path.to_path_buf())
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedSource::Path(path) => write!(f, "{}", path.display()),
            FeedSource::Url(url) => write!(f, "{}", url),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GbfsEnvelope<T> {
    #[serde(default)]
    last_updated: Option<i64>,
    #[serde(default)]
    ttl: Option<i64>,
    data: GbfsStations<T>,
}

#[derive(Debug, Deserialize)]
struct GbfsStations<T> {
    stations: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct RawStationInformation {
    station_id: Value,
    #[serde(default)]
    lat: Value,
    #[serde(default)]
    lon: Value,
    #[serde(default)]
    capacity: Value,
    #[serde(default)]
    is_charging_station: Value,
    #[serde(default)]
    nearby_distance: Value,
}

#[derive(Debug, Deserialize)]
struct RawStationStatus {
    station_id: Value,
    #[serde(default)]
    num_bikes_available: Value,
    #[serde(default)]
    num_docks_available: Value,
    #[serde(default)]
    is_renting: Value,
    #[serde(default)]
    is_returning: Value,
    #[serde(default)]
    last_reported: Value,
}

pub struct StationFeedReader {
    client: reqwest::Client,
}

impl StationFeedReader {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Fetch the raw feed body
    pub async fn fetch_bytes(&self, source: &FeedSource) -> Result<Vec<u8>> {
        match source {
            FeedSource::Path(path) => std::fs::read(path).map_err(|e| {
                ProcessingError::MissingData(format!("Station feed {}: {}", path.display(), e))
            }),
            FeedSource::Url(url) => {
                debug!(url = %url, "Fetching GBFS feed");
                let resp = self.client.get(url.as_str()).send().await?;
                let resp = resp.error_for_status()?;
                Ok(resp.bytes().await?.to_vec())
            }
        }
    }

    pub async fn read_station_information(&self, source: &FeedSource) -> Result<Vec<StationInfo>> {
        let body = self.fetch_bytes(source).await?;
        let stations = parse_station_information(&body)?;
        info!(source = %source, stations = stations.len(), "Loaded station information");
        Ok(stations)
    }

    pub async fn read_station_status(&self, source: &FeedSource) -> Result<Vec<StationStatus>> {
        let body = self.fetch_bytes(source).await?;
        let statuses = parse_station_status(&body)?;
        info!(source = %source, stations = statuses.len(), "Loaded station status");
        Ok(statuses)
    }

    /// Station information keyed by station id
    pub async fn read_station_information_map(
        &self,
        source: &FeedSource,
    ) -> Result<HashMap<u32, StationInfo>> {
        let stations = self.read_station_information(source).await?;
        Ok(stations.into_iter().map(|s| (s.station_id, s)).collect())
    }

    /// Station status keyed by station id
    pub async fn read_station_status_map(
        &self,
        source: &FeedSource,
    ) -> Result<HashMap<u32, StationStatus>> {
        let statuses = self.read_station_status(source).await?;
        Ok(statuses.into_iter().map(|s| (s.station_id, s)).collect())
    }
}

impl Default for StationFeedReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a `station_information` body
pub fn parse_station_information(body: &[u8]) -> Result<Vec<StationInfo>> {
    let envelope: GbfsEnvelope<RawStationInformation> = serde_json::from_slice(body)?;
    debug!(
        last_updated = ?envelope.last_updated,
        ttl = ?envelope.ttl,
        "Parsed station_information envelope"
    );

    let mut stations = Vec::with_capacity(envelope.data.stations.len());
    for raw in envelope.data.stations {
        let Some(station_id) = value_as_u32(&raw.station_id) else {
            warn!(station_id = %raw.station_id, "Skipping station with non-integer id");
            continue;
        };

        let station = StationInfo {
            station_id,
            lat: value_as_f64(&raw.lat),
            lon: value_as_f64(&raw.lon),
            capacity: value_as_u32(&raw.capacity),
            is_charging_station: value_as_bool(&raw.is_charging_station),
            nearby_distance: value_as_f64(&raw.nearby_distance),
        };

        if let Err(e) = station.validate() {
            warn!(station_id, error = %e, "Station has out-of-range values");
        }

        stations.push(station);
    }

    Ok(stations)
}

/// Parse a `station_status` body
pub fn parse_station_status(body: &[u8]) -> Result<Vec<StationStatus>> {
    let envelope: GbfsEnvelope<RawStationStatus> = serde_json::from_slice(body)?;
    debug!(
        last_updated = ?envelope.last_updated,
        ttl = ?envelope.ttl,
        "Parsed station_status envelope"
    );

    let mut statuses = Vec::with_capacity(envelope.data.stations.len());
    for raw in envelope.data.stations {
        let Some(station_id) = value_as_u32(&raw.station_id) else {
            warn!(station_id = %raw.station_id, "Skipping status with non-integer id");
            continue;
        };

        statuses.push(StationStatus {
            station_id,
            num_bikes_available: value_as_u32(&raw.num_bikes_available),
            num_docks_available: value_as_u32(&raw.num_docks_available),
            is_renting: value_as_bool(&raw.is_renting),
            is_returning: value_as_bool(&raw.is_returning),
            last_reported: value_as_f64(&raw.last_reported).map(|v| v as i64),
        });
    }

    Ok(statuses)
}

fn value_as_f64(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|v| v.is_finite())
}

fn value_as_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|v| v.fract() == 0.0 && *v >= 0.0).map(|v| v as u64))
            .and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

/// GBFS v1 publishes flags as 0/1, later versions as booleans
fn value_as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|v| v != 0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
