use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Static station metadata from the GBFS `station_information` feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct StationInfo {
    pub station_id: u32,

    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: Option<f64>,

    pub capacity: Option<u32>,

    pub is_charging_station: Option<bool>,

    #[validate(range(min = 0.0))]
    pub nearby_distance: Option<f64>,
}

impl StationInfo {
    pub fn new(station_id: u32, lat: Option<f64>, lon: Option<f64>) -> Self {
        Self {
            station_id,
            lat,
            lon,
            capacity: None,
            is_charging_station: None,
            nearby_distance: None,
        }
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn with_charging(mut self, is_charging_station: bool) -> Self {
        self.is_charging_station = Some(is_charging_station);
        self
    }

    pub fn with_nearby_distance(mut self, nearby_distance: f64) -> Self {
        self.nearby_distance = Some(nearby_distance);
        self
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

/// Live availability from the GBFS `station_status` feed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationStatus {
    pub station_id: u32,
    pub num_bikes_available: Option<u32>,
    pub num_docks_available: Option<u32>,
    pub is_renting: Option<bool>,
    pub is_returning: Option<bool>,
    /// Epoch seconds
    pub last_reported: Option<i64>,
}

impl StationStatus {
    pub fn last_reported_at(&self) -> Option<DateTime<Utc>> {
        self.last_reported
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
    }

    pub fn is_in_service(&self) -> bool {
        self.is_renting.unwrap_or(false) && self.is_returning.unwrap_or(false)
    }
}
