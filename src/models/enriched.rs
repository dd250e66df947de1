use crate::models::{Region, StationInfo, StationStatus, TripRecord, WeatherReading};
use serde::{Deserialize, Serialize};

/// A trip after the left join with stations, region and weather
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedTrip {
    pub trip: TripRecord,
    pub station: Option<StationInfo>,
    pub status: Option<StationStatus>,
    pub region: Option<Region>,
    pub weather: WeatherReading,
    /// A weather row was found, even if its values are empty
    pub weather_matched: bool,
}

impl EnrichedTrip {
    pub fn has_station(&self) -> bool {
        self.station.is_some()
    }

    pub fn has_weather(&self) -> bool {
        self.weather_matched
    }
}

/// All enriched trips plus the input header they came from
#[derive(Debug, Clone, Default)]
pub struct EnrichedTable {
    pub trip_headers: Vec<String>,
    pub rows: Vec<EnrichedTrip>,
    pub include_status: bool,
}

impl EnrichedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One row of the station snapshot: information joined with live status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationSnapshot {
    pub station_id: u32,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub capacity: Option<u32>,
    pub is_charging_station: Option<bool>,
    pub nearby_distance: Option<f64>,
    pub num_bikes_available: Option<u32>,
    pub num_docks_available: Option<u32>,
    pub is_renting: Option<bool>,
    pub is_returning: Option<bool>,
    pub last_reported: Option<i64>,
    pub weather_region: Option<Region>,
    pub region_distance_km: Option<f64>,
}

impl StationSnapshot {
    pub fn new(
        info: &StationInfo,
        status: Option<&StationStatus>,
        region: Option<(Region, f64)>,
    ) -> Self {
        Self {
            station_id: info.station_id,
            lat: info.lat,
            lon: info.lon,
            capacity: info.capacity,
            is_charging_station: info.is_charging_station,
            nearby_distance: info.nearby_distance,
            num_bikes_available: status.and_then(|s| s.num_bikes_available),
            num_docks_available: status.and_then(|s| s.num_docks_available),
            is_renting: status.and_then(|s| s.is_renting),
            is_returning: status.and_then(|s| s.is_returning),
            last_reported: status.and_then(|s| s.last_reported),
            weather_region: region.map(|(r, _)| r),
            region_distance_km: region.map(|(_, d)| d),
        }
    }
}
