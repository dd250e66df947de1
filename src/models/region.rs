use crate::error::{ProcessingError, Result};
use crate::utils::constants::{
    WEATHER_FILE_TORONTO_CITY, WEATHER_FILE_TORONTO_CITY_CENTRE, WEATHER_FILE_TORONTO_INTL_A,
    WEATHER_FILE_TORONTO_NORTH_YORK,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Weather reporting regions, each anchored at its observing station.
///
/// The order of [`Region::ALL`] is the resolver's tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Region {
    TorontoCity,
    TorontoCityCentre,
    TorontoIntlA,
    TorontoNorthYork,
}

impl Region {
    pub const ALL: [Region; 4] = [
        Region::TorontoCity,
        Region::TorontoCityCentre,
        Region::TorontoIntlA,
        Region::TorontoNorthYork,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Region::TorontoCity => "TORONTO_CITY",
            Region::TorontoCityCentre => "TORONTO_CITY_CENTRE",
            Region::TorontoIntlA => "TORONTO_INTL_A",
            Region::TorontoNorthYork => "TORONTO_NORTH_YORK",
        }
    }

    /// (latitude, longitude) of the observing station
    pub fn coordinates(&self) -> (f64, f64) {
        match self {
            Region::TorontoCity => (43.6667, -79.4000),
            Region::TorontoCityCentre => (43.6275, -79.3961),
            Region::TorontoIntlA => (43.6767, -79.6310),
            Region::TorontoNorthYork => (43.7800, -79.4678),
        }
    }

    /// North York only publishes daily observations
    pub fn is_hourly(&self) -> bool {
        !matches!(self, Region::TorontoNorthYork)
    }

    pub fn default_weather_file(&self) -> &'static str {
        match self {
            Region::TorontoCity => WEATHER_FILE_TORONTO_CITY,
            Region::TorontoCityCentre => WEATHER_FILE_TORONTO_CITY_CENTRE,
            Region::TorontoIntlA => WEATHER_FILE_TORONTO_INTL_A,
            Region::TorontoNorthYork => WEATHER_FILE_TORONTO_NORTH_YORK,
        }
    }
}

impl FromStr for Region {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Region::ALL
            .into_iter()
            .find(|region| region.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ProcessingError::UnknownRegion(s.to_string()))
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
