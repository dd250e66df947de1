use crate::models::Region;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of a region's weather CSV.
///
/// `hour` is absent for daily observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub region: Region,
    pub date: Option<NaiveDate>,
    pub hour: Option<u32>,
    pub temperature: Option<f64>,
    pub precipitation: Option<f64>,
}

impl WeatherObservation {
    pub fn new(
        region: Region,
        date: Option<NaiveDate>,
        hour: Option<u32>,
        temperature: Option<f64>,
        precipitation: Option<f64>,
    ) -> Self {
        Self {
            region,
            date,
            hour,
            temperature,
            precipitation,
        }
    }

    pub fn reading(&self) -> WeatherReading {
        WeatherReading {
            temperature: self.temperature,
            precipitation: self.precipitation,
        }
    }
}

/// The (temperature, precipitation) pair attached to a trip
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temperature: Option<f64>,
    pub precipitation: Option<f64>,
}

impl WeatherReading {
    pub fn missing() -> Self {
        Self::default()
    }

    pub fn is_missing(&self) -> bool {
        self.temperature.is_none() && self.precipitation.is_none()
    }
}
