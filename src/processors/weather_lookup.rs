use crate::models::{Region, WeatherObservation, WeatherReading};
use chrono::NaiveDate;
use std::collections::HashMap;

/// One region's observations grouped by date, file order preserved
#[derive(Debug, Clone, Default)]
pub struct RegionWeather {
    hourly: bool,
    by_date: HashMap<NaiveDate, Vec<WeatherObservation>>,
    observation_count: usize,
}

impl RegionWeather {
    pub fn new(hourly: bool, observations: Vec<WeatherObservation>) -> Self {
        let observation_count = observations.len();
        let mut by_date: HashMap<NaiveDate, Vec<WeatherObservation>> = HashMap::new();

        // rows without a date can never match a trip
        for observation in observations {
            if let Some(date) = observation.date {
                by_date.entry(date).or_default().push(observation);
            }
        }

        Self {
            hourly,
            by_date,
            observation_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.observation_count == 0
    }

    /// First row of the date for daily data, else the first row at `hour`
    pub fn find(&self, date: NaiveDate, hour: u32) -> Option<&WeatherObservation> {
        let rows = self.by_date.get(&date)?;

        let has_hours = rows.iter().any(|row| row.hour.is_some());
        if !self.hourly || !has_hours {
            return rows.first();
        }

        rows.iter().find(|row| row.hour == Some(hour))
    }
}

/// Weather observations for every region
#[derive(Debug, Clone, Default)]
pub struct WeatherStore {
    regions: HashMap<Region, RegionWeather>,
}

impl WeatherStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_region(&mut self, region: Region, observations: Vec<WeatherObservation>) {
        self.regions
            .insert(region, RegionWeather::new(region.is_hourly(), observations));
    }

    pub fn region(&self, region: Region) -> Option<&RegionWeather> {
        self.regions.get(&region)
    }

    pub fn observation_count(&self, region: Region) -> usize {
        self.regions
            .get(&region)
            .map_or(0, |weather| weather.observation_count)
    }

    /// The matching observation row, if any
    pub fn find(&self, region: Region, date: NaiveDate, hour: u32) -> Option<&WeatherObservation> {
        self.regions.get(&region)?.find(date, hour)
    }

    /// Temperature/precipitation pair, both absent when nothing matches
    pub fn lookup(&self, region: Region, date: NaiveDate, hour: u32) -> WeatherReading {
        self.find(region, date, hour)
            .map(WeatherObservation::reading)
            .unwrap_or_else(WeatherReading::missing)
    }
}
