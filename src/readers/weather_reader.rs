use crate::error::Result;
use crate::models::{Region, WeatherObservation};
use crate::processors::WeatherStore;
use crate::utils::constants::{
    WEATHER_DATETIME_COLUMNS, WEATHER_DATE_COLUMN, WEATHER_HOUR_COLUMN, WEATHER_PRECIP_COLUMNS,
    WEATHER_TEMP_COLUMNS,
};
use crate::utils::encoding::decode_text;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Where each region's weather CSV lives
#[derive(Debug, Clone)]
pub struct WeatherSources {
    files: Vec<(Region, PathBuf)>,
}

impl WeatherSources {
    /// Default file names for every region, resolved against `dir`
    pub fn in_directory(dir: &Path) -> Self {
        Self {
            files: Region::ALL
                .into_iter()
                .map(|region| (region, dir.join(region.default_weather_file())))
                .collect(),
        }
    }

    /// Replace the file for `region`
    pub fn with_file(mut self, region: Region, path: PathBuf) -> Self {
        if let Some(entry) = self.files.iter_mut().find(|(r, _)| *r == region) {
            entry.1 = path;
        } else {
            self.files.push((region, path));
        }
        self
    }

    pub fn file_for(&self, region: Region) -> Option<&Path> {
        self.files
            .iter()
            .find(|(r, _)| *r == region)
            .map(|(_, p)| p.as_path())
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Region, PathBuf)> {
        self.files.iter()
    }
}

pub struct WeatherReader;

impl WeatherReader {
    pub fn new() -> Self {
        Self
    }

    /// Load every region's file. A missing file leaves that region empty.
    pub fn load_all(&self, sources: &WeatherSources) -> Result<WeatherStore> {
        let mut store = WeatherStore::new();

        for (region, path) in sources.iter() {
            if !path.exists() {
                warn!(
                    region = %region,
                    path = %path.display(),
                    "Weather file not found, region will have no observations"
                );
                store.insert_region(*region, Vec::new());
                continue;
            }

            let observations = self.read_region(*region, path)?;
            info!(
                region = %region,
                observations = observations.len(),
                "Loaded weather observations"
            );
            store.insert_region(*region, observations);
        }

        Ok(store)
    }

    /// Read one region's CSV file
    pub fn read_region(&self, region: Region, path: &Path) -> Result<Vec<WeatherObservation>> {
        let bytes = std::fs::read(path)?;
        let text = decode_text(&bytes);
        self.parse_region(region, &text)
    }

    pub fn parse_region(&self, region: Region, text: &str) -> Result<Vec<WeatherObservation>> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_reader(text.as_bytes());

        // first occurrence wins on duplicate header names
        let mut headers: HashMap<String, usize> = HashMap::new();
        for (i, h) in reader.headers()?.iter().enumerate() {
            let name = h.trim_start_matches('\u{feff}').trim().to_string();
            headers.entry(name).or_insert(i);
        }
        let find = |names: &[&str]| names.iter().find_map(|n| headers.get(*n).copied());

        let datetime_idx = find(&WEATHER_DATETIME_COLUMNS[..]);
        let date_idx = find(&[WEATHER_DATE_COLUMN][..]);
        let hour_idx = find(&[WEATHER_HOUR_COLUMN][..]);
        let temp_idx = find(&WEATHER_TEMP_COLUMNS[..]);
        let precip_idx = find(&WEATHER_PRECIP_COLUMNS[..]);

        if datetime_idx.is_none() && date_idx.is_none() {
            warn!(region = %region, "Weather file has no date column, no rows can match");
        }

        let mut observations = Vec::new();
        for record_result in reader.records() {
            let record = record_result?;
            let cell = |idx: Option<usize>| idx.and_then(|i| record.get(i)).map(str::trim);

            let (date, hour) = match datetime_idx {
                Some(_) => parse_datetime_cell(cell(datetime_idx).unwrap_or("")),
                None => (
                    cell(date_idx).and_then(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok()),
                    cell(hour_idx).and_then(parse_hour_cell),
                ),
            };

            observations.push(WeatherObservation::new(
                region,
                date,
                hour,
                cell(temp_idx).and_then(parse_measurement),
                cell(precip_idx).and_then(parse_measurement),
            ));
        }

        debug!(region = %region, rows = observations.len(), "Parsed weather rows");
        Ok(observations)
    }
}

impl Default for WeatherReader {
    fn default() -> Self {
        Self::new()
    }
}

/// A full timestamp yields date and hour; a bare date is a daily observation
fn parse_datetime_cell(value: &str) -> (Option<NaiveDate>, Option<u32>) {
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return (Some(dt.date()), Some(dt.hour()));
        }
    }

    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(date) => (Some(date), None),
        Err(_) => (None, None),
    }
}

fn parse_hour_cell(value: &str) -> Option<u32> {
    if value.contains(':') {
        return NaiveTime::parse_from_str(value, "%H:%M")
            .ok()
            .map(|t| t.hour());
    }

    value
        .parse::<f64>()
        .ok()
        .filter(|h| h.is_finite() && (0.0..24.0).contains(h))
        .map(|h| h as u32)
}

fn parse_measurement(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}
