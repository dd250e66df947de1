use crate::utils::constants::DEFAULT_OUTPUT_FILE;
use chrono::{Datelike, Local};
use std::path::PathBuf;

/// Default enriched trips output: merged_bikeshare_with_weather.csv
pub fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILE)
}

/// Generate default station snapshot filename with format: station-snapshot-{YYMMDD}.csv
pub fn generate_default_snapshot_filename() -> PathBuf {
    let now = Local::now();
    let year = now.year() % 100; // Get last 2 digits of year
    let month = now.month();
    let day = now.day();

    let filename = format!("station-snapshot-{:02}{:02}{:02}.csv", year, month, day);
    PathBuf::from("output").join(filename)
}
