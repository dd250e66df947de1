use crate::error::{ProcessingError, Result};
use crate::models::{TripRecord, TripTable};
use crate::utils::constants::{
    COL_START_STATION_ID, COL_START_TIME, COL_TRIP_DURATION, COL_TRIP_DURATION_DOUBLE_SPACE,
    TRIP_START_TIME_FORMAT, TRIP_START_TIME_FORMAT_SECONDS,
};
use crate::utils::encoding::decode_text;
use chrono::NaiveDateTime;
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

pub struct TripReader;

impl TripReader {
    pub fn new() -> Self {
        Self
    }

    /// Read the trips CSV at `path`
    pub fn read_trips(&self, path: &Path) -> Result<TripTable> {
        let file = File::open(path).map_err(|e| {
            ProcessingError::MissingData(format!("Trips file {}: {}", path.display(), e))
        })?;
        let table = self.read_trips_from(file)?;
        debug!(path = %path.display(), trips = table.len(), "Read trips");
        Ok(table)
    }

    /// Parse trips from `source`; non-UTF-8 exports are read as Windows-1252
    pub fn read_trips_from<R: Read>(&self, mut source: R) -> Result<TripTable> {
        let mut bytes = Vec::new();
        source.read_to_end(&mut bytes)?;
        let text = decode_text(&bytes);

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        let station_idx = headers.iter().position(|h| h == COL_START_STATION_ID);
        let start_idx = headers.iter().position(|h| h == COL_START_TIME);
        let duration_idx = headers
            .iter()
            .position(|h| h == COL_TRIP_DURATION_DOUBLE_SPACE || h == COL_TRIP_DURATION);

        if station_idx.is_none() {
            warn!("Trips file has no '{}' column", COL_START_STATION_ID);
        }
        if start_idx.is_none() {
            warn!("Trips file has no '{}' column", COL_START_TIME);
        }

        let mut trips = Vec::new();

        for record_result in reader.records() {
            let record = record_result?;

            let mut fields: Vec<String> = record.iter().map(str::to_string).collect();
            fields.resize(headers.len().max(fields.len()), String::new());

            let cell = |idx: Option<usize>| idx.and_then(|i| fields.get(i)).map(|s| s.trim());

            let station_id = cell(station_idx).and_then(parse_station_id);
            let start_time = cell(start_idx).and_then(|s| self.parse_start_time(s));
            let duration_secs = cell(duration_idx).and_then(|s| s.parse::<u64>().ok());

            trips.push(TripRecord::new(fields, station_id, start_time, duration_secs));
        }

        let table = TripTable::new(headers, trips);
        let malformed_start_times = table.malformed_start_times();
        if malformed_start_times > 0 {
            warn!(
                malformed_start_times,
                "Some start times were empty or could not be parsed"
            );
        }

        Ok(table)
    }

    /// Unparseable timestamps coerce to `None`
    fn parse_start_time(&self, value: &str) -> Option<NaiveDateTime> {
        if value.is_empty() {
            return None;
        }

        NaiveDateTime::parse_from_str(value, TRIP_START_TIME_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(value, TRIP_START_TIME_FORMAT_SECONDS))
            .ok()
    }
}

impl Default for TripReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Station ids are integers, but some exports write them as "7000.0"
fn parse_station_id(value: &str) -> Option<u32> {
    if let Ok(id) = value.parse::<u32>() {
        return Some(id);
    }

    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0 && v.fract() == 0.0 && *v <= u32::MAX as f64)
        .map(|v| v as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const TRIPS_CSV: &str = "\
Trip Id,Trip  Duration,Start Station Id,Start Time,Start Station Name,End Station Id,End Time,End Station Name,Bike Id,User Type,Model
26682755,951,7259,07/01/2024 00:00,Lower Spadina Ave / Lake Shore Blvd,7712,07/01/2024 00:16,Dundas St W / Crawford St,6224,Casual Member,ICONIC
26682756,300,7000,07/01/2024 13:05,Fort York Blvd / Capreol Ct,7001,07/01/2024 13:10,Wellesley St E / Yonge St,1001,Annual Member,EFIT
";

    #[test]
    fn test_read_trips() {
        let reader = TripReader::new();
        let table = reader.read_trips_from(TRIPS_CSV.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.headers[1], "Trip  Duration");
        assert_eq!(table.trips[0].station_id, Some(7259));
        assert_eq!(table.trips[0].duration_secs, Some(951));
        assert_eq!(table.trips[0].hour(), Some(0));
        assert_eq!(table.trips[1].hour(), Some(13));
        assert_eq!(table.trips[1].field(10), "EFIT");
    }

    #[test]
    fn test_malformed_values_coerce_to_none() {
        let csv = "\
Trip Id,Trip Duration,Start Station Id,Start Time
1,abc,not-a-station,2024-07-01 09:00
2,120,7000.0,
3,60,7001
";
        let table = TripReader::new().read_trips_from(csv.as_bytes()).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.trips[0].station_id, None);
        assert_eq!(table.trips[0].start_time, None);
        assert_eq!(table.trips[0].duration_secs, None);

        assert_eq!(table.trips[1].station_id, Some(7000));
        assert_eq!(table.trips[1].start_time, None);

        // unparseable, empty and absent start times all count
        assert_eq!(table.malformed_start_times(), 3);

        // short row is padded to the header width
        assert_eq!(table.trips[2].fields.len(), 4);
        assert_eq!(table.trips[2].field(3), "");
    }

    #[test]
    fn test_header_bom_and_whitespace_trimmed() {
        let csv = "\u{feff}Trip Id, Start Station Id ,Start Time\n1,7000,07/15/2024 18:30\n";
        let table = TripReader::new().read_trips_from(csv.as_bytes()).unwrap();

        assert_eq!(table.headers, vec!["Trip Id", "Start Station Id", "Start Time"]);
        assert_eq!(table.trips[0].station_id, Some(7000));
        assert_eq!(table.trips[0].am_pm(), Some("PM"));
    }

    #[test]
    fn test_windows_1252_cells_are_decoded() {
        let mut bytes = b"Trip Id,Trip Duration,Start Station Id,Start Time,Start Station Name\n\
1,300,7000,07/01/2024 08:15,Caf"
            .to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(b" St\n2,60,7001,07/01/2024 09:30,Bay St\n");

        let table = TripReader::new().read_trips_from(bytes.as_slice()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.trips[0].field(4), "Caf\u{e9} St");
        assert_eq!(table.trips[0].station_id, Some(7000));
        assert_eq!(table.trips[1].field(4), "Bay St");
        assert_eq!(table.trips[1].hour(), Some(9));
    }

    #[test]
    fn test_read_trips_file() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        write!(temp_file, "{}", TRIPS_CSV)?;

        let table = TripReader::new().read_trips(temp_file.path())?;
        assert_eq!(table.len(), 2);

        Ok(())
    }

    #[test]
    fn test_missing_trips_file_is_an_error() {
        let result = TripReader::new().read_trips(Path::new("/nonexistent/trips.csv"));
        assert!(matches!(result, Err(ProcessingError::MissingData(_))));
    }
}
