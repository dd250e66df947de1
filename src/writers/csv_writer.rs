use crate::error::Result;
use crate::models::{EnrichedTable, EnrichedTrip, StationSnapshot};
use crate::utils::constants::{
    COL_AM_PM, COL_DAY_OF_WEEK, COL_HOUR, COL_MONTH, COL_PRECIPITATION, COL_TEMPERATURE,
    COL_TRIP_DURATION, COL_TRIP_DURATION_DOUBLE_SPACE, COL_TRIP_DURATION_SECONDS,
    COL_WEATHER_REGION, DROPPED_TRIP_COLUMNS, STATION_INFO_COLUMNS, STATION_STATUS_COLUMNS,
};
use csv::WriterBuilder;
use std::fmt::Display;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Writes enriched trips and station snapshots as CSV
pub struct CsvWriter;

impl CsvWriter {
    pub fn new() -> Self {
        Self
    }

    /// Output header: kept trip columns (renamed), derived, station, weather
    pub fn output_headers(&self, table: &EnrichedTable) -> Vec<String> {
        let mut headers: Vec<String> = kept_trip_columns(&table.trip_headers)
            .into_iter()
            .map(|(_, name)| name)
            .collect();

        headers.extend(
            [COL_HOUR, COL_AM_PM, COL_MONTH, COL_DAY_OF_WEEK]
                .iter()
                .map(|s| s.to_string()),
        );
        headers.extend(STATION_INFO_COLUMNS.iter().map(|s| s.to_string()));
        if table.include_status {
            headers.extend(STATION_STATUS_COLUMNS.iter().map(|s| s.to_string()));
        }
        headers.extend(
            [COL_WEATHER_REGION, COL_TEMPERATURE, COL_PRECIPITATION]
                .iter()
                .map(|s| s.to_string()),
        );

        headers
    }

    pub fn write_enriched(&self, table: &EnrichedTable, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        self.write_enriched_to(table, file)?;
        info!(path = %path.display(), rows = table.len(), "Wrote enriched trips");

        Ok(())
    }

    pub fn write_enriched_to<W: Write>(&self, table: &EnrichedTable, sink: W) -> Result<()> {
        let mut writer = WriterBuilder::new().from_writer(sink);
        let kept = kept_trip_columns(&table.trip_headers);

        writer.write_record(self.output_headers(table))?;
        for row in &table.rows {
            writer.write_record(self.row_fields(row, &kept, table.include_status))?;
        }
        writer.flush()?;

        Ok(())
    }

    fn row_fields(
        &self,
        row: &EnrichedTrip,
        kept: &[(usize, String)],
        include_status: bool,
    ) -> Vec<String> {
        let mut fields: Vec<String> = kept
            .iter()
            .map(|(idx, _)| row.trip.field(*idx).to_string())
            .collect();

        let trip = &row.trip;
        fields.push(cell(trip.hour()));
        fields.push(cell(trip.am_pm()));
        fields.push(cell(trip.month_name()));
        fields.push(cell(trip.day_of_week()));

        let station = row.station.as_ref();
        fields.push(cell(station.and_then(|s| s.lat)));
        fields.push(cell(station.and_then(|s| s.lon)));
        fields.push(cell(station.and_then(|s| s.capacity)));
        fields.push(cell(station.and_then(|s| s.is_charging_station)));
        fields.push(cell(station.and_then(|s| s.nearby_distance)));

        if include_status {
            let status = row.status.as_ref();
            fields.push(cell(status.and_then(|s| s.num_bikes_available)));
            fields.push(cell(status.and_then(|s| s.num_docks_available)));
            fields.push(cell(status.and_then(|s| s.is_renting)));
            fields.push(cell(status.and_then(|s| s.is_returning)));
            fields.push(cell(status.and_then(|s| s.last_reported)));
        }

        fields.push(cell(row.region));
        fields.push(cell(row.weather.temperature));
        fields.push(cell(row.weather.precipitation));

        fields
    }

    pub fn write_snapshots(&self, snapshots: &[StationSnapshot], path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = WriterBuilder::new().from_path(path)?;
        for snapshot in snapshots {
            writer.serialize(snapshot)?;
        }
        writer.flush()?;
        info!(path = %path.display(), stations = snapshots.len(), "Wrote station snapshot");

        Ok(())
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// (source index, output name) for each trip column that survives
fn kept_trip_columns(headers: &[String]) -> Vec<(usize, String)> {
    headers
        .iter()
        .enumerate()
        .filter(|(_, h)| !DROPPED_TRIP_COLUMNS.contains(&h.as_str()))
        .map(|(idx, h)| {
            let name = if h == COL_TRIP_DURATION_DOUBLE_SPACE || h == COL_TRIP_DURATION {
                COL_TRIP_DURATION_SECONDS.to_string()
            } else {
                h.clone()
            };
            (idx, name)
        })
        .collect()
}

fn cell<T: Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Region, StationInfo, StationStatus, TripRecord, WeatherReading};
    use chrono::NaiveDateTime;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn headers() -> Vec<String> {
        ["Trip Id", "Trip  Duration", "Start Station Id", "Start Time", "Model"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn enriched_row() -> EnrichedTrip {
        let fields: Vec<String> = ["1", "951", "7000", "07/01/2024 08:15", "ICONIC"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let start = NaiveDateTime::parse_from_str("07/01/2024 08:15", "%m/%d/%Y %H:%M").ok();

        EnrichedTrip {
            trip: TripRecord::new(fields, Some(7000), start, Some(951)),
            station: Some(
                StationInfo::new(7000, Some(43.6398), Some(-79.396))
                    .with_capacity(35)
                    .with_charging(false)
                    .with_nearby_distance(500.0),
            ),
            status: Some(StationStatus {
                station_id: 7000,
                num_bikes_available: Some(3),
                ..Default::default()
            }),
            region: Some(Region::TorontoCityCentre),
            weather: WeatherReading {
                temperature: Some(19.5),
                precipitation: None,
            },
            weather_matched: true,
        }
    }

    #[test]
    fn test_output_headers_rename_and_drop() {
        let table = EnrichedTable {
            trip_headers: headers(),
            rows: vec![],
            include_status: false,
        };

        let headers = CsvWriter::new().output_headers(&table);
        assert_eq!(
            headers,
            vec![
                "Trip Id",
                "Trip Duration (seconds)",
                "Start Station Id",
                "Start Time",
                "Hour",
                "AM_PM",
                "Month",
                "DayOfWeek",
                "lat",
                "lon",
                "capacity",
                "is_charging_station",
                "nearby_distance",
                "weather_region",
                "Temp (°C)",
                "Precip. Amount (mm)",
            ]
        );
    }

    #[test]
    fn test_single_space_duration_and_date_column() {
        let trip_headers: Vec<String> = [
            "Trip Id",
            "Trip Duration",
            "Start Station Id",
            "Start Time",
            "Date",
            "Model",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let fields: Vec<String> = ["2", "60", "7000", "07/01/2024 08:15", "07/01/2024", "EFIT"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut row = enriched_row();
        row.trip.fields = fields;

        let table = EnrichedTable {
            trip_headers,
            rows: vec![row],
            include_status: false,
        };

        let writer = CsvWriter::new();
        let headers = writer.output_headers(&table);
        assert_eq!(
            headers[..5].to_vec(),
            vec!["Trip Id", "Trip Duration (seconds)", "Start Station Id", "Start Time", "Hour"]
        );
        assert!(!headers.iter().any(|h| h == "Date" || h == "Model"));
        assert_eq!(headers.len(), 16);

        let mut buffer = Vec::new();
        writer.write_enriched_to(&table, &mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert!(output
            .lines()
            .nth(1)
            .unwrap()
            .starts_with("2,60,7000,07/01/2024 08:15,8,AM,July,Monday,"));
    }

    #[test]
    fn test_write_enriched_rows() {
        let table = EnrichedTable {
            trip_headers: headers(),
            rows: vec![enriched_row()],
            include_status: false,
        };

        let mut buffer = Vec::new();
        CsvWriter::new().write_enriched_to(&table, &mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "1,951,7000,07/01/2024 08:15,8,AM,July,Monday,43.6398,-79.396,35,false,500,TORONTO_CITY_CENTRE,19.5,"
        );
    }

    #[test]
    fn test_status_columns_only_when_requested() {
        let table = EnrichedTable {
            trip_headers: headers(),
            rows: vec![enriched_row()],
            include_status: true,
        };

        let writer = CsvWriter::new();
        let headers = writer.output_headers(&table);
        assert!(headers.contains(&"num_bikes_available".to_string()));
        assert_eq!(headers.len(), 21);

        let mut buffer = Vec::new();
        writer.write_enriched_to(&table, &mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.lines().nth(1).unwrap().contains(",3,,,,,TORONTO_CITY_CENTRE,"));
    }

    #[test]
    fn test_write_snapshots_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("nested").join("snapshot.csv");

        let info = StationInfo::new(7000, Some(43.6275), Some(-79.3961));
        let snapshots = vec![StationSnapshot::new(
            &info,
            None,
            Some((Region::TorontoCityCentre, 0.0)),
        )];
        CsvWriter::new().write_snapshots(&snapshots, &path)?;

        let content = std::fs::read_to_string(&path)?;
        let mut lines = content.lines();
        assert!(lines.next().unwrap().starts_with("station_id,lat,lon,capacity"));
        assert_eq!(
            lines.next().unwrap(),
            "7000,43.6275,-79.3961,,,,,,,,,TORONTO_CITY_CENTRE,0.0"
        );

        Ok(())
    }
}
