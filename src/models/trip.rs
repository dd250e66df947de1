use chrono::{NaiveDate, NaiveDateTime, Timelike};

/// One row of the trips CSV.
///
/// `fields` keeps every original cell in header order so the enriched
/// output can reproduce the input columns untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub fields: Vec<String>,
    pub station_id: Option<u32>,
    pub start_time: Option<NaiveDateTime>,
    pub duration_secs: Option<u64>,
}

impl TripRecord {
    pub fn new(
        fields: Vec<String>,
        station_id: Option<u32>,
        start_time: Option<NaiveDateTime>,
        duration_secs: Option<u64>,
    ) -> Self {
        Self {
            fields,
            station_id,
            start_time,
            duration_secs,
        }
    }

    pub fn hour(&self) -> Option<u32> {
        self.start_time.map(|t| t.hour())
    }

    pub fn am_pm(&self) -> Option<&'static str> {
        self.hour().map(|h| if h < 12 { "AM" } else { "PM" })
    }

    /// English month name, e.g. "July"
    pub fn month_name(&self) -> Option<String> {
        self.start_time.map(|t| t.format("%B").to_string())
    }

    /// English day name, e.g. "Monday"
    pub fn day_of_week(&self) -> Option<String> {
        self.start_time.map(|t| t.format("%A").to_string())
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.start_time.map(|t| t.date())
    }

    /// Empty, absent and unparseable start times all count as malformed
    pub fn has_malformed_start_time(&self) -> bool {
        self.start_time.is_none()
    }

    pub fn field(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or("")
    }
}

/// Trips CSV held in memory: trimmed header names plus parsed rows
#[derive(Debug, Clone, Default)]
pub struct TripTable {
    pub headers: Vec<String>,
    pub trips: Vec<TripRecord>,
}

impl TripTable {
    pub fn new(headers: Vec<String>, trips: Vec<TripRecord>) -> Self {
        Self { headers, trips }
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    pub fn malformed_start_times(&self) -> usize {
        self.trips
            .iter()
            .filter(|trip| trip.has_malformed_start_time())
            .count()
    }
}
