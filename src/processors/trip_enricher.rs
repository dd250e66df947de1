use crate::models::{
    EnrichedTable, EnrichedTrip, StationInfo, StationStatus, TripRecord, TripTable,
    WeatherObservation, WeatherReading,
};
use crate::processors::{EnrichmentReport, RegionResolver, WeatherStore};
use crate::utils::progress::ProgressReporter;
use std::collections::HashMap;
use tracing::debug;

/// Left-joins trips with station metadata, optional live status and weather.
///
/// Every input trip yields exactly one output row, in input order.
pub struct TripEnricher<'a> {
    stations: &'a HashMap<u32, StationInfo>,
    statuses: Option<&'a HashMap<u32, StationStatus>>,
    weather: &'a WeatherStore,
    resolver: RegionResolver,
}

impl<'a> TripEnricher<'a> {
    pub fn new(stations: &'a HashMap<u32, StationInfo>, weather: &'a WeatherStore) -> Self {
        Self {
            stations,
            statuses: None,
            weather,
            resolver: RegionResolver::new(),
        }
    }

    pub fn with_statuses(mut self, statuses: &'a HashMap<u32, StationStatus>) -> Self {
        self.statuses = Some(statuses);
        self
    }

    pub fn with_resolver(mut self, resolver: RegionResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn enrich(
        &self,
        table: TripTable,
        progress: Option<&ProgressReporter>,
    ) -> (EnrichedTable, EnrichmentReport) {
        let mut report = EnrichmentReport {
            total_trips: table.len(),
            ..Default::default()
        };

        let mut rows = Vec::with_capacity(table.len());
        for trip in table.trips {
            let row = self.enrich_trip(trip);
            self.record(&row, &mut report);
            rows.push(row);

            if let Some(p) = progress {
                p.increment(1);
            }
        }

        debug!(
            trips = report.total_trips,
            with_weather = report.trips_with_weather,
            "Enrichment pass complete"
        );

        let enriched = EnrichedTable {
            trip_headers: table.headers,
            rows,
            include_status: self.statuses.is_some(),
        };

        (enriched, report)
    }

    /// Join a single trip
    pub fn enrich_trip(&self, trip: TripRecord) -> EnrichedTrip {
        let station = trip
            .station_id
            .and_then(|id| self.stations.get(&id))
            .cloned();

        let status = match (self.statuses, trip.station_id) {
            (Some(statuses), Some(id)) => statuses.get(&id).cloned(),
            _ => None,
        };

        let region = station
            .as_ref()
            .and_then(|s| self.resolver.nearest_region(s.lat, s.lon));

        let observation = match (region, trip.date(), trip.hour()) {
            (Some(region), Some(date), Some(hour)) => self.weather.find(region, date, hour),
            _ => None,
        };
        let weather_matched = observation.is_some();
        let weather = observation
            .map(WeatherObservation::reading)
            .unwrap_or_else(WeatherReading::missing);

        EnrichedTrip {
            trip,
            station,
            status,
            region,
            weather,
            weather_matched,
        }
    }

    fn record(&self, row: &EnrichedTrip, report: &mut EnrichmentReport) {
        if row.trip.has_malformed_start_time() {
            report.malformed_start_times += 1;
        }
        if let Some(duration) = row.trip.duration_secs {
            report.total_duration_secs += duration;
            report.trips_with_duration += 1;
        }
        if row.trip.station_id.is_some() && row.station.is_none() {
            report.unknown_station_ids += 1;
        }
        if row.has_station() {
            report.trips_with_station += 1;
        }
        if row.status.is_some() {
            report.trips_with_status += 1;
        }
        if let Some(region) = row.region {
            report.trips_with_region += 1;
            *report.region_counts.entry(region).or_insert(0) += 1;
        }
        if row.has_weather() {
            report.trips_with_weather += 1;
        }
    }
}
