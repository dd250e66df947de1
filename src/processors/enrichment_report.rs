use crate::models::Region;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichmentReport {
    pub total_trips: usize,
    pub trips_with_station: usize,
    pub trips_with_status: usize,
    pub trips_with_region: usize,
    pub trips_with_weather: usize,
    pub malformed_start_times: usize,
    pub unknown_station_ids: usize,
    pub total_duration_secs: u64,
    pub trips_with_duration: usize,
    pub region_counts: BTreeMap<Region, usize>,
}

impl EnrichmentReport {
    pub fn average_duration_secs(&self) -> Option<f64> {
        if self.trips_with_duration == 0 {
            None
        } else {
            Some(self.total_duration_secs as f64 / self.trips_with_duration as f64)
        }
    }

    pub fn summary(&self) -> String {
        let pct = |count: usize| {
            if self.total_trips == 0 {
                0.0
            } else {
                100.0 * count as f64 / self.total_trips as f64
            }
        };

        let mut summary = String::new();

        summary.push_str("=== Enrichment Report ===\n");
        summary.push_str(&format!("Total Trips: {}\n", self.total_trips));
        summary.push_str(&format!(
            "Matched Station: {} ({:.1}%)\n",
            self.trips_with_station,
            pct(self.trips_with_station)
        ));
        if self.trips_with_status > 0 {
            summary.push_str(&format!(
                "Matched Live Status: {} ({:.1}%)\n",
                self.trips_with_status,
                pct(self.trips_with_status)
            ));
        }
        summary.push_str(&format!(
            "Resolved Region: {} ({:.1}%)\n",
            self.trips_with_region,
            pct(self.trips_with_region)
        ));
        summary.push_str(&format!(
            "Matched Weather: {} ({:.1}%)\n",
            self.trips_with_weather,
            pct(self.trips_with_weather)
        ));
        summary.push_str(&format!(
            "Malformed Start Times: {}\n",
            self.malformed_start_times
        ));
        summary.push_str(&format!(
            "Unknown Station Ids: {}\n",
            self.unknown_station_ids
        ));
        if let Some(avg) = self.average_duration_secs() {
            summary.push_str(&format!("Average Duration: {:.0}s\n", avg));
        }

        if !self.region_counts.is_empty() {
            summary.push_str("\nTrips by Region:\n");
            for (region, count) in &self.region_counts {
                summary.push_str(&format!("  {}: {}\n", region, count));
            }
        }

        summary
    }
}
