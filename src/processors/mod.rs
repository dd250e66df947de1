pub mod enrichment_report;
pub mod region_resolver;
pub mod station_snapshot;
pub mod trip_enricher;
pub mod weather_lookup;

pub use enrichment_report::EnrichmentReport;
pub use region_resolver::{nearest_region, RegionMatch, RegionResolver};
pub use station_snapshot::build_station_snapshots;
pub use trip_enricher::TripEnricher;
pub use weather_lookup::{RegionWeather, WeatherStore};
