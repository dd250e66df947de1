pub mod enriched;
pub mod region;
pub mod station;
pub mod trip;
pub mod weather;

pub use enriched::{EnrichedTable, EnrichedTrip, StationSnapshot};
pub use region::Region;
pub use station::{StationInfo, StationStatus};
pub use trip::{TripRecord, TripTable};
pub use weather::{WeatherObservation, WeatherReading};
