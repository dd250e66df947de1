pub mod station_feed;
pub mod trip_reader;
pub mod weather_reader;

pub use station_feed::{parse_station_information, parse_station_status, FeedSource, StationFeedReader};
pub use trip_reader::TripReader;
pub use weather_reader::{WeatherReader, WeatherSources};
