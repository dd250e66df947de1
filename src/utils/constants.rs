/// Earth radius used for great-circle distances
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Toronto Bike Share GBFS v1 endpoints
pub const DEFAULT_STATION_INFO_URL: &str =
    "https://tor.publicbikesystem.net/ube/gbfs/v1/en/station_information";
pub const DEFAULT_STATION_STATUS_URL: &str =
    "https://tor.publicbikesystem.net/ube/gbfs/v1/en/station_status";

/// File names
pub const DEFAULT_OUTPUT_FILE: &str = "merged_bikeshare_with_weather.csv";
pub const WEATHER_FILE_TORONTO_CITY: &str = "weather_toronto_city.csv";
pub const WEATHER_FILE_TORONTO_CITY_CENTRE: &str = "weather_toronto_citycentre.csv";
pub const WEATHER_FILE_TORONTO_INTL_A: &str = "weather_toronto_intl_a.csv";
pub const WEATHER_FILE_TORONTO_NORTH_YORK: &str = "weather_toronto_northyork.csv";

/// Trip CSV columns
pub const COL_START_STATION_ID: &str = "Start Station Id";
pub const COL_START_TIME: &str = "Start Time";
pub const COL_TRIP_DURATION: &str = "Trip Duration";
pub const COL_TRIP_DURATION_DOUBLE_SPACE: &str = "Trip  Duration";
pub const COL_TRIP_DURATION_SECONDS: &str = "Trip Duration (seconds)";
pub const TRIP_START_TIME_FORMAT: &str = "%m/%d/%Y %H:%M";
pub const TRIP_START_TIME_FORMAT_SECONDS: &str = "%m/%d/%Y %H:%M:%S";

/// Trip columns never written to the enriched output
pub const DROPPED_TRIP_COLUMNS: [&str; 2] = ["Model", "Date"];

/// Derived trip columns
pub const COL_HOUR: &str = "Hour";
pub const COL_AM_PM: &str = "AM_PM";
pub const COL_MONTH: &str = "Month";
pub const COL_DAY_OF_WEEK: &str = "DayOfWeek";

/// Station columns
pub const STATION_INFO_COLUMNS: [&str; 5] =
    ["lat", "lon", "capacity", "is_charging_station", "nearby_distance"];
pub const STATION_STATUS_COLUMNS: [&str; 5] = [
    "num_bikes_available",
    "num_docks_available",
    "is_renting",
    "is_returning",
    "last_reported",
];

/// Weather CSV columns, primary name first
pub const WEATHER_DATETIME_COLUMNS: [&str; 2] = ["Date/Time (LST)", "Date/Time"];
pub const WEATHER_DATE_COLUMN: &str = "Date";
pub const WEATHER_HOUR_COLUMN: &str = "Hour";
pub const WEATHER_TEMP_COLUMNS: [&str; 2] = ["Temp (°C)", "Mean Temp (°C)"];
pub const WEATHER_PRECIP_COLUMNS: [&str; 2] = ["Precip. Amount (mm)", "Total Precip (mm)"];

/// Weather columns in the enriched output
pub const COL_WEATHER_REGION: &str = "weather_region";
pub const COL_TEMPERATURE: &str = "Temp (°C)";
pub const COL_PRECIPITATION: &str = "Precip. Amount (mm)";

/// Environment variable prefix for configuration overrides
pub const CONFIG_ENV_PREFIX: &str = "BIKESHARE";
