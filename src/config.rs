//! Run configuration: an optional TOML file layered with `BIKESHARE_*`
//! environment variables. CLI flags are applied on top by the caller.

use crate::error::{ProcessingError, Result};
use crate::models::Region;
use crate::readers::{FeedSource, WeatherSources};
use crate::utils::constants::{
    CONFIG_ENV_PREFIX, DEFAULT_STATION_INFO_URL, DEFAULT_STATION_STATUS_URL,
};
use crate::utils::filename::default_output_path;
use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct EnrichConfig {
    pub trips: Option<PathBuf>,

    #[validate(length(min = 1))]
    pub station_info: String,

    /// Live status feed; `None` disables the status columns
    pub station_status: Option<String>,

    pub weather_dir: PathBuf,

    /// Per-region overrides, keyed by region name
    pub weather_files: HashMap<String, PathBuf>,

    pub output: PathBuf,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            trips: None,
            station_info: DEFAULT_STATION_INFO_URL.to_string(),
            station_status: None,
            weather_dir: PathBuf::from("."),
            weather_files: HashMap::new(),
            output: default_output_path(),
        }
    }
}

impl EnrichConfig {
    /// Load from `path` (if given) and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(ProcessingError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(File::from(path));
        }

        let config: EnrichConfig = builder
            .add_source(Environment::with_prefix(CONFIG_ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        config.weather_sources()?;

        Ok(config)
    }

    pub fn station_info_source(&self) -> FeedSource {
        FeedSource::parse(&self.station_info)
    }

    pub fn station_status_source(&self) -> Option<FeedSource> {
        self.station_status.as_deref().map(FeedSource::parse)
    }

    /// Status source for commands that always want one
    pub fn station_status_source_or_default(&self) -> FeedSource {
        self.station_status_source()
            .unwrap_or_else(|| FeedSource::parse(DEFAULT_STATION_STATUS_URL))
    }

    /// Weather files: defaults under `weather_dir`, then per-region overrides
    pub fn weather_sources(&self) -> Result<WeatherSources> {
        let mut sources = WeatherSources::in_directory(&self.weather_dir);

        for (name, path) in &self.weather_files {
            let region: Region = name.parse()?;
            let path = if path.is_relative() {
                self.weather_dir.join(path)
            } else {
                path.clone()
            };
            sources = sources.with_file(region, path);
        }

        Ok(sources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_defaults() {
        let config = EnrichConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(
            config.station_info_source(),
            FeedSource::Url(DEFAULT_STATION_INFO_URL.to_string())
        );
        assert_eq!(config.station_status_source(), None);
        assert_eq!(config.output, PathBuf::from("merged_bikeshare_with_weather.csv"));
    }

    #[test]
    fn test_load_toml_file() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(
            file,
            r#"
trips = "data/trips.csv"
station_info = "feeds/station_information.json"
station_status = "https://example.com/station_status"
weather_dir = "weather"
output = "out/enriched.csv"

[weather_files]
TORONTO_INTL_A = "pearson.csv"
"#
        )?;

        let config = EnrichConfig::load(Some(file.path()))?;

        assert_eq!(config.trips, Some(PathBuf::from("data/trips.csv")));
        assert_eq!(
            config.station_info_source(),
            FeedSource::Path(PathBuf::from("feeds/station_information.json"))
        );
        assert!(matches!(config.station_status_source(), Some(FeedSource::Url(_))));

        let sources = config.weather_sources()?;
        assert_eq!(
            sources.file_for(Region::TorontoIntlA),
            Some(Path::new("weather/pearson.csv"))
        );
        assert_eq!(
            sources.file_for(Region::TorontoCity),
            Some(Path::new("weather/weather_toronto_city.csv"))
        );

        Ok(())
    }

    #[test]
    fn test_unknown_region_is_rejected() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "[weather_files]\nTORONTO_ISLAND = \"island.csv\"")?;

        let result = EnrichConfig::load(Some(file.path()));
        assert!(matches!(result, Err(ProcessingError::UnknownRegion(_))));

        Ok(())
    }

    #[test]
    fn test_missing_config_file() {
        let result = EnrichConfig::load(Some(Path::new("/nonexistent/bikeshare.toml")));
        assert!(matches!(result, Err(ProcessingError::Config(_))));
    }
}
