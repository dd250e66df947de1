use crate::cli::args::{Cli, Commands};
use crate::cli::logging::init_logging;
use crate::config::EnrichConfig;
use crate::error::{ProcessingError, Result};
use crate::models::Region;
use crate::processors::{build_station_snapshots, RegionResolver, TripEnricher};
use crate::readers::{StationFeedReader, TripReader, WeatherReader};
use crate::utils::constants::DEFAULT_STATION_STATUS_URL;
use crate::utils::filename::generate_default_snapshot_filename;
use crate::utils::progress::ProgressReporter;
use crate::writers::CsvWriter;
use std::collections::HashMap;
use tracing::{info, warn};

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Commands::Enrich {
            trips,
            station_info,
            station_status,
            live_status,
            weather_dir,
            output,
            config,
        } => {
            let mut config = EnrichConfig::load(config.as_deref())?;
            if trips.is_some() {
                config.trips = trips;
            }
            if let Some(source) = station_info {
                config.station_info = source;
            }
            if let Some(source) = station_status {
                config.station_status = Some(source);
            } else if live_status && config.station_status.is_none() {
                config.station_status = Some(DEFAULT_STATION_STATUS_URL.to_string());
            }
            if let Some(dir) = weather_dir {
                config.weather_dir = dir;
            }
            if let Some(path) = output {
                config.output = path;
            }

            let trips_path = config.trips.clone().ok_or_else(|| {
                ProcessingError::MissingData(
                    "No trips file given (use --trips or set `trips` in the config)".to_string(),
                )
            })?;

            println!("Enriching bike-share trips...");
            println!("Trips file: {}", trips_path.display());
            println!("Station information: {}", config.station_info);
            if let Some(ref status) = config.station_status {
                println!("Station status: {}", status);
            }
            println!("Weather directory: {}", config.weather_dir.display());

            let table = TripReader::new().read_trips(&trips_path)?;
            info!(trips = table.len(), "Loaded trips");

            let feed_reader = StationFeedReader::new();
            let stations = feed_reader
                .read_station_information_map(&config.station_info_source())
                .await?;
            let statuses = match config.station_status_source() {
                Some(source) => Some(feed_reader.read_station_status_map(&source).await?),
                None => None,
            };

            let weather = WeatherReader::new().load_all(&config.weather_sources()?)?;

            let progress =
                ProgressReporter::new(table.len() as u64, "Enriching trips...", cli.quiet);
            let mut enricher = TripEnricher::new(&stations, &weather);
            if let Some(ref statuses) = statuses {
                enricher = enricher.with_statuses(statuses);
            }
            let (enriched, report) = enricher.enrich(table, Some(&progress));
            progress.finish_with_message(&format!("Enriched {} trips", enriched.len()));

            println!("\n{}", report.summary());

            if report.trips_with_weather == 0 && !enriched.is_empty() {
                warn!("No trip matched a weather observation; check the weather files and dates");
            }

            CsvWriter::new().write_enriched(&enriched, &config.output)?;
            println!(
                "Success! Wrote {} rows to {}",
                enriched.len(),
                config.output.display()
            );
        }

        Commands::Stations {
            station_info,
            station_status,
            output,
            config,
        } => {
            let mut config = EnrichConfig::load(config.as_deref())?;
            if let Some(source) = station_info {
                config.station_info = source;
            }
            if let Some(source) = station_status {
                config.station_status = Some(source);
            }
            let output = output.unwrap_or_else(generate_default_snapshot_filename);

            let progress = ProgressReporter::new_spinner("Fetching station feeds...", cli.quiet);

            let feed_reader = StationFeedReader::new();
            let stations = feed_reader
                .read_station_information(&config.station_info_source())
                .await?;
            progress.set_message("Fetching station status...");
            let statuses: HashMap<u32, _> = feed_reader
                .read_station_status_map(&config.station_status_source_or_default())
                .await?;

            let snapshots = build_station_snapshots(&stations, &statuses, &RegionResolver::new());
            progress.finish_with_message(&format!("Joined {} stations", snapshots.len()));

            let with_status = snapshots
                .iter()
                .filter(|s| s.num_bikes_available.is_some())
                .count();
            let in_service = statuses.values().filter(|s| s.is_in_service()).count();
            println!(
                "Stations: {}, with live status: {}, in service: {}",
                snapshots.len(),
                with_status,
                in_service
            );
            if let Some(latest) = statuses.values().filter_map(|s| s.last_reported_at()).max() {
                println!("Latest status report: {}", latest.to_rfc3339());
            }

            CsvWriter::new().write_snapshots(&snapshots, &output)?;
            println!("Station snapshot written to {}", output.display());
        }

        Commands::Regions => {
            println!("Weather regions:");
            for region in Region::ALL {
                let (lat, lon) = region.coordinates();
                println!(
                    "  {:<20} {:>8.4} {:>9.4}  {:<6}  {}",
                    region.name(),
                    lat,
                    lon,
                    if region.is_hourly() { "hourly" } else { "daily" },
                    region.default_weather_file()
                );
            }
        }
    }

    Ok(())
}
