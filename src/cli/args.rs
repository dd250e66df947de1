use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bikeshare-weather")]
#[command(about = "Enrich bike-share trips with station metadata and nearby weather")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Hide progress bars")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Join trips with station information, weather and optionally live status
    Enrich {
        #[arg(short, long, help = "Trips CSV file")]
        trips: Option<PathBuf>,

        #[arg(long, help = "GBFS station_information file or URL")]
        station_info: Option<String>,

        #[arg(long, help = "GBFS station_status file or URL")]
        station_status: Option<String>,

        #[arg(
            long,
            default_value = "false",
            help = "Join the default live station_status feed"
        )]
        live_status: bool,

        #[arg(short, long, help = "Directory holding the per-region weather CSVs")]
        weather_dir: Option<PathBuf>,

        #[arg(
            short,
            long,
            help = "Output CSV path [default: merged_bikeshare_with_weather.csv]"
        )]
        output: Option<PathBuf>,

        #[arg(short, long, help = "TOML configuration file")]
        config: Option<PathBuf>,
    },

    /// Write a snapshot of every station with live status and weather region
    Stations {
        #[arg(long, help = "GBFS station_information file or URL")]
        station_info: Option<String>,

        #[arg(long, help = "GBFS station_status file or URL")]
        station_status: Option<String>,

        #[arg(
            short,
            long,
            help = "Output CSV path [default: output/station-snapshot-{YYMMDD}.csv]"
        )]
        output: Option<PathBuf>,

        #[arg(short, long, help = "TOML configuration file")]
        config: Option<PathBuf>,
    },

    /// List the weather regions and their reference coordinates
    Regions,
}
