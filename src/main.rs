use bikeshare_weather::cli::{run, Cli};
use bikeshare_weather::error::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
