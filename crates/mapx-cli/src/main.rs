mod display;
mod session;

use std::time::Duration;

use clap::{Parser, Subcommand};
use mapx_core::location;
use mapx_core::{
    AppConfig, Coordinates, DeviceGeolocator, FixedGeolocator, PositionOptions, QueryController,
};
use mapx_gemini::{CredentialSource, GeminiBackend, GeminiSettings};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "mapx-cli")]
#[command(about = "Ask Gemini about places, grounded in Google Maps")]
struct Cli {
    /// Latitude to bias results toward (overrides `MAPX_LATITUDE`)
    #[arg(long, global = true, requires = "lng", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Longitude to bias results toward (overrides `MAPX_LONGITUDE`)
    #[arg(long, global = true, requires = "lat", allow_negative_numbers = true)]
    lng: Option<f64>,

    /// Skip location lookup entirely
    #[arg(long, global = true, conflicts_with_all = ["lat", "lng"])]
    no_location: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Ask a single question and exit
    Ask {
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = mapx_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let (location_tx, location_rx) = location::channel();
    let locating = !cli.no_location;
    let locate_task = if locating {
        let geolocator = select_geolocator(&cli, &config)?;
        let options =
            PositionOptions::with_timeout(Duration::from_millis(config.location_timeout_ms));
        Some(tokio::spawn(async move {
            location::locate_once(geolocator.as_ref(), &options, &location_tx).await
        }))
    } else {
        None
    };

    let settings = GeminiSettings::from_app_config(&config)?;
    let backend = GeminiBackend::new(settings, CredentialSource::from_env());
    let controller = QueryController::new(backend, location_rx.clone());

    let outcome = match cli.command {
        Some(Commands::Ask { prompt, json }) => {
            session::ask(&controller, location_rx, locating, &prompt.join(" "), json).await
        }
        None => session::interactive(&controller, &location_rx).await,
    };

    if let Some(task) = locate_task {
        task.abort();
    }
    outcome
}

/// CLI coordinates win over configuration.
fn select_geolocator(cli: &Cli, config: &AppConfig) -> anyhow::Result<Option<DeviceGeolocator>> {
    if let (Some(latitude), Some(longitude)) = (cli.lat, cli.lng) {
        let coordinates = Coordinates {
            latitude,
            longitude,
        };
        anyhow::ensure!(
            coordinates.is_valid(),
            "--lat/--lng out of range: {latitude}, {longitude}"
        );
        return Ok(Some(DeviceGeolocator::Fixed(FixedGeolocator::new(
            coordinates,
        ))));
    }
    Ok(DeviceGeolocator::from_config(config)?)
}

#[cfg(test)]
mod tests;
