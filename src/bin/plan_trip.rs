//! Plan an HOS-compliant trip and print it as JSON.
//!
//! Locations are given as `lat,lng` or as a free-text address to geocode.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use hos_planner::config::PlannerConfig;
use hos_planner::error::ProviderError;
use hos_planner::geocode::{NominatimClient, geocode_address};
use hos_planner::haversine::HaversineRoute;
use hos_planner::ors::OrsClient;
use hos_planner::polyline::Coordinate;
use hos_planner::route::RouteEstimator;
use hos_planner::traits::{Geocoder, RouteProvider};
use hos_planner::trip::{DriverId, TripPlanner, TripRequest};

#[derive(Debug, Parser)]
#[command(name = "plan_trip", about = "Plan an HOS-compliant truck trip")]
struct Args {
    /// Driver the trip is planned for.
    #[arg(long)]
    driver: String,

    /// Current location (`lat,lng` or address).
    #[arg(long)]
    current: String,

    /// Pickup location (`lat,lng` or address).
    #[arg(long)]
    pickup: String,

    /// Dropoff location (`lat,lng` or address).
    #[arg(long)]
    dropoff: String,

    /// On-duty hours already used in the current cycle.
    #[arg(long, default_value_t = 0.0)]
    cycle_used: f64,

    /// First day of the trip (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip the routing provider and use straight-line estimates.
    #[arg(long)]
    offline: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "trip planning failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => PlannerConfig::load(path)?,
        None => PlannerConfig::default(),
    }
    .with_env_overrides();

    let geocoder = NominatimClient::new(config.geocoding.clone()).map_err(ProviderError::from)?;
    let request = TripRequest {
        current_location: resolve(&geocoder, &args.current)?,
        pickup_location: resolve(&geocoder, &args.pickup)?,
        dropoff_location: resolve(&geocoder, &args.dropoff)?,
        current_cycle_used_hours: args.cycle_used,
    };

    let fallback = HaversineRoute::new(config.rules.average_speed_mph);
    let estimator: RouteEstimator<Box<dyn RouteProvider>> =
        if args.offline || !config.has_routing_credentials() {
            RouteEstimator::fallback_only(fallback)
        } else {
            let client = OrsClient::new(config.routing.clone()).map_err(ProviderError::from)?;
            let provider: Box<dyn RouteProvider> = Box::new(client);
            RouteEstimator::new(provider, fallback)
        };

    let planner = TripPlanner::new(estimator, config.rules);
    let start_date = args.start_date.unwrap_or_else(|| Local::now().date_naive());
    let trip = planner.plan_trip(DriverId::new(args.driver), request, start_date)?;

    println!("{}", serde_json::to_string_pretty(&trip)?);
    Ok(())
}

fn resolve<G: Geocoder>(geocoder: &G, location: &str) -> Result<Coordinate, Box<dyn Error>> {
    if let Some(coordinate) = parse_coordinate(location) {
        return Ok(coordinate);
    }
    Ok(geocode_address(geocoder, location)?)
}

fn parse_coordinate(value: &str) -> Option<Coordinate> {
    let (lat, lng) = value.split_once(',')?;
    let latitude = lat.trim().parse::<f64>().ok()?;
    let longitude = lng.trim().parse::<f64>().ok()?;
    let in_range = (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude);
    in_range.then(|| Coordinate::new(latitude, longitude))
}
