use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use tripscout::config::{LoggingConfig, TripScoutConfig};
use tripscout::{AttractionsAgent, Resolver, TripPlanner, WeatherAgent, web};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = TripScoutConfig::load()?;
    init_tracing(&config.logging)?;

    let resolver = Arc::new(Resolver::new(&config)?);
    let weather = WeatherAgent::new(Arc::clone(&resolver), &config)?;
    let attractions = AttractionsAgent::new(resolver, &config)?;
    let planner = Arc::new(TripPlanner::new(weather, attractions));

    web::run(config.server.port, planner).await
}

fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .with_context(|| "Invalid log filter")?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}
