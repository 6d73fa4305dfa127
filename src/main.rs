use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use hydrovent::{config, simulation, telemetry, weather};

use config::Config;
use simulation::{HabitatSimulation, WallClock};
use telemetry::init_tracing;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use weather::OpenWeatherMapClient;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cfg = Config::load()?;

    if cfg.weather.api_key.is_empty() {
        warn!(
            "HYDROVENT__WEATHER__API_KEY is not set - every weather fetch will fail \
            and the simulation will run on stale air-quality readings"
        );
    }

    info!(
        location = %cfg.weather.location,
        occupants = cfg.habitat.occupants,
        panel_age_years = cfg.habitat.solar_panel_age_years,
        co2_generation_m3ph = cfg.habitat.co2_generation_rate_m3ph,
        moisture_generation_gph = cfg.habitat.moisture_generation_rate_gph,
        total_ticks = cfg.clock.total_ticks,
        "starting habitat simulation"
    );

    let probe = Arc::new(OpenWeatherMapClient::new(&cfg.weather));
    let mut sim = HabitatSimulation::new(cfg.habitat.clone(), Arc::new(WallClock), probe);

    let cancel = CancellationToken::new();
    let watcher = cancel.clone();
    tokio::spawn(async move {
        telemetry::shutdown_signal().await;
        watcher.cancel();
    });

    let completed = sim
        .run(
            Duration::from_secs(cfg.clock.tick_seconds),
            cfg.clock.total_ticks,
            cancel,
        )
        .await;

    info!(
        completed_ticks = completed,
        battery_charge_wh = sim.state().battery_charge_wh,
        hydrogen_storage_m3 = sim.state().hydrogen_storage_m3,
        "shutdown complete"
    );
    Ok(())
}
