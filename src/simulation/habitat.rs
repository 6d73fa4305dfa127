//! # Habitat simulation loop
//!
//! `HabitatSimulation` owns the system state and the injected capabilities
//! (time source, weather probe) and drives the stages in fixed order once
//! per tick. `run` paces ticks against real time and honors cooperative
//! cancellation between them.

use std::sync::Arc;
use std::time::Duration;

use chrono::Timelike;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::weather::ConditionsProvider;

use super::clock::TimeSource;
use super::state::{HabitatConfig, SystemState};
use super::{hydrogen, power, ventilation};

/// The habitat simulation: one state instance, one execution context.
pub struct HabitatSimulation {
    config: HabitatConfig,
    state: SystemState,
    clock: Arc<dyn TimeSource>,
    probe: Arc<dyn ConditionsProvider>,
}

impl HabitatSimulation {
    pub fn new(
        config: HabitatConfig,
        clock: Arc<dyn TimeSource>,
        probe: Arc<dyn ConditionsProvider>,
    ) -> Self {
        let state = SystemState::new(&config);
        Self {
            config,
            state,
            clock,
            probe,
        }
    }

    /// Last computed state; valid for inspection after completion or
    /// cancellation alike.
    pub fn state(&self) -> &SystemState {
        &self.state
    }

    /// Advances the state by one tick: power, hydrogen, ventilation, then
    /// the air-quality refresh and the battery/air-quality status lines.
    pub async fn tick(&mut self) {
        let now = self.clock.now();

        power::update_solar_power(&mut self.state, now.hour());
        power::charge_from_surplus(&mut self.state, &self.config);
        hydrogen::run_electrolysis(&mut self.state, &self.config);
        hydrogen::run_compressor(&mut self.state, &self.config);
        ventilation::update_ventilation_rate(&mut self.state);
        self.refresh_air_quality().await;

        info!(battery_charge_wh = self.state.battery_charge_wh, "battery");
        info!(
            temperature_c = self.state.air_quality.temperature_c,
            humidity_pct = self.state.air_quality.humidity_pct,
            co2_ppm = self.state.air_quality.co2_ppm,
            observed_at = %self.state.air_quality.observed_at_hms(),
            "indoor air quality"
        );
    }

    /// Refreshes the air-quality snapshot from the probe.
    ///
    /// The timestamp advances on every attempt; the readings only on a
    /// successful fetch. A failed fetch is logged and contained here, so the
    /// previous readings carry over and the tick completes normally.
    async fn refresh_air_quality(&mut self) {
        self.state.air_quality.observed_at = Some(self.clock.now());

        match self.probe.current_conditions().await {
            Ok(conditions) => {
                self.state.air_quality.temperature_c = conditions.temperature_c;
                self.state.air_quality.humidity_pct = conditions.humidity_pct;
                self.state.air_quality.co2_ppm = conditions.co2_ppm;
            }
            Err(e) => {
                warn!(error = %e, "weather fetch failed, keeping last readings");
            }
        }
    }

    /// Runs `total_ticks` ticks paced by `pace`, stopping early when the
    /// token is cancelled. Returns the number of ticks completed.
    ///
    /// Cancellation is observed at the pacing point between ticks; a
    /// cancelled run exits cleanly with the last computed state intact and
    /// is reported as a stop, not a failure.
    pub async fn run(&mut self, pace: Duration, total_ticks: u64, cancel: CancellationToken) -> u64 {
        let mut interval = tokio::time::interval(pace);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut completed = 0;
        while completed < total_ticks {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!(completed_ticks = completed, "simulation stopped by operator");
                    return completed;
                }
                _ = interval.tick() => {}
            }
            self.tick().await;
            completed += 1;
        }

        info!(completed_ticks = completed, "simulation complete");
        completed
    }
}
