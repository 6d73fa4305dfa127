//! # Habitat state
//!
//! The single mutable entity of the simulation plus the fixed parameters it
//! is constructed from. Stages receive the state by mutable reference; there
//! are no process-wide singletons.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Fixed habitat parameters.
///
/// Defaults describe the reference rig: a 5 kWh battery bank, a small
/// single-unit electrolyzer and a four-person household.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitatConfig {
    /// Battery capacity in watt-hours.
    pub battery_capacity_wh: f64,
    /// Battery charge at simulation start in watt-hours.
    pub initial_battery_charge_wh: f64,
    /// Hydrogen stored at simulation start in cubic meters.
    pub initial_hydrogen_storage_m3: f64,
    /// Ventilation rate at simulation start in cubic meters per hour.
    pub initial_ventilation_rate_m3ph: f64,
    /// Age of the solar panels in years.
    pub solar_panel_age_years: u32,
    /// Number of occupants.
    pub occupants: u32,
    /// CO2 generated per occupant in cubic meters per hour.
    pub co2_generation_rate_m3ph: f64,
    /// Moisture generated per occupant in grams per hour.
    pub moisture_generation_rate_gph: f64,
    /// Electrolyzer system size factor; scales its fixed power draw.
    pub electrolyzer_system_size: u32,
    /// Compressor pressure ratio.
    pub compressor_pressure_ratio: f64,
}

impl Default for HabitatConfig {
    fn default() -> Self {
        Self {
            battery_capacity_wh: 5000.0,
            initial_battery_charge_wh: 4500.0,
            initial_hydrogen_storage_m3: 0.5,
            initial_ventilation_rate_m3ph: 100.0,
            solar_panel_age_years: 2,
            occupants: 4,
            co2_generation_rate_m3ph: 0.3,
            moisture_generation_rate_gph: 0.05,
            electrolyzer_system_size: 1,
            compressor_pressure_ratio: 1.5,
        }
    }
}

/// Externally sourced air-quality snapshot.
///
/// Temperature, humidity and CO2 come from the weather probe; `observed_at`
/// comes from the time source and advances on every tick, including ticks
/// whose fetch failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirQuality {
    /// Temperature in degrees Celsius.
    pub temperature_c: f64,
    /// Relative humidity in percent.
    pub humidity_pct: f64,
    /// CO2 level in ppm.
    pub co2_ppm: f64,
    /// Local time of the last refresh attempt; `None` before the first.
    pub observed_at: Option<NaiveDateTime>,
}

impl AirQuality {
    /// HH:MM:SS rendering for status lines; empty before the first refresh.
    pub fn observed_at_hms(&self) -> String {
        self.observed_at
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_default()
    }
}

/// Mutable habitat state, advanced in place once per tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemState {
    /// Instantaneous solar generation in watts. Recomputed every tick and
    /// left unclamped, so extreme probe inputs can drive it negative.
    pub solar_power_w: f64,
    /// Battery capacity in watt-hours. The electrolysis stage also reuses
    /// this figure as its hydrogen volume cap.
    pub battery_capacity_wh: f64,
    /// Current battery charge in watt-hours, within `[0, capacity]`.
    pub battery_charge_wh: f64,
    /// Stored hydrogen volume in cubic meters, never negative.
    pub hydrogen_storage_m3: f64,
    /// Ventilation throughput in cubic meters per hour, within `[0, 500]`
    /// and integral-valued after every update.
    pub ventilation_rate_m3ph: f64,
    /// Last known indoor air quality.
    pub air_quality: AirQuality,
}

impl SystemState {
    /// Builds the starting state. Air quality begins blank and picks up real
    /// readings once the probe answers.
    pub fn new(config: &HabitatConfig) -> Self {
        Self {
            solar_power_w: 0.0,
            battery_capacity_wh: config.battery_capacity_wh,
            battery_charge_wh: config.initial_battery_charge_wh,
            hydrogen_storage_m3: config.initial_hydrogen_storage_m3,
            ventilation_rate_m3ph: config.initial_ventilation_rate_m3ph,
            air_quality: AirQuality {
                temperature_c: 0.0,
                humidity_pct: 0.0,
                co2_ppm: 0.0,
                observed_at: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_default_config_matches_reference_rig() {
        let config = HabitatConfig::default();
        assert_eq!(config.battery_capacity_wh, 5000.0);
        assert_eq!(config.initial_battery_charge_wh, 4500.0);
        assert_eq!(config.initial_hydrogen_storage_m3, 0.5);
        assert_eq!(config.initial_ventilation_rate_m3ph, 100.0);
        assert_eq!(config.occupants, 4);
        assert_eq!(config.electrolyzer_system_size, 1);
        assert_eq!(config.compressor_pressure_ratio, 1.5);
    }

    #[test]
    fn test_initial_state_from_config() {
        let config = HabitatConfig::default();
        let state = SystemState::new(&config);

        assert_eq!(state.solar_power_w, 0.0);
        assert_eq!(state.battery_charge_wh, 4500.0);
        assert_eq!(state.hydrogen_storage_m3, 0.5);
        assert_eq!(state.ventilation_rate_m3ph, 100.0);
        assert_eq!(state.air_quality.temperature_c, 0.0);
        assert!(state.air_quality.observed_at.is_none());
    }

    #[test]
    fn test_observed_at_rendering() {
        let mut aq = AirQuality {
            temperature_c: 0.0,
            humidity_pct: 0.0,
            co2_ppm: 0.0,
            observed_at: None,
        };
        assert_eq!(aq.observed_at_hms(), "");

        aq.observed_at = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(13, 7, 42);
        assert_eq!(aq.observed_at_hms(), "13:07:42");
    }
}
