use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::simulation::HabitatConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub habitat: HabitatConfig,
    pub clock: ClockConfig,
    pub weather: WeatherConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Real seconds between ticks.
    pub tick_seconds: u64,
    /// Total ticks to run; the default covers one simulated day at one tick
    /// per second.
    pub total_ticks: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Location name passed to the weather API's `q` parameter.
    pub location: String,
    /// API key; may be empty, in which case every fetch fails and the
    /// simulation runs on stale readings.
    pub api_key: String,
    pub base_url: String,
    pub http_timeout_seconds: u64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            tick_seconds: 1,
            total_ticks: 86_400,
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            location: "Mombasa".to_string(),
            api_key: String::new(),
            base_url: "http://api.openweathermap.org".to_string(),
            http_timeout_seconds: 10,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            habitat: HabitatConfig::default(),
            clock: ClockConfig::default(),
            weather: WeatherConfig::default(),
        }
    }
}

impl Config {
    /// Built-in defaults, overridden by `config/default.toml` where present,
    /// overridden in turn by `HYDROVENT__`-prefixed environment variables
    /// (e.g. `HYDROVENT__WEATHER__API_KEY`).
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("HYDROVENT__").split("__"));
        let cfg: Config = figment.extract()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Rejects configurations the simulation cannot run with.
    pub fn validate(&self) -> Result<()> {
        let h = &self.habitat;
        if h.battery_capacity_wh <= 0.0 {
            anyhow::bail!("habitat.battery_capacity_wh must be positive");
        }
        if h.initial_battery_charge_wh < 0.0 || h.initial_battery_charge_wh > h.battery_capacity_wh
        {
            anyhow::bail!("habitat.initial_battery_charge_wh must be within [0, capacity]");
        }
        if h.initial_hydrogen_storage_m3 < 0.0 {
            anyhow::bail!("habitat.initial_hydrogen_storage_m3 must not be negative");
        }
        if !(0.0..=500.0).contains(&h.initial_ventilation_rate_m3ph) {
            anyhow::bail!("habitat.initial_ventilation_rate_m3ph must be within [0, 500]");
        }
        if self.clock.tick_seconds == 0 {
            anyhow::bail!("clock.tick_seconds must be at least 1");
        }
        if self.clock.total_ticks == 0 {
            anyhow::bail!("clock.total_ticks must be at least 1");
        }
        if self.weather.location.is_empty() {
            anyhow::bail!("weather.location must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let cfg = Config::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.clock.tick_seconds, 1);
        assert_eq!(cfg.clock.total_ticks, 86_400);
        assert_eq!(cfg.weather.location, "Mombasa");
    }

    #[test]
    fn test_validate_rejects_overfull_battery() {
        let mut cfg = Config::default();
        cfg.habitat.initial_battery_charge_wh = cfg.habitat.battery_capacity_wh + 1.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_ticks() {
        let mut cfg = Config::default();
        cfg.clock.total_ticks = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_ventilation() {
        let mut cfg = Config::default();
        cfg.habitat.initial_ventilation_rate_m3ph = 600.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_location() {
        let mut cfg = Config::default();
        cfg.weather.location.clear();
        assert!(cfg.validate().is_err());
    }
}
