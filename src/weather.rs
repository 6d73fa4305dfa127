//! Weather data integration (OpenWeatherMap)
//!
//! The environment probe for the habitat: a one-shot current-conditions
//! query by location name. A failed fetch is an expected event, reported to
//! the caller as a typed error and never allowed to end the run.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::WeatherConfig;

/// Probe-specific errors. All variants are recoverable; the simulation
/// keeps its last known readings and tries again next tick.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("weather API returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed weather payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Current outdoor conditions at the habitat's location.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub co2_ppm: f64,
}

/// Capability supplying current conditions. One operation, queried once per
/// tick by the simulation loop.
#[async_trait]
pub trait ConditionsProvider: Send + Sync {
    async fn current_conditions(&self) -> Result<CurrentConditions, WeatherError>;
}

/// OpenWeatherMap client for current conditions at a named location.
pub struct OpenWeatherMapClient {
    client: Client,
    base_url: String,
    location: String,
    api_key: String,
}

impl OpenWeatherMapClient {
    pub fn new(cfg: &WeatherConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(cfg.http_timeout_seconds))
                .build()
                .unwrap_or_default(),
            base_url: cfg.base_url.clone(),
            location: cfg.location.clone(),
            api_key: cfg.api_key.clone(),
        }
    }

    fn current_weather_url(&self) -> String {
        format!(
            "{}/data/2.5/weather?q={}&appid={}&units=metric",
            self.base_url, self.location, self.api_key
        )
    }
}

#[async_trait]
impl ConditionsProvider for OpenWeatherMapClient {
    async fn current_conditions(&self) -> Result<CurrentConditions, WeatherError> {
        let url = self.current_weather_url();
        debug!(location = %self.location, "fetching current weather");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status));
        }

        // Body and parse are split so a 200 with a garbage payload is
        // reported as Malformed rather than a transport error.
        let body = response.text().await?;
        let payload: OwmResponse = serde_json::from_str(&body)?;

        Ok(CurrentConditions {
            temperature_c: payload.main.temp,
            humidity_pct: payload.main.humidity,
            // OpenWeatherMap does not carry a CO2 reading; zero stands in
            // when the field is absent.
            co2_ppm: payload.main.co2.unwrap_or(0.0),
        })
    }
}

// OpenWeatherMap API response structures
#[derive(Debug, Deserialize)]
struct OwmResponse {
    main: OwmMain,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: f64,
    co2: Option<f64>,
}

/// Scripted probe for tests: answers from a queue of canned results and
/// falls back to mild reference conditions once the queue runs dry.
pub struct MockConditions {
    pub responses: Arc<RwLock<VecDeque<Result<CurrentConditions, WeatherError>>>>,
}

impl MockConditions {
    pub fn new(responses: VecDeque<Result<CurrentConditions, WeatherError>>) -> Self {
        Self {
            responses: Arc::new(RwLock::new(responses)),
        }
    }
}

#[async_trait]
impl ConditionsProvider for MockConditions {
    async fn current_conditions(&self) -> Result<CurrentConditions, WeatherError> {
        let mut queue = self.responses.write().await;
        queue.pop_front().unwrap_or(Ok(CurrentConditions {
            temperature_c: 25.0,
            humidity_pct: 50.0,
            co2_ppm: 0.0,
        }))
    }
}
