//! OpenWeather current-conditions adapter.

use serde::Deserialize;
use tracing::warn;

use crate::traits::{WeatherProvider, WeatherReport};

#[derive(Debug, Clone)]
pub struct OpenWeatherConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for OpenWeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openweathermap.org/data/2.5".to_string(),
            api_key: String::new(),
            timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    config: OpenWeatherConfig,
    client: reqwest::blocking::Client,
}

impl OpenWeatherClient {
    pub fn new(config: OpenWeatherConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl WeatherProvider for OpenWeatherClient {
    fn current(&self, city: &str) -> Option<WeatherReport> {
        let url = format!("{}/weather", self.config.base_url);

        let response = self
            .client
            .get(url)
            .query(&[
                ("q", city),
                ("appid", self.config.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<CurrentWeatherResponse>());

        match response {
            Ok(body) => Some(WeatherReport {
                city: body.name,
                description: body
                    .weather
                    .into_iter()
                    .next()
                    .map(|w| w.description)
                    .unwrap_or_default(),
                temperature_c: body.main.temp,
                humidity: body.main.humidity,
            }),
            Err(err) => {
                warn!(city = %city, %err, "weather request failed");
                None
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    name: String,
    main: MainConditions,
    #[serde(default)]
    weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
struct MainConditions {
    temp: f64,
    humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}
