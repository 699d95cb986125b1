use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    error::ProviderError,
    model::{CurrentConditions, ForecastDay, Location},
    provider::{ForecastSample, WeatherProvider, reduce_to_daily},
};

pub const WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const GEOCODING_BASE_URL: &str = "https://api.openweathermap.org/geo/1.0";

/// Fixed query used by the startup credential probe.
const PROBE_QUERY: &str = "London";

/// OpenWeatherMap reports visibility up to 10 km and sometimes omits the
/// field entirely; a missing value means unrestricted visibility.
const DEFAULT_VISIBILITY_M: u32 = 10_000;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    http: Client,
    weather_base: String,
    geocoding_base: String,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_urls(api_key, WEATHER_BASE_URL, GEOCODING_BASE_URL)
    }

    /// Point the client at alternative endpoints (used by tests).
    pub fn with_base_urls(
        api_key: String,
        weather_base: impl Into<String>,
        geocoding_base: impl Into<String>,
    ) -> Self {
        Self {
            api_key,
            http: Client::new(),
            weather_base: weather_base.into(),
            geocoding_base: geocoding_base.into(),
        }
    }

    async fn get_json<T>(&self, url: &str, query: &[(&str, &str)]) -> Result<T, ProviderError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message: service_message(&body).unwrap_or_else(|| truncate_body(&body)),
            });
        }

        serde_json::from_str(&body).map_err(|e| ProviderError::Malformed(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct GeoEntry {
    lat: f64,
    lon: f64,
    name: String,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCondition {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize, Default)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    #[serde(default)]
    sys: OwSys,
    weather: Vec<OwCondition>,
    main: OwMain,
    wind: OwWind,
    visibility: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    weather: Vec<OwCondition>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn resolve_location(&self, query: &str) -> Result<Option<Location>, ProviderError> {
        let url = format!("{}/direct", self.geocoding_base);
        debug!(query, "resolving location");

        let entries: Vec<GeoEntry> = self
            .get_json(&url, &[("q", query), ("limit", "1"), ("appid", self.api_key.as_str())])
            .await?;

        let Some(entry) = entries.into_iter().next() else {
            return Ok(None);
        };

        let location = Location::new(entry.lat, entry.lon)
            .map_err(|e| ProviderError::Malformed(e.to_string()))?
            .with_place(entry.name, entry.country);

        Ok(Some(location))
    }

    async fn fetch_current(
        &self,
        location: &Location,
    ) -> Result<CurrentConditions, ProviderError> {
        let url = format!("{}/weather", self.weather_base);
        let lat = location.latitude().to_string();
        let lon = location.longitude().to_string();
        debug!(%lat, %lon, "fetching current conditions");

        let parsed: OwCurrentResponse = self
            .get_json(
                &url,
                &[
                    ("lat", lat.as_str()),
                    ("lon", lon.as_str()),
                    ("appid", self.api_key.as_str()),
                    ("units", "metric"),
                ],
            )
            .await?;

        let condition = parsed.weather.into_iter().next().ok_or_else(|| {
            ProviderError::Malformed("no weather condition in response".to_string())
        })?;

        let observed_at = DateTime::from_timestamp(parsed.dt, 0).unwrap_or_else(Utc::now);

        // A display name resolved by geocoding wins over whatever place name
        // the weather endpoint reports for the coordinates.
        let mut place = location.clone();
        if place.display_name.is_none() {
            place.display_name = Some(parsed.name);
        }
        if place.country_code.is_none() {
            place.country_code = parsed.sys.country;
        }

        Ok(CurrentConditions {
            location: place,
            observed_at,
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            description: condition.description,
            icon_code: condition.icon,
            humidity_pct: parsed.main.humidity,
            pressure_hpa: parsed.main.pressure,
            wind_speed_ms: parsed.wind.speed,
            visibility_m: parsed.visibility.unwrap_or(DEFAULT_VISIBILITY_M),
        })
    }

    async fn fetch_forecast(&self, location: &Location) -> Result<Vec<ForecastDay>, ProviderError> {
        let url = format!("{}/forecast", self.weather_base);
        let lat = location.latitude().to_string();
        let lon = location.longitude().to_string();
        debug!(%lat, %lon, "fetching forecast");

        let parsed: OwForecastResponse = self
            .get_json(
                &url,
                &[
                    ("lat", lat.as_str()),
                    ("lon", lon.as_str()),
                    ("appid", self.api_key.as_str()),
                    ("units", "metric"),
                ],
            )
            .await?;

        let samples = parsed.list.into_iter().filter_map(|entry| {
            let at = DateTime::from_timestamp(entry.dt, 0)?;
            let condition = entry.weather.into_iter().next()?;
            Some(ForecastSample {
                at,
                temperature_c: entry.main.temp,
                description: condition.description,
                icon_code: condition.icon,
            })
        });

        Ok(reduce_to_daily(samples))
    }

    async fn verify_credential(&self) -> bool {
        let url = format!("{}/weather", self.weather_base);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", PROBE_QUERY),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await;

        match res {
            Ok(res) => match res.status() {
                StatusCode::UNAUTHORIZED => {
                    warn!("credential probe rejected: 401 Unauthorized");
                    false
                }
                StatusCode::FORBIDDEN => {
                    warn!("credential probe rejected: 403 Forbidden");
                    false
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    warn!("credential probe rejected: 429 Too Many Requests");
                    false
                }
                status => status.is_success(),
            },
            Err(err) => {
                warn!(error = %err, "credential probe could not reach the service");
                false
            }
        }
    }
}

/// Pull the human-readable `message` out of an OpenWeatherMap error body.
fn service_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|e| e.message)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        // Back off to a char boundary so the slice never splits a
        // multibyte character.
        let mut cut = MAX;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_message_reads_openweather_error_shape() {
        let body = r#"{"cod":401,"message":"Invalid API key"}"#;
        assert_eq!(service_message(body).as_deref(), Some("Invalid API key"));
    }

    #[test]
    fn service_message_ignores_other_shapes() {
        assert!(service_message("Internal Server Error").is_none());
        assert!(service_message(r#"{"cod":500}"#).is_none());
    }

    #[test]
    fn truncate_body_caps_long_bodies() {
        let long = "x".repeat(500);
        let truncated = truncate_body(&long);
        assert_eq!(truncated.len(), 203);
        assert!(truncated.ends_with("..."));

        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        // 'é' is two bytes; byte 200 lands inside one.
        let body = format!("a{}", "é".repeat(150));
        let truncated = truncate_body(&body);

        assert!(truncated.ends_with("..."));
        assert!(truncated.len() <= 203);
        assert!(truncated.chars().all(|c| c == 'a' || c == 'é' || c == '.'));
    }
}
