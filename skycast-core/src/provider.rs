use std::fmt::Debug;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    error::ProviderError,
    model::{CurrentConditions, ForecastDay, Location},
};

pub mod openweather;

/// Maximum number of daily entries in a reduced forecast.
pub const MAX_FORECAST_DAYS: usize = 5;

/// Remote weather/geocoding service.
///
/// The trait exists as an injection seam for the orchestrator and its tests;
/// exactly one implementation ships ([`openweather::OpenWeatherProvider`]).
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Resolve a free-text query to at most one location.
    /// `Ok(None)` means the query matched nothing; that is a valid outcome,
    /// not an error.
    async fn resolve_location(&self, query: &str) -> Result<Option<Location>, ProviderError>;

    /// Fetch current conditions for a location, metric units.
    ///
    /// When the caller's location already carries a display name (from
    /// geocoding), the returned conditions keep it; otherwise the service's
    /// own reported place name is used.
    async fn fetch_current(
        &self,
        location: &Location,
    ) -> Result<CurrentConditions, ProviderError>;

    /// Fetch the short-term forecast, reduced to one entry per day.
    async fn fetch_forecast(
        &self,
        location: &Location,
    ) -> Result<Vec<ForecastDay>, ProviderError>;

    /// Probe the service with a fixed query to classify the credential.
    /// Returns `false` on 401/403/429 or transport failure.
    async fn verify_credential(&self) -> bool;
}

/// One finer-grained forecast sample (typically 3-hourly) before the daily
/// reduction.
#[derive(Debug, Clone)]
pub struct ForecastSample {
    pub at: DateTime<Utc>,
    pub temperature_c: f64,
    pub description: String,
    pub icon_code: String,
}

/// Reduce samples to one entry per UTC calendar date.
///
/// The first sample seen for each date wins; output keeps the order dates
/// first appeared (no re-sorting) and is capped at [`MAX_FORECAST_DAYS`].
pub fn reduce_to_daily(samples: impl IntoIterator<Item = ForecastSample>) -> Vec<ForecastDay> {
    let mut days: Vec<ForecastDay> = Vec::with_capacity(MAX_FORECAST_DAYS);

    for sample in samples {
        let date = sample.at.date_naive();
        if days.iter().any(|d| d.date == date) {
            continue;
        }

        days.push(ForecastDay {
            date,
            temperature_c: sample.temperature_c,
            description: sample.description,
            icon_code: sample.icon_code,
        });

        if days.len() == MAX_FORECAST_DAYS {
            break;
        }
    }

    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_on(date: NaiveDate, hour: u32, temp: f64) -> ForecastSample {
        let at = date
            .and_hms_opt(hour, 0, 0)
            .expect("valid time")
            .and_utc();
        ForecastSample {
            at,
            temperature_c: temp,
            description: format!("sample at {hour}h"),
            icon_code: "04d".to_string(),
        }
    }

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, n).expect("valid date")
    }

    #[test]
    fn keeps_first_sample_per_date_in_first_seen_order() {
        // Dates D1,D1,D2,D3,D3,D3,D4,D5,D6 reduce to [D1..D5].
        let samples = vec![
            sample_on(day(1), 9, 5.0),
            sample_on(day(1), 12, 9.0),
            sample_on(day(2), 0, 4.0),
            sample_on(day(3), 3, 3.0),
            sample_on(day(3), 6, 2.0),
            sample_on(day(3), 9, 1.0),
            sample_on(day(4), 0, 0.0),
            sample_on(day(5), 0, -1.0),
            sample_on(day(6), 0, -2.0),
        ];

        let days = reduce_to_daily(samples);

        let dates: Vec<NaiveDate> = days.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![day(1), day(2), day(3), day(4), day(5)]);
        assert_eq!(days.len(), MAX_FORECAST_DAYS);

        // First sample per day wins, later ones are ignored.
        assert_eq!(days[0].temperature_c, 5.0);
        assert_eq!(days[2].temperature_c, 3.0);
    }

    #[test]
    fn shorter_input_yields_shorter_output() {
        let samples = vec![sample_on(day(1), 9, 5.0), sample_on(day(2), 9, 6.0)];
        let days = reduce_to_daily(samples);
        assert_eq!(days.len(), 2);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(reduce_to_daily(Vec::new()).is_empty());
    }
}
