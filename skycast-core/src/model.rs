use chrono::{DateTime, NaiveDate, Utc};

use crate::error::InvalidCoordinates;

/// A geographic position, optionally labelled with a place name.
///
/// Constructed through [`Location::new`], which guarantees finite, in-range
/// coordinates. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    latitude: f64,
    longitude: f64,
    pub display_name: Option<String>,
    pub country_code: Option<String>,
}

impl Location {
    /// Build a location from raw coordinates.
    ///
    /// Latitude must lie within -90..=90 and longitude within -180..=180;
    /// non-finite values are rejected.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinates> {
        if !latitude.is_finite()
            || !longitude.is_finite()
            || !(-90.0..=90.0).contains(&latitude)
            || !(-180.0..=180.0).contains(&longitude)
        {
            return Err(InvalidCoordinates);
        }

        Ok(Self {
            latitude,
            longitude,
            display_name: None,
            country_code: None,
        })
    }

    /// Attach the place name and country reported by geocoding.
    pub fn with_place(mut self, name: impl Into<String>, country_code: Option<String>) -> Self {
        self.display_name = Some(name.into());
        self.country_code = country_code;
        self
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Current conditions for one location, taken from a single weather-endpoint
/// response. Values keep the provider's full precision; rounding and unit
/// conversion are renderer concerns.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub location: Location,
    pub observed_at: DateTime<Utc>,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub description: String,
    pub icon_code: String,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub wind_speed_ms: f64,
    pub visibility_m: u32,
}

/// One day of the reduced forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub temperature_c: f64,
    pub description: String,
    pub icon_code: String,
}

/// Which UI region is visible. Exactly one state is active at a time;
/// transitions through [`crate::state::ViewStateCell`] are the only way to
/// change what is displayed.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Idle,
    Loading,
    Loaded {
        current: CurrentConditions,
        /// 0 to 5 entries, in the order their dates first appeared.
        forecast: Vec<ForecastDay>,
        /// False when the secondary forecast fetch failed; renderers hide
        /// the forecast region in that case.
        forecast_available: bool,
    },
    Error {
        /// Non-empty, user-facing.
        message: String,
    },
}

impl ViewState {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}
