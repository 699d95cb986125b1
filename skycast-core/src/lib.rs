//! Core library for the `skycast` weather app.
//!
//! This crate defines:
//! - Configuration & credential handling
//! - The OpenWeatherMap client behind a provider seam
//! - The lookup orchestrator and the view-state machine renderers subscribe to
//!
//! It is used by `skycast-cli`, but any frontend that can subscribe to view
//! state and submit lookup intents can sit on top of it.

pub mod config;
pub mod error;
pub mod icon;
pub mod locate;
pub mod model;
pub mod orchestrator;
pub mod provider;
pub mod state;

pub use config::Config;
pub use error::{CapabilityError, ProviderError};
pub use icon::IconKind;
pub use locate::{Coordinates, DeviceLocator};
pub use model::{CurrentConditions, ForecastDay, Location, ViewState};
pub use orchestrator::Orchestrator;
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider};
pub use state::ViewStateCell;
