use thiserror::Error;

/// Failure of a call to the remote weather/geocoding service.
///
/// A query that matches nothing is *not* an error; provider operations
/// report that as an empty result instead.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request never produced an HTTP response (DNS, connect, TLS, ...).
    #[error("Failed to reach the weather service: {0}")]
    Transport(String),

    /// The service answered with a non-2xx status.
    #[error("Weather service returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("Unexpected response from the weather service: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Failure of the host's single-shot "get current position" capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CapabilityError {
    #[error("Location access denied")]
    Denied,

    #[error("Location information is unavailable")]
    Unavailable,

    #[error("Location request timed out")]
    TimedOut,
}

/// Coordinates outside the valid latitude/longitude ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Coordinates out of range: latitude must be within -90..=90 and longitude within -180..=180")]
pub struct InvalidCoordinates;

/// Empty or whitespace-only search input; rejected before any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Please enter a city name")]
pub struct EmptyQuery;

/// The startup credential probe was rejected by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("API key is invalid or not activated. Please check your OpenWeather API key.")]
pub struct CredentialInvalid;
