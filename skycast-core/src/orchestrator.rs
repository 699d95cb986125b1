use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use tracing::{debug, warn};

use crate::{
    error::{CredentialInvalid, EmptyQuery},
    locate::DeviceLocator,
    model::{Location, ViewState},
    provider::WeatherProvider,
    state::ViewStateCell,
};

/// Sequences provider calls for user-initiated lookups and acts as the only
/// writer of the shared [`ViewStateCell`].
///
/// At most one lookup is logically in flight: every lookup draws a ticket
/// from a monotonic counter, and completions are committed only while their
/// ticket is still the latest issued. A lookup started later therefore
/// supersedes an earlier one even if the earlier one resolves afterwards;
/// there is no explicit abort of in-flight requests and no retry.
#[derive(Debug)]
pub struct Orchestrator {
    provider: Box<dyn WeatherProvider>,
    locator: Box<dyn DeviceLocator>,
    state: Arc<ViewStateCell>,
    seq: AtomicU64,
}

impl Orchestrator {
    pub fn new(provider: Box<dyn WeatherProvider>, locator: Box<dyn DeviceLocator>) -> Self {
        Self {
            provider,
            locator,
            state: Arc::new(ViewStateCell::new()),
            seq: AtomicU64::new(0),
        }
    }

    /// Handle for renderers to subscribe to state transitions.
    pub fn view_state(&self) -> Arc<ViewStateCell> {
        Arc::clone(&self.state)
    }

    /// Probe the credential once, then look up the default city.
    ///
    /// A rejected probe blocks the lookup with an actionable message instead
    /// of letting every later request fail one by one.
    pub async fn start_with_default(&self, default_city: &str) {
        if !self.provider.verify_credential().await {
            let ticket = self.next_ticket();
            self.commit(ticket, ViewState::error(CredentialInvalid.to_string()));
            return;
        }

        self.lookup_by_name(default_city).await;
    }

    /// Look up current conditions and forecast for a free-text city name.
    pub async fn lookup_by_name(&self, city: &str) {
        let city = city.trim();
        if city.is_empty() {
            // Validation failure: fail fast with no network call. The
            // ticket still supersedes any pending lookup.
            let ticket = self.next_ticket();
            self.commit(ticket, ViewState::error(EmptyQuery.to_string()));
            return;
        }

        let ticket = self.next_ticket();
        self.commit(ticket, ViewState::Loading);
        debug!(ticket, city, "lookup by name");

        match self.provider.resolve_location(city).await {
            Ok(Some(location)) => self.run_lookup(ticket, location).await,
            Ok(None) => {
                self.commit(
                    ticket,
                    ViewState::error(format!(
                        "City \"{city}\" not found. Please check the spelling and try again."
                    )),
                );
            }
            Err(err) => {
                self.commit(ticket, ViewState::error(err.to_string()));
            }
        }
    }

    /// Look up current conditions and forecast for known coordinates.
    pub async fn lookup_by_coordinates(&self, location: Location) {
        let ticket = self.next_ticket();
        self.commit(ticket, ViewState::Loading);
        debug!(
            ticket,
            lat = location.latitude(),
            lon = location.longitude(),
            "lookup by coordinates"
        );

        self.run_lookup(ticket, location).await;
    }

    /// Ask the host for its position and look that up.
    ///
    /// No reverse geocoding happens here; the weather endpoint's own place
    /// name is used for display.
    pub async fn request_device_location(&self) {
        let ticket = self.next_ticket();
        self.commit(ticket, ViewState::Loading);
        debug!(ticket, "lookup by device location");

        match self.locator.current_position().await {
            Ok(coords) => match Location::new(coords.latitude, coords.longitude) {
                Ok(location) => self.run_lookup(ticket, location).await,
                Err(err) => self.commit(ticket, ViewState::error(err.to_string())),
            },
            Err(err) => self.commit(ticket, ViewState::error(err.to_string())),
        }
    }

    /// Shared tail of every lookup: current conditions first, then the
    /// forecast as a best-effort enrichment.
    async fn run_lookup(&self, ticket: u64, location: Location) {
        let current = match self.provider.fetch_current(&location).await {
            Ok(current) => current,
            Err(err) => {
                self.commit(ticket, ViewState::error(err.to_string()));
                return;
            }
        };

        // A superseded lookup's forecast fetch would be discarded anyway.
        if !self.is_latest(ticket) {
            debug!(ticket, "skipping forecast fetch for a superseded lookup");
            return;
        }

        match self.provider.fetch_forecast(&location).await {
            Ok(forecast) => {
                self.commit(
                    ticket,
                    ViewState::Loaded {
                        current,
                        forecast,
                        forecast_available: true,
                    },
                );
            }
            Err(err) => {
                // Forecast failure never invalidates the current conditions.
                warn!(error = %err, "forecast fetch failed, showing current conditions only");
                self.commit(
                    ticket,
                    ViewState::Loaded {
                        current,
                        forecast: Vec::new(),
                        forecast_available: false,
                    },
                );
            }
        }
    }

    fn next_ticket(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest(&self, ticket: u64) -> bool {
        self.seq.load(Ordering::SeqCst) == ticket
    }

    /// Commit a transition unless a newer lookup was issued since the
    /// ticket was drawn. Gates Loading as well as terminal states, so a
    /// starter that lost the race cannot overwrite a newer lookup's result.
    fn commit(&self, ticket: u64, state: ViewState) {
        if self.is_latest(ticket) {
            self.state.transition(state);
        } else {
            debug!(ticket, "discarding transition of a superseded lookup");
        }
    }
}
