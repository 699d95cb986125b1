use async_trait::async_trait;
use skycast_core::config::HomeCoordinates;
use skycast_core::{CapabilityError, Coordinates, DeviceLocator};

/// Device position for a terminal host.
///
/// There is no positioning hardware to ask, so the coordinates configured as
/// "home" stand in for the platform capability; without them the capability
/// is unavailable.
#[derive(Debug)]
pub struct ConfiguredLocator {
    home: Option<HomeCoordinates>,
}

impl ConfiguredLocator {
    pub fn new(home: Option<HomeCoordinates>) -> Self {
        Self { home }
    }
}

#[async_trait]
impl DeviceLocator for ConfiguredLocator {
    async fn current_position(&self) -> Result<Coordinates, CapabilityError> {
        match self.home {
            Some(home) => Ok(Coordinates {
                latitude: home.latitude,
                longitude: home.longitude,
            }),
            None => Err(CapabilityError::Unavailable),
        }
    }
}
