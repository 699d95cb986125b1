use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::CapabilityError;

/// A raw position fix from the host, before validation into a
/// [`crate::model::Location`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Single-shot access to the host's "current position" capability.
///
/// Frontends supply an implementation appropriate for their platform; the
/// orchestrator only sees the typed outcome.
#[async_trait]
pub trait DeviceLocator: Send + Sync + Debug {
    async fn current_position(&self) -> Result<Coordinates, CapabilityError>;
}
