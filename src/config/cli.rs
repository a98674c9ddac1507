use crate::domain::model::{GeoPoint, PermissionStatus};
use crate::domain::ports::LocationProvider;
use crate::utils::error::Result;
use async_trait::async_trait;

/// A location source that always reports the same position, e.g. one given on
/// the command line.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation {
    position: GeoPoint,
}

impl FixedLocation {
    pub fn new(position: GeoPoint) -> Self {
        Self { position }
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn request_permission(&self) -> Result<PermissionStatus> {
        Ok(PermissionStatus::Granted)
    }

    async fn current_position(&self) -> Result<GeoPoint> {
        Ok(self.position)
    }
}
