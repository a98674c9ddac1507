use crate::domain::model::{GeoPoint, PermissionStatus};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Platform location service: permission prompt plus a one-shot position fix.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn request_permission(&self) -> Result<PermissionStatus>;
    async fn current_position(&self) -> Result<GeoPoint>;
}
