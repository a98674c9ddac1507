use chrono::Utc;
use tracing::{debug, info, warn};

use crate::core::geofence::{require_project, Geofence};
use crate::domain::model::{Admission, Decision, PermissionStatus, Project};
use crate::domain::ports::LocationProvider;
use crate::utils::error::{GeofenceError, Result};

/// Decides whether the driver may open the checklist form for a project.
pub struct CheckinGate<L: LocationProvider> {
    locator: L,
}

impl<L: LocationProvider> CheckinGate<L> {
    pub fn new(locator: L) -> Self {
        Self { locator }
    }

    pub async fn check(&self, project: Option<&Project>) -> Result<Admission> {
        // The geofence must be usable before the driver is prompted for location.
        let project = require_project(project)?;
        let fence = Geofence::from_project(project)?;

        let status = self.locator.request_permission().await?;
        if status != PermissionStatus::Granted {
            warn!("Location permission not granted: {:?}", status);
            return Err(GeofenceError::PermissionDenied);
        }

        let device = self.locator.current_position().await?;
        debug!(
            "Device position: {:.6}, {:.6}",
            device.latitude, device.longitude
        );

        let distance = fence.distance_to(device);
        let decision = if fence.admits(distance) {
            Decision::Admitted
        } else {
            Decision::Denied
        };

        info!(
            project = %project.name,
            distance_meters = distance,
            radius_meters = fence.radius_meters(),
            "Check-in {:?}",
            decision
        );

        Ok(Admission {
            decision,
            device,
            distance_meters: distance,
            radius_meters: fence.radius_meters(),
            checked_at: Utc::now().with_timezone(&project.timezone.offset()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{GeoPoint, Geometry, Timezone};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct Calls {
        prompts: AtomicUsize,
        fixes: AtomicUsize,
    }

    struct MockLocator {
        status: PermissionStatus,
        position: Option<GeoPoint>,
        calls: Arc<Calls>,
    }

    #[async_trait]
    impl LocationProvider for MockLocator {
        async fn request_permission(&self) -> Result<PermissionStatus> {
            self.calls.prompts.fetch_add(1, Ordering::SeqCst);
            Ok(self.status)
        }

        async fn current_position(&self) -> Result<GeoPoint> {
            self.calls.fixes.fetch_add(1, Ordering::SeqCst);
            self.position.ok_or_else(|| GeofenceError::LocationUnavailable {
                message: "no fix".to_string(),
            })
        }
    }

    fn locator(status: PermissionStatus, position: Option<GeoPoint>) -> (MockLocator, Arc<Calls>) {
        let calls = Arc::new(Calls::default());
        (
            MockLocator {
                status,
                position,
                calls: calls.clone(),
            },
            calls,
        )
    }

    fn site() -> Project {
        Project {
            id: 9,
            name: "Quarry North".to_string(),
            timezone: Timezone::Wita,
            location: Some(Geometry::point(GeoPoint::new(-1.26, 116.85))),
            radius: Some(250.0),
        }
    }

    #[tokio::test]
    async fn test_admits_device_inside_radius() {
        let (loc, _) = locator(PermissionStatus::Granted, Some(GeoPoint::new(-1.2605, 116.8502)));
        let admission = CheckinGate::new(loc).check(Some(&site())).await.unwrap();

        assert!(admission.is_admitted());
        assert!(admission.distance_meters < 250.0);
        assert_eq!(admission.radius_meters, 250.0);
        assert_eq!(admission.checked_at.offset().local_minus_utc(), 8 * 3600);
        assert!(admission.denial_message().is_none());
    }

    #[tokio::test]
    async fn test_denies_device_outside_radius() {
        let (loc, _) = locator(PermissionStatus::Granted, Some(GeoPoint::new(-1.27, 116.85)));
        let admission = CheckinGate::new(loc).check(Some(&site())).await.unwrap();

        assert_eq!(admission.decision, Decision::Denied);
        assert!(admission.distance_meters > 1_000.0);
        assert!(admission.denial_message().unwrap().contains("250 m"));
    }

    #[tokio::test]
    async fn test_permission_denied_skips_position_fix() {
        let (loc, calls) = locator(PermissionStatus::Denied, Some(GeoPoint::new(-1.26, 116.85)));
        let err = CheckinGate::new(loc).check(Some(&site())).await.unwrap_err();

        assert!(matches!(err, GeofenceError::PermissionDenied));
        assert_eq!(calls.prompts.load(Ordering::SeqCst), 1);
        assert_eq!(calls.fixes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_location_failure_propagates() {
        let (loc, _) = locator(PermissionStatus::Granted, None);
        let err = CheckinGate::new(loc).check(Some(&site())).await.unwrap_err();
        assert!(matches!(err, GeofenceError::LocationUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_misconfigured_project_is_not_defaulted() {
        let mut project = site();
        project.radius = None;
        let (loc, calls) = locator(PermissionStatus::Granted, Some(GeoPoint::new(-1.26, 116.85)));
        let err = CheckinGate::new(loc).check(Some(&project)).await.unwrap_err();

        assert!(matches!(err, GeofenceError::InvalidArgument { .. }));
        assert!(err.to_string().contains("radius"));
        assert_eq!(calls.prompts.load(Ordering::SeqCst), 0);
        assert_eq!(calls.fixes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_project_skips_location_prompt() {
        let (loc, calls) = locator(PermissionStatus::Granted, Some(GeoPoint::new(-1.26, 116.85)));
        let err = CheckinGate::new(loc).check(None).await.unwrap_err();

        assert!(err.to_string().contains("project"));
        assert_eq!(calls.prompts.load(Ordering::SeqCst), 0);
        assert_eq!(calls.fixes.load(Ordering::SeqCst), 0);
    }
}
