use crate::domain::model::{GeoPoint, Project};
use crate::utils::error::{GeofenceError, Result};

use super::distance::distance_meters;

/// A circular admission area: center point plus radius in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geofence {
    center: GeoPoint,
    radius_meters: f64,
}

impl Geofence {
    /// Build the geofence configured on a project.
    ///
    /// Fails with `InvalidArgument` when the location is missing, or when the
    /// radius is missing, zero, negative or not finite.
    pub fn from_project(project: &Project) -> Result<Self> {
        let location = project.location.as_ref().ok_or_else(|| {
            GeofenceError::invalid_argument(format!(
                "project '{}' has no geofence: its 'location' is not configured",
                project.name
            ))
        })?;

        let radius = match project.radius {
            Some(radius) if radius.is_finite() && radius > 0.0 => radius,
            Some(radius) => {
                return Err(GeofenceError::invalid_argument(format!(
                    "project '{}' has an unusable 'radius' of {}",
                    project.name, radius
                )))
            }
            None => {
                return Err(GeofenceError::invalid_argument(format!(
                    "project '{}' has no 'radius' configured",
                    project.name
                )))
            }
        };

        Ok(Self {
            center: location.center(),
            radius_meters: radius,
        })
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn radius_meters(&self) -> f64 {
        self.radius_meters
    }

    pub fn distance_to(&self, point: GeoPoint) -> f64 {
        distance_meters(point, self.center)
    }

    /// The boundary itself counts as inside.
    pub fn admits(&self, distance_meters: f64) -> bool {
        distance_meters <= self.radius_meters
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        self.admits(self.distance_to(point))
    }
}

pub fn require_project(project: Option<&Project>) -> Result<&Project> {
    project.ok_or_else(|| {
        GeofenceError::invalid_argument("no project is assigned, so there is nothing to check against")
    })
}

/// Whether `device` is within the project's geofence.
pub fn is_within_geofence(project: Option<&Project>, device: GeoPoint) -> Result<bool> {
    let fence = Geofence::from_project(require_project(project)?)?;
    Ok(fence.contains(device))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Geometry, Timezone};

    fn project(location: Option<GeoPoint>, radius: Option<f64>) -> Project {
        Project {
            id: 1,
            name: "Equator Yard".to_string(),
            timezone: Timezone::Wib,
            location: location.map(Geometry::point),
            radius,
        }
    }

    fn origin() -> GeoPoint {
        GeoPoint::new(0.0, 0.0)
    }

    #[test]
    fn test_center_point_is_admitted() {
        let p = project(Some(origin()), Some(100.0));
        assert!(is_within_geofence(Some(&p), origin()).unwrap());
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let device = GeoPoint::new(0.0, 0.0009);
        let exact = distance_meters(device, origin());
        let p = project(Some(origin()), Some(exact));
        assert!(is_within_geofence(Some(&p), device).unwrap());

        // 0.0009 degrees at the equator is ~100.08 m
        let p = project(Some(origin()), Some(100.1));
        assert!(is_within_geofence(Some(&p), device).unwrap());
    }

    #[test]
    fn test_outside_radius_is_denied() {
        // ~101.2 m east of the center
        let device = GeoPoint::new(0.0, 0.00091);
        let p = project(Some(origin()), Some(100.0));
        assert!(!is_within_geofence(Some(&p), device).unwrap());
    }

    #[test]
    fn test_missing_project_is_rejected() {
        let err = is_within_geofence(None, origin()).unwrap_err();
        assert!(matches!(err, GeofenceError::InvalidArgument { .. }));
        assert!(err.to_string().contains("project"));
    }

    #[test]
    fn test_missing_location_is_rejected() {
        let p = project(None, Some(100.0));
        let err = is_within_geofence(Some(&p), origin()).unwrap_err();
        assert!(matches!(err, GeofenceError::InvalidArgument { .. }));
        assert!(err.to_string().contains("location"));
    }

    #[test]
    fn test_missing_or_zero_radius_is_rejected() {
        for radius in [None, Some(0.0), Some(-5.0), Some(f64::NAN)] {
            let p = project(Some(origin()), radius);
            let err = is_within_geofence(Some(&p), origin()).unwrap_err();
            assert!(matches!(err, GeofenceError::InvalidArgument { .. }));
            assert!(err.to_string().contains("radius"), "{}", err);
        }
    }

    #[test]
    fn test_geofence_exposes_center_and_radius() {
        let center = GeoPoint::new(-1.26, 116.85);
        let fence = Geofence::from_project(&project(Some(center), Some(250.0))).unwrap();
        assert_eq!(fence.center(), center);
        assert_eq!(fence.radius_meters(), 250.0);
        assert_eq!(fence.distance_to(center), 0.0);
    }
}
