pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::FixedLocation, site_config::SiteConfig};
pub use core::{
    distance::distance_meters,
    gate::CheckinGate,
    geofence::{is_within_geofence, Geofence},
};
pub use domain::model::{Admission, Decision, GeoPoint, Geometry, Project, Timezone, Unit};
pub use utils::error::{GeofenceError, Result};
pub use utils::format::format_radius;
