pub mod distance;
pub mod gate;
pub mod geofence;

pub use crate::domain::model::{Admission, Decision, GeoPoint, Project};
pub use crate::domain::ports::LocationProvider;
pub use crate::utils::error::Result;
