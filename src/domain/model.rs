use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::utils::error::{GeofenceError, Result};

/// A WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lng", alias = "lon")]
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// GeoJSON geometry as stored by the backend. Only points are used for projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// `coordinates` is `[longitude, latitude]`.
    Point { coordinates: [f64; 2] },
}

impl Geometry {
    pub fn point(center: GeoPoint) -> Self {
        Self::Point {
            coordinates: [center.longitude, center.latitude],
        }
    }

    pub fn center(&self) -> GeoPoint {
        match self {
            Self::Point {
                coordinates: [longitude, latitude],
            } => GeoPoint::new(*latitude, *longitude),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Timezone {
    /// Western Indonesia, UTC+7.
    #[default]
    Wib,
    /// Central Indonesia, UTC+8.
    Wita,
    /// Eastern Indonesia, UTC+9.
    Wit,
}

impl Timezone {
    pub fn offset(self) -> FixedOffset {
        let hours = match self {
            Self::Wib => 7,
            Self::Wita => 8,
            Self::Wit => 9,
        };
        FixedOffset::east_opt(hours * 3600).unwrap_or_else(|| Utc.fix())
    }
}

/// A project site. Geofencing is enabled when both `location` and `radius` are set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub timezone: Timezone,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Geometry>,
    /// Meters. The backend sends either a number or a decimal string.
    #[serde(
        default,
        deserialize_with = "deserialize_radius",
        skip_serializing_if = "Option::is_none"
    )]
    pub radius: Option<f64>,
}

fn deserialize_radius<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Radius {
        Number(f64),
        Text(String),
    }

    match Option::<Radius>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Radius::Number(radius)) => Ok(Some(radius)),
        Some(Radius::Text(text)) => text.trim().parse::<f64>().map(Some).map_err(|e| {
            serde::de::Error::custom(format!("invalid radius {:?}: {}", text, e))
        }),
    }
}

impl Project {
    pub fn geofencing_enabled(&self) -> bool {
        self.location.is_some() && self.radius.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitStatus {
    #[serde(rename = "READY")]
    Ready,
    #[serde(rename = "NOT READY")]
    NotReady,
}

/// The vehicle unit a driver is checked in to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: u64,
    pub asset_code: String,
    pub project_id: u64,
    pub status: UnitStatus,
    #[serde(default)]
    pub project: Option<Project>,
}

/// Backend response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ApiResponse<T> {
    Ok {
        data: T,
    },
    Fail {
        message: String,
        #[serde(default)]
        code: Option<u16>,
    },
}

impl<T> ApiResponse<T> {
    pub fn into_result(self) -> Result<T> {
        match self {
            Self::Ok { data } => Ok(data),
            Self::Fail { message, code } => Err(GeofenceError::Api { message, code }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Admitted,
    Denied,
}

/// Outcome of a check-in attempt against a project's geofence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Admission {
    pub decision: Decision,
    pub device: GeoPoint,
    pub distance_meters: f64,
    pub radius_meters: f64,
    pub checked_at: DateTime<FixedOffset>,
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        self.decision == Decision::Admitted
    }

    /// Text shown to the driver when the checklist form stays closed.
    pub fn denial_message(&self) -> Option<String> {
        match self.decision {
            Decision::Admitted => None,
            Decision::Denied => Some(format!(
                "You are outside the project's range ({:.0} m away, limit {} m)",
                self.distance_meters,
                crate::utils::format::format_radius(self.radius_meters)
            )),
        }
    }
}
