use crate::domain::model::GeoPoint;
use crate::utils::error::Result;
use crate::utils::validation::{validate_latitude, validate_longitude, validate_path, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "site-geofence")]
#[command(about = "Check whether a device position is inside a project's geofence")]
pub struct CliConfig {
    #[arg(long, help = "Site file: .toml site config or .json backend project/unit record")]
    pub site: String,

    #[arg(long, allow_hyphen_values = true, help = "Device latitude in degrees")]
    pub lat: f64,

    #[arg(long, allow_hyphen_values = true, help = "Device longitude in degrees")]
    pub lon: f64,

    #[arg(long, help = "Print the admission as JSON")]
    pub json: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn device(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("site", &self.site)?;
        validate_latitude("lat", self.lat)?;
        validate_longitude("lon", self.lon)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_negative_coordinates() {
        let config = CliConfig::parse_from([
            "site-geofence",
            "--site",
            "site.toml",
            "--lat",
            "-6.2",
            "--lon",
            "106.8",
        ]);
        assert_eq!(config.device(), GeoPoint::new(-6.2, 106.8));
        assert!(!config.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_latitude_fails_validation() {
        let config = CliConfig::parse_from([
            "site-geofence",
            "--site",
            "site.toml",
            "--lat",
            "95",
            "--lon",
            "0",
        ]);
        assert!(config.validate().is_err());
    }
}
