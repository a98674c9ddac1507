use crate::domain::model::{ApiResponse, Project, Unit};
use crate::utils::error::{GeofenceError, Result};
use crate::utils::validation::{
    validate_latitude, validate_longitude, validate_non_empty_string, validate_required_field,
    Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The project a device is checked against, loaded from a site file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    pub project: Option<Project>,
}

impl SiteConfig {
    /// Load a site file. `.json` is read as a backend record, anything else as TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(GeofenceError::IoError)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_toml_str(&content),
        }
    }

    /// Parse a TOML site file, substituting `${VAR}` from the environment first.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GeofenceError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Parse a backend record: a project, a unit with its project, or either
    /// wrapped in an `{"status": ...}` envelope.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let mut value: serde_json::Value = serde_json::from_str(content)?;

        if value.get("status").is_some_and(|s| s == "ok" || s == "fail") {
            value = serde_json::from_value::<ApiResponse<serde_json::Value>>(value)?.into_result()?;
        }

        let project = if value.get("asset_code").is_some() {
            let unit: Unit = serde_json::from_value(value)?;
            tracing::debug!("Loaded unit {} ({})", unit.asset_code, unit.id);
            unit.project
        } else {
            Some(serde_json::from_value(value)?)
        };

        Ok(Self { project })
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| GeofenceError::ConfigError {
            message: format!("Invalid placeholder pattern: {}", e),
        })?;

        let mut missing = Vec::new();
        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                missing.push(var_name.to_string());
                String::new()
            })
        });

        if !missing.is_empty() {
            return Err(GeofenceError::ConfigError {
                message: format!("Undefined environment variables: {}", missing.join(", ")),
            });
        }

        Ok(result.into_owned())
    }

    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        let Some(project) = &self.project else {
            return Ok(());
        };

        validate_non_empty_string("project.name", &project.name)?;

        // location and radius come as a pair
        if project.location.is_some() {
            validate_required_field("project.radius", &project.radius)?;
        }
        if project.radius.is_some() {
            let location = validate_required_field("project.location", &project.location)?;
            let center = location.center();
            validate_latitude("project.location.coordinates[1]", center.latitude)?;
            validate_longitude("project.location.coordinates[0]", center.longitude)?;
        }

        Ok(())
    }
}
