use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeofenceError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Location permission was not granted")]
    PermissionDenied,

    #[error("Current location unavailable: {message}")]
    LocationUnavailable { message: String },

    #[error("API request failed: {message}")]
    Api { message: String, code: Option<u16> },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Precondition,
    Location,
    Api,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl GeofenceError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidArgument { .. } => ErrorCategory::Precondition,
            Self::PermissionDenied | Self::LocationUnavailable { .. } => ErrorCategory::Location,
            Self::Api { .. } => ErrorCategory::Api,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::SerializationError(_) => ErrorCategory::Configuration,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    /// Location failures are usually transient; a misconfigured project is not.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Location | ErrorCategory::Api => ErrorSeverity::Medium,
            ErrorCategory::Precondition | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for the CLI. Never 0; a denied check-in uses 4.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidArgument { message } => {
                format!("The project's geofence is not set up correctly: {}", message)
            }
            Self::PermissionDenied => "Location access is required to submit a checklist".to_string(),
            Self::LocationUnavailable { .. } => "Your current location could not be determined".to_string(),
            Self::Api { message, .. } => format!("The server rejected the request: {}", message),
            Self::IoError(e) => format!("Could not read input: {}", e),
            Self::SerializationError(e) => format!("Could not parse project record: {}", e),
            Self::ConfigError { message } => format!("Invalid configuration: {}", message),
            Self::MissingConfigError { field } => format!("Missing required setting '{}'", field),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => {
                "Ask an administrator to configure the project's location and radius"
            }
            Self::PermissionDenied => "Grant location permission and try again",
            Self::LocationUnavailable { .. } => "Move to an open area and retry",
            Self::Api { .. } => "Check your session and try again later",
            Self::IoError(_) => "Check that the file exists and is readable",
            Self::SerializationError(_) => "Check that the JSON matches the backend project format",
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => "Fix the site file and run again",
        }
    }
}

pub type Result<T> = std::result::Result<T, GeofenceError>;
