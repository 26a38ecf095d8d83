use thiserror::Error;

#[derive(Error, Debug)]
pub enum RaceError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Failed to load race results from '{path}': {reason}")]
    LoadError { path: String, reason: String },

    #[error("Failed to save race results to '{path}': {reason}")]
    SaveError { path: String, reason: String },

    #[error("Invalid duration: {reason}")]
    InvalidDuration { reason: String },

    #[error("No result found for {what}")]
    NotFoundError { what: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Storage,
    Data,
    Input,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RaceError {
    pub fn invalid_duration(reason: impl Into<String>) -> Self {
        RaceError::InvalidDuration {
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            RaceError::IoError(_) | RaceError::LoadError { .. } | RaceError::SaveError { .. } => {
                ErrorCategory::Storage
            }
            RaceError::SerializationError(_) | RaceError::CsvError(_) => ErrorCategory::Data,
            RaceError::InvalidDuration { .. } | RaceError::NotFoundError { .. } => {
                ErrorCategory::Input
            }
            RaceError::ConfigValidationError { .. }
            | RaceError::InvalidConfigValueError { .. }
            | RaceError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 查無資料不算失敗
            RaceError::NotFoundError { .. } => ErrorSeverity::Low,
            RaceError::InvalidDuration { .. } => ErrorSeverity::Medium,
            RaceError::LoadError { .. }
            | RaceError::SerializationError(_)
            | RaceError::CsvError(_)
            | RaceError::ConfigValidationError { .. }
            | RaceError::InvalidConfigValueError { .. }
            | RaceError::MissingConfigError { .. } => ErrorSeverity::High,
            RaceError::IoError(_) | RaceError::SaveError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RaceError::IoError(_) => "Check that the path exists and is accessible",
            RaceError::LoadError { .. } => {
                "Make sure the data file exists and is a JSON array of {participantId, sportType, durationSeconds} records"
            }
            RaceError::SaveError { .. } => {
                "Check that the destination directory is writable and has free space"
            }
            RaceError::SerializationError(_) => "Check the JSON syntax of the data file",
            RaceError::CsvError(_) => "Check the export destination and try again",
            RaceError::InvalidDuration { .. } => {
                "Use a time like '2m 30s', '2:30' or a plain number of seconds; seconds must be 0-59"
            }
            RaceError::NotFoundError { .. } => {
                "Use `list` to see which participants and sports are recorded"
            }
            RaceError::ConfigValidationError { .. }
            | RaceError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again"
            }
            RaceError::MissingConfigError { .. } => {
                "Provide the missing value via the config file or a command line flag"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RaceError::LoadError { path, .. } => format!("Could not read race results from {}", path),
            RaceError::SaveError { path, .. } => format!("Could not write race results to {}", path),
            RaceError::NotFoundError { what } => format!("No result recorded for {}", what),
            RaceError::InvalidDuration { reason } => format!("That time is not valid: {}", reason),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RaceError>;
