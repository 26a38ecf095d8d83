use crate::utils::error::{RaceError, Result};
use crate::utils::logger::LOG_LEVELS;
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(RaceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(RaceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extension(field_name: &str, file: &str, allowed_extensions: &[&str]) -> Result<()> {
    match Path::new(file).extension().and_then(|ext| ext.to_str()) {
        Some(extension) if allowed_extensions.contains(&extension) => Ok(()),
        Some(extension) => Err(RaceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(RaceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| RaceError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RaceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_log_level(field_name: &str, level: &str) -> Result<()> {
    if LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        return Ok(());
    }
    Err(RaceError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: level.to_string(),
        reason: format!("Unknown log level. Valid levels: {}", LOG_LEVELS.join(", ")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("data_file", "data/race_scores.json").is_ok());
        assert!(validate_path("data_file", "").is_err());
        assert!(validate_path("data_file", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("data_file", "scores.json", &["json"]).is_ok());
        assert!(validate_file_extension("data_file", "scores.csv", &["json"]).is_err());
        assert!(validate_file_extension("data_file", "scores", &["json"]).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("data.json".to_string());
        let missing: Option<String> = None;

        assert_eq!(
            validate_required_field("store.data_file", &present).unwrap(),
            "data.json"
        );
        assert!(matches!(
            validate_required_field("store.data_file", &missing),
            Err(RaceError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("participant", "participant1").is_ok());
        assert!(validate_non_empty_string("participant", "   ").is_err());
    }

    #[test]
    fn test_validate_log_level() {
        assert!(validate_log_level("logging.level", "debug").is_ok());
        assert!(validate_log_level("logging.level", "INFO").is_ok());
        assert!(validate_log_level("logging.level", "verbose").is_err());
    }
}
