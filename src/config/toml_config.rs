use crate::config::{DEFAULT_BASE_PATH, DEFAULT_DATA_FILE};
use crate::core::ConfigProvider;
use crate::utils::error::{RaceError, Result};
use crate::utils::validation::{validate_file_extension, validate_log_level, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub store: StoreConfig,
    pub output: Option<OutputConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    pub data_file: Option<String>,
    pub base_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub export_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RaceError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RaceError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${RACE_DATA_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RaceError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(data_file) = &self.store.data_file {
            validate_path("store.data_file", data_file)?;
            validate_file_extension("store.data_file", data_file, &["json"])?;
        }

        if let Some(base_path) = &self.store.base_path {
            validate_path("store.base_path", base_path)?;
        }

        if let Some(export_path) = self.export_path() {
            validate_path("output.export_path", export_path)?;
            validate_file_extension("output.export_path", export_path, &["csv"])?;
        }

        if let Some(level) = self.log_level() {
            validate_log_level("logging.level", level)?;
        }

        Ok(())
    }

    pub fn export_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.export_path.as_deref())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn verbose_logging(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logging(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn data_file(&self) -> &str {
        self.store.data_file.as_deref().unwrap_or(DEFAULT_DATA_FILE)
    }

    fn base_path(&self) -> &str {
        self.store.base_path.as_deref().unwrap_or(DEFAULT_BASE_PATH)
    }

    fn export_path(&self) -> Option<&str> {
        self.export_path()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
