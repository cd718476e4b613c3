use crate::adapters::xlsx::DEFAULT_FILE_NAME;
use crate::domain::model::ValidationRules;
use crate::utils::error::{Result, ValidatorError};
use crate::utils::validation::{
    validate_delimiter, validate_file_extension, validate_non_empty_string,
    validate_positive_number, validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub rules: ValidationRules,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
            max_upload_mb: 50,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub file_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

impl AppConfig {
    /// Loads the configuration from a TOML file. Missing sections take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ValidatorError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ValidatorError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.server.max_upload_mb * 1024 * 1024
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.server.host)?;
        validate_positive_number("server.port", self.server.port as usize, 1)?;
        validate_range("server.max_upload_mb", self.server.max_upload_mb, 1, 1024)?;

        if !(self.rules.tolerance > 0.0 && self.rules.tolerance < 1000.0) {
            return Err(ValidatorError::InvalidConfigValueError {
                field: "rules.tolerance".to_string(),
                value: self.rules.tolerance.to_string(),
                reason: "Tolerance must be greater than 0 and less than 1000".to_string(),
            });
        }
        validate_range("rules.mask_levels", self.rules.mask_levels, 1, 20)?;
        validate_delimiter("rules.delimiter", self.rules.delimiter)?;

        validate_non_empty_string("output.file_name", &self.output.file_name)?;
        validate_file_extension("output.file_name", &self.output.file_name, "xlsx")?;

        Ok(())
    }
}
