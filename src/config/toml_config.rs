use crate::adapters::viacep::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECONDS};
use crate::core::attachments::{AttachmentLimits, DEFAULT_MAX_FILES};
use crate::core::birth_date::MINIMUM_AGE;
use crate::core::form::FormRules;
use crate::utils::error::{IntakeError, Result};
use crate::utils::validation::{
    validate_http_url, validate_positive_number, validate_range, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

/// Upper bound of `attachments.max_file_size_mb`.
pub const MAX_FILE_SIZE_MB_LIMIT: u64 = 1024;

static ENV_VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    pub validation: ValidationConfig,
    pub cep_lookup: CepLookupConfig,
    pub attachments: AttachmentsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub minimum_age: u32,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            minimum_age: MINIMUM_AGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CepLookupConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for CepLookupConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachmentsConfig {
    pub max_files: usize,
    pub max_file_size_mb: u64,
}

impl Default for AttachmentsConfig {
    fn default() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
            max_file_size_mb: 10,
        }
    }
}

impl IntakeConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(IntakeError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| IntakeError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as is.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_range("validation.minimum_age", self.validation.minimum_age, 0, 130)?;
        validate_http_url("cep_lookup.base_url", &self.cep_lookup.base_url)?;
        validate_positive_number(
            "cep_lookup.timeout_seconds",
            self.cep_lookup.timeout_seconds,
            1,
        )?;
        validate_positive_number("attachments.max_files", self.attachments.max_files, 1)?;
        validate_range(
            "attachments.max_file_size_mb",
            self.attachments.max_file_size_mb,
            1,
            MAX_FILE_SIZE_MB_LIMIT,
        )?;
        Ok(())
    }

    pub fn form_rules(&self) -> FormRules {
        FormRules {
            minimum_age: self.validation.minimum_age,
            attachments: AttachmentLimits {
                max_files: self.attachments.max_files,
                max_file_size: self.attachments.max_file_size_mb.saturating_mul(1024 * 1024),
            },
        }
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.cep_lookup.timeout_seconds)
    }
}

impl Validate for IntakeConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
