use crate::core::reader::{
    DEFAULT_PIVOT_OFFSET_YEARS, MAX_PIVOT_OFFSET_YEARS, MIN_PIVOT_OFFSET_YEARS,
};
use crate::core::{ReaderSettings, ValidationMode};
use crate::utils::error::{AddressBookError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_range, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub source: SourceConfig,
    #[serde(default)]
    pub reader: ReaderConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub queries: QueriesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReaderConfig {
    pub pivot_offset_years: Option<i32>,
    pub validation: Option<ValidationMode>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueriesConfig {
    #[serde(default)]
    pub age_difference: Vec<AgeDifferenceQuery>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeDifferenceQuery {
    pub first: String,
    pub second: String,
}

impl AppConfig {
    /// Reads and parses a TOML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| AddressBookError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AddressBookError::ConfigError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn source_path(&self) -> &str {
        &self.source.path
    }

    pub fn age_difference_queries(&self) -> &[AgeDifferenceQuery] {
        &self.queries.age_difference
    }

    fn validate_config(&self) -> Result<()> {
        validate_path("source.path", &self.source.path)?;

        if let Some(offset) = self.reader.pivot_offset_years {
            validate_range(
                "reader.pivot_offset_years",
                offset,
                MIN_PIVOT_OFFSET_YEARS,
                MAX_PIVOT_OFFSET_YEARS,
            )?;
        }

        for query in &self.queries.age_difference {
            validate_non_empty_string("queries.age_difference.first", &query.first)?;
            validate_non_empty_string("queries.age_difference.second", &query.second)?;
        }

        Ok(())
    }
}

impl ReaderSettings for AppConfig {
    fn pivot_offset_years(&self) -> i32 {
        self.reader.pivot_offset_years.unwrap_or(DEFAULT_PIVOT_OFFSET_YEARS)
    }

    fn validation_mode(&self) -> ValidationMode {
        self.reader.validation.unwrap_or_default()
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config().map_err(|e| match e {
            AddressBookError::InvalidArgument { field, value, reason } => AddressBookError::ConfigError {
                field,
                message: format!("'{}': {}", value, reason),
            },
            other => other,
        })
    }
}
