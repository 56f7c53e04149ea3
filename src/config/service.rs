use crate::core::labels::{DEFAULT_MAX_LABELS, DEFAULT_MIN_CONFIDENCE};
use crate::utils::error::{Result, ServiceError};
use crate::utils::validation::{
    validate_aws_region, validate_dynamodb_table_name, validate_origin, validate_range,
    validate_s3_bucket_name, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://image-recover.s3-website-us-east-1.amazonaws.com";

/// Environment variable pointing at a TOML file that replaces env-based loading.
pub const CONFIG_FILE_ENV: &str = "IMAGE_RECOMMENDER_CONFIG";

/// Thresholds applied to vision service output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelPolicy {
    pub min_confidence: f32,
    pub max_labels: usize,
}

impl Default for LabelPolicy {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            max_labels: DEFAULT_MAX_LABELS,
        }
    }
}

impl Validate for LabelPolicy {
    fn validate(&self) -> Result<()> {
        validate_range("min_confidence", self.min_confidence, 0.0, 100.0)?;
        validate_range("max_labels", self.max_labels, 1, 1000)?;
        Ok(())
    }
}

/// Deployment settings, built once at startup and handed to the adapters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub bucket_name: String,
    pub table_name: String,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,
    /// Overrides the AWS endpoint, e.g. for LocalStack.
    #[serde(default)]
    pub endpoint_url: Option<String>,
    #[serde(default)]
    pub labels: LabelPolicy,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_allowed_origin() -> String {
    DEFAULT_ALLOWED_ORIGIN.to_string()
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ServiceError::InvalidConfigValueError {
                field: name.to_string(),
                value: raw.clone(),
                reason: "Value could not be parsed".to_string(),
            }),
        Err(_) => Ok(default),
    }
}

fn required_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| ServiceError::MissingConfigError {
        field: name.to_string(),
    })
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bucket_name: required_env("BUCKET_NAME")?,
            table_name: required_env("TABLE_NAME")?,
            region: env::var("AWS_REGION").unwrap_or_else(|_| default_region()),
            allowed_origin: env::var("ALLOWED_ORIGIN").unwrap_or_else(|_| default_allowed_origin()),
            endpoint_url: env::var("AWS_ENDPOINT_URL").ok().filter(|url| !url.is_empty()),
            labels: LabelPolicy {
                min_confidence: parse_env("MIN_CONFIDENCE", DEFAULT_MIN_CONFIDENCE)?,
                max_labels: parse_env("MAX_LABELS", DEFAULT_MAX_LABELS)?,
            },
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Loads from the file named by [`CONFIG_FILE_ENV`] when set, otherwise from
    /// individual environment variables.
    pub fn load() -> Result<Self> {
        match env::var(CONFIG_FILE_ENV) {
            Ok(path) if !path.is_empty() => {
                tracing::info!("Loading configuration from {}", path);
                Self::from_toml_file(path)
            }
            _ => Self::from_env(),
        }
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        validate_s3_bucket_name("bucket_name", &self.bucket_name)?;
        validate_dynamodb_table_name("table_name", &self.table_name)?;
        validate_aws_region("region", &self.region)?;
        validate_origin("allowed_origin", &self.allowed_origin)?;
        if let Some(endpoint) = &self.endpoint_url {
            validate_url("endpoint_url", endpoint)?;
        }
        self.labels.validate()?;

        tracing::info!("✅ Service configuration validation passed");
        Ok(())
    }
}
