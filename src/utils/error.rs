use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Object storage write failed: {message}")]
    StorageError { message: String },

    #[error("Label detection failed: {message}")]
    InferenceError { message: String },

    #[error("Catalog persistence failed: {message}")]
    PersistenceError { message: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Base64 decoding failed: {0}")]
    Base64Error(#[from] base64::DecodeError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// The caller sent something we cannot process.
    Request,
    /// An upstream AWS service (or local stand-in) failed.
    Upstream,
    /// The process is misconfigured, the host failed, or stored data broke an invariant.
    System,
}

impl ServiceError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::StorageError {
            message: message.into(),
        }
    }

    pub fn inference(message: impl Into<String>) -> Self {
        Self::InferenceError {
            message: message.into(),
        }
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        Self::PersistenceError {
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidRequest { .. } | Self::Base64Error(_)
            | Self::SerializationError(_) => ErrorSeverity::Request,
            Self::StorageError { .. }
            | Self::InferenceError { .. }
            | Self::PersistenceError { .. } => ErrorSeverity::Upstream,
            Self::InvalidArgument { .. }
            | Self::IoError(_)
            | Self::TomlError(_)
            | Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorSeverity::System,
        }
    }

    /// HTTP status reported by the Lambda handler.
    pub fn status_code(&self) -> u16 {
        match self.severity() {
            ErrorSeverity::Request => 400,
            ErrorSeverity::Upstream => 502,
            ErrorSeverity::System => 500,
        }
    }

    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Request => 1,
            ErrorSeverity::Upstream => 2,
            ErrorSeverity::System => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
