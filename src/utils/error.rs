use thiserror::Error;

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("Invalid coordinate for {field} ({value}): {reason}")]
    InvalidCoordinate {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Environmental data acquisition failed: {message}")]
    DataAcquisitionFailure { message: String },

    #[error("Zone registry is empty")]
    RegistryEmpty,

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
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
    Input,
    DataSource,
    Configuration,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PredictError {
    pub fn acquisition(message: impl Into<String>) -> Self {
        PredictError::DataAcquisitionFailure {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            PredictError::InvalidCoordinate { .. } => ErrorCategory::Input,
            PredictError::DataAcquisitionFailure { .. } | PredictError::ApiError(_) => {
                ErrorCategory::DataSource
            }
            PredictError::ConfigError { .. }
            | PredictError::InvalidConfigValueError { .. }
            | PredictError::MissingConfigError { .. }
            | PredictError::IoError(_) => ErrorCategory::Configuration,
            PredictError::RegistryEmpty | PredictError::SerializationError(_) => {
                ErrorCategory::Internal
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PredictError::InvalidCoordinate { .. } => ErrorSeverity::High,
            // 資料來源暫時失敗，重試可能成功
            PredictError::DataAcquisitionFailure { .. } | PredictError::ApiError(_) => {
                ErrorSeverity::Medium
            }
            PredictError::ConfigError { .. }
            | PredictError::InvalidConfigValueError { .. }
            | PredictError::MissingConfigError { .. }
            | PredictError::IoError(_)
            | PredictError::SerializationError(_) => ErrorSeverity::High,
            PredictError::RegistryEmpty => ErrorSeverity::Critical,
        }
    }

    /// 適合直接顯示給使用者的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            PredictError::InvalidCoordinate { field, value, .. } => {
                format!("The {} value {} is not a valid coordinate", field, value)
            }
            PredictError::DataAcquisitionFailure { message } => format!(
                "Could not retrieve environmental data for the selected point: {}",
                message
            ),
            PredictError::ApiError(_) => {
                "The environmental data service could not be reached".to_string()
            }
            PredictError::RegistryEmpty => {
                "No aggregation zones are configured, predictions are unavailable".to_string()
            }
            PredictError::IoError(e) => format!("File access failed: {}", e),
            PredictError::SerializationError(e) => format!("Could not encode output: {}", e),
            PredictError::ConfigError { message } => format!("Configuration problem: {}", message),
            PredictError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            PredictError::MissingConfigError { field } => {
                format!("Configuration field '{}' is required", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => {
                "Latitude must be within [-90, 90] and longitude within [-180, 180]"
            }
            ErrorCategory::DataSource => {
                "Check the data service endpoint, or try a different location in the ocean"
            }
            ErrorCategory::Configuration => {
                "Review the configuration file and command line flags"
            }
            ErrorCategory::Internal => "Restore the zone list in the configuration and restart",
        }
    }
}

pub type Result<T> = std::result::Result<T, PredictError>;
