use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Invalid API key")]
    Unauthorized,

    #[error("Missing required header(s): {headers}")]
    MissingCredentialError { headers: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("{provider} API error {status}: {body}")]
    UpstreamError {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Invalid request body: {message}")]
    RequestBodyError { status: u16, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    Validation,
    Upstream,
    Configuration,
    System,
}

impl GatewayError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GatewayError::Unauthorized => ErrorCategory::Authentication,
            GatewayError::MissingCredentialError { .. }
            | GatewayError::ValidationError { .. }
            | GatewayError::RequestBodyError { .. } => ErrorCategory::Validation,
            GatewayError::ApiError(_)
            | GatewayError::UpstreamError { .. }
            | GatewayError::ProcessingError { .. } => ErrorCategory::Upstream,
            GatewayError::ConfigError { .. }
            | GatewayError::MissingConfigError { .. }
            | GatewayError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            GatewayError::IoError(_) | GatewayError::SerializationError(_) => ErrorCategory::System,
        }
    }

    /// 給終端使用者看的訊息 (CLI 啟動錯誤)
    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Authentication => "The service secret was rejected".to_string(),
            ErrorCategory::Validation => format!("Request rejected: {}", self),
            ErrorCategory::Upstream => format!("Upstream provider failed: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            GatewayError::MissingConfigError { .. } => {
                "Set the missing value in the TOML file, on the command line or in the environment"
            }
            GatewayError::InvalidConfigValueError { .. } | GatewayError::ConfigError { .. } => {
                "Check the configuration file for typos and unsupported values"
            }
            GatewayError::Unauthorized => "Send the configured secret in the x-api-key header",
            GatewayError::MissingCredentialError { .. } => {
                "Send both serper-api-key and openrouter-api-key headers"
            }
            GatewayError::ValidationError { .. } => "Send a non-empty query",
            GatewayError::RequestBodyError { .. } => {
                "Send a JSON body like {\"query\": \"...\"} with Content-Type: application/json"
            }
            GatewayError::ApiError(_) => "Check network connectivity to the providers",
            GatewayError::UpstreamError { .. } | GatewayError::ProcessingError { .. } => {
                "Verify the provider keys and the model name"
            }
            GatewayError::IoError(_) => "Check that the file exists and is readable",
            GatewayError::SerializationError(_) => {
                "The provider returned an unexpected payload; check the configured endpoint URLs"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
