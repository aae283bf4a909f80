use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("PDF parsing failed: {0}")]
    PdfError(#[from] lopdf::Error),

    #[error("Page {page} not found in document")]
    PageNotFound { page: u32 },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Service returned status {status}: {message}")]
    ServiceError { status: u16, message: String },

    #[error("Service response contained no text")]
    EmptyResponse,

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

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
    Document,
    Network,
    Data,
    FileSystem,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::PdfError(_) | EtlError::PageNotFound { .. } => ErrorCategory::Document,
            EtlError::ApiError(_) | EtlError::ServiceError { .. } | EtlError::EmptyResponse => {
                ErrorCategory::Network
            }
            EtlError::CsvError(_) | EtlError::SerializationError(_) => ErrorCategory::Data,
            EtlError::IoError(_) => ErrorCategory::FileSystem,
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 遠端服務錯誤可重試
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Document | ErrorCategory::Data | ErrorCategory::Configuration => {
                ErrorSeverity::High
            }
            ErrorCategory::FileSystem => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::PdfError(_) => {
                "Check that the input is a valid, unencrypted PDF document".to_string()
            }
            EtlError::PageNotFound { .. } => "The document has no pages to extract".to_string(),
            EtlError::ApiError(_) => {
                "Check network connectivity and the --api-endpoint value".to_string()
            }
            EtlError::ServiceError { status, .. } if *status == 401 || *status == 403 => {
                "Check that GOOGLE_API_KEY or GEMINI_API_KEY holds a valid key".to_string()
            }
            EtlError::ServiceError { status, .. } if *status == 429 => {
                "Quota exceeded, wait before running again".to_string()
            }
            EtlError::ServiceError { .. } | EtlError::EmptyResponse => {
                "Run again later or try another --model".to_string()
            }
            EtlError::SerializationError(_) => {
                "The model response did not match the résumé schema, run again".to_string()
            }
            EtlError::CsvError(_) | EtlError::IoError(_) => {
                "Check that the paths exist and are readable/writable".to_string()
            }
            EtlError::MissingConfigError { field } => {
                format!("Set {} in the environment or the configuration file", field)
            }
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Document => format!("Could not read the résumé PDF: {}", self),
            ErrorCategory::Network => format!("Structuring service call failed: {}", self),
            ErrorCategory::Data => format!("Invalid data: {}", self),
            ErrorCategory::FileSystem => format!("File system error: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
