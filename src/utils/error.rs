use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("Malformed content at '{field}': {reason}")]
    MalformedContent { field: String, reason: String },

    #[error("Mail relay dispatch failed: {message}")]
    SubmissionDispatch { message: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required field: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, PortfolioError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Content,
    Relay,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PortfolioError {
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedContent {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn dispatch(message: impl Into<String>) -> Self {
        Self::SubmissionDispatch {
            message: message.into(),
        }
    }

    /// 將驗證錯誤轉為內容錯誤 (內容載入時使用)
    pub fn into_malformed(self) -> Self {
        match self {
            Self::InvalidConfigValueError { field, reason, .. } => {
                Self::MalformedContent { field, reason }
            }
            Self::MissingConfigError { field } => Self::MalformedContent {
                field,
                reason: "required field is missing".to_string(),
            },
            other => other,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedContent { .. } => ErrorCategory::Content,
            Self::SubmissionDispatch { .. } | Self::ApiError(_) => ErrorCategory::Relay,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 內容錯誤在啟動時即為致命
            Self::MalformedContent { .. } => ErrorSeverity::Critical,
            // 寄送失敗可以重試
            Self::SubmissionDispatch { .. } | Self::ApiError(_) => ErrorSeverity::Medium,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorSeverity::High,
            Self::IoError(_) | Self::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.category() == ErrorCategory::Relay
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MalformedContent { field, .. } => {
                format!("Portfolio content is invalid (check '{}')", field)
            }
            Self::SubmissionDispatch { .. } | Self::ApiError(_) => {
                "Failed to send message. Please try again or contact me directly.".to_string()
            }
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            Self::MissingConfigError { field } => format!("Setting '{}' is required", field),
            Self::IoError(e) => format!("Could not access a file: {}", e),
            Self::SerializationError(e) => format!("Could not encode data: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Content => {
                "Fix the content file so every id is unique, levels are 0-100 and URLs are absolute"
            }
            ErrorCategory::Relay => "Check the relay endpoint and credentials, then retry",
            ErrorCategory::Configuration => "Review the TOML config and environment variables",
            ErrorCategory::System => "Verify file paths and permissions",
        }
    }
}
