use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Validation error: {field} {reason}")]
    ValidationError { field: String, reason: String },

    #[error("Invalid budget: '{value}' is not a finite number")]
    InvalidBudget { value: String },

    #[error("A company with id {id} already exists")]
    DuplicateId { id: String },

    #[error("Company not found: {id}")]
    NotFound { id: String },

    #[error("Malformed input in {path}: {message}")]
    MalformedInput { path: String, message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, RegistryError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 使用者輸入不符合規則
    Input,
    /// 檔案內容或檔案本身的問題
    Data,
    /// 作業系統層級的 I/O
    System,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RegistryError {
    pub fn validation(field: &str, reason: &str) -> Self {
        RegistryError::ValidationError {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            RegistryError::ValidationError { .. }
            | RegistryError::InvalidBudget { .. }
            | RegistryError::DuplicateId { .. }
            | RegistryError::NotFound { .. } => ErrorCategory::Input,
            RegistryError::MalformedInput { .. }
            | RegistryError::FileNotFound { .. }
            | RegistryError::CsvError(_)
            | RegistryError::SerializationError(_) => ErrorCategory::Data,
            RegistryError::IoError(_) => ErrorCategory::System,
            RegistryError::ConfigError { .. } | RegistryError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息，不含內部細節
    pub fn user_friendly_message(&self) -> String {
        match self {
            RegistryError::ValidationError { field, .. } => {
                format!("The field '{}' is required and cannot be blank.", field)
            }
            RegistryError::InvalidBudget { value } => {
                format!("Budget must be a valid number (got '{}').", value)
            }
            RegistryError::DuplicateId { id } => {
                format!("A company with id {} already exists.", id)
            }
            RegistryError::NotFound { id } => format!("Company {} was not found.", id),
            RegistryError::MalformedInput { path, message } => {
                format!("The file {} could not be read: {}", path, message)
            }
            RegistryError::FileNotFound { path } => format!("File not found: {}", path),
            RegistryError::ConfigError { .. } | RegistryError::InvalidConfigValueError { .. } => {
                format!("Configuration problem: {}", self)
            }
            other => format!("Unexpected error: {}", other),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RegistryError::ValidationError { .. } => "Provide non-empty id, name and address.",
            RegistryError::InvalidBudget { .. } => "Use a plain number such as 1500 or 2.5e6.",
            RegistryError::DuplicateId { .. } => "Choose an id that is not already in use.",
            RegistryError::NotFound { .. } => "Run `list` or `search` to see existing ids.",
            RegistryError::MalformedInput { .. } => {
                "Check the file syntax at the reported position and try again."
            }
            RegistryError::FileNotFound { .. } => "Check the path and file extension.",
            RegistryError::CsvError(_) | RegistryError::SerializationError(_) => {
                "Check that the file is valid UTF-8 in the expected format."
            }
            RegistryError::IoError(_) => "Check file permissions and available disk space.",
            RegistryError::ConfigError { .. } | RegistryError::InvalidConfigValueError { .. } => {
                "Review the TOML configuration file."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_medium_severity() {
        let err = RegistryError::DuplicateId {
            id: "900".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.user_friendly_message().contains("900"));
    }

    #[test]
    fn test_malformed_input_is_data_error() {
        let err = RegistryError::MalformedInput {
            path: "broken.json".to_string(),
            message: "EOF while parsing a list at line 3 column 0".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Data);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.to_string().contains("line 3 column 0"));
    }

    #[test]
    fn test_io_error_is_critical() {
        let err: RegistryError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
