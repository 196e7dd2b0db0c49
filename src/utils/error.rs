use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatusError {
        status: u16,
        url: String,
        body_preview: String,
    },

    #[error("CSV export error: {0}")]
    CsvExportError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("CSV document is empty ({non_blank_lines} non-blank lines, need a header and at least one row)")]
    EmptyDocument { non_blank_lines: usize },

    #[error("No valid organizations found in CSV ({rows_parsed} rows parsed)")]
    NoValidOrganizations { rows_parsed: usize },
}

pub type Result<T> = std::result::Result<T, DirectoryError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Transport,
    Data,
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

impl DirectoryError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DirectoryError::ApiError(_) | DirectoryError::HttpStatusError { .. } => {
                ErrorCategory::Transport
            }
            DirectoryError::CsvExportError(_)
            | DirectoryError::SerializationError(_)
            | DirectoryError::EmptyDocument { .. }
            | DirectoryError::NoValidOrganizations { .. } => ErrorCategory::Data,
            DirectoryError::ConfigError { .. }
            | DirectoryError::ConfigValidationError { .. }
            | DirectoryError::InvalidConfigValueError { .. }
            | DirectoryError::MissingConfigError { .. } => ErrorCategory::Configuration,
            DirectoryError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 來源可能稍後恢復，呼叫端可自行重試
            ErrorCategory::Transport => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DirectoryError::ApiError(_) => {
                "Check network connectivity and that the CSV source URL is reachable"
            }
            DirectoryError::HttpStatusError { .. } => {
                "Verify the spreadsheet is published as CSV and the export URL is correct"
            }
            DirectoryError::EmptyDocument { .. } => {
                "Make sure the CSV has a header row followed by at least one data row"
            }
            DirectoryError::NoValidOrganizations { .. } => {
                "Check that rows have an organization name and non-zero Site Latitude / Site Longitude"
            }
            DirectoryError::CsvExportError(_) | DirectoryError::SerializationError(_) => {
                "Try a different --format or report the offending record"
            }
            DirectoryError::ConfigError { .. }
            | DirectoryError::ConfigValidationError { .. }
            | DirectoryError::InvalidConfigValueError { .. }
            | DirectoryError::MissingConfigError { .. } => {
                "Review the command line flags or the TOML configuration file"
            }
            DirectoryError::IoError(_) => "Check file paths and permissions",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DirectoryError::ApiError(e) if e.is_timeout() => {
                "Timed out while downloading the organization directory".to_string()
            }
            DirectoryError::ApiError(_) => {
                "Could not download the organization directory".to_string()
            }
            DirectoryError::HttpStatusError { status, .. } => {
                format!("The CSV source answered with HTTP {}", status)
            }
            DirectoryError::NoValidOrganizations { .. } => {
                "No valid organizations found in CSV".to_string()
            }
            other => other.to_string(),
        }
    }
}
