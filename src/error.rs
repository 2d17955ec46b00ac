//! Unified error hierarchy for TrainLoad
//!
//! The metric engine itself never fails; these errors come from the input
//! boundary (date parsing, file loading, decoding and session validation).

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all TrainLoad operations
#[derive(Debug, Error)]
pub enum TrainLoadError {
    /// Session or rating validation failed
    #[error("Validation error: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Rows of an import file could not be read
    #[error("Import error: {}", .0.join("; "))]
    Import(Vec<String>),

    /// Date string is not a canonical calendar date
    #[error("Invalid date '{input}': expected YYYY-MM-DD")]
    DateParse { input: String },

    /// Input file is missing or unreadable
    #[error("Could not read {path}: {source}")]
    InputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding/encoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV decoding errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Report text could not be written
    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    /// No importer handles the file extension
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for TrainLoad operations
pub type Result<T> = std::result::Result<T, TrainLoadError>;

impl TrainLoadError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TrainLoadError::Validation(_) => ErrorSeverity::Warning,
            TrainLoadError::Import(_) => ErrorSeverity::Warning,
            TrainLoadError::DateParse { .. } => ErrorSeverity::Warning,
            TrainLoadError::InputFile { .. } => ErrorSeverity::Error,
            TrainLoadError::Configuration(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            TrainLoadError::Validation(messages) => {
                bullet_list("The session could not be saved:", messages)
            }
            TrainLoadError::Import(problems) => {
                bullet_list("Some rows could not be imported:", problems)
            }
            TrainLoadError::DateParse { input } => {
                format!("'{}' is not a valid date. Use the YYYY-MM-DD format.", input)
            }
            TrainLoadError::InputFile { path, .. } => {
                format!("Could not find input file: {}", path.display())
            }
            TrainLoadError::UnsupportedFormat(path) => {
                format!("Cannot import '{}'. Supported formats are .json and .csv.", path)
            }
            _ => self.to_string(),
        }
    }
}

fn bullet_list(title: &str, items: &[String]) -> String {
    let mut out = String::from(title);
    for item in items {
        out.push_str("\n  - ");
        out.push_str(item);
    }
    out
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Critical error requiring immediate attention
    Critical,
    /// Error that prevents the operation
    Error,
    /// Warning that doesn't prevent operation
    Warning,
    /// Informational message
    Info,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
            ErrorSeverity::Info => tracing::Level::INFO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity() {
        let err = TrainLoadError::DateParse {
            input: "yesterday".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Warning);
        assert_eq!(err.severity().to_tracing_level(), tracing::Level::WARN);

        let err = TrainLoadError::Configuration("chronic window is 0".to_string());
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_validation_display_joins_messages() {
        let err = TrainLoadError::Validation(vec![
            "Date is required".to_string(),
            "Duration must be greater than 0".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation error: Date is required; Duration must be greater than 0"
        );
        assert!(err.user_message().contains("\n  - Date is required"));
    }

    #[test]
    fn test_import_problems_are_not_session_errors() {
        let err = TrainLoadError::Import(vec!["line 3: Unknown activity category: yoga".to_string()]);
        let message = err.user_message();

        assert!(message.starts_with("Some rows could not be imported:"));
        assert!(message.contains("\n  - line 3: Unknown activity category: yoga"));
        assert!(!message.contains("session"));
        assert_eq!(err.severity(), ErrorSeverity::Warning);
    }

    #[test]
    fn test_format_error_converts() {
        let err = TrainLoadError::from(std::fmt::Error);
        assert!(matches!(err, TrainLoadError::Format(_)));
        assert_eq!(err.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_user_messages() {
        let err = TrainLoadError::InputFile {
            path: PathBuf::from("week.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.user_message().contains("Could not find"));
    }
}
