//! Error types module
//!
//! All failures of the recommendation flow are unified under [`StyleError`].
//! Each variant self-describes how it should be presented to the user through
//! [`ErrorMetadata`], so the pipeline coordinator can turn any failure into a
//! single human-readable message without matching on variants itself.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like a missing file selection
    Debug,
    /// Warning level - for upstream services misbehaving
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for user-facing error presentation
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "NO_FILE_SELECTED")
    fn error_code(&self) -> &'static str;

    /// Whether resubmitting the same request may succeed
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the user
    fn suggested_action(&self) -> Option<&'static str>;

    /// User-facing message (upstream detail is never exposed here)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StyleError {
    #[error("No file selected")]
    NoFileSelected,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Cannot {action} while {from}")]
    InvalidTransition { from: String, action: &'static str },

    #[error("Analysis protocol error: {0}")]
    AnalysisProtocol(String),

    #[error("Analysis transport error: {0}")]
    AnalysisTransport(String),

    #[error("Outfit search transport error: {0}")]
    SearchTransport(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub const NO_FILE_MESSAGE: &str = "Please select a file first.";
pub const ANALYSIS_FAILED_MESSAGE: &str = "Error uploading file. Please try again.";
pub const SEARCH_FAILED_MESSAGE: &str = "Error fetching outfit suggestions. Please try again.";

/// Static metadata for each variant: (error_code, recoverable, suggested_action, log_level).
fn style_error_static_metadata(
    err: &StyleError,
) -> (&'static str, bool, Option<&'static str>, LogLevel) {
    match err {
        StyleError::NoFileSelected => (
            "NO_FILE_SELECTED",
            false,
            Some("Select a photo before submitting"),
            LogLevel::Debug,
        ),
        StyleError::InvalidInput(_) => (
            "INVALID_INPUT",
            false,
            Some("Check the selected photo and try again"),
            LogLevel::Debug,
        ),
        StyleError::InvalidTransition { .. } => (
            "INVALID_TRANSITION",
            false,
            Some("Submit a photo to start a new recommendation"),
            LogLevel::Debug,
        ),
        StyleError::AnalysisProtocol(_) => (
            "ANALYSIS_PROTOCOL_ERROR",
            false,
            Some("Try a different photo"),
            LogLevel::Warn,
        ),
        StyleError::AnalysisTransport(_) => (
            "ANALYSIS_TRANSPORT_ERROR",
            true,
            Some("Resubmit the photo"),
            LogLevel::Error,
        ),
        StyleError::SearchTransport(_) => (
            "SEARCH_TRANSPORT_ERROR",
            true,
            Some("Resubmit the photo"),
            LogLevel::Error,
        ),
        StyleError::Config(_) => (
            "CONFIGURATION_ERROR",
            false,
            Some("Check CERESTYLE_* environment variables"),
            LogLevel::Error,
        ),
    }
}

impl ErrorMetadata for StyleError {
    fn error_code(&self) -> &'static str {
        style_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        style_error_static_metadata(self).1
    }

    fn suggested_action(&self) -> Option<&'static str> {
        style_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        style_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            StyleError::NoFileSelected => NO_FILE_MESSAGE.to_string(),
            StyleError::InvalidInput(ref msg) => msg.clone(),
            StyleError::InvalidTransition { .. } => self.to_string(),
            StyleError::AnalysisProtocol(_) | StyleError::AnalysisTransport(_) => {
                ANALYSIS_FAILED_MESSAGE.to_string()
            }
            StyleError::SearchTransport(_) => SEARCH_FAILED_MESSAGE.to_string(),
            StyleError::Config(_) => "Service is not configured".to_string(),
        }
    }
}
