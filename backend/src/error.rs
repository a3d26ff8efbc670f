//! Error types shared by the offline pipeline and the prediction service.
//!
//! Every failure carries an [`ErrorContext`] so logs and HTTP responses can say
//! which operation, field or file was involved.

use std::fmt;
use std::path::{Path, PathBuf};

/// Result type used throughout the crate.
pub type ForecastResult<T> = Result<T, ForecastError>;

/// Structured context for forecast errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// The operation being performed (e.g., "predict", "save_model")
    pub operation: Option<String>,
    /// Request or config field involved, if any
    pub field: Option<String>,
    /// File involved, if any
    pub path: Option<PathBuf>,
    /// Additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with an operation name.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    /// Set the offending field.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Set the file path.
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set additional details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.operation.is_none()
            && self.field.is_none()
            && self.path.is_none()
            && self.details.is_none()
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref field) = self.field {
            parts.push(format!("field={}", field));
        }
        if let Some(ref path) = self.path {
            parts.push(format!("path={}", path.display()));
        }
        if let Some(ref details) = self.details {
            parts.push(format!("details={}", details));
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Error type for the forecasting pipeline and service.
#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    /// Malformed or out-of-domain input (request fields, empty datasets).
    #[error("Validation error: {message} {context}")]
    Validation {
        message: String,
        context: ErrorContext,
    },

    /// Training inputs cannot produce a model.
    #[error("Training error: {message} {context}")]
    Training {
        message: String,
        context: ErrorContext,
    },

    /// No artifact exists at the configured path.
    #[error("Artifact not found: {}", path.display())]
    ArtifactNotFound { path: PathBuf },

    /// Artifact exists but does not decode into a valid model.
    #[error("Artifact corrupt: {message} {context}")]
    ArtifactCorrupt {
        message: String,
        context: ErrorContext,
    },

    /// Filesystem failure while exporting or saving.
    #[error("IO error: {message} {context}")]
    Io {
        message: String,
        context: ErrorContext,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file or value is unusable.
    #[error("Configuration error: {message} {context}")]
    Configuration {
        message: String,
        context: ErrorContext,
    },
}

impl ForecastError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create a validation error with context.
    pub fn validation_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Validation {
            message: message.into(),
            context,
        }
    }

    /// Create a training error.
    pub fn training(message: impl Into<String>) -> Self {
        Self::Training {
            message: message.into(),
            context: ErrorContext::new("train"),
        }
    }

    /// Create an artifact-not-found error.
    pub fn artifact_not_found(path: impl AsRef<Path>) -> Self {
        Self::ArtifactNotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create an artifact-corrupt error for the given file.
    pub fn artifact_corrupt(message: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self::ArtifactCorrupt {
            message: message.into(),
            context: ErrorContext::new("load_model").with_path(path),
        }
    }

    /// Wrap an IO error with context.
    pub fn io(source: std::io::Error, context: ErrorContext) -> Self {
        Self::Io {
            message: source.to_string(),
            context,
            source,
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create a configuration error with context.
    pub fn configuration_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Configuration {
            message: message.into(),
            context,
        }
    }

    /// Stable machine-readable code for this error.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Training { .. } => "TRAINING_ERROR",
            Self::ArtifactNotFound { .. } => "ARTIFACT_NOT_FOUND",
            Self::ArtifactCorrupt { .. } => "ARTIFACT_CORRUPT",
            Self::Io { .. } => "IO_ERROR",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
        }
    }

    /// Human-readable message without the context suffix.
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message, .. }
            | Self::Training { message, .. }
            | Self::ArtifactCorrupt { message, .. }
            | Self::Io { message, .. }
            | Self::Configuration { message, .. } => message.clone(),
            Self::ArtifactNotFound { path } => {
                format!("no model artifact at {}", path.display())
            }
        }
    }

    /// Get the error context, if the variant carries one.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::Validation { context, .. }
            | Self::Training { context, .. }
            | Self::ArtifactCorrupt { context, .. }
            | Self::Io { context, .. }
            | Self::Configuration { context, .. } => Some(context),
            Self::ArtifactNotFound { .. } => None,
        }
    }

    /// Whether the error stems from caller input rather than the system.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_display_lists_set_fields() {
        let ctx = ErrorContext::new("predict")
            .with_field("hour")
            .with_details("got 25");
        assert_eq!(ctx.to_string(), "[operation=predict, field=hour, details=got 25]");
    }

    #[test]
    fn test_empty_context_displays_nothing() {
        let err = ForecastError::validation("dataset is empty");
        assert_eq!(err.to_string(), "Validation error: dataset is empty ");
    }

    #[test]
    fn test_kinds_are_stable() {
        assert_eq!(ForecastError::validation("x").kind(), "VALIDATION_ERROR");
        assert_eq!(ForecastError::training("x").kind(), "TRAINING_ERROR");
        assert_eq!(
            ForecastError::artifact_not_found("m.bin").kind(),
            "ARTIFACT_NOT_FOUND"
        );
        assert_eq!(
            ForecastError::artifact_corrupt("bad", "m.bin").kind(),
            "ARTIFACT_CORRUPT"
        );
        assert_eq!(ForecastError::configuration("x").kind(), "CONFIGURATION_ERROR");
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(
            ForecastError::io(io, ErrorContext::new("save_model")).kind(),
            "IO_ERROR"
        );
    }

    #[test]
    fn test_only_validation_is_client_error() {
        assert!(ForecastError::validation("x").is_client_error());
        assert!(!ForecastError::training("x").is_client_error());
        assert!(!ForecastError::artifact_not_found("m.bin").is_client_error());
    }

    #[test]
    fn test_not_found_message_names_path() {
        let err = ForecastError::artifact_not_found("/srv/model.bin");
        assert!(err.message().contains("/srv/model.bin"));
        assert!(err.context().is_none());
    }
}
