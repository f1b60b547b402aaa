use thiserror::Error;

#[derive(Error, Debug)]
pub enum CallError {
    #[error("File error on {path}: {source}")]
    FileError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {context}: {source}")]
    ParseError {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported data file format: {path} (expected .csv or .json)")]
    UnsupportedFormat { path: String },

    #[error("Request to model service failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Invalid request template: {message}")]
    TemplateError { message: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Network,
    Configuration,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl CallError {
    pub fn file(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            path: path.into(),
            source,
        }
    }

    pub fn parse(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::ParseError {
            context: context.into(),
            source,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FileError { .. } => ErrorCategory::Io,
            Self::ParseError { .. } | Self::UnsupportedFormat { .. } | Self::TemplateError { .. } => {
                ErrorCategory::Data
            }
            Self::TransportError(_) => ErrorCategory::Network,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::SerializationError(_) => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路錯誤通常可以重試
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io | ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::FileError { .. } => "Check that the path exists and is readable/writable",
            Self::ParseError { .. } => {
                "Verify the file or server reply is valid JSON (an HTTP error page is not)"
            }
            Self::UnsupportedFormat { .. } => "Provide the data file as .csv or .json",
            Self::TransportError(_) => {
                "Check that the modelling service is running and the host:port is reachable"
            }
            Self::TemplateError { .. } => {
                "The template must be a JSON object whose dataSource is an object"
            }
            Self::SerializationError(_) => "This is an internal error, please report it",
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => {
                "Check the command line arguments and the profile file"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::FileError { path, .. } => format!("Could not access file '{}'", path),
            Self::ParseError { context, .. } => format!("{} is not valid JSON", context),
            Self::UnsupportedFormat { path } => {
                format!("Data file '{}' is neither CSV nor JSON", path)
            }
            Self::TransportError(e) => format!("Could not reach the model service: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CallError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_follows_category() {
        let unsupported = CallError::UnsupportedFormat {
            path: "data.txt".to_string(),
        };
        assert_eq!(unsupported.category(), ErrorCategory::Data);
        assert_eq!(unsupported.severity(), ErrorSeverity::High);

        let io = CallError::file(
            "out.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(io.category(), ErrorCategory::Io);
        assert_eq!(io.severity(), ErrorSeverity::Critical);

        let missing = CallError::MissingConfigError {
            field: "host".to_string(),
        };
        assert_eq!(missing.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_user_friendly_message_names_the_file() {
        let err = CallError::UnsupportedFormat {
            path: "notes.txt".to_string(),
        };
        assert!(err.user_friendly_message().contains("notes.txt"));
        assert!(err.to_string().contains(".csv or .json"));
    }
}
