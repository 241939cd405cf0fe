use std::fmt;

/// Comprehensive error types for tetreport operations
#[derive(Debug)]
pub enum TetReportError {
    /// IO error (draft files, exports, logo)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// JSON (de)serialization error for drafts and JSON exports
    Json(serde_json::Error),

    /// CSV writing error
    Csv(csv::Error),

    /// A numeric form field received a value that could not be accepted
    InvalidNumber {
        field: String,
        value: String,
        reason: String,
    },

    /// Unknown or read-only field, or a position outside the table
    InvalidField(String),

    /// Invalid argument error
    InvalidArgument(String),

    /// Report is not ready for the requested export
    Validation(Vec<String>),

    /// Interactive prompt error
    Dialog(dialoguer::Error),
}

impl fmt::Display for TetReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TetReportError::Io(err) => write!(f, "IO error: {err}"),
            TetReportError::Config(msg) => write!(f, "Configuration error: {msg}"),
            TetReportError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            TetReportError::Json(err) => write!(f, "JSON error: {err}"),
            TetReportError::Csv(err) => write!(f, "CSV error: {err}"),
            TetReportError::InvalidNumber {
                field,
                value,
                reason,
            } => write!(f, "Invalid number for '{field}': '{value}' ({reason})"),
            TetReportError::InvalidField(msg) => write!(f, "Invalid field: {msg}"),
            TetReportError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            TetReportError::Validation(issues) => {
                write!(f, "Validation error: {}", issues.join("; "))
            }
            TetReportError::Dialog(err) => write!(f, "Dialog error: {err}"),
        }
    }
}

impl std::error::Error for TetReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TetReportError::Io(err) => Some(err),
            TetReportError::TomlParsing(err) => Some(err),
            TetReportError::Json(err) => Some(err),
            TetReportError::Csv(err) => Some(err),
            TetReportError::Dialog(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TetReportError {
    fn from(err: std::io::Error) -> Self {
        TetReportError::Io(err)
    }
}

impl From<toml::de::Error> for TetReportError {
    fn from(err: toml::de::Error) -> Self {
        TetReportError::TomlParsing(err)
    }
}

impl From<serde_json::Error> for TetReportError {
    fn from(err: serde_json::Error) -> Self {
        TetReportError::Json(err)
    }
}

impl From<csv::Error> for TetReportError {
    fn from(err: csv::Error) -> Self {
        TetReportError::Csv(err)
    }
}

impl From<dialoguer::Error> for TetReportError {
    fn from(err: dialoguer::Error) -> Self {
        TetReportError::Dialog(err)
    }
}

/// Type alias for Results using TetReportError
pub type Result<T> = std::result::Result<T, TetReportError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        let config_error = TetReportError::Config("Invalid orientation".to_string());
        assert_eq!(
            format!("{config_error}"),
            "Configuration error: Invalid orientation"
        );

        let number_error = TetReportError::InvalidNumber {
            field: "disbursed".to_string(),
            value: "abc".to_string(),
            reason: "not a number".to_string(),
        };
        assert_eq!(
            format!("{number_error}"),
            "Invalid number for 'disbursed': 'abc' (not a number)"
        );
    }

    #[test]
    fn test_validation_error_joins_issues() {
        let error = TetReportError::Validation(vec![
            "Institution name is required".to_string(),
            "Location is required".to_string(),
        ]);
        assert_eq!(
            format!("{error}"),
            "Validation error: Institution name is required; Location is required"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let error = TetReportError::from(io_error);

        match error {
            TetReportError::Io(_) => {} // Expected
            _ => panic!("Expected Io variant"),
        }
    }

    #[test]
    fn test_error_from_toml() {
        let toml_error = toml::from_str::<toml::Value>("invalid toml [").unwrap_err();
        let error = TetReportError::from(toml_error);

        match error {
            TetReportError::TomlParsing(_) => {} // Expected
            _ => panic!("Expected TomlParsing variant"),
        }
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = TetReportError::from(json_error);

        match error {
            TetReportError::Json(_) => {} // Expected
            _ => panic!("Expected Json variant"),
        }
    }

    #[test]
    fn test_error_source() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = TetReportError::Io(io_error);

        let source = error.source();
        assert!(source.is_some());
        assert!(format!("{}", source.unwrap()).contains("file not found"));

        let config_error = TetReportError::Config("test".to_string());
        assert!(config_error.source().is_none());
    }

    #[test]
    fn test_result_type_alias() {
        let success: Result<i32> = Ok(42);
        let error: Result<i32> = Err(TetReportError::InvalidField("s_no".to_string()));

        assert!(success.is_ok());
        assert!(error.is_err());
    }
}
