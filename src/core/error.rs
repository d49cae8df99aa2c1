use std::fmt;

/// Comprehensive error types for dokkup operations
#[derive(Debug)]
pub enum DokkupError {
    /// IO error (file operations, etc.)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// Scan root does not exist
    RootNotFound(String),

    /// Scan root is not a directory
    NotADirectory(String),

    /// Scan was cancelled between files
    Cancelled,

    /// Regex compilation error
    Regex(regex::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// File walking/ignore error
    FileWalking(ignore::Error),

    /// Export serialization error
    Export(String),

    /// Browser launch error
    Browser(String),

    /// Invalid argument error
    InvalidArgument(String),
}

impl fmt::Display for DokkupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DokkupError::Io(err) => write!(f, "IO error: {err}"),
            DokkupError::Config(msg) => write!(f, "Configuration error: {msg}"),
            DokkupError::RootNotFound(path) => write!(f, "Scan root not found: {path}"),
            DokkupError::NotADirectory(path) => {
                write!(f, "Scan root is not a directory: {path}")
            }
            DokkupError::Cancelled => write!(f, "Scan cancelled: no catalog was produced"),
            DokkupError::Regex(err) => write!(f, "Regex error: {err}"),
            DokkupError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            DokkupError::FileWalking(err) => write!(f, "File walking error: {err}"),
            DokkupError::Export(msg) => write!(f, "Export error: {msg}"),
            DokkupError::Browser(msg) => write!(f, "Browser error: {msg}"),
            DokkupError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for DokkupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DokkupError::Io(err) => Some(err),
            DokkupError::Regex(err) => Some(err),
            DokkupError::TomlParsing(err) => Some(err),
            DokkupError::FileWalking(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DokkupError {
    fn from(err: std::io::Error) -> Self {
        DokkupError::Io(err)
    }
}

impl From<regex::Error> for DokkupError {
    fn from(err: regex::Error) -> Self {
        DokkupError::Regex(err)
    }
}

impl From<toml::de::Error> for DokkupError {
    fn from(err: toml::de::Error) -> Self {
        DokkupError::TomlParsing(err)
    }
}

impl From<ignore::Error> for DokkupError {
    fn from(err: ignore::Error) -> Self {
        DokkupError::FileWalking(err)
    }
}

/// Type alias for Results using DokkupError
pub type Result<T> = std::result::Result<T, DokkupError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        let config_error = DokkupError::Config("Invalid max_depth".to_string());
        assert_eq!(
            format!("{config_error}"),
            "Configuration error: Invalid max_depth"
        );

        let root_error = DokkupError::RootNotFound("/path/to/dir".to_string());
        assert_eq!(format!("{root_error}"), "Scan root not found: /path/to/dir");

        let not_dir = DokkupError::NotADirectory("/some/file".to_string());
        assert_eq!(
            format!("{not_dir}"),
            "Scan root is not a directory: /some/file"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let error = DokkupError::from(io_error);

        match error {
            DokkupError::Io(_) => {} // Expected
            _ => panic!("Expected Io variant"),
        }
    }

    #[test]
    #[allow(clippy::invalid_regex)]
    fn test_error_from_regex() {
        let regex_error = regex::Regex::new("[invalid").unwrap_err();
        let error = DokkupError::from(regex_error);

        match error {
            DokkupError::Regex(_) => {} // Expected
            _ => panic!("Expected Regex variant"),
        }
    }

    #[test]
    fn test_error_from_toml() {
        let toml_error = toml::from_str::<toml::Value>("invalid toml [").unwrap_err();
        let error = DokkupError::from(toml_error);

        match error {
            DokkupError::TomlParsing(_) => {} // Expected
            _ => panic!("Expected TomlParsing variant"),
        }
    }

    #[test]
    fn test_error_source() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = DokkupError::Io(io_error);
        assert!(error.source().is_some());

        let config_error = DokkupError::Config("test".to_string());
        assert!(config_error.source().is_none());

        assert!(DokkupError::Cancelled.source().is_none());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DokkupError>();
    }

    #[test]
    fn test_string_error_variants_display() {
        let errors = vec![
            DokkupError::Config("bad config".to_string()),
            DokkupError::RootNotFound("/missing".to_string()),
            DokkupError::NotADirectory("/file".to_string()),
            DokkupError::Export("bad path".to_string()),
            DokkupError::Browser("no launcher".to_string()),
            DokkupError::InvalidArgument("bad arg".to_string()),
        ];

        for error in errors {
            let display_str = format!("{error}");
            assert!(!display_str.is_empty());
            assert!(display_str.contains(":"));
        }
    }
}
