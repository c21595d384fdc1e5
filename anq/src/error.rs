//! Error types for ANQ operations.

/// A query that could not be parsed.
///
/// `location` is the zero-based character column of the furthest point the
/// parser reached before failing, suitable for highlighting in a search field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} (column {location})")]
pub struct ParseError {
    /// Human-readable description of what was expected at `location`.
    pub message: String,
    /// Zero-based character column into the parsed string.
    pub location: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, location: usize) -> Self {
        Self {
            message: message.into(),
            location,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new("Expected \"s:\" but \"x\" found.", 4);
        assert_eq!(err.to_string(), "Expected \"s:\" but \"x\" found. (column 4)");
    }

    #[test]
    fn test_parse_error_converts() {
        let err: Error = ParseError::new("oops", 0).into();
        assert!(matches!(err, Error::Parse(ref e) if e.location == 0));
        assert_eq!(err.to_string(), "Parse error: oops (column 0)");
    }
}
