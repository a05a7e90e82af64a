use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

use crate::parser::Rule;

/// Errors raised while resolving runtime tokens
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid length in token '{token}': {source}")]
    InvalidLength {
        token: String,
        #[source]
        source: ParseIntError,
    },

    #[error("length {length} in token '{token}' exceeds 2147483647")]
    LengthTooLarge { token: String, length: u32 },

    #[error("sequential numbers of width {length} are not supported (expected 1..=19 digits)")]
    UnsupportedWidth { length: u32 },

    #[error("sequential numbers of width {length} are exhausted (last issued {max})")]
    SequenceExhausted { length: u32, max: u64 },

    #[error("invalid date/time pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("failed to read XML file '{}': {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unknown token '${{{0}}}'")]
    UnknownToken(String),

    #[error("template syntax error: {0}")]
    Syntax(#[from] Box<pest::error::Error<Rule>>),
}

pub type Result<T> = std::result::Result<T, ResolveError>;

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_file_read_message_names_path_and_cause() {
        let err = ResolveError::FileRead {
            path: PathBuf::from("soap/request.xml"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(
            err.to_string(),
            "failed to read XML file 'soap/request.xml': no such file"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_invalid_length_keeps_cause() {
        let source = "x".parse::<u32>().unwrap_err();
        let err = ResolveError::InvalidLength {
            token: "RANDOM.NUMBER:x".into(),
            source,
        };
        assert!(err.to_string().starts_with("invalid length in token 'RANDOM.NUMBER:x'"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_length_too_large_message() {
        let err = ResolveError::LengthTooLarge {
            token: "RANDOM.STRING:3000000000".into(),
            length: 3_000_000_000,
        };
        assert_eq!(
            err.to_string(),
            "length 3000000000 in token 'RANDOM.STRING:3000000000' exceeds 2147483647"
        );
    }
}
