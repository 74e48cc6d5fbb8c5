//! Centralized error types for sharebridge.

use thiserror::Error;

/// All errors produced by the sharebridge library.
///
/// The C boundary contract has no error channel at all; every rejection a
/// batch can earn on its way across the boundary is enumerated here instead
/// of being silently dropped.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// A sequence pointer was null even though its length field was nonzero.
    #[error("{collection} array is null but declares {declared} entries")]
    NullSequence {
        collection: &'static str,
        declared: i64,
    },

    /// A sequence length field was negative.
    #[error("{collection} length is negative ({declared})")]
    NegativeLength {
        collection: &'static str,
        declared: i64,
    },

    /// An entry pointer inside a sequence was null.
    #[error("{collection}[{index}] is a null entry")]
    NullEntry {
        collection: &'static str,
        index: usize,
    },

    /// A required string field was a null pointer.
    #[error("field '{field}' is a null pointer")]
    NullField { field: &'static str },

    /// A string field was not valid UTF-8.
    #[error("field '{field}' is not valid UTF-8: {source}")]
    InvalidUtf8 {
        field: &'static str,
        source: std::str::Utf8Error,
    },

    /// A required string field was empty.
    #[error("field '{field}' must not be empty")]
    EmptyField { field: &'static str },

    /// A collection exceeds the configured entry limit.
    #[error("{collection} has {count} entries, limit is {limit}")]
    TooManyEntries {
        collection: &'static str,
        count: usize,
        limit: usize,
    },

    /// A string field exceeds the configured byte limit.
    #[error("field '{field}' is {size} bytes, limit is {limit}")]
    FieldTooLarge {
        field: &'static str,
        size: usize,
        limit: usize,
    },

    /// The installed sink refused or failed to take delivery.
    #[error("sink rejected batch: {0}")]
    SinkError(String),
}

/// Convenience alias for `Result<T, BridgeError>`.
pub type Result<T> = std::result::Result<T, BridgeError>;

impl BridgeError {
    /// Stable status code reported on the checked FFI path.
    ///
    /// `0` is reserved for success; every rejection category maps to a
    /// distinct negative value so callers without access to the log can
    /// still categorize failures.
    pub fn status_code(&self) -> i32 {
        match self {
            Self::NullSequence { .. } => -1,
            Self::NegativeLength { .. } => -2,
            Self::NullEntry { .. } => -3,
            Self::NullField { .. } => -4,
            Self::InvalidUtf8 { .. } => -5,
            Self::EmptyField { .. } => -6,
            Self::TooManyEntries { .. } => -7,
            Self::FieldTooLarge { .. } => -8,
            Self::SinkError(_) => -9,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_are_distinct() {
        let errors = [
            BridgeError::NullSequence {
                collection: "file",
                declared: 3,
            },
            BridgeError::NegativeLength {
                collection: "text",
                declared: -1,
            },
            BridgeError::NullEntry {
                collection: "wifi_credentials",
                index: 0,
            },
            BridgeError::NullField { field: "ssid" },
            BridgeError::EmptyField { field: "file_name" },
            BridgeError::TooManyEntries {
                collection: "file",
                count: 10,
                limit: 5,
            },
            BridgeError::FieldTooLarge {
                field: "text_body",
                size: 100,
                limit: 10,
            },
            BridgeError::SinkError("closed".into()),
        ];
        let mut codes: Vec<i32> = errors.iter().map(|e| e.status_code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
        assert!(codes.iter().all(|&c| c < 0));
    }

    #[test]
    fn test_display_names_the_offender() {
        let err = BridgeError::NullEntry {
            collection: "text",
            index: 4,
        };
        assert_eq!(err.to_string(), "text[4] is a null entry");

        let err = BridgeError::EmptyField { field: "ssid" };
        assert!(err.to_string().contains("ssid"));
    }
}
