//! Decoding errors

use core::fmt;

/// Errors that can occur while decoding a JSON document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Document is not valid JSON or has the wrong shape
    Malformed {
        /// 1-based line of the failure
        line: usize,
        /// 1-based column of the failure
        column: usize,
    },
    /// Document is valid but holds no usable entry
    Empty,
}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        DecodeError::Malformed {
            line: e.line(),
            column: e.column(),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Malformed { line, column } => {
                write!(f, "malformed JSON at {}:{}", line, column)
            }
            DecodeError::Empty => f.write_str("empty response"),
        }
    }
}
