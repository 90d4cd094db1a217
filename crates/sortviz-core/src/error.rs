#![forbid(unsafe_code)]

//! Error type for user-facing name and value parsing.
//!
//! The step path itself is total and never fails; only the configuration
//! surface (algorithm and theme names, numeric settings) can be malformed.

/// Parse error for configuration inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Name does not match any [`Algorithm`](crate::Algorithm).
    UnknownAlgorithm(String),
    /// Name does not match any [`Theme`](crate::Theme).
    UnknownTheme(String),
    /// A numeric setting could not be parsed.
    InvalidNumber {
        /// Setting name, e.g. `"size"`.
        field: &'static str,
        /// The rejected input.
        value: String,
    },
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnknownAlgorithm(name) => write!(
                f,
                "unknown algorithm '{name}' (expected bubble, quick, merge, heap, selection or insertion)"
            ),
            Self::UnknownTheme(name) => {
                write!(f, "unknown theme '{name}' (expected default, space or tree)")
            }
            Self::InvalidNumber { field, value } => {
                write!(f, "invalid {field} value: {value}")
            }
        }
    }
}

impl std::error::Error for ParseError {}
