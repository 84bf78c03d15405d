//! Error types with diagnostics using miette
//!
//! Core operations fail with [`Error`]; the expression parser reports
//! [`ParseError`] with a span into the offending source text.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result alias for core operations
pub type Result<T, E = Error> = std::result::Result<T, E>;

// ============================================================================
// Core Errors
// ============================================================================

/// Errors raised by polynomial, hull and pipeline operations
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum Error {
    /// The caller handed over something the operation cannot work with.
    /// Retrying with the same input fails the same way.
    #[error("invalid input: {reason}")]
    #[diagnostic(code(gauss_lucas::invalid_input))]
    InvalidInput { reason: &'static str },

    /// The root solver did not converge, or produced (or was given) values
    /// that are NaN or infinite.
    #[error("numeric degeneracy: {reason}")]
    #[diagnostic(
        code(gauss_lucas::numeric_degeneracy),
        help("check that every coefficient and root position is finite")
    )]
    NumericDegeneracy { reason: String },
}

impl Error {
    pub(crate) fn invalid(reason: &'static str) -> Self {
        Error::InvalidInput { reason }
    }

    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Error::NumericDegeneracy {
            reason: reason.into(),
        }
    }
}

// ============================================================================
// Parse Errors
// ============================================================================

/// Errors that occur while parsing a polynomial expression
#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    #[error("syntax error: {message}")]
    #[diagnostic(code(gauss_lucas::parse::syntax))]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("invalid number: {literal}")]
    #[diagnostic(code(gauss_lucas::parse::invalid_number))]
    InvalidNumber {
        literal: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("not a finite number")]
        span: SourceSpan,
    },

    #[error("exponent too large: {exponent}")]
    #[diagnostic(
        code(gauss_lucas::parse::exponent_too_large),
        help("exponents are limited to {max}")
    )]
    ExponentTooLarge {
        exponent: String,
        max: u32,
        #[source_code]
        src: NamedSource<String>,
        #[label("this exponent")]
        span: SourceSpan,
    },

    #[error("expression degree exceeds {max}")]
    #[diagnostic(code(gauss_lucas::parse::degree_too_large))]
    DegreeTooLarge {
        max: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("this product")]
        span: SourceSpan,
    },
}

/// Source context for parse error reporting
#[derive(Debug, Clone)]
pub(crate) struct SourceContext {
    name: String,
    source: String,
}

impl SourceContext {
    pub(crate) fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub(crate) fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_message() {
        let err = Error::invalid("empty point set");
        assert_eq!(err.to_string(), "invalid input: empty point set");
    }

    #[test]
    fn degeneracy_carries_reason() {
        let err = Error::degenerate(format!("{} non-finite roots", 2));
        assert!(matches!(err, Error::NumericDegeneracy { ref reason } if reason == "2 non-finite roots"));
        assert!(err.code().is_some());
    }
}
