use alloc::string::String;

use thiserror::Error;

/// An error raised while decoding. Decoding stops at the first error.
///
/// The message of the [`ErrorKind`] is followed by the position in the input
/// where the problem was detected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at line {line}, column {column}")]
pub struct DecodeError {
    pub(crate) kind: ErrorKind,
    /// 1-based line of the offending input.
    pub line: usize,
    /// 1-based column of the offending input.
    pub column: usize,
}

impl DecodeError {
    pub(crate) fn new(kind: ErrorKind, (line, column): (usize, usize)) -> Self {
        Self { kind, line, column }
    }

    /// The classification of this error.
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

/// Classification of a [`DecodeError`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input could not be lexed at all; carries the raw offending text.
    #[error("Unrecognized token '{0}'")]
    UnrecognizedToken(String),
    /// A well-formed token appeared where the grammar forbids it; carries
    /// the token kind name (or the separator character).
    #[error("Unexpected token '{0}'")]
    UnexpectedToken(String),
    /// Input ended while a string or container was still open.
    #[error("Unexpected end-of-input")]
    UnexpectedEndOfInput,
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn display_includes_position() {
        let err = DecodeError::new(ErrorKind::UnrecognizedToken("XXX".into()), (2, 7));
        assert_eq!(err.to_string(), "Unrecognized token 'XXX' at line 2, column 7");
    }

    #[test]
    fn kind_messages() {
        assert_eq!(
            ErrorKind::UnexpectedToken("VALUE_NULL".into()).to_string(),
            "Unexpected token 'VALUE_NULL'"
        );
        assert_eq!(
            ErrorKind::UnexpectedEndOfInput.to_string(),
            "Unexpected end-of-input"
        );
    }
}
