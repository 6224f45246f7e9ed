use alloc::string::String;
use core::fmt;

/// Whether a number literal was written as an integer or with a fraction or
/// exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    /// `-?(0|[1-9][0-9]*)`
    Int,
    /// A number with a fraction and/or an exponent.
    Float,
}

/// A scalar JSON value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    /// A string with all escapes resolved.
    String(String),
    /// A number, kept as written in the source.
    Number {
        /// Source text of the number.
        text: String,
        /// Integer or float syntax.
        kind: NumberKind,
    },
    /// `true` or `false`.
    Bool(bool),
    /// `null`.
    Null,
}

impl Scalar {
    /// The token kind of this scalar.
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        match self {
            Scalar::String(_) => TokenKind::ValueString,
            Scalar::Number {
                kind: NumberKind::Int,
                ..
            } => TokenKind::ValueNumberInt,
            Scalar::Number {
                kind: NumberKind::Float,
                ..
            } => TokenKind::ValueNumberFloat,
            Scalar::Bool(true) => TokenKind::ValueTrue,
            Scalar::Bool(false) => TokenKind::ValueFalse,
            Scalar::Null => TokenKind::ValueNull,
        }
    }

    /// The literal text of this scalar, or `None` for `null`.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            Scalar::Number { text, .. } => Some(text),
            Scalar::Bool(true) => Some("true"),
            Scalar::Bool(false) => Some("false"),
            Scalar::Null => None,
        }
    }
}

/// One lexical unit produced by the [`Tokenizer`](crate::Tokenizer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `{`
    ObjectBegin,
    /// `}`
    ObjectEnd,
    /// `[`
    ArrayBegin,
    /// `]`
    ArrayEnd,
    /// An object key.
    FieldName(String),
    /// A string, number, boolean or null value.
    Scalar(Scalar),
    /// The input is exhausted and no value is open.
    EndOfInput,
}

impl Token {
    /// The kind of this token.
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::ObjectBegin => TokenKind::StartObject,
            Token::ObjectEnd => TokenKind::EndObject,
            Token::ArrayBegin => TokenKind::StartArray,
            Token::ArrayEnd => TokenKind::EndArray,
            Token::FieldName(_) => TokenKind::FieldName,
            Token::Scalar(scalar) => scalar.kind(),
            Token::EndOfInput => TokenKind::EndOfInput,
        }
    }
}

/// Kinds of [`Token`]s, named as they appear in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum TokenKind {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    FieldName,
    ValueString,
    ValueNumberInt,
    ValueNumberFloat,
    ValueTrue,
    ValueFalse,
    ValueNull,
    EndOfInput,
}

impl TokenKind {
    /// The upper-case name used in error messages, e.g. `VALUE_NULL`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::StartObject => "START_OBJECT",
            TokenKind::EndObject => "END_OBJECT",
            TokenKind::StartArray => "START_ARRAY",
            TokenKind::EndArray => "END_ARRAY",
            TokenKind::FieldName => "FIELD_NAME",
            TokenKind::ValueString => "VALUE_STRING",
            TokenKind::ValueNumberInt => "VALUE_NUMBER_INT",
            TokenKind::ValueNumberFloat => "VALUE_NUMBER_FLOAT",
            TokenKind::ValueTrue => "VALUE_TRUE",
            TokenKind::ValueFalse => "VALUE_FALSE",
            TokenKind::ValueNull => "VALUE_NULL",
            TokenKind::EndOfInput => "END_OF_INPUT",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
