//! Incremental JSON tokenizer.
//!
//! The [`Tokenizer`] turns UTF-8 text into [`Token`]s, one per call to
//! [`Tokenizer::next_token`]. Text may arrive in arbitrary chunks through
//! [`Tokenizer::feed`]; a token split across chunks is resumed where it
//! stopped. Separators (`,` and `:`) and whitespace are consumed internally,
//! so the grammar inside containers is enforced here.
//!
//! After one complete top-level value the tokenizer is back at its start
//! state, so a second value may follow directly (`{}{}`) or after
//! whitespace. [`Token::EndOfInput`] is produced only after
//! [`Tokenizer::finish`] and only when no value is open.
//!
//! # Examples
//!
//! ```rust
//! use jsonrecord::{Scalar, Token, Tokenizer};
//!
//! let mut tokenizer = Tokenizer::default();
//! tokenizer.feed(r#"{"a": tr"#);
//! assert_eq!(tokenizer.next_token().unwrap(), Some(Token::ObjectBegin));
//! assert_eq!(
//!     tokenizer.next_token().unwrap(),
//!     Some(Token::FieldName("a".into()))
//! );
//! // `tr` could still become `true`
//! assert_eq!(tokenizer.next_token().unwrap(), None);
//!
//! tokenizer.feed("ue}");
//! tokenizer.finish();
//! assert_eq!(
//!     tokenizer.next_token().unwrap(),
//!     Some(Token::Scalar(Scalar::Bool(true)))
//! );
//! assert_eq!(tokenizer.next_token().unwrap(), Some(Token::ObjectEnd));
//! assert_eq!(tokenizer.next_token().unwrap(), Some(Token::EndOfInput));
//! ```
#![allow(clippy::enum_glob_use)]

mod buffer;
mod escape_buffer;
mod number;
mod token;


use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};

use buffer::Buffer;
use escape_buffer::{SurrogateJoiner, UnicodeEscapeBuffer};
use number::classify_number;
pub use token::{NumberKind, Scalar, Token, TokenKind};

use crate::{DecodeError, ErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Represents a peeked character from the input buffer.
enum PeekedChar {
    /// The buffer is empty, more input may follow.
    Empty,
    Char(char),
    /// The buffer is empty and the input is closed.
    EndOfInput,
}

use PeekedChar::*;

/// Position in the grammar between tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Start,
    BeforePropertyName,
    BeforeNextPropertyName,
    AfterPropertyName,
    BeforePropertyValue,
    AfterPropertyValue,
    BeforeArrayValue,
    BeforeNextArrayValue,
    AfterArrayValue,
}

/// Position inside a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    Default,
    String,
    StringEscape,
    StringEscapeUnicode,
    Word,
    CommentStart,
    LineComment,
    BlockComment,
    BlockCommentStar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

enum Step {
    Continue,
    NeedMore,
    Emit(Token),
}

/// Pull-based JSON tokenizer over incrementally fed text.
#[derive(Debug)]
pub struct Tokenizer {
    source: Buffer,
    end_of_input: bool,

    line: usize,
    column: usize,
    token_start: (usize, usize),

    parse_state: ParseState,
    lex_state: LexState,
    containers: Vec<Container>,

    buffer: String, // text of the string or word being lexed
    string_is_key: bool,
    misplaced: bool, // the word being lexed sits where a separator belongs
    unicode_escape_buffer: UnicodeEscapeBuffer,
    surrogates: SurrogateJoiner,

    allow_comments: bool,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Tokenizer {
    /// Creates a tokenizer. With `allow_comments`, `//` and `/* */` comments
    /// are skipped like whitespace.
    #[must_use]
    pub fn new(allow_comments: bool) -> Self {
        Self {
            source: Buffer::new(),
            end_of_input: false,
            line: 1,
            column: 1,
            token_start: (1, 1),
            parse_state: ParseState::Start,
            lex_state: LexState::Default,
            containers: Vec::new(),
            buffer: String::new(),
            string_is_key: false,
            misplaced: false,
            unicode_escape_buffer: UnicodeEscapeBuffer::new(),
            surrogates: SurrogateJoiner::default(),
            allow_comments,
        }
    }

    /// Appends a chunk of text.
    pub fn feed(&mut self, text: &str) {
        self.source.push(text);
    }

    /// Closes the input; once the buffered text is consumed, the tokenizer
    /// yields [`Token::EndOfInput`] or an end-of-input error.
    pub fn finish(&mut self) {
        self.end_of_input = true;
    }

    /// Discards all buffered text and state.
    pub fn reset(&mut self) {
        *self = Self::new(self.allow_comments);
    }

    /// Current line and column (both 1-based).
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        (self.line, self.column)
    }

    /// Line and column where the most recent token started.
    #[must_use]
    pub fn token_position(&self) -> (usize, usize) {
        self.token_start
    }

    /// Number of containers currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.containers.len()
    }

    /// Produces the next token.
    ///
    /// Returns `Ok(None)` when the buffered text ends before the next token
    /// is complete and [`finish`](Self::finish) has not been called.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] for unlexable text, tokens in positions the
    /// grammar forbids, and input that ends inside a string or container.
    pub fn next_token(&mut self) -> Result<Option<Token>, DecodeError> {
        loop {
            let next_char = self.peek_char();
            match self.lex_state_step(next_char)? {
                Step::Continue => {}
                Step::NeedMore => return Ok(None),
                Step::Emit(token) => return Ok(Some(token)),
            }
        }
    }

    fn peek_char(&self) -> PeekedChar {
        match self.source.peek() {
            Some(ch) => Char(ch),
            None if self.end_of_input => EndOfInput,
            None => Empty,
        }
    }

    fn advance_char(&mut self) {
        if let Some(ch) = self.source.next() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    #[allow(clippy::too_many_lines)]
    fn lex_state_step(&mut self, next_char: PeekedChar) -> Result<Step, DecodeError> {
        match self.lex_state {
            LexState::Default => match next_char {
                Empty => Ok(Step::NeedMore),
                EndOfInput if self.containers.is_empty() => Ok(Step::Emit(Token::EndOfInput)),
                EndOfInput => Err(self.error(ErrorKind::UnexpectedEndOfInput)),
                Char(' ' | '\t' | '\n' | '\r') => {
                    self.advance_char();
                    Ok(Step::Continue)
                }
                Char('/') if self.allow_comments => {
                    self.token_start = self.position();
                    self.advance_char();
                    self.lex_state = LexState::CommentStart;
                    Ok(Step::Continue)
                }
                Char(c) => {
                    self.token_start = self.position();
                    self.dispatch(c)
                }
            },

            // -------------------------- WORDS ------------------------------
            LexState::Word => match next_char {
                Char(c) if self.is_word_char(c) => {
                    self.advance_char();
                    self.buffer.push(c);
                    Ok(Step::Continue)
                }
                Empty => Ok(Step::NeedMore),
                Char(_) | EndOfInput => self.finish_word(),
            },

            // -------------------------- STRING -----------------------------
            LexState::String => match next_char {
                Char('"') => {
                    self.advance_char();
                    Ok(Step::Emit(self.finish_string()))
                }
                Char('\\') => {
                    self.advance_char();
                    self.lex_state = LexState::StringEscape;
                    Ok(Step::Continue)
                }
                Char(c @ '\0'..='\x1F') => {
                    Err(self.error(ErrorKind::UnrecognizedToken(format_char(c))))
                }
                Char(_) => {
                    self.surrogates.flush(&mut self.buffer);
                    // Copied characters are never newlines, those are < 0x20.
                    let copied = self.source.copy_while(&mut self.buffer, |ch| {
                        ch != '\\' && ch != '"' && ch >= '\u{20}'
                    });
                    self.column += copied;
                    Ok(Step::Continue)
                }
                Empty => Ok(Step::NeedMore),
                EndOfInput => Err(self.error(ErrorKind::UnexpectedEndOfInput)),
            },

            LexState::StringEscape => match next_char {
                Char('u') => {
                    self.advance_char();
                    self.unicode_escape_buffer.reset();
                    self.lex_state = LexState::StringEscapeUnicode;
                    Ok(Step::Continue)
                }
                Char(c) => {
                    let unescaped = match c {
                        '"' | '\\' | '/' => c,
                        'b' => '\u{0008}',
                        'f' => '\u{000C}',
                        'n' => '\n',
                        'r' => '\r',
                        't' => '\t',
                        _ => {
                            return Err(self.error(ErrorKind::UnrecognizedToken(format!(
                                "\\{}",
                                format_char(c)
                            ))));
                        }
                    };
                    self.advance_char();
                    self.surrogates.flush(&mut self.buffer);
                    self.buffer.push(unescaped);
                    self.lex_state = LexState::String;
                    Ok(Step::Continue)
                }
                Empty => Ok(Step::NeedMore),
                EndOfInput => Err(self.error(ErrorKind::UnexpectedEndOfInput)),
            },

            LexState::StringEscapeUnicode => match next_char {
                Char(c) => match self.unicode_escape_buffer.feed(c) {
                    Ok(Some(unit)) => {
                        self.advance_char();
                        self.surrogates.push(unit, &mut self.buffer);
                        self.lex_state = LexState::String;
                        Ok(Step::Continue)
                    }
                    Ok(None) => {
                        self.advance_char();
                        Ok(Step::Continue)
                    }
                    Err(()) => {
                        let raw = format!(
                            "\\u{}{}",
                            self.unicode_escape_buffer.digits(),
                            format_char(c)
                        );
                        Err(self.error(ErrorKind::UnrecognizedToken(raw)))
                    }
                },
                Empty => Ok(Step::NeedMore),
                EndOfInput => Err(self.error(ErrorKind::UnexpectedEndOfInput)),
            },

            // -------------------------- COMMENTS ---------------------------
            LexState::CommentStart => match next_char {
                Char('/') => {
                    self.advance_char();
                    self.lex_state = LexState::LineComment;
                    Ok(Step::Continue)
                }
                Char('*') => {
                    self.advance_char();
                    self.lex_state = LexState::BlockComment;
                    Ok(Step::Continue)
                }
                Empty => Ok(Step::NeedMore),
                Char(_) | EndOfInput => Err(DecodeError::new(
                    ErrorKind::UnrecognizedToken("/".to_string()),
                    self.token_start,
                )),
            },

            LexState::LineComment => match next_char {
                Char('\n') => {
                    self.advance_char();
                    self.lex_state = LexState::Default;
                    Ok(Step::Continue)
                }
                Char(_) => {
                    self.advance_char();
                    Ok(Step::Continue)
                }
                Empty => Ok(Step::NeedMore),
                EndOfInput => {
                    self.lex_state = LexState::Default;
                    Ok(Step::Continue)
                }
            },

            LexState::BlockComment => match next_char {
                Char('*') => {
                    self.advance_char();
                    self.lex_state = LexState::BlockCommentStar;
                    Ok(Step::Continue)
                }
                Char(_) => {
                    self.advance_char();
                    Ok(Step::Continue)
                }
                Empty => Ok(Step::NeedMore),
                EndOfInput => Err(self.error(ErrorKind::UnexpectedEndOfInput)),
            },

            LexState::BlockCommentStar => match next_char {
                Char('/') => {
                    self.advance_char();
                    self.lex_state = LexState::Default;
                    Ok(Step::Continue)
                }
                Char(c) => {
                    self.advance_char();
                    if c != '*' {
                        self.lex_state = LexState::BlockComment;
                    }
                    Ok(Step::Continue)
                }
                Empty => Ok(Step::NeedMore),
                EndOfInput => Err(self.error(ErrorKind::UnexpectedEndOfInput)),
            },
        }
    }

    /// Handles the first character of a token; `c` is not consumed yet.
    fn dispatch(&mut self, c: char) -> Result<Step, DecodeError> {
        use ParseState::*;

        match (self.parse_state, c) {
            (Start | BeforePropertyValue | BeforeArrayValue | BeforeNextArrayValue, '{') => {
                self.advance_char();
                self.containers.push(Container::Object);
                self.parse_state = BeforePropertyName;
                Ok(Step::Emit(Token::ObjectBegin))
            }
            (Start | BeforePropertyValue | BeforeArrayValue | BeforeNextArrayValue, '[') => {
                self.advance_char();
                self.containers.push(Container::Array);
                self.parse_state = BeforeArrayValue;
                Ok(Step::Emit(Token::ArrayBegin))
            }
            (Start | BeforePropertyValue | BeforeArrayValue | BeforeNextArrayValue, '"') => {
                self.advance_char();
                self.start_string(false);
                Ok(Step::Continue)
            }
            (BeforePropertyName | BeforeNextPropertyName, '"') => {
                self.advance_char();
                self.start_string(true);
                Ok(Step::Continue)
            }
            (BeforePropertyName | AfterPropertyValue, '}')
            | (BeforeArrayValue | AfterArrayValue, ']') => {
                self.advance_char();
                Ok(Step::Emit(self.close()))
            }
            (AfterPropertyName, ':') => {
                self.advance_char();
                self.parse_state = BeforePropertyValue;
                Ok(Step::Continue)
            }
            (AfterPropertyValue, ',') => {
                self.advance_char();
                self.parse_state = BeforeNextPropertyName;
                Ok(Step::Continue)
            }
            (AfterArrayValue, ',') => {
                self.advance_char();
                self.parse_state = BeforeNextArrayValue;
                Ok(Step::Continue)
            }
            (Start | BeforePropertyValue | BeforeArrayValue | BeforeNextArrayValue, c)
                if self.is_word_char(c) =>
            {
                self.start_word(false);
                Ok(Step::Continue)
            }
            (_, c) => self.misplaced(c),
        }
    }

    /// Reports a token that the grammar does not allow here.
    fn misplaced(&mut self, c: char) -> Result<Step, DecodeError> {
        let name = match c {
            '{' => TokenKind::StartObject.name(),
            '}' => TokenKind::EndObject.name(),
            '[' => TokenKind::StartArray.name(),
            ']' => TokenKind::EndArray.name(),
            '"' => TokenKind::ValueString.name(),
            ',' => ",",
            ':' => ":",
            c if self.is_word_char(c) => {
                // Lex the whole word first so that the error can name it.
                self.start_word(true);
                return Ok(Step::Continue);
            }
            c => return Err(self.error(ErrorKind::UnrecognizedToken(format_char(c)))),
        };
        Err(self.error(ErrorKind::UnexpectedToken(name.to_string())))
    }

    fn start_string(&mut self, is_key: bool) {
        self.buffer.clear();
        self.string_is_key = is_key;
        self.surrogates.reset();
        self.lex_state = LexState::String;
    }

    fn finish_string(&mut self) -> Token {
        self.surrogates.flush(&mut self.buffer);
        self.lex_state = LexState::Default;
        let value = core::mem::take(&mut self.buffer);
        if self.string_is_key {
            self.parse_state = ParseState::AfterPropertyName;
            Token::FieldName(value)
        } else {
            self.after_value();
            Token::Scalar(Scalar::String(value))
        }
    }

    fn start_word(&mut self, misplaced: bool) {
        self.buffer.clear();
        self.misplaced = misplaced;
        self.lex_state = LexState::Word;
    }

    fn finish_word(&mut self) -> Result<Step, DecodeError> {
        self.lex_state = LexState::Default;
        let word = core::mem::take(&mut self.buffer);
        let misplaced = core::mem::take(&mut self.misplaced);

        let scalar = if word == "true" {
            Scalar::Bool(true)
        } else if word == "false" {
            Scalar::Bool(false)
        } else if word == "null" {
            Scalar::Null
        } else if let Some(kind) = classify_number(&word) {
            Scalar::Number { text: word, kind }
        } else {
            return Err(DecodeError::new(
                ErrorKind::UnrecognizedToken(word.chars().map(format_char).collect()),
                self.token_start,
            ));
        };

        if misplaced {
            return Err(DecodeError::new(
                ErrorKind::UnexpectedToken(scalar.kind().name().to_string()),
                self.token_start,
            ));
        }

        self.after_value();
        Ok(Step::Emit(Token::Scalar(scalar)))
    }

    fn close(&mut self) -> Token {
        let token = match self.containers.pop() {
            Some(Container::Array) => Token::ArrayEnd,
            _ => Token::ObjectEnd,
        };
        self.after_value();
        token
    }

    fn after_value(&mut self) {
        self.parse_state = match self.containers.last() {
            None => ParseState::Start,
            Some(Container::Object) => ParseState::AfterPropertyValue,
            Some(Container::Array) => ParseState::AfterArrayValue,
        };
    }

    fn is_word_char(&self, c: char) -> bool {
        !matches!(
            c,
            ' ' | '\t' | '\n' | '\r' | '{' | '}' | '[' | ']' | ',' | ':' | '"'
        ) && !(self.allow_comments && c == '/')
    }

    fn error(&self, kind: ErrorKind) -> DecodeError {
        DecodeError::new(kind, self.position())
    }
}

fn format_char(c: char) -> String {
    if c.is_control() {
        format!("\\u{:04X}", c as u32)
    } else {
        c.to_string()
    }
}
