//! The record decoder.
//!
//! [`Decoder`] drives a [`Tokenizer`] and turns its tokens into
//! [`StreamReceiver`] calls. Open containers are tracked on an explicit
//! [`FrameStack`], so decoding is never recursive and a document may be fed in
//! arbitrary chunks: events are emitted as soon as the token that triggers
//! them is complete.
//!
//! # Naming
//!
//! - An object field named `k` holding an object becomes `startEntity("k")`.
//! - A field holding an array becomes `startEntity("k[]")`; its elements are
//!   named `"1"`, `"2"`, ... by position.
//! - Scalars become `literal(name, value)`; `null` is passed as `None`.
//!
//! # Examples
//!
//! ```rust
//! use jsonrecord::{Decoder, Event};
//!
//! let mut decoder = Decoder::default();
//! let mut events: Vec<Event> = Vec::new();
//!
//! decoder.feed(r#"{"a":[["x"]]}{"b""#, &mut events).unwrap();
//! decoder.feed(r#":true}"#, &mut events).unwrap();
//! decoder.finish(&mut events).unwrap();
//!
//! assert_eq!(
//!     events,
//!     vec![
//!         Event::start_record("1"),
//!         Event::start_entity("a[]"),
//!         Event::start_entity("1[]"),
//!         Event::literal("1", Some("x")),
//!         Event::EndEntity,
//!         Event::EndEntity,
//!         Event::EndRecord,
//!         Event::start_record("2"),
//!         Event::literal("b", Some("true")),
//!         Event::EndRecord,
//!     ]
//! );
//! ```
use alloc::string::{String, ToString};

use bstr::ByteSlice;

use crate::{
    DecodeError, DecoderOptions, ErrorKind, StreamReceiver,
    frame::{Frame, FrameStack},
    lexer::{Scalar, Token, TokenKind, Tokenizer},
    template,
};

/// Decodes concatenated JSON objects into record events.
///
/// One instance keeps one record counter: ids continue across calls to
/// [`process`](Self::process), [`feed`](Self::feed) and
/// [`finish`](Self::finish) until [`reset`](Self::reset) is called.
/// Independent inputs that need independent ids should use independent
/// decoders.
#[derive(Debug)]
pub struct Decoder {
    options: DecoderOptions,
    tokenizer: Tokenizer,
    frames: FrameStack,
    // Counts up from a u64 start in u128, so it never wraps.
    record_count: u128,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(DecoderOptions::default())
    }
}

impl Decoder {
    /// Creates a decoder with the given options.
    #[must_use]
    pub fn new(options: DecoderOptions) -> Self {
        Self {
            tokenizer: Tokenizer::new(options.allow_comments),
            frames: FrameStack::new(),
            record_count: u128::from(options.record_count),
            options,
        }
    }

    /// The options this decoder was created with.
    #[must_use]
    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// The id the next record will receive.
    #[must_use]
    pub fn next_record_id(&self) -> String {
        template::render(&self.options.record_id, self.record_count)
    }

    /// Decodes one complete text: every top-level object in it becomes a
    /// record. Blank text produces no events.
    ///
    /// This is [`feed`](Self::feed) followed by [`finish`](Self::finish).
    ///
    /// # Errors
    ///
    /// Returns the first [`DecodeError`] found. Events emitted before the
    /// error are not retracted, and the record being decoded is left open.
    pub fn process<R>(&mut self, text: &str, receiver: &mut R) -> Result<(), DecodeError>
    where
        R: StreamReceiver + ?Sized,
    {
        self.feed(text, receiver)?;
        self.finish(receiver)
    }

    /// Like [`process`](Self::process) for raw bytes.
    ///
    /// Invalid UTF-8 is reported as an unrecognized token once the valid
    /// prefix has been decoded.
    ///
    /// # Errors
    ///
    /// See [`process`](Self::process).
    pub fn process_bytes<R>(&mut self, bytes: &[u8], receiver: &mut R) -> Result<(), DecodeError>
    where
        R: StreamReceiver + ?Sized,
    {
        match bytes.to_str() {
            Ok(text) => self.process(text, receiver),
            Err(err) => {
                let (valid, invalid) = bytes.split_at(err.valid_up_to());
                self.feed(&valid.to_str_lossy(), receiver)?;

                let len = err.error_len().unwrap_or(invalid.len());
                let raw = invalid[..len].escape_bytes().to_string();
                let err = DecodeError::new(
                    ErrorKind::UnrecognizedToken(raw),
                    self.tokenizer.position(),
                );
                Err(self.abort(err))
            }
        }
    }

    /// Feeds a chunk of text and emits the events of every token completed by
    /// it. A token cut off at the end of the chunk is resumed by the next
    /// call.
    ///
    /// # Errors
    ///
    /// See [`process`](Self::process). After an error, unconsumed input is
    /// discarded and the next call starts a fresh document.
    pub fn feed<R>(&mut self, chunk: &str, receiver: &mut R) -> Result<(), DecodeError>
    where
        R: StreamReceiver + ?Sized,
    {
        self.tokenizer.feed(chunk);
        self.drain(receiver)
    }

    /// Marks the end of the fed input and emits the remaining events.
    ///
    /// # Errors
    ///
    /// Returns an end-of-input error if a record is still open, in addition to
    /// the errors of [`process`](Self::process).
    pub fn finish<R>(&mut self, receiver: &mut R) -> Result<(), DecodeError>
    where
        R: StreamReceiver + ?Sized,
    {
        self.tokenizer.finish();
        self.drain(receiver)?;
        self.tokenizer.reset();
        Ok(())
    }

    /// Discards any partially fed input and restarts record ids at
    /// [`DecoderOptions::record_count`].
    pub fn reset(&mut self) {
        self.tokenizer.reset();
        self.frames.clear();
        self.record_count = u128::from(self.options.record_count);
    }

    fn drain<R>(&mut self, receiver: &mut R) -> Result<(), DecodeError>
    where
        R: StreamReceiver + ?Sized,
    {
        loop {
            let token = match self.tokenizer.next_token() {
                Ok(Some(token)) => token,
                Ok(None) => return Ok(()),
                Err(err) => return Err(self.abort(err)),
            };

            if token == Token::EndOfInput {
                if self.frames.is_empty() {
                    return Ok(());
                }
                let err = DecodeError::new(
                    ErrorKind::UnexpectedEndOfInput,
                    self.tokenizer.position(),
                );
                return Err(self.abort(err));
            }

            if let Err(kind) = self.consume(token, receiver) {
                let err = DecodeError::new(kind, self.tokenizer.token_position());
                return Err(self.abort(err));
            }
        }
    }

    fn abort(&mut self, err: DecodeError) -> DecodeError {
        tracing::debug!(
            error = %err,
            depth = self.frames.depth(),
            "decoding aborted"
        );
        self.tokenizer.reset();
        self.frames.clear();
        err
    }

    fn consume<R>(&mut self, token: Token, receiver: &mut R) -> Result<(), ErrorKind>
    where
        R: StreamReceiver + ?Sized,
    {
        if self.frames.is_empty() {
            return self.open_record(&token, receiver);
        }

        match token {
            Token::FieldName(name) => self.set_pending_key(name),
            Token::ObjectEnd | Token::ArrayEnd => self.close(&token, receiver),
            token => {
                let name = self.next_name(&token)?;
                self.emit_value(name, token, receiver)
            }
        }
    }

    fn open_record<R>(&mut self, token: &Token, receiver: &mut R) -> Result<(), ErrorKind>
    where
        R: StreamReceiver + ?Sized,
    {
        if *token != Token::ObjectBegin {
            return Err(unexpected(token));
        }

        let id = self.next_record_id();
        self.record_count += 1;
        tracing::trace!(id = %id, "start record");
        receiver.start_record(&id);
        self.frames.push(Frame::new_record_frame());
        Ok(())
    }

    fn set_pending_key(&mut self, name: String) -> Result<(), ErrorKind> {
        match self.frames.last_mut() {
            Some(Frame::Record { pending_key } | Frame::Object { pending_key }) => {
                *pending_key = Some(name);
                Ok(())
            }
            _ => Err(ErrorKind::UnexpectedToken(
                TokenKind::FieldName.name().to_string(),
            )),
        }
    }

    fn close<R>(&mut self, token: &Token, receiver: &mut R) -> Result<(), ErrorKind>
    where
        R: StreamReceiver + ?Sized,
    {
        match (self.frames.pop(), token) {
            (Some(Frame::Record { .. }), Token::ObjectEnd) => {
                receiver.end_record();
                tracing::trace!("end record");
                Ok(())
            }
            (Some(Frame::Object { .. }), Token::ObjectEnd)
            | (Some(Frame::Array { .. }), Token::ArrayEnd) => {
                receiver.end_entity();
                Ok(())
            }
            _ => Err(unexpected(token)),
        }
    }

    /// Name of the value `token` starts: the pending key of the enclosing
    /// object, or the position within the enclosing array.
    fn next_name(&mut self, token: &Token) -> Result<String, ErrorKind> {
        match self.frames.last_mut() {
            Some(Frame::Record { pending_key } | Frame::Object { pending_key }) => {
                pending_key.take().ok_or_else(|| unexpected(token))
            }
            Some(Frame::Array { next_index }) => {
                let index = u128::from(*next_index);
                let name = template::render(&self.options.array_name, index);
                *next_index += 1;
                Ok(name)
            }
            None => Err(unexpected(token)),
        }
    }

    fn emit_value<R>(
        &mut self,
        mut name: String,
        token: Token,
        receiver: &mut R,
    ) -> Result<(), ErrorKind>
    where
        R: StreamReceiver + ?Sized,
    {
        match token {
            Token::ObjectBegin => {
                receiver.start_entity(&name);
                self.frames.push(Frame::new_object_frame());
            }
            Token::ArrayBegin => {
                name.push_str(&self.options.array_marker);
                receiver.start_entity(&name);
                self.frames.push(Frame::new_array_frame());
            }
            Token::Scalar(scalar) => {
                let marker = match scalar {
                    Scalar::Bool(_) => self.options.boolean_marker.as_deref(),
                    Scalar::Number { .. } => self.options.number_marker.as_deref(),
                    Scalar::String(_) | Scalar::Null => None,
                };
                if let Some(marker) = marker {
                    name.push_str(marker);
                }
                receiver.literal(&name, scalar.as_text());
            }
            token => return Err(unexpected(&token)),
        }
        Ok(())
    }
}

fn unexpected(token: &Token) -> ErrorKind {
    ErrorKind::UnexpectedToken(token.kind().name().to_string())
}
