//! Decodes JSON text into a flat stream of record, entity and literal events.
//!
//! Every top-level JSON object becomes one *record*. Nested objects and arrays
//! become *entities*, and scalar leaves become *literals*. Array elements are
//! named by their 1-based position, and array entities carry a `[]` marker:
//!
//! ```rust
//! use jsonrecord::{Decoder, Event};
//!
//! let mut decoder = Decoder::default();
//! let mut events: Vec<Event> = Vec::new();
//! decoder
//!     .process(r#"{"a":["x",{"k":null}]}"#, &mut events)
//!     .unwrap();
//!
//! assert_eq!(
//!     events,
//!     vec![
//!         Event::start_record("1"),
//!         Event::start_entity("a[]"),
//!         Event::literal("1", Some("x")),
//!         Event::start_entity("2"),
//!         Event::literal("k", None),
//!         Event::EndEntity,
//!         Event::EndEntity,
//!         Event::EndRecord,
//!     ]
//! );
//! ```
//!
//! Concatenated objects (`{...}{...}` or newline-delimited) produce one record
//! each, and record ids keep counting across calls on the same [`Decoder`].

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod chunk_utils;
mod decoder;
mod error;
mod event;
mod frame;
mod lexer;
mod options;
mod receiver;
mod template;

#[cfg(test)]
mod tests;

pub use chunk_utils::produce_chunks;
pub use decoder::Decoder;
pub use error::{DecodeError, ErrorKind};
pub use event::Event;
pub use lexer::{NumberKind, Scalar, Token, TokenKind, Tokenizer};
pub use options::DecoderOptions;
pub use receiver::StreamReceiver;
