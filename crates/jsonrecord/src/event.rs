//! Owned representation of the receiver calls.
//!
//! `Event` mirrors the five [`StreamReceiver`](crate::StreamReceiver) calls so
//! that an event stream can be stored, compared and printed. A `Vec<Event>`
//! is itself a receiver.
//!
//! ```
//! use jsonrecord::{Decoder, Event};
//!
//! let mut events: Vec<Event> = Vec::new();
//! Decoder::default()
//!     .process(r#"{"a":["x"]}"#, &mut events)
//!     .unwrap();
//!
//! let rendered: Vec<String> = events.iter().map(ToString::to_string).collect();
//! assert_eq!(
//!     rendered,
//!     [
//!         "startRecord(1)",
//!         "startEntity(a[])",
//!         "literal(1, \"x\")",
//!         "endEntity()",
//!         "endRecord()",
//!     ]
//! );
//! ```
use alloc::string::String;
use core::fmt;

/// One receiver call.
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize)
)]
#[cfg_attr(any(test, feature = "serde"), serde(tag = "kind"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// `startRecord(id)`
    StartRecord {
        /// The record id.
        id: String,
    },
    /// `endRecord()`
    EndRecord,
    /// `startEntity(name)`
    StartEntity {
        /// The entity name; arrays carry the array marker.
        name: String,
    },
    /// `endEntity()`
    EndEntity,
    /// `literal(name, value)`
    Literal {
        /// The literal name.
        name: String,
        /// The literal value; `None` for JSON `null`.
        value: Option<String>,
    },
}

impl Event {
    /// Shorthand for [`Event::StartRecord`].
    #[must_use]
    pub fn start_record(id: impl Into<String>) -> Self {
        Event::StartRecord { id: id.into() }
    }

    /// Shorthand for [`Event::StartEntity`].
    #[must_use]
    pub fn start_entity(name: impl Into<String>) -> Self {
        Event::StartEntity { name: name.into() }
    }

    /// Shorthand for [`Event::Literal`].
    #[must_use]
    pub fn literal(name: impl Into<String>, value: Option<&str>) -> Self {
        Event::Literal {
            name: name.into(),
            value: value.map(Into::into),
        }
    }

    /// Replays this event onto `receiver`.
    pub fn replay<R: crate::StreamReceiver + ?Sized>(&self, receiver: &mut R) {
        match self {
            Event::StartRecord { id } => receiver.start_record(id),
            Event::EndRecord => receiver.end_record(),
            Event::StartEntity { name } => receiver.start_entity(name),
            Event::EndEntity => receiver.end_entity(),
            Event::Literal { name, value } => receiver.literal(name, value.as_deref()),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::StartRecord { id } => write!(f, "startRecord({id})"),
            Event::EndRecord => f.write_str("endRecord()"),
            Event::StartEntity { name } => write!(f, "startEntity({name})"),
            Event::EndEntity => f.write_str("endEntity()"),
            Event::Literal { name, value: None } => write!(f, "literal({name}, null)"),
            Event::Literal {
                name,
                value: Some(value),
            } => write!(f, "literal({name}, {value:?})"),
        }
    }
}
