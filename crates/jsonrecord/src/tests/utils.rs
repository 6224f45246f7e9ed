use alloc::vec::Vec;

use crate::{DecodeError, Decoder, DecoderOptions, Event};

pub(crate) fn decode(input: &str) -> Vec<Event> {
    decode_with(DecoderOptions::default(), input)
}

pub(crate) fn decode_with(options: DecoderOptions, input: &str) -> Vec<Event> {
    let mut events = Vec::new();
    Decoder::new(options)
        .process(input, &mut events)
        .expect("input should decode");
    events
}

/// Decodes `input` expecting a failure; returns the events emitted before it.
pub(crate) fn decode_err(input: &str) -> (Vec<Event>, DecodeError) {
    let mut events = Vec::new();
    let err = Decoder::default()
        .process(input, &mut events)
        .expect_err("input should be rejected");
    (events, err)
}

/// Feeds `chunks` one by one, then finishes.
pub(crate) fn feed_chunks(decoder: &mut Decoder, chunks: &[&str]) -> Result<Vec<Event>, DecodeError> {
    let mut events = Vec::new();
    for chunk in chunks {
        decoder.feed(chunk, &mut events)?;
    }
    decoder.finish(&mut events)?;
    Ok(events)
}
