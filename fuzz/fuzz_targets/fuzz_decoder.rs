#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use jsonrecord::{DecodeError, Decoder, DecoderOptions, Event};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use serde_json::{Map, Value};

const HEADER: usize = 5; // 1 flag byte + 4-byte split seed

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

static SEPARATORS: &[&[u8]] = &[b" ", b"\t", b"\n", b"\r\n", b""];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

/// Mostly leaves mutation to libFuzzer, but now and then writes a fresh header
/// followed by a run of serialized records so that deep valid input is
/// reached quickly.
fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size >= HEADER && !seed.is_multiple_of(10) {
        return fuzzer_mutate(data, size, max_size);
    }
    if max_size < HEADER {
        return fuzzer_mutate(data, size, max_size);
    }

    data[0] = with_rng(|rng| rng.next_u32() as u8);
    data[1..HEADER].copy_from_slice(&with_rng(|rng| rng.next_u32().to_le_bytes()));

    let mut written = HEADER;
    while written < size.max(HEADER + 1) && written < max_size {
        let limit = max_size - written;
        written += append_record(&mut data[written..], size, limit);
        written += append_separator(&mut data[written..], max_size - written);
    }
    written
}

fn append_separator(buf: &mut [u8], limit: usize) -> usize {
    let sep = with_rng(|rng| SEPARATORS[rng.random_range(0..SEPARATORS.len())]);
    let len = sep.len().min(limit);
    buf[..len].copy_from_slice(&sep[..len]);
    len
}

fn append_record(buf: &mut [u8], size: usize, limit: usize) -> usize {
    let record = loop {
        let s = with_rng(|rng| rng.random_range(size / 2..size * 2 + 2).min(limit));
        let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
        if let Ok(record) = ArbitraryRecord::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            break record;
        }
    };

    let serialized = serde_json::to_vec(&Value::Object(record.0)).expect("values serialize");
    // Truncation is fine: broken records exercise the error paths.
    let len = serialized.len().min(limit);
    buf[..len].copy_from_slice(&serialized[..len]);
    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(21)? {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3..=10 => Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            _ => Value::Object(ArbitraryRecord::arbitrary(u)?.0),
        };
        Ok(ArbitraryValue(value))
    }
}

#[derive(Debug)]
struct ArbitraryRecord(Map<String, Value>);

impl<'a> Arbitrary<'a> for ArbitraryRecord {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let fields: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
        Ok(ArbitraryRecord(
            fields.into_iter().map(|(k, v)| (k, v.0)).collect(),
        ))
    }
}

fn decode_whole(options: DecoderOptions, text: &str) -> (Vec<Event>, Result<(), DecodeError>) {
    let mut events = Vec::new();
    let result = Decoder::new(options).process(text, &mut events);
    (events, result)
}

fn decode_chunked(options: DecoderOptions, chunks: &[&str]) -> (Vec<Event>, Result<(), DecodeError>) {
    let mut decoder = Decoder::new(options);
    let mut events = Vec::new();
    for chunk in chunks {
        if let Err(err) = decoder.feed(chunk, &mut events) {
            return (events, Err(err));
        }
    }
    let result = decoder.finish(&mut events);
    (events, result)
}

/// Checks that entities nest inside records and that a successful decode
/// closes everything it opened.
fn assert_balanced(events: &[Event], complete: bool) {
    let mut depth = 0usize;
    let mut open = false;
    for event in events {
        match event {
            Event::StartRecord { .. } => {
                assert!(!open && depth == 0);
                open = true;
            }
            Event::EndRecord => {
                assert!(open && depth == 0);
                open = false;
            }
            Event::StartEntity { .. } => {
                assert!(open);
                depth += 1;
            }
            Event::EndEntity => {
                assert!(depth > 0);
                depth -= 1;
            }
            Event::Literal { .. } => assert!(open),
        }
    }
    if complete {
        assert!(!open && depth == 0);
    }
}

fn decoder(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }

    let flags = data[0];
    let split_seed = u64::from(u32::from_le_bytes([data[1], data[2], data[3], data[4]]));
    let text = String::from_utf8_lossy(&data[HEADER..]).into_owned();

    let options = DecoderOptions {
        allow_comments: flags & 1 != 0,
        boolean_marker: (flags & 2 != 0).then(|| String::from("?")),
        number_marker: (flags & 4 != 0).then(|| String::from("#")),
        ..DecoderOptions::default()
    };

    let chunks = split_into_safe_chunks(&text, split_seed);
    let (whole, whole_result) = decode_whole(options.clone(), &text);
    let (chunked, chunked_result) = decode_chunked(options, &chunks);

    assert_balanced(&whole, whole_result.is_ok());
    assert_eq!(whole, chunked);
    assert_eq!(
        whole_result.as_ref().err().map(DecodeError::kind),
        chunked_result.as_ref().err().map(DecodeError::kind),
    );
}

fuzz_target!(|data: &[u8]| decoder(data));

/// Splits `text` into char-boundary-safe chunks whose sizes derive from
/// `split_seed`.
fn split_into_safe_chunks(text: &str, split_seed: u64) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let len = text.len();
    let mut seed = split_seed;

    while start < len {
        let remaining = len - start;
        let mut size = (seed as usize % remaining) + 1;
        while start + size < len && !text.is_char_boundary(start + size) {
            size += 1;
        }
        chunks.push(&text[start..start + size]);
        start += size;
        seed = seed.rotate_left(7) ^ 0x9E37_79B9;
    }

    chunks
}
