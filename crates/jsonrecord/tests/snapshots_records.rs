#![expect(missing_docs)]

use core::fmt::Write;

use insta::assert_snapshot;
use jsonrecord::{Decoder, DecoderOptions, Event, produce_chunks};

mod common;

fn render(events: &[Event]) -> String {
    let mut out = String::new();
    for event in events {
        writeln!(out, "{event}").unwrap();
    }
    out
}

fn decode_chunks(decoder: &mut Decoder, chunks: &[&str]) -> Vec<Event> {
    let mut events = Vec::new();
    for chunk in chunks {
        decoder.feed(chunk, &mut events).expect("chunk should decode");
    }
    decoder.finish(&mut events).expect("stream should be complete");
    events
}

#[test]
fn snapshot_stream_records() {
    let events = decode_chunks(&mut Decoder::default(), &common::STREAM);

    assert_snapshot!(render(&events), @r#"
    startRecord(1)
    literal(id, "r1")
    literal(title, "Moby-Dick")
    startEntity(authors[])
    startEntity(1)
    literal(name, "Melville")
    literal(born, "1819")
    endEntity()
    endEntity()
    startEntity(tags[])
    literal(1, "novel")
    literal(2, "sea")
    endEntity()
    literal(read, "true")
    literal(rating, "4.5")
    literal(notes, null)
    endRecord()
    startRecord(2)
    literal(id, "r2")
    literal(title, "Ulysses")
    startEntity(authors[])
    endEntity()
    startEntity(tags[])
    startEntity(1[])
    literal(1, "nested")
    endEntity()
    endEntity()
    literal(read, "false")
    literal(quote, "\"yes\" é😀")
    endRecord()
    "#);
}

#[test]
fn chunking_matches_whole_text() {
    let text = common::joined();

    let mut whole = Vec::new();
    Decoder::default().process(&text, &mut whole).unwrap();

    for parts in 1..=text.len() {
        let chunks = produce_chunks(&text, parts);
        let streamed = decode_chunks(&mut Decoder::default(), &chunks);
        assert_eq!(streamed, whole, "split into {parts} parts");
    }
}

#[test]
fn snapshot_stream_with_options() {
    let options = DecoderOptions {
        array_marker: String::from("[*]"),
        array_name: String::from("#%d"),
        record_id: String::from("book-%d"),
        record_count: 7,
        boolean_marker: Some(String::from(":bool")),
        number_marker: Some(String::from(":num")),
        allow_comments: false,
    };
    let events = decode_chunks(&mut Decoder::new(options), &common::STREAM[..8]);

    assert_snapshot!(render(&events), @r#"
    startRecord(book-7)
    literal(id, "r1")
    literal(title, "Moby-Dick")
    startEntity(authors[*])
    startEntity(#1)
    literal(name, "Melville")
    literal(born:num, "1819")
    endEntity()
    endEntity()
    startEntity(tags[*])
    literal(#1, "novel")
    literal(#2, "sea")
    endEntity()
    literal(read:bool, "true")
    literal(rating:num, "4.5")
    literal(notes, null)
    endRecord()
    "#);
}

#[test]
fn snapshot_truncated_stream() {
    let mut decoder = Decoder::default();
    let mut events = Vec::new();
    for chunk in &common::STREAM[..11] {
        decoder.feed(chunk, &mut events).unwrap();
    }
    let err = decoder.finish(&mut events).unwrap_err();

    let mut out = render(&events[17..]);
    writeln!(out, "error: {err}").unwrap();
    assert_snapshot!(out, @r#"
    startRecord(2)
    literal(id, "r2")
    literal(title, "Ulysses")
    startEntity(authors[])
    endEntity()
    startEntity(tags[])
    startEntity(1[])
    literal(1, "nested")
    endEntity()
    endEntity()
    error: Unexpected end-of-input at line 2, column 63
    "#);
}
