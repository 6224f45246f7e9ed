use alloc::{
    string::{String, ToString},
    vec,
    vec::Vec,
};

use rstest::rstest;

use super::utils::{decode_err, feed_chunks};
use crate::{
    Decoder, ErrorKind, Event,
    Event::{EndEntity, EndRecord},
};

fn unexpected(name: &str) -> ErrorKind {
    ErrorKind::UnexpectedToken(String::from(name))
}

fn unrecognized(raw: &str) -> ErrorKind {
    ErrorKind::UnrecognizedToken(String::from(raw))
}

#[test]
fn only_objects_start_records() {
    let (events, err) = decode_err("null");
    assert_eq!(events, vec![]);
    assert_eq!(err.kind(), &unexpected("VALUE_NULL"));
    assert_eq!(
        err.to_string(),
        "Unexpected token 'VALUE_NULL' at line 1, column 1"
    );
}

#[rstest]
#[case("[1]", "START_ARRAY")]
#[case("\"s\"", "VALUE_STRING")]
#[case("  42", "VALUE_NUMBER_INT")]
#[case("-1.5e3", "VALUE_NUMBER_FLOAT")]
#[case("true", "VALUE_TRUE")]
#[case("false", "VALUE_FALSE")]
fn top_level_non_objects(#[case] input: &str, #[case] name: &str) {
    let (events, err) = decode_err(input);
    assert_eq!(events, vec![]);
    assert_eq!(err.kind(), &unexpected(name));
}

#[test]
fn incomplete_object() {
    let (events, err) = decode_err("{");
    assert_eq!(events, vec![Event::start_record("1")]);
    assert_eq!(err.kind(), &ErrorKind::UnexpectedEndOfInput);
    assert_eq!(err.to_string(), "Unexpected end-of-input at line 1, column 2");
}

#[test]
fn trailing_content() {
    let (events, err) = decode_err(r#"{"lit":"value"}null"#);
    assert_eq!(
        events,
        vec![
            Event::start_record("1"),
            Event::literal("lit", Some("value")),
            EndRecord,
        ]
    );
    assert_eq!(err.kind(), &unexpected("VALUE_NULL"));
    assert_eq!((err.line, err.column), (1, 16));
}

#[test]
fn trailing_garbage() {
    let (events, err) = decode_err(r#"{"lit":"value"}XXX"#);
    assert_eq!(events.len(), 3);
    assert_eq!(events[2], EndRecord);
    assert_eq!(err.kind(), &unrecognized("XXX"));
    assert_eq!(
        err.to_string(),
        "Unrecognized token 'XXX' at line 1, column 16"
    );
}

#[test]
fn error_inside_second_record_keeps_first() {
    let (events, err) = decode_err("{\"a\":1}\n{\"b\":[1,]}");
    assert_eq!(
        events,
        vec![
            Event::start_record("1"),
            Event::literal("a", Some("1")),
            EndRecord,
            Event::start_record("2"),
            Event::start_entity("b[]"),
            Event::literal("1", Some("1")),
        ]
    );
    assert_eq!(err.kind(), &unexpected("END_ARRAY"));
    assert_eq!((err.line, err.column), (2, 9));
}

#[rstest]
#[case(r#"{"a":tru}"#, unrecognized("tru"))]
#[case(r#"{"a":01}"#, unrecognized("01"))]
#[case(r#"{"a":"\q"}"#, unrecognized("\\q"))]
#[case(r#"{"a":1 "b":2}"#, unexpected("VALUE_STRING"))]
#[case(r#"{"a":1,}"#, unexpected("END_OBJECT"))]
#[case(r#"{"a":[1}"#, unexpected("END_OBJECT"))]
#[case(r#"{"a"}"#, unexpected("END_OBJECT"))]
#[case(r#"{"a":{"b":1}"#, ErrorKind::UnexpectedEndOfInput)]
#[case(r#"{"a":"open"#, ErrorKind::UnexpectedEndOfInput)]
#[case("{} // note", unrecognized("//"))]
fn malformed_records(#[case] input: &str, #[case] kind: ErrorKind) {
    let (events, err) = decode_err(input);
    assert_eq!(err.kind(), &kind);
    assert_eq!(events.first(), Some(&Event::start_record("1")));
}

#[test]
fn decoder_is_reusable_after_error() {
    let mut decoder = Decoder::default();
    let mut events = Vec::new();
    decoder.process(r#"{"a":[1"#, &mut events).unwrap_err();
    assert_eq!(decoder.next_record_id(), "2");

    events.clear();
    decoder.process(r#"{"b":true}"#, &mut events).unwrap();
    assert_eq!(
        events,
        vec![
            Event::start_record("2"),
            Event::literal("b", Some("true")),
            EndRecord,
        ]
    );
}

#[test]
fn feed_discards_input_after_error() {
    let mut decoder = Decoder::default();
    let mut events = Vec::new();
    let err = decoder.feed(r#"{"a":{}} ] {"ignored":1}"#, &mut events).unwrap_err();
    assert_eq!(err.kind(), &unexpected("END_ARRAY"));

    let events = feed_chunks(&mut decoder, &["{\"c\"", ":[]}"]).unwrap();
    assert_eq!(
        events,
        vec![
            Event::start_record("2"),
            Event::start_entity("c[]"),
            EndEntity,
            EndRecord,
        ]
    );
}

#[test]
fn unfinished_record_fails_on_finish() {
    let mut decoder = Decoder::default();
    let mut events = Vec::new();
    decoder.feed(r#"{"a":["#, &mut events).unwrap();
    let err = decoder.finish(&mut events).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnexpectedEndOfInput);
    assert_eq!(
        events,
        vec![Event::start_record("1"), Event::start_entity("a[]")]
    );
}

#[test]
fn comments_rejected_by_default() {
    let (events, err) = decode_err("/* c */ {}");
    assert_eq!(events, vec![]);
    assert_eq!(err.kind(), &unrecognized("/*"));
}

#[test]
fn invalid_utf8_after_valid_prefix() {
    let mut events = Vec::new();
    let err = Decoder::default()
        .process_bytes(b"{\"a\":\"x\xff\"}", &mut events)
        .unwrap_err();
    assert_eq!(events, vec![Event::start_record("1")]);
    match err.kind() {
        ErrorKind::UnrecognizedToken(raw) => assert_eq!(raw.to_lowercase(), "\\xff"),
        other => panic!("unexpected error kind {other:?}"),
    }
    assert_eq!(err.line, 1);
}

#[test]
fn utf8_sequence_cut_off_at_end_of_input() {
    let mut events = Vec::new();
    let err = Decoder::default()
        .process_bytes(b"{\"a\":\"\xE2\x82", &mut events)
        .unwrap_err();
    assert_eq!(events, vec![Event::start_record("1")]);
    match err.kind() {
        ErrorKind::UnrecognizedToken(raw) => assert_eq!(raw.to_lowercase(), "\\xe2\\x82"),
        other => panic!("unexpected error kind {other:?}"),
    }
    assert_eq!((err.line, err.column), (1, 7));
}
