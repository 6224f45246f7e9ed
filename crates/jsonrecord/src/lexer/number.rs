use super::NumberKind;

/// Checks `word` against the JSON number grammar.
///
/// `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`
pub(crate) fn classify_number(word: &str) -> Option<NumberKind> {
    let bytes = word.as_bytes();
    let mut i = 0;
    let mut kind = NumberKind::Int;

    if bytes.first() == Some(&b'-') {
        i += 1;
    }

    match bytes.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => i = skip_digits(bytes, i + 1),
        _ => return None,
    }

    if bytes.get(i) == Some(&b'.') {
        let start = i + 1;
        i = skip_digits(bytes, start);
        if i == start {
            return None;
        }
        kind = NumberKind::Float;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let start = i;
        i = skip_digits(bytes, start);
        if i == start {
            return None;
        }
        kind = NumberKind::Float;
    }

    (i == bytes.len()).then_some(kind)
}

fn skip_digits(bytes: &[u8], mut i: usize) -> usize {
    while bytes.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
    }
    i
}
