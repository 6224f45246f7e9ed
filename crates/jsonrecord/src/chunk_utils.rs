//! Helpers for splitting input text into chunks for incremental feeding.
use alloc::vec::Vec;

/// Splits `text` into `parts` chunks of roughly equal byte length.
///
/// Chunk boundaries are moved forward to the next UTF-8 character boundary,
/// so fewer than `parts` chunks may be returned for short or multibyte input.
/// Concatenating the chunks always yields `text`.
///
/// ```rust
/// use jsonrecord::produce_chunks;
///
/// assert_eq!(produce_chunks(r#"{"a":1}"#, 3), vec![r#"{"a"#, r#"":1"#, "}"]);
/// ```
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_chunks(text: &str, parts: usize) -> Vec<&str> {
    assert!(parts > 0, "cannot split into zero chunks");
    let step = text.len().div_ceil(parts);
    split_by(text, core::iter::repeat(step))
}

/// Splits `text` into chunks of the given byte lengths, using each length
/// once; any remainder becomes the last chunk. Zero lengths count as one.
pub(crate) fn split_by<I>(text: &str, lengths: I) -> Vec<&str>
where
    I: IntoIterator<Item = usize>,
{
    let mut chunks = Vec::new();
    let mut rest = text;
    for len in lengths {
        if rest.is_empty() {
            break;
        }
        let mut end = len.clamp(1, rest.len());
        while !rest.is_char_boundary(end) {
            end += 1;
        }
        let (chunk, tail) = rest.split_at(end);
        chunks.push(chunk);
        rest = tail;
    }
    if !rest.is_empty() {
        chunks.push(rest);
    }
    chunks
}
