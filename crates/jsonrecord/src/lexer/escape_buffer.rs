//! Decoding of `\uXXXX` escape sequences, including UTF-16 surrogate pairs.
//!
//! [`UnicodeEscapeBuffer`] collects the four hex digits of one escape and
//! yields the UTF-16 code unit. [`SurrogateJoiner`] combines code units into
//! characters; an unpaired surrogate decodes to U+FFFD.
use alloc::string::String;

const REPLACEMENT: char = char::REPLACEMENT_CHARACTER;

#[derive(Debug, Default)]
pub(crate) struct UnicodeEscapeBuffer {
    digits: [u8; 4],
    len: u8,
}

impl UnicodeEscapeBuffer {
    pub(crate) fn new() -> Self {
        Self {
            digits: [0; 4],
            len: 0,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.len = 0;
    }

    /// The hex digits collected so far, as written.
    pub(crate) fn digits(&self) -> &str {
        // Only ASCII hex digits are ever stored.
        core::str::from_utf8(&self.digits[..usize::from(self.len)]).unwrap_or_default()
    }

    /// Feeds one character. Returns `Ok(Some(unit))` after the fourth digit,
    /// `Ok(None)` while digits are missing and `Err(())` if `c` is not a hex
    /// digit.
    pub(crate) fn feed(&mut self, c: char) -> Result<Option<u16>, ()> {
        if !c.is_ascii_hexdigit() {
            return Err(());
        }
        if self.len >= 4 {
            self.reset();
        }
        #[allow(clippy::cast_possible_truncation)]
        {
            self.digits[usize::from(self.len)] = c as u8;
        }
        self.len += 1;

        if self.len < 4 {
            return Ok(None);
        }

        let unit = self.digits.iter().fold(0u16, |acc, &b| {
            #[allow(clippy::cast_possible_truncation)]
            let digit = char::from(b).to_digit(16).unwrap_or(0) as u16;
            (acc << 4) | digit
        });
        self.reset();
        Ok(Some(unit))
    }
}

/// Pairs high and low surrogates across consecutive escapes.
#[derive(Debug, Default)]
pub(crate) struct SurrogateJoiner {
    high: Option<u16>,
}

impl SurrogateJoiner {
    /// Accepts one code unit and appends any completed character to `out`.
    pub(crate) fn push(&mut self, unit: u16, out: &mut String) {
        match (self.high.take(), unit) {
            (Some(high), 0xDC00..=0xDFFF) => {
                let code =
                    0x1_0000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(unit) - 0xDC00);
                out.push(char::from_u32(code).unwrap_or(REPLACEMENT));
            }
            (pending, _) => {
                if pending.is_some() {
                    out.push(REPLACEMENT);
                }
                match unit {
                    0xD800..=0xDBFF => self.high = Some(unit),
                    0xDC00..=0xDFFF => out.push(REPLACEMENT),
                    _ => out.push(char::from_u32(u32::from(unit)).unwrap_or(REPLACEMENT)),
                }
            }
        }
    }

    /// Terminates a dangling high surrogate with U+FFFD.
    pub(crate) fn flush(&mut self, out: &mut String) {
        if self.high.take().is_some() {
            out.push(REPLACEMENT);
        }
    }

    pub(crate) fn reset(&mut self) {
        self.high = None;
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::{SurrogateJoiner, UnicodeEscapeBuffer};

    fn unit(hex: &str) -> u16 {
        let mut buf = UnicodeEscapeBuffer::new();
        let mut out = None;
        for ch in hex.chars() {
            out = buf.feed(ch).unwrap();
        }
        out.unwrap()
    }

    #[test]
    fn basic_decoding() {
        let mut buf = UnicodeEscapeBuffer::new();
        assert_eq!(buf.feed('0'), Ok(None));
        assert_eq!(buf.feed('0'), Ok(None));
        assert_eq!(buf.feed('4'), Ok(None));
        assert_eq!(buf.digits(), "004");
        assert_eq!(buf.feed('1'), Ok(Some(0x41)));
        assert_eq!(buf.digits(), "");
    }

    #[test]
    fn mixed_case_hex() {
        assert_eq!(unit("AbCd"), 0xABCD);
    }

    #[test]
    fn invalid_hex_error() {
        let mut buf = UnicodeEscapeBuffer::new();
        assert_eq!(buf.feed('G'), Err(()));
    }

    #[test]
    fn joins_surrogate_pair() {
        let mut joiner = SurrogateJoiner::default();
        let mut out = String::new();
        joiner.push(unit("D83D"), &mut out);
        assert!(out.is_empty());
        joiner.push(unit("DE00"), &mut out);
        assert_eq!(out, "😀");
    }

    #[test]
    fn unpaired_surrogates_are_replaced() {
        let mut joiner = SurrogateJoiner::default();
        let mut out = String::new();
        joiner.push(0xD800, &mut out);
        joiner.push(0x0041, &mut out);
        joiner.push(0xDC00, &mut out);
        joiner.push(0xD800, &mut out);
        joiner.flush(&mut out);
        assert_eq!(out, "\u{FFFD}A\u{FFFD}\u{FFFD}");
    }
}
