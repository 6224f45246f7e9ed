use alloc::{collections::VecDeque, string::String};

/// Unread characters of all chunks fed so far.
#[derive(Debug, Default)]
pub(crate) struct Buffer {
    chars: VecDeque<char>,
}

impl Buffer {
    pub(crate) fn new() -> Self {
        Self {
            chars: VecDeque::new(),
        }
    }

    pub(crate) fn push(&mut self, text: &str) {
        self.chars.extend(text.chars());
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.chars.front().copied()
    }

    pub(crate) fn clear(&mut self) {
        self.chars.clear();
    }

    /// Moves leading characters matching `pred` into `dst` and returns how
    /// many were moved.
    pub(crate) fn copy_while<F>(&mut self, dst: &mut String, mut pred: F) -> usize
    where
        F: FnMut(char) -> bool,
    {
        let mut copied = 0;
        while let Some(&ch) = self.chars.front() {
            if !pred(ch) {
                break;
            }
            dst.push(ch);
            self.chars.pop_front();
            copied += 1;
        }
        copied
    }
}

impl Iterator for Buffer {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        self.chars.pop_front()
    }
}
