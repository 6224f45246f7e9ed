use alloc::{string::String, vec::Vec};

/// Stack entry – one per open container
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Frame {
    /// The top-level object of a record. Emits no entity of its own.
    Record {
        pending_key: Option<String>, // key waiting for its value
    },
    Object {
        pending_key: Option<String>,
    },
    Array {
        next_index: u64, // 1-based position of the next element
    },
}

impl Frame {
    pub(crate) fn new_record_frame() -> Self {
        Frame::Record { pending_key: None }
    }

    pub(crate) fn new_object_frame() -> Self {
        Frame::Object { pending_key: None }
    }

    pub(crate) fn new_array_frame() -> Self {
        Frame::Array { next_index: 1 }
    }
}

/// Open containers of the record being decoded, innermost last.
#[derive(Debug, Default)]
pub(crate) struct FrameStack {
    stack: Vec<Frame>,
}

impl FrameStack {
    pub(crate) fn new() -> Self {
        Self {
            stack: Vec::with_capacity(16),
        }
    }

    pub(crate) fn last_mut(&mut self) -> Option<&mut Frame> {
        self.stack.last_mut()
    }

    pub(crate) fn push(&mut self, frame: Frame) {
        self.stack.push(frame);
    }

    pub(crate) fn pop(&mut self) -> Option<Frame> {
        self.stack.pop()
    }

    pub(crate) fn depth(&self) -> usize {
        self.stack.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.stack.clear();
    }
}
