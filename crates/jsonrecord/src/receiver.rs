use alloc::vec::Vec;

use crate::Event;

/// Consumer of the events produced by a [`Decoder`](crate::Decoder).
///
/// Calls arrive in balanced order: every `start_record` is followed by a
/// matching `end_record`, every `start_entity` by a matching `end_entity`,
/// nested strictly LIFO. The only exception is a record that is cut short by
/// a decoding error, which is left open.
pub trait StreamReceiver {
    /// Opens a record for one top-level object.
    fn start_record(&mut self, id: &str);

    /// Closes the current record.
    fn end_record(&mut self);

    /// Opens a nested object or array.
    fn start_entity(&mut self, name: &str);

    /// Closes the innermost open entity.
    fn end_entity(&mut self);

    /// Delivers one scalar leaf. `None` stands for a JSON `null`.
    fn literal(&mut self, name: &str, value: Option<&str>);
}

impl<R: StreamReceiver + ?Sized> StreamReceiver for &mut R {
    fn start_record(&mut self, id: &str) {
        (**self).start_record(id);
    }

    fn end_record(&mut self) {
        (**self).end_record();
    }

    fn start_entity(&mut self, name: &str) {
        (**self).start_entity(name);
    }

    fn end_entity(&mut self) {
        (**self).end_entity();
    }

    fn literal(&mut self, name: &str, value: Option<&str>) {
        (**self).literal(name, value);
    }
}

/// Records every call as an owned [`Event`].
impl StreamReceiver for Vec<Event> {
    fn start_record(&mut self, id: &str) {
        self.push(Event::start_record(id));
    }

    fn end_record(&mut self) {
        self.push(Event::EndRecord);
    }

    fn start_entity(&mut self, name: &str) {
        self.push(Event::start_entity(name));
    }

    fn end_entity(&mut self) {
        self.push(Event::EndEntity);
    }

    fn literal(&mut self, name: &str, value: Option<&str>) {
        self.push(Event::literal(name, value));
    }
}
