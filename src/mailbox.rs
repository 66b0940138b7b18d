//! Single-slot mailbox carrying the last console character from the
//! supervisor interrupt to the foreground loop.

use core::sync::atomic::{AtomicU16, Ordering};

const EMPTY: u16 = u16::MAX;

/// Holds at most one received byte.
///
/// Both sides go through `swap`, so the consumer takes and clears the slot in
/// one step. A byte is delivered at most once. When a second byte is posted
/// before the first was taken, the newer one wins and the older one is
/// handed back to the producer as displaced.
pub struct Mailbox(AtomicU16);

impl Mailbox {
    pub const fn new() -> Self {
        Self(AtomicU16::new(EMPTY))
    }

    /// Stores `byte`, returning the undelivered byte it replaced, if any.
    pub fn post(&self, byte: u8) -> Option<u8> {
        decode(self.0.swap(byte as u16, Ordering::AcqRel))
    }

    /// Takes the pending byte and leaves the slot empty.
    pub fn take(&self) -> Option<u8> {
        decode(self.0.swap(EMPTY, Ordering::AcqRel))
    }

    pub fn is_empty(&self) -> bool {
        self.0.load(Ordering::Acquire) == EMPTY
    }
}

fn decode(raw: u16) -> Option<u8> {
    match raw {
        EMPTY => None,
        byte => Some(byte as u8),
    }
}
