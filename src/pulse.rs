//! Pulse counter incremented from the pulse generator interrupt.

use core::sync::atomic::{AtomicU32, Ordering};

/// Number of generator pulses seen since the last drain.
///
/// Incremented from the pulse interrupt, drained once per supervisor cycle.
/// The drain is a single atomic swap, so an increment lands either in the
/// window being closed or in the next one, never in neither.
///
/// Pulses are still lost if the pulse interrupt is held off for longer than
/// one generator period (two edges collapse into one pending interrupt).
pub struct PulseCounter(AtomicU32);

impl PulseCounter {
    pub const fn new() -> Self {
        Self(AtomicU32::new(0))
    }

    #[inline(always)]
    pub fn record(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    /// Current count, without closing the window.
    pub fn peek(&self) -> u32 {
        self.0.load(Ordering::Relaxed)
    }

    /// Returns the count of the window that just closed and starts a new one.
    pub fn drain(&self) -> u32 {
        self.0.swap(0, Ordering::AcqRel)
    }
}
