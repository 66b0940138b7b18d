//! Mapping from raw ADC samples to the requested pulse frequency, and the
//! policy deciding when the pulse generator has to be reprogrammed.

use crate::config::{ClockConfig, MIN_FREQUENCY_HZ};

/// Outcome of feeding one sample to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum Correction {
    /// Requested frequency did not change; leave the generator alone.
    Unchanged,
    /// Reprogram the generator with `cycles` timer ticks per pulse.
    Reload { frequency: u32, cycles: u32 },
}

pub struct FrequencyController {
    clock: ClockConfig,
    desired: Option<u32>,
}

impl FrequencyController {
    pub const fn new(clock: ClockConfig) -> Self {
        Self {
            clock,
            desired: None,
        }
    }

    pub fn clock(&self) -> ClockConfig {
        self.clock
    }

    /// Requested frequency for a raw sample, never below 1 Hz and never
    /// above [`ClockConfig::max_frequency_hz`].
    pub fn desired_frequency(&self, raw: u16) -> u32 {
        (raw as u32 * self.clock.scale_factor())
            .clamp(MIN_FREQUENCY_HZ, self.clock.max_frequency_hz())
    }

    /// Timer ticks per pulse for `frequency`.
    ///
    /// Saturates at one tick when the request exceeds the timer clock.
    pub fn reload_for(&self, frequency: u32) -> u32 {
        (self.clock.timer_clock_hz() / frequency.max(MIN_FREQUENCY_HZ)).max(1)
    }

    /// Last requested frequency, `None` before the first sample.
    pub fn desired(&self) -> Option<u32> {
        self.desired
    }

    /// Records the new sample and decides whether the generator needs a new
    /// reload value. Only a strict change of the requested frequency does.
    pub fn update(&mut self, raw: u16) -> Correction {
        let frequency = self.desired_frequency(raw);
        if self.desired == Some(frequency) {
            return Correction::Unchanged;
        }
        self.desired = Some(frequency);
        Correction::Reload {
            frequency,
            cycles: self.reload_for(frequency),
        }
    }
}
