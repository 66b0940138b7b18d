//! Pipelined single-channel ADC sampling.
//!
//! A conversion is always in flight: taking a sample immediately starts the
//! next one, so the supervisor never waits for the converter.

use core::convert::Infallible;

/// One software-triggered analog-to-digital converter channel.
pub trait Converter {
    /// Starts one conversion.
    fn start(&mut self);
    /// True once the last started conversion has finished.
    fn is_complete(&self) -> bool;
    /// Result of the finished conversion. Clears the completion flag.
    fn read(&mut self) -> u16;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
enum State {
    Idle,
    Converting,
}

pub struct AdcSampler<C> {
    converter: C,
    state: State,
}

impl<C: Converter> AdcSampler<C> {
    pub fn new(converter: C) -> Self {
        Self {
            converter,
            state: State::Idle,
        }
    }

    pub fn trigger(&mut self) {
        self.converter.start();
        self.state = State::Converting;
    }

    /// Result of the last triggered conversion.
    ///
    /// `WouldBlock` while the conversion is still running or when nothing
    /// was triggered.
    pub fn take_sample(&mut self) -> nb::Result<u16, Infallible> {
        if self.state != State::Converting || !self.converter.is_complete() {
            return Err(nb::Error::WouldBlock);
        }
        self.state = State::Idle;
        Ok(self.converter.read())
    }

    /// Takes the finished sample and immediately triggers the next one.
    pub fn sample(&mut self) -> nb::Result<u16, Infallible> {
        let raw = self.take_sample()?;
        self.trigger();
        Ok(raw)
    }

    /// Starts a conversion unless one is already running.
    pub fn rearm(&mut self) {
        if self.state == State::Idle {
            defmt::debug!("adc idle, triggering");
            self.trigger();
        }
    }

    pub fn is_converting(&self) -> bool {
        self.state == State::Converting
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }

    pub fn converter_mut(&mut self) -> &mut C {
        &mut self.converter
    }

    pub fn release(self) -> C {
        self.converter
    }
}
