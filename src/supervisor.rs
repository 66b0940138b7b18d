//! The once-per-second control cycle.
//!
//! Runs from the supervisor timer interrupt after the interrupt flag has been
//! acknowledged. Each cycle samples the analog input, corrects the pulse
//! generator if the requested frequency moved, closes the pulse counting
//! window, redraws both quantities and drains one console character.

use embedded_hal::serial;
use rtic::Mutex;

use crate::{
    config::{REQUESTED_LABEL, REQUESTED_ROW, SERVICED_LABEL, SERVICED_ROW},
    controller::{Correction, FrequencyController},
    display::{render_quantity, Surface},
    generator::{PulseGenerator, PulseTimer},
    sampler::{AdcSampler, Converter},
    shared::Controls,
    Error,
};

/// What one cycle observed and did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct CycleReport {
    /// Requested frequency, `None` when no sample was ready this cycle.
    pub requested: Option<u32>,
    /// Pulses counted in the window this cycle closed.
    pub serviced: u32,
    pub reprogrammed: bool,
    /// Character moved into the mailbox this cycle.
    pub received: Option<u8>,
}

pub struct Supervisor<C> {
    sampler: AdcSampler<C>,
    controller: FrequencyController,
}

impl<C: Converter> Supervisor<C> {
    pub fn new(sampler: AdcSampler<C>, controller: FrequencyController) -> Self {
        Self {
            sampler,
            controller,
        }
    }

    pub fn controller(&self) -> &FrequencyController {
        &self.controller
    }

    pub fn sampler(&self) -> &AdcSampler<C> {
        &self.sampler
    }

    pub fn sampler_mut(&mut self) -> &mut AdcSampler<C> {
        &mut self.sampler
    }

    /// Runs one control cycle.
    ///
    /// The pulse generator configuration and the display are each touched
    /// only while their lock is held.
    pub fn cycle<D, G, P, R>(
        &mut self,
        controls: &Controls,
        display: &mut D,
        generator: &mut G,
        rx: &mut R,
    ) -> Result<CycleReport, Error>
    where
        D: Mutex,
        D::T: Surface,
        G: Mutex<T = PulseGenerator<P>>,
        P: PulseTimer,
        R: serial::Read<u8>,
    {
        let (requested, reprogrammed) = match self.sampler.sample() {
            Ok(raw) => match self.controller.update(raw) {
                Correction::Reload { frequency, cycles } => {
                    generator.lock(|g| g.reprogram(cycles));
                    defmt::debug!("requested {=u32} Hz, reload {=u32}", frequency, cycles);
                    (Some(frequency), true)
                }
                Correction::Unchanged => (self.controller.desired(), false),
            },
            Err(nb::Error::WouldBlock) => {
                self.sampler.rearm();
                (None, false)
            }
            Err(nb::Error::Other(never)) => match never {},
        };

        // Closes the one-second measurement window.
        let serviced = controls.pulses.drain();

        let full_scale = self.controller.clock().full_scale_hz();
        display.lock(|surface| -> Result<(), Error> {
            surface.clear()?;
            if let Some(frequency) = requested {
                render_quantity(
                    surface,
                    REQUESTED_ROW,
                    REQUESTED_LABEL,
                    frequency,
                    controls.requested.get(),
                    full_scale,
                )?;
            }
            render_quantity(
                surface,
                SERVICED_ROW,
                SERVICED_LABEL,
                serviced,
                controls.serviced.get(),
                full_scale,
            )?;
            surface.present()
        })?;

        let received = poll_console(controls, rx);

        Ok(CycleReport {
            requested,
            serviced,
            reprogrammed,
            received,
        })
    }
}

/// Moves at most one received byte into the mailbox.
///
/// With nothing received, a byte the foreground loop never picked up is
/// dropped so no command outlives its cycle.
fn poll_console<R: serial::Read<u8>>(controls: &Controls, rx: &mut R) -> Option<u8> {
    match rx.read() {
        Ok(byte) => {
            if let Some(displaced) = controls.mailbox.post(byte) {
                defmt::warn!("console byte {=u8:#x} displaced before delivery", displaced);
            }
            Some(byte)
        }
        Err(nb::Error::WouldBlock) => {
            expire(controls);
            None
        }
        Err(nb::Error::Other(_)) => {
            defmt::warn!("console receive fault");
            expire(controls);
            None
        }
    }
}

fn expire(controls: &Controls) {
    if let Some(stale) = controls.mailbox.take() {
        defmt::warn!("console byte {=u8:#x} dropped undelivered", stale);
    }
}
