//! Stand-ins for the hardware collaborators, shared by the on-target tests.
#![no_std]

use core::convert::Infallible;

use embedded_graphics::{
    mock_display::MockDisplay, pixelcolor::BinaryColor, prelude::*, Pixel,
};
use embedded_hal::{digital::v2::OutputPin, serial};
use freq_tracker::{
    display::{Present, Surface},
    generator::PulseTimer,
    sampler::Converter,
    shared::Controls,
    Error,
};
use heapless::{String, Vec};

/// Converter whose completion is driven by the test.
#[derive(Default)]
pub struct FakeConverter {
    pub value: u16,
    pub complete: bool,
    pub starts: u32,
    pub reads: u32,
}

impl FakeConverter {
    /// Finishes the running conversion with `value`.
    pub fn finish(&mut self, value: u16) {
        self.value = value;
        self.complete = true;
    }
}

impl Converter for FakeConverter {
    fn start(&mut self) {
        self.starts += 1;
        self.complete = false;
    }

    fn is_complete(&self) -> bool {
        self.complete
    }

    fn read(&mut self) -> u16 {
        self.reads += 1;
        self.complete = false;
        self.value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum TimerOp {
    Configure,
    Disable,
    Reload(u32),
    Enable,
    Acknowledge,
}

/// Records every register-level operation in order.
#[derive(Default)]
pub struct FakeTimer {
    pub ops: Vec<TimerOp, 32>,
}

impl FakeTimer {
    fn push(&mut self, op: TimerOp) {
        self.ops.push(op).ok();
    }

    pub fn reloads(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, TimerOp::Reload(_)))
            .count()
    }
}

impl PulseTimer for FakeTimer {
    fn configure(&mut self) {
        self.push(TimerOp::Configure);
    }

    fn disable(&mut self) {
        self.push(TimerOp::Disable);
    }

    fn set_reload(&mut self, cycles: u32) {
        self.push(TimerOp::Reload(cycles));
    }

    fn enable(&mut self) {
        self.push(TimerOp::Enable);
    }

    fn acknowledge(&mut self) {
        self.push(TimerOp::Acknowledge);
    }
}

/// Surface that remembers what was drawn since the last clear.
#[derive(Default)]
pub struct RecordingSurface {
    pub clears: u32,
    pub presents: u32,
    pub banners: u32,
    pub texts: Vec<(i32, String<24>), 4>,
    pub bars: Vec<(i32, u32), 4>,
}

impl RecordingSurface {
    pub const WIDTH: u32 = 128;

    pub fn text_at(&self, row: i32) -> Option<&str> {
        self.texts
            .iter()
            .find(|(r, _)| *r == row)
            .map(|(_, text)| text.as_str())
    }

    pub fn bar_at(&self, row: i32) -> Option<u32> {
        self.bars.iter().find(|(r, _)| *r == row).map(|(_, w)| *w)
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        Self::WIDTH
    }

    fn clear(&mut self) -> Result<(), Error> {
        self.clears += 1;
        self.texts.clear();
        self.bars.clear();
        Ok(())
    }

    fn draw_centered_text(&mut self, row: i32, text: &str) -> Result<(), Error> {
        let text = String::from(text);
        self.texts.push((row, text)).map_err(|_| Error::Display)
    }

    fn fill_bar(&mut self, row: i32, width: u32) -> Result<(), Error> {
        self.bars.push((row, width)).map_err(|_| Error::Display)
    }

    fn draw_banner(&mut self, _title: &str) -> Result<(), Error> {
        self.banners += 1;
        Ok(())
    }

    fn present(&mut self) -> Result<(), Error> {
        self.presents += 1;
        Ok(())
    }
}

/// Display lock around a [`RecordingSurface`] that posts `reply` to the
/// mailbox once the first locked section returns, the way a console byte
/// arrives while the foreground loop is drawing.
pub struct ScriptedLock<'a> {
    pub surface: RecordingSurface,
    /// `(clears, banners)` seen at the end of each locked section.
    pub sections: Vec<(u32, u32), 4>,
    controls: &'a Controls,
    reply: Option<u8>,
}

impl<'a> ScriptedLock<'a> {
    pub fn new(controls: &'a Controls, reply: u8) -> Self {
        Self {
            surface: RecordingSurface::default(),
            sections: Vec::new(),
            controls,
            reply: Some(reply),
        }
    }
}

impl rtic::Mutex for ScriptedLock<'_> {
    type T = RecordingSurface;

    fn lock<R>(&mut self, f: impl FnOnce(&mut RecordingSurface) -> R) -> R {
        let result = f(&mut self.surface);
        self.sections
            .push((self.surface.clears, self.surface.banners))
            .ok();
        if let Some(byte) = self.reply.take() {
            self.controls.mailbox.post(byte);
        }
        result
    }
}

/// `MockDisplay` that accepts the full-width text and bars of the real panel.
pub struct MockPanel(pub MockDisplay<BinaryColor>);

impl MockPanel {
    pub fn new() -> Self {
        let mut display = MockDisplay::new();
        display.set_allow_out_of_bounds_drawing(true);
        display.set_allow_overdraw(true);
        Self(display)
    }

    pub fn is_on(&self, x: i32, y: i32) -> bool {
        self.0.get_pixel(Point::new(x, y)) == Some(BinaryColor::On)
    }
}

impl Default for MockPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginDimensions for MockPanel {
    fn size(&self) -> Size {
        self.0.size()
    }
}

impl DrawTarget for MockPanel {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.0.draw_iter(pixels)
    }
}

impl Present for MockPanel {
    fn present(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

/// Receiver holding at most one byte, like the USART data register.
#[derive(Default)]
pub struct FakeRx {
    pub pending: Option<u8>,
    pub fault: bool,
}

impl FakeRx {
    pub fn receive(&mut self, byte: u8) {
        self.pending = Some(byte);
    }
}

impl serial::Read<u8> for FakeRx {
    type Error = ();

    fn read(&mut self) -> nb::Result<u8, ()> {
        if core::mem::take(&mut self.fault) {
            return Err(nb::Error::Other(()));
        }
        self.pending.take().ok_or(nb::Error::WouldBlock)
    }
}

#[derive(Default)]
pub struct FakeTx {
    pub sent: Vec<u8, 256>,
    pub flushes: u32,
}

impl serial::Write<u8> for FakeTx {
    type Error = ();

    fn write(&mut self, byte: u8) -> nb::Result<(), ()> {
        self.sent.push(byte).map_err(|_| nb::Error::Other(()))
    }

    fn flush(&mut self) -> nb::Result<(), ()> {
        self.flushes += 1;
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeLed {
    pub high: bool,
    pub rising_edges: u32,
}

impl OutputPin for FakeLed {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Infallible> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        if !self.high {
            self.rising_edges += 1;
        }
        self.high = true;
        Ok(())
    }
}
