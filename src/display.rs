//! Display modes and rendering of the requested and serviced frequencies.

use core::{
    fmt::Write,
    sync::atomic::{AtomicU8, Ordering},
};

use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Alignment, Baseline, Text, TextStyle, TextStyleBuilder},
};
use heapless::String;

use crate::{
    config::{BANNER_BOTTOM, BAR_HALF_HEIGHT, REQUESTED_LABEL, SERVICED_LABEL, SPLASH_TITLE},
    Error,
};

/// How a quantity is drawn. Cycles Off -> Numeric -> Bar -> Off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
#[repr(u8)]
pub enum DisplayMode {
    Off = 0,
    Numeric = 1,
    Bar = 2,
}

impl DisplayMode {
    pub const COUNT: u8 = 3;

    pub const fn next(self) -> Self {
        Self::from_bits((self as u8 + 1) % Self::COUNT)
    }

    const fn from_bits(bits: u8) -> Self {
        match bits {
            1 => DisplayMode::Numeric,
            2 => DisplayMode::Bar,
            _ => DisplayMode::Off,
        }
    }
}

/// A `DisplayMode` readable from any context without locking.
///
/// Only the foreground loop writes it.
pub struct ModeCell(AtomicU8);

impl ModeCell {
    pub const fn new(mode: DisplayMode) -> Self {
        Self(AtomicU8::new(mode as u8))
    }

    pub fn get(&self) -> DisplayMode {
        DisplayMode::from_bits(self.0.load(Ordering::Relaxed))
    }

    pub fn set(&self, mode: DisplayMode) {
        self.0.store(mode as u8, Ordering::Relaxed);
    }

    /// Moves to the next mode and returns it.
    pub fn advance(&self) -> DisplayMode {
        let next = self.get().next();
        self.set(next);
        next
    }
}

/// The small graphics surface the controller draws on.
pub trait Surface {
    /// Width in pixels.
    fn width(&self) -> u32;
    fn clear(&mut self) -> Result<(), Error>;
    /// Draws `text` horizontally centred, vertically centred on `row`.
    fn draw_centered_text(&mut self, row: i32, text: &str) -> Result<(), Error>;
    /// Fills a bar from the left edge, `width` pixels wide, centred on `row`.
    fn fill_bar(&mut self, row: i32, width: u32) -> Result<(), Error>;
    /// Fills the top band and writes `title` into it.
    fn draw_banner(&mut self, title: &str) -> Result<(), Error>;
    /// Pushes the drawn frame to the panel.
    fn present(&mut self) -> Result<(), Error>;
}

/// Frame buffers that need an explicit push to reach the glass.
pub trait Present {
    fn present(&mut self) -> Result<(), Error>;
}

/// `Surface` over any monochrome `embedded-graphics` target.
pub struct Panel<D> {
    target: D,
}

impl<D> Panel<D> {
    pub fn new(target: D) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn release(self) -> D {
        self.target
    }
}

fn centered() -> TextStyle {
    TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build()
}

impl<D> Surface for Panel<D>
where
    D: DrawTarget<Color = BinaryColor> + Present,
{
    fn width(&self) -> u32 {
        self.target.bounding_box().size.width
    }

    fn clear(&mut self) -> Result<(), Error> {
        self.target
            .clear(BinaryColor::Off)
            .map_err(|_| Error::Display)
    }

    fn draw_centered_text(&mut self, row: i32, text: &str) -> Result<(), Error> {
        let centre = Point::new(self.width() as i32 / 2, row);
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        Text::with_text_style(text, centre, style, centered())
            .draw(&mut self.target)
            .map(drop)
            .map_err(|_| Error::Display)
    }

    fn fill_bar(&mut self, row: i32, width: u32) -> Result<(), Error> {
        if width == 0 {
            return Ok(());
        }
        Rectangle::with_corners(
            Point::new(0, row - BAR_HALF_HEIGHT),
            Point::new(width as i32 - 1, row + BAR_HALF_HEIGHT),
        )
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(&mut self.target)
        .map_err(|_| Error::Display)
    }

    fn draw_banner(&mut self, title: &str) -> Result<(), Error> {
        let width = self.width();
        Rectangle::new(Point::zero(), Size::new(width, BANNER_BOTTOM as u32 + 1))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut self.target)
            .map_err(|_| Error::Display)?;
        // Inverted text on the filled band.
        let centre = Point::new(width as i32 / 2, BANNER_BOTTOM / 2);
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::Off);
        Text::with_text_style(title, centre, style, centered())
            .draw(&mut self.target)
            .map(drop)
            .map_err(|_| Error::Display)
    }

    fn present(&mut self) -> Result<(), Error> {
        self.target.present()
    }
}

/// Bar length for `value` on a `width` pixel panel, `full_scale` filling it.
pub fn bar_width(value: u32, full_scale: u32, width: u32) -> u32 {
    if full_scale == 0 {
        return 0;
    }
    let scaled = value as u64 * width as u64 / full_scale as u64;
    scaled.min(width as u64) as u32
}

const LABEL_LEN: usize = if REQUESTED_LABEL.len() > SERVICED_LABEL.len() {
    REQUESTED_LABEL.len()
} else {
    SERVICED_LABEL.len()
};

/// "<label>: <value>" for the longest built-in label and a ten-digit `u32`.
pub const QUANTITY_TEXT_LEN: usize = LABEL_LEN + ": ".len() + 10;

/// Draws one quantity at `row` according to `mode`.
///
/// Fails with [`Error::TextOverflow`] for a label longer than the built-in
/// ones.
pub fn render_quantity<S: Surface>(
    surface: &mut S,
    row: i32,
    label: &str,
    value: u32,
    mode: DisplayMode,
    full_scale: u32,
) -> Result<(), Error> {
    match mode {
        DisplayMode::Off => Ok(()),
        DisplayMode::Numeric => {
            let mut text: String<QUANTITY_TEXT_LEN> = String::new();
            write!(text, "{}: {}", label, value).map_err(|_| Error::TextOverflow)?;
            surface.draw_centered_text(row, &text)
        }
        DisplayMode::Bar => {
            let width = bar_width(value, full_scale, surface.width());
            surface.fill_bar(row, width)
        }
    }
}

/// Clears the panel and shows the title banner.
pub fn render_splash<S: Surface>(surface: &mut S) -> Result<(), Error> {
    surface.clear()?;
    surface.draw_banner(SPLASH_TITLE)?;
    surface.present()
}
