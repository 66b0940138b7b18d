//! Foreground console menu and LED blinker.
//!
//! Runs from `idle`. Never blocks: each pass drives the LED, takes whatever
//! the supervisor left in the mailbox and acts on it.

use embedded_hal::{digital::v2::OutputPin, serial};
use rtic::Mutex;

use crate::{
    config::{LED_OFF_TICKS, LED_ON_TICKS},
    display::{render_splash, Surface},
    shared::Controls,
    Error,
};

pub const MENU_BANNER: &str = "\r\n\n\
T - Toggle the LED\r\n\
S - Splash Screen\r\n\
1 - Toggle Data Display Requested\r\n\
2 - Toggle Data Display Serviced\r\n\
C - Toggle Count Display (reserved)\r\n\
Q - Quit Program\r\n";

/// Writes the menu banner to the console.
pub fn print_menu<W: serial::Write<u8>>(tx: &mut W) -> Result<(), Error> {
    for byte in MENU_BANNER.bytes() {
        nb::block!(tx.write(byte)).map_err(|_| Error::Serial)?;
    }
    nb::block!(tx.flush()).map_err(|_| Error::Serial)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum Command {
    ToggleLed,
    Splash,
    ToggleRequested,
    ToggleServiced,
    /// Listed in the menu, does nothing yet.
    ToggleCount,
    Quit,
}

impl Command {
    /// Case-insensitive command lookup.
    pub fn parse(byte: u8) -> Option<Command> {
        match byte.to_ascii_lowercase() {
            b't' => Some(Command::ToggleLed),
            b's' => Some(Command::Splash),
            b'1' => Some(Command::ToggleRequested),
            b'2' => Some(Command::ToggleServiced),
            b'c' => Some(Command::ToggleCount),
            b'q' => Some(Command::Quit),
            _ => None,
        }
    }
}

/// What the caller has to do after one menu pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum Action {
    Continue,
    /// Redraw the splash screen with the supervisor held off.
    Splash,
    Quit,
}

/// True during the on-phase of the blink period.
pub fn led_phase_on(tick: u32) -> bool {
    tick % (LED_ON_TICKS + LED_OFF_TICKS) < LED_ON_TICKS
}

pub struct Menu<L> {
    led: L,
    led_enabled: bool,
    blink: u32,
}

impl<L: OutputPin> Menu<L> {
    pub fn new(led: L) -> Self {
        Self {
            led,
            led_enabled: true,
            blink: 0,
        }
    }

    pub fn led_enabled(&self) -> bool {
        self.led_enabled
    }

    pub fn blink_counter(&self) -> u32 {
        self.blink
    }

    pub fn led(&self) -> &L {
        &self.led
    }

    /// One foreground iteration.
    pub fn poll(&mut self, controls: &Controls) -> Result<Action, Error> {
        if self.led_enabled && led_phase_on(self.blink) {
            self.led.set_high().map_err(|_| Error::Indicator)?;
        } else {
            self.led.set_low().map_err(|_| Error::Indicator)?;
        }

        let action = match controls.mailbox.take().and_then(Command::parse) {
            Some(command) => self.dispatch(controls, command),
            None => Action::Continue,
        };

        self.blink = self.blink.wrapping_add(1);
        Ok(action)
    }

    fn dispatch(&mut self, controls: &Controls, command: Command) -> Action {
        defmt::info!("command: {}", command);
        match command {
            Command::ToggleLed => {
                self.led_enabled = !self.led_enabled;
                Action::Continue
            }
            Command::Splash => Action::Splash,
            Command::ToggleRequested => {
                let mode = controls.requested.advance();
                defmt::info!("requested display: {}", mode);
                Action::Continue
            }
            Command::ToggleServiced => {
                let mode = controls.serviced.advance();
                defmt::info!("serviced display: {}", mode);
                Action::Continue
            }
            Command::ToggleCount => Action::Continue,
            Command::Quit => Action::Quit,
        }
    }
}

/// Runs the menu until a quit command arrives.
///
/// `shutdown` runs before the final clear; the app uses it to mask the
/// control loop interrupts so nothing redraws the cleared panel.
pub fn run<L, D, F>(
    menu: &mut Menu<L>,
    controls: &Controls,
    display: &mut D,
    shutdown: F,
) -> Result<(), Error>
where
    L: OutputPin,
    D: Mutex,
    D::T: Surface,
    F: FnOnce(),
{
    loop {
        match menu.poll(controls)? {
            Action::Continue => {}
            Action::Splash => display.lock(|surface| render_splash(surface))?,
            Action::Quit => break,
        }
    }
    shutdown();
    menu.led.set_low().map_err(|_| Error::Indicator)?;
    display.lock(|surface| {
        surface.clear()?;
        surface.present()
    })
}
