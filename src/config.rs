//! Compile-time configuration.
//!
//! The clock configuration is picked with the `pll-66mhz` Cargo feature and
//! fixes the ADC-to-frequency scale factor for the whole run.

use fugit::HertzU32;

/// Rate of the timing supervisor interrupt.
pub const SUPERVISOR_HZ: u32 = 1;

/// Largest raw reading of the 12-bit ADC.
pub const ADC_FULL_SCALE: u16 = 4095;

/// Lowest frequency the pulse generator is ever asked for.
pub const MIN_FREQUENCY_HZ: u32 = 1;

/// Shortest pulse period, in timer clock cycles, the generator is programmed
/// with. The pulse interrupt has to return well inside one period or it
/// re-enters forever and starves the supervisor.
pub const MIN_PULSE_PERIOD_CYCLES: u32 = 100;

/// Pulse generator rate before the first sample arrives.
pub const INITIAL_PULSE_HZ: u32 = 2;

/// LED duty cycle, in foreground loop iterations (about 5% on).
pub const LED_ON_TICKS: u32 = 20_000;
pub const LED_OFF_TICKS: u32 = 380_000;

/// Display rows (vertical centre, in pixels) of the two quantities.
pub const REQUESTED_ROW: i32 = 20;
pub const SERVICED_ROW: i32 = 35;

/// Bars extend this many pixels above and below their row.
pub const BAR_HALF_HEIGHT: i32 = 4;

/// Last pixel row of the splash banner band.
pub const BANNER_BOTTOM: i32 = 9;

pub const SPLASH_TITLE: &str = "Freq Tracker";

pub const REQUESTED_LABEL: &str = "Reqst";
pub const SERVICED_LABEL: &str = "Srv";

pub const CONSOLE_BAUD: u32 = 115_200;

/// One of the two supported system clock configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum ClockConfig {
    /// 16 MHz straight from the internal oscillator.
    Direct16MHz,
    /// 66 MHz from the PLL, APB1 at half speed.
    Pll66MHz,
}

impl ClockConfig {
    #[cfg(not(feature = "pll-66mhz"))]
    pub const ACTIVE: ClockConfig = ClockConfig::Direct16MHz;
    #[cfg(feature = "pll-66mhz")]
    pub const ACTIVE: ClockConfig = ClockConfig::Pll66MHz;

    pub const fn sysclk(self) -> HertzU32 {
        match self {
            ClockConfig::Direct16MHz => HertzU32::MHz(16),
            ClockConfig::Pll66MHz => HertzU32::MHz(66),
        }
    }

    pub const fn pclk1(self) -> HertzU32 {
        match self {
            ClockConfig::Direct16MHz => HertzU32::MHz(16),
            ClockConfig::Pll66MHz => HertzU32::MHz(33),
        }
    }

    /// Kernel clock of the APB1 timers. The bus prescaler is at most 2 in
    /// both configurations, so the timers always run at the system clock.
    pub const fn timer_clock_hz(self) -> u32 {
        self.sysclk().raw()
    }

    /// Hz requested per ADC count.
    pub const fn scale_factor(self) -> u32 {
        match self {
            ClockConfig::Direct16MHz => 159,
            ClockConfig::Pll66MHz => 500,
        }
    }

    /// Highest frequency the pulse interrupt can keep up with.
    pub const fn max_frequency_hz(self) -> u32 {
        self.timer_clock_hz() / MIN_PULSE_PERIOD_CYCLES
    }

    /// `raw × scale` at a full-scale ADC reading, before the ceiling applies.
    pub const fn full_scale_hz(self) -> u32 {
        ADC_FULL_SCALE as u32 * self.scale_factor()
    }
}
