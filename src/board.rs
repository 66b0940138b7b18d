//! Nucleo-F411RE bindings for the collaborator traits.
//!
//! | Function         | Peripheral | Pins          |
//! |------------------|------------|---------------|
//! | Analog input     | ADC1 IN0   | PA0           |
//! | Pulse generator  | TIM5       | -             |
//! | Supervisor tick  | TIM2       | -             |
//! | Console          | USART2     | PA2 TX, PA3 RX|
//! | OLED (SSD1306)   | I2C1       | PB8 SCL, PB9 SDA |
//! | LED (LD2)        | GPIOA      | PA5           |

use ssd1306::{mode::BufferedGraphicsMode, prelude::*, Ssd1306};
use stm32f4xx_hal::{
    adc::Adc,
    gpio::{
        gpioa::PA5,
        gpiob::{PB8, PB9},
        Alternate, OpenDrain, Output, PushPull,
    },
    i2c::I2c,
    pac::{ADC1, I2C1, RCC, TIM5, USART2},
    serial::Rx,
};

use crate::{display::Present, generator::PulseTimer, sampler::Converter, Error};

pub type OledI2c = I2c<I2C1, (PB8<Alternate<4, OpenDrain>>, PB9<Alternate<4, OpenDrain>>)>;
pub type Oled =
    Ssd1306<I2CInterface<OledI2c>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;
pub type ConsoleRx = Rx<USART2>;
pub type Led = PA5<Output<PushPull>>;

impl Converter for Adc<ADC1> {
    fn start(&mut self) {
        self.start_conversion();
    }

    fn is_complete(&self) -> bool {
        unsafe { (*ADC1::ptr()).sr.read().eoc().bit_is_set() }
    }

    fn read(&mut self) -> u16 {
        // Reading the data register clears EOC.
        self.current_sample()
    }
}

// TIM5 is 32 bits wide, so the reload never needs a prescaler.
impl PulseTimer for TIM5 {
    fn configure(&mut self) {
        let rcc = unsafe { &(*RCC::ptr()) };
        rcc.apb1enr.modify(|_, w| w.tim5en().set_bit());
        rcc.apb1rstr.modify(|_, w| w.tim5rst().set_bit());
        rcc.apb1rstr.modify(|_, w| w.tim5rst().clear_bit());
        self.psc.write(|w| w.psc().bits(0));
        // Forced reloads (UG) must not look like a pulse.
        self.cr1.modify(|_, w| w.urs().set_bit());
        self.dier.modify(|_, w| w.uie().set_bit());
    }

    fn disable(&mut self) {
        self.cr1.modify(|_, w| w.cen().clear_bit());
    }

    fn set_reload(&mut self, cycles: u32) {
        // ARR = 0 stops the counter.
        let arr = cycles.max(2) - 1;
        self.arr.write(|w| unsafe { w.bits(arr) });
        self.egr.write(|w| w.ug().set_bit());
    }

    fn enable(&mut self) {
        self.cr1.modify(|_, w| w.cen().set_bit());
    }

    #[inline(always)]
    fn acknowledge(&mut self) {
        self.sr.modify(|_, w| w.uif().clear_bit());
    }
}

impl Present for Oled {
    fn present(&mut self) -> Result<(), Error> {
        self.flush().map_err(|_| Error::Display)
    }
}
