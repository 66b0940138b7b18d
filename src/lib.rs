#![no_std]

use cortex_m_rt::{exception, ExceptionFrame};
use defmt_rtt as _; // global logger
use panic_probe as _;
use stm32f4xx_hal as _; // memory layout

pub mod board;
pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod generator;
pub mod mailbox;
pub mod menu;
pub mod pulse;
pub mod sampler;
pub mod shared;
pub mod supervisor;

pub use error::Error;

// same panicking *behavior* as `panic-probe` but doesn't print a panic message
// this prevents the panic message being printed *twice* when `defmt::panic` is invoked
#[defmt::panic_handler]
fn panic() -> ! {
    cortex_m::asm::udf()
}

#[exception]
unsafe fn HardFault(frame: &ExceptionFrame) -> ! {
    defmt::error!(
        "hard fault: pc={=u32:#x} lr={=u32:#x}",
        frame.pc(),
        frame.lr()
    );
    exit()
}

/// Terminates the application and makes `probe-run` exit with exit-code = 0
pub fn exit() -> ! {
    loop {
        cortex_m::asm::bkpt();
    }
}
