use thiserror_no_std::Error;

/// Faults that stop the control loop.
///
/// Transient conditions (ADC not ready, serial overrun) never show up here.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum Error {
    #[error("display bus fault")]
    Display,
    #[error("quantity label too long for the text buffer")]
    TextOverflow,
    #[error("serial console fault")]
    Serial,
    #[error("indicator pin fault")]
    Indicator,
}
