use crate::{
    display::{DisplayMode, ModeCell},
    mailbox::Mailbox,
    pulse::PulseCounter,
};

/// State shared between the pulse interrupt, the supervisor interrupt and
/// the foreground loop.
///
/// Every field is atomic, so tasks only ever need `&Controls`.
pub struct Controls {
    /// Written by the pulse interrupt, drained by the supervisor.
    pub pulses: PulseCounter,
    /// Posted by the supervisor, taken by the foreground loop.
    pub mailbox: Mailbox,
    /// Written by the foreground loop, read by the supervisor.
    pub requested: ModeCell,
    pub serviced: ModeCell,
}

impl Controls {
    pub const fn new() -> Self {
        Self {
            pulses: PulseCounter::new(),
            mailbox: Mailbox::new(),
            requested: ModeCell::new(DisplayMode::Numeric),
            serviced: ModeCell::new(DisplayMode::Numeric),
        }
    }
}
