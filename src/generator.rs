//! Hardware pulse generator: a periodic timer whose update interrupt is the
//! pulse being counted.

/// A free-running periodic timer.
pub trait PulseTimer {
    /// One-time setup: prescaler, update interrupt, update source.
    fn configure(&mut self);
    fn disable(&mut self);
    /// Sets the period to `cycles` timer clock ticks.
    fn set_reload(&mut self, cycles: u32);
    fn enable(&mut self);
    /// Clears the pending update flag from the pulse interrupt.
    fn acknowledge(&mut self);
}

pub struct PulseGenerator<T> {
    timer: T,
    reload: u32,
}

impl<T: PulseTimer> PulseGenerator<T> {
    pub fn new(mut timer: T) -> Self {
        timer.configure();
        Self { timer, reload: 0 }
    }

    /// Programs the first period and starts the timer.
    pub fn start(&mut self, cycles: u32) {
        self.reprogram(cycles);
    }

    /// Stops the timer, loads the new period and restarts it, so the
    /// counter never runs against a half-written reload value.
    pub fn reprogram(&mut self, cycles: u32) {
        self.timer.disable();
        self.timer.set_reload(cycles);
        self.timer.enable();
        self.reload = cycles;
    }

    #[inline(always)]
    pub fn acknowledge(&mut self) {
        self.timer.acknowledge();
    }

    /// Period currently loaded, in timer clock ticks.
    pub fn reload(&self) -> u32 {
        self.reload
    }

    pub fn release(self) -> T {
        self.timer
    }
}
