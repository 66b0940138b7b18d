// $ cargo test -p testsuite --test sampler
#![no_std]
#![no_main]

use freq_tracker as _; // memory layout + panic handler

#[defmt_test::tests]
mod tests {
    use defmt::{assert, assert_eq};
    use freq_tracker::{generator::PulseGenerator, sampler::AdcSampler};
    use testsuite::{FakeConverter, FakeTimer, TimerOp};

    #[test]
    fn not_ready_before_trigger() {
        let mut sampler = AdcSampler::new(FakeConverter::default());
        sampler.converter_mut().complete = true;
        assert!(matches!(sampler.take_sample(), Err(nb::Error::WouldBlock)));
    }

    #[test]
    fn not_ready_while_converting() {
        let mut sampler = AdcSampler::new(FakeConverter::default());
        sampler.trigger();
        assert!(matches!(sampler.take_sample(), Err(nb::Error::WouldBlock)));
        assert!(sampler.is_converting());
    }

    #[test]
    fn take_returns_finished_conversion_once() {
        let mut sampler = AdcSampler::new(FakeConverter::default());
        sampler.trigger();
        sampler.converter_mut().finish(1234);
        assert_eq!(sampler.take_sample().ok(), Some(1234));
        assert!(!sampler.is_converting());
        assert!(matches!(sampler.take_sample(), Err(nb::Error::WouldBlock)));
    }

    #[test]
    fn sample_retriggers_immediately() {
        let mut sampler = AdcSampler::new(FakeConverter::default());
        sampler.trigger();
        sampler.converter_mut().finish(7);
        assert_eq!(sampler.sample().ok(), Some(7));
        assert!(sampler.is_converting());
        assert_eq!(sampler.converter().starts, 2);
        assert_eq!(sampler.release().reads, 1);
    }

    #[test]
    fn rearm_only_starts_an_idle_converter() {
        let mut sampler = AdcSampler::new(FakeConverter::default());
        sampler.rearm();
        assert_eq!(sampler.converter().starts, 1);
        sampler.rearm();
        assert_eq!(sampler.converter().starts, 1);
    }

    #[test]
    fn generator_start_loads_first_period() {
        let mut generator = PulseGenerator::new(FakeTimer::default());
        generator.start(8_000_000);
        assert_eq!(generator.reload(), 8_000_000);
        generator.acknowledge();
        assert_eq!(
            generator.release().ops.as_slice(),
            &[
                TimerOp::Configure,
                TimerOp::Disable,
                TimerOp::Reload(8_000_000),
                TimerOp::Enable,
                TimerOp::Acknowledge,
            ][..]
        );
    }
}
