// $ cargo rb freq-tracker
// Track a knob-selected pulse rate and measure what the pulse generator delivers
#![no_main]
#![no_std]

use freq_tracker as _; // global logger + panicking-behavior + memory layout

#[rtic::app(device = stm32f4xx_hal::pac, peripherals = true)]
mod app {
    use freq_tracker::{
        board::{ConsoleRx, Led, Oled},
        config::{ClockConfig, CONSOLE_BAUD, INITIAL_PULSE_HZ, SUPERVISOR_HZ},
        controller::FrequencyController,
        display::{self, Panel},
        generator::PulseGenerator,
        menu::{self, Menu},
        sampler::AdcSampler,
        shared::Controls,
        supervisor::Supervisor,
    };
    use ssd1306::{prelude::*, I2CDisplayInterface, Ssd1306};
    use stm32f4xx_hal::{
        adc::{
            config::{AdcConfig, SampleTime, Sequence},
            Adc,
        },
        i2c::I2c,
        pac::{Interrupt, ADC1, NVIC, TIM2, TIM5},
        prelude::*,
        serial::{config::Config, Serial},
        timer::{CounterHz, Event},
    };

    #[shared]
    struct Shared {
        controls: Controls,
        display: Panel<Oled>,
        generator: PulseGenerator<TIM5>,
    }

    #[local]
    struct Local {
        tick: CounterHz<TIM2>,
        rx: ConsoleRx,
        supervisor: Supervisor<Adc<ADC1>>,
        menu: Menu<Led>,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        let clock = ClockConfig::ACTIVE;

        // Set up the system clock.
        let rcc = ctx.device.RCC.constrain();
        let clocks = rcc
            .cfgr
            .sysclk(clock.sysclk())
            .pclk1(clock.pclk1())
            .freeze();
        defmt::info!("clock: {}, sysclk {=u32} Hz", clock, clocks.sysclk().raw());

        let gpioa = ctx.device.GPIOA.split();
        let gpiob = ctx.device.GPIOB.split();

        // Console on the ST-LINK virtual COM port.
        let tx_pin = gpioa.pa2.into_alternate();
        let rx_pin = gpioa.pa3.into_alternate();
        let serial = Serial::new(
            ctx.device.USART2,
            (tx_pin, rx_pin),
            Config::default().baudrate(CONSOLE_BAUD.bps()),
            &clocks,
        )
        .unwrap();
        let (mut tx, rx) = serial.split();

        // Configure the OLED display.
        let scl = gpiob.pb8.into_alternate_open_drain();
        let sda = gpiob.pb9.into_alternate_open_drain();
        let i2c = I2c::new(ctx.device.I2C1, (scl, sda), 400.kHz(), &clocks);
        let interface = I2CDisplayInterface::new(i2c);
        let mut oled = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        oled.init().unwrap();
        let mut panel = Panel::new(oled);
        defmt::unwrap!(display::render_splash(&mut panel));
        defmt::unwrap!(menu::print_menu(&mut tx));

        // Knob on PA0. Prime the first conversion so the first tick has a sample.
        let adc_pin = gpioa.pa0.into_analog();
        let mut adc = Adc::adc1(ctx.device.ADC1, true, AdcConfig::default());
        adc.configure_channel(&adc_pin, Sequence::One, SampleTime::Cycles_480);
        adc.enable();
        let mut sampler = AdcSampler::new(adc);
        sampler.trigger();
        let supervisor = Supervisor::new(sampler, FrequencyController::new(clock));

        let mut generator = PulseGenerator::new(ctx.device.TIM5);
        generator.start(clock.timer_clock_hz() / INITIAL_PULSE_HZ);

        let mut tick = ctx.device.TIM2.counter_hz(&clocks);
        tick.start(SUPERVISOR_HZ.Hz()).unwrap();
        tick.listen(Event::Update);

        // Set up the LED. On the Nucleo-F411RE it's connected to pin PA5.
        let led = gpioa.pa5.into_push_pull_output();

        defmt::info!("tracking started");
        (
            Shared {
                controls: Controls::new(),
                display: panel,
                generator,
            },
            Local {
                tick,
                rx,
                supervisor,
                menu: Menu::new(led),
            },
            init::Monotonics(),
        )
    }

    #[idle(shared = [&controls, display], local = [menu])]
    fn idle(ctx: idle::Context) -> ! {
        let idle::SharedResources {
            controls,
            mut display,
        } = ctx.shared;
        let stopped = menu::run(ctx.local.menu, controls, &mut display, || {
            NVIC::mask(Interrupt::TIM2);
            NVIC::mask(Interrupt::TIM5);
        });
        if let Err(e) = stopped {
            defmt::panic!("foreground fault: {}", e);
        }
        defmt::info!("quit");
        freq_tracker::exit()
    }

    // Fires once per second
    #[task(binds = TIM2, priority = 2, shared = [&controls, display, generator], local = [tick, rx, supervisor])]
    fn on_tick(ctx: on_tick::Context) {
        let on_tick::SharedResources {
            controls,
            mut display,
            mut generator,
        } = ctx.shared;
        ctx.local.tick.clear_interrupt(Event::Update);
        match ctx
            .local
            .supervisor
            .cycle(controls, &mut display, &mut generator, ctx.local.rx)
        {
            Ok(report) => defmt::trace!("cycle: {}", report),
            Err(e) => defmt::panic!("supervisor fault: {}", e),
        }
    }

    // Fires once per generated pulse. Preempts the supervisor so the display
    // flush does not drop counts; the controller caps the rate so this
    // handler always returns before the next pulse is due.
    #[task(binds = TIM5, priority = 3, shared = [&controls, generator])]
    fn on_pulse(ctx: on_pulse::Context) {
        let on_pulse::SharedResources {
            controls,
            mut generator,
        } = ctx.shared;
        generator.lock(|g| g.acknowledge());
        controls.pulses.record();
    }
}
