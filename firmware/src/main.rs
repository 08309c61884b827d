#![no_main]
#![no_std]

mod joystick;
mod logger;
mod matrix;
mod oled;

use cortex_m_rt::entry;
use critical_section_lock_mut::LockMut;
use embedded_hal::delay::DelayNs;
use log::{info, LevelFilter};
use panic_rtt_target as _;
use rtt_target::rtt_init_print;

use microbit::{
    display::nonblocking::Display,
    hal::{
        clocks::Clocks,
        gpio::{Level, Output, Pin, PushPull},
        gpiote::{self, GpioteChannel},
        pac::{self, interrupt, RTC0},
        rtc::Rtc,
        saadc::{Gain, Oversample, Reference, Resistor, Resolution, Saadc, SaadcConfig, Time},
        twim::Twim,
        Timer,
    },
    pac::twim0::frequency::FREQUENCY_A,
};

use countdown::{
    display, Config, Controller, InputSource, JoystickAxisReader, MelodyPlayer, MillisClock,
    RgbIndicator, TickOutcome, EXPIRY_MELODY,
};

use crate::{joystick::SaadcAxis, matrix::BoardMatrix, oled::Oled};

type LedPin = Pin<Output<PushPull>>;
type TimerController = Controller<BoardMatrix, RgbIndicator<LedPin, LedPin, LedPin>>;

// RTC0 with prescaler 0: 24-bit counter at the 32 768 Hz low-frequency clock
const RTC_BITS: u32 = 24;
const RTC_HZ: u32 = 32_768;

// Shared between the interrupt handlers and the poll loop
static CLOCK: MillisClock = MillisClock::new(RTC_BITS, RTC_HZ);
static RTC: LockMut<Rtc<RTC0>> = LockMut::new();
static CONTROLLER: LockMut<TimerController> = LockMut::new();
static GPIOTE_PERIPHERAL: LockMut<gpiote::Gpiote> = LockMut::new();

fn now_ms() -> u32 {
    CLOCK.now_ms(|| {
        let mut counter = 0;
        RTC.with_lock(|rtc| counter = rtc.get_counter());
        counter
    })
}

// GPIOTE interrupt for Button A, Button B and the joystick press
#[interrupt]
fn GPIOTE() {
    let now = now_ms();
    let mut fired = [false; 3];
    GPIOTE_PERIPHERAL.with_lock(|gpiote| {
        fired = [
            take_event(&gpiote.channel0()),
            take_event(&gpiote.channel1()),
            take_event(&gpiote.channel2()),
        ];
    });

    for (source, fired) in InputSource::ALL.into_iter().zip(fired) {
        if fired {
            CONTROLLER.with_lock(|controller| {
                controller.on_edge(source, now);
            });
        }
    }
}

fn take_event(channel: &GpioteChannel<'_>) -> bool {
    let fired = channel.is_event_triggered();
    if fired {
        channel.reset_events();
    }
    fired
}

// TIMER1 interrupt for LED rendering
#[interrupt]
fn TIMER1() {
    matrix::handle_display_event();
}

#[entry]
fn main() -> ! {
    rtt_init_print!();
    logger::init(LevelFilter::Info);
    let board = microbit::Board::take().unwrap();
    let config = Config::default();

    // Millisecond clock: RTC0 free-running off the low-frequency clock,
    // synthesized from the external 32 MHz crystal
    Clocks::new(board.CLOCK)
        .enable_ext_hfosc()
        .set_lfclk_src_synth()
        .start_lfclk();
    let rtc = Rtc::new(board.RTC0, 0).unwrap();
    rtc.enable_counter();
    RTC.init(rtc);

    // Built-in matrix with non-blocking refresh on TIMER1
    matrix::init(Display::new(board.TIMER1, board.display_pins));

    // Character display on the external I2C bus
    let i2c = Twim::new(board.TWIM0, board.i2c_external.into(), FREQUENCY_A::K400);
    let mut oled = Oled::new(i2c);

    // RGB indicator on edge pins P8, P9 and P16
    let rgb = RgbIndicator::new(
        board.edge.e08.into_push_pull_output(Level::Low).degrade(),
        board.edge.e09.into_push_pull_output(Level::Low).degrade(),
        board.edge.e16.into_push_pull_output(Level::Low).degrade(),
    );

    let mut controller =
        Controller::new(config, BoardMatrix::new(config.cell_intensity), rgb).unwrap();
    controller.start();
    if let Some(minutes) = controller.take_display_update() {
        display::show_remaining(&mut oled, minutes);
    }
    CONTROLLER.init(controller);

    // Joystick X axis on P2
    let saadc_config = SaadcConfig {
        resolution: Resolution::_12BIT,
        oversample: Oversample::BYPASS,
        reference: Reference::VDD1_4,
        gain: Gain::GAIN1_4,
        resistor: Resistor::BYPASS,
        time: Time::_10US,
    };
    let saadc = Saadc::new(board.ADC, saadc_config);
    let mut joystick = JoystickAxisReader::new(
        SaadcAxis::new(saadc, board.edge.e02.into_floating_input()),
        config.thresholds,
    );

    let mut melody = MelodyPlayer::new(board.speaker_pin.into_push_pull_output(Level::Low));
    let mut delay = Timer::new(board.TIMER0);

    // Set up buttons as floating inputs, the joystick switch pulls to ground
    let button_a = board.buttons.button_a.into_floating_input();
    let button_b = board.buttons.button_b.into_floating_input();
    let joystick_press = board.edge.e12.into_pullup_input();

    let gpiote = gpiote::Gpiote::new(board.GPIOTE);

    // High-to-low = press on all three inputs
    let channel0 = gpiote.channel0();
    channel0
        .input_pin(&button_a.degrade())
        .hi_to_lo()
        .enable_interrupt();
    channel0.reset_events();

    let channel1 = gpiote.channel1();
    channel1
        .input_pin(&button_b.degrade())
        .hi_to_lo()
        .enable_interrupt();
    channel1.reset_events();

    let channel2 = gpiote.channel2();
    channel2
        .input_pin(&joystick_press.degrade())
        .hi_to_lo()
        .enable_interrupt();
    channel2.reset_events();

    GPIOTE_PERIPHERAL.init(gpiote);

    // SAFETY: every static the handlers touch is initialized above.
    unsafe {
        pac::NVIC::unmask(pac::Interrupt::TIMER1);
        pac::NVIC::unmask(pac::Interrupt::GPIOTE);
    }
    pac::NVIC::unpend(pac::Interrupt::GPIOTE);

    info!("countdown timer ready");

    loop {
        let direction = joystick.sample();
        let now = now_ms();

        let mut outcome = TickOutcome::default();
        let mut line = None;
        CONTROLLER.with_lock(|controller| {
            outcome = controller.tick(now, direction);
            line = controller.take_display_update();
        });

        // The I2C flush takes tens of milliseconds, so it runs with interrupts on
        if let Some(minutes) = line {
            display::show_remaining(&mut oled, minutes);
        }

        // Outside the lock so button presses keep landing during the tune
        if outcome.play_melody {
            melody.play(&mut delay, &EXPIRY_MELODY);
        }

        delay.delay_ms(config.poll_interval_ms);
    }
}
