#![no_std]
#![no_main]

use defmt::{error, info, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART1;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{Config as UartConfig, Uart};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{with_timeout, Duration, Timer};
use ibus_drive_rp2040::{
    mix, ChannelSource, Channels, DirectionMode, DriveCommand, DriveOutput, FailsafePolicy,
    IbusInputSource, MixerConfig, Motor, PwmDriveOutput, DEFAULT_LAYOUT, IBUS_BAUDRATE,
};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    UART1_IRQ => embassy_rp::uart::InterruptHandler<UART1>;
});

/// PWM wrap value; motor duty lands in [0, DUTY_MAX].
const DUTY_MAX: u16 = 500;

/// Drive mixing configuration.
const MIXER_CONFIG: MixerConfig = MixerConfig {
    duty_max: DUTY_MAX,
    steer_deadband: 10,
    throttle_deadband: 10,
    direction_mode: DirectionMode::AlwaysForward,
    layout: DEFAULT_LAYOUT,
};

/// What to drive when the receiver goes silent.
const FAILSAFE_POLICY: FailsafePolicy = FailsafePolicy::StopOnTimeout;

/// Receiver-loss timeout. Frames normally arrive every ~7 ms, so this
/// tolerates tens of dropped frames before the failsafe engages.
const RECEIVER_TIMEOUT: Duration = Duration::from_millis(500);

/// Control ticks between telemetry lines (roughly 3 per second).
const TELEMETRY_INTERVAL: u32 = 50;

/// Signal for passing channel snapshots from input to drive task.
/// Using Signal instead of Channel provides "latest value wins"
/// semantics, and publishes all six channels as one atomic value.
static CHANNEL_SIGNAL: StaticCell<Signal<CriticalSectionRawMutex, Channels>> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("iBUS drive starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // Latest-value channel snapshot shared between the tasks
    let signal = CHANNEL_SIGNAL.init(Signal::new());

    // --- UART Setup ---
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = IBUS_BAUDRATE;

    let uart = Uart::new(
        p.UART1,
        p.PIN_4, // TX (unused, iBUS is receive-only)
        p.PIN_5, // RX (iBUS data input)
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        uart_config,
    );
    let (_tx, rx) = uart.split();
    let input = IbusInputSource::new(rx);

    // --- Motor Setup ---
    let mut pwm_config = PwmConfig::default();
    pwm_config.top = DUTY_MAX;
    pwm_config.compare_a = 0;

    let left = Motor::new(
        Pwm::new_output_a(p.PWM_SLICE1, p.PIN_2, pwm_config.clone()),
        pwm_config.clone(),
        Output::new(p.PIN_6, Level::Low),
        Output::new(p.PIN_7, Level::Low),
    );
    let right = Motor::new(
        Pwm::new_output_a(p.PWM_SLICE5, p.PIN_10, pwm_config.clone()),
        pwm_config.clone(),
        Output::new(p.PIN_11, Level::Low),
        Output::new(p.PIN_12, Level::Low),
    );
    let output = PwmDriveOutput::new(left, right);

    // Status LED
    let led = Output::new(p.PIN_18, Level::Low);

    spawner.spawn(input_task(input, signal)).unwrap();
    spawner.spawn(drive_task(output, signal)).unwrap();
    spawner.spawn(blink_task(led)).unwrap();

    info!("iBUS drive initialized, waiting for frames...");
}

/// Input task - decodes iBUS frames and signals the latest channels.
#[embassy_executor::task]
async fn input_task(
    mut input: IbusInputSource<'static>,
    signal: &'static Signal<CriticalSectionRawMutex, Channels>,
) {
    loop {
        match input.receive().await {
            Ok(channels) => {
                // Signal the latest snapshot (overwrites any pending value)
                signal.signal(channels);
            }
            Err(e) => {
                // UART-level errors only; framing and checksum failures
                // are absorbed by the decoder's resynchronization.
                error!("Input error: {:?}", e);
            }
        }
    }
}

/// Drive task - mixes channel snapshots into motor commands.
///
/// Runs once per received frame, or once per timeout interval while the
/// receiver is silent; the command is applied unconditionally each tick.
#[embassy_executor::task]
async fn drive_task(
    mut output: PwmDriveOutput<'static>,
    signal: &'static Signal<CriticalSectionRawMutex, Channels>,
) {
    let mut channels = Channels::default();
    let mut command = DriveCommand::STOP;
    let mut tick: u32 = 0;

    loop {
        match with_timeout(RECEIVER_TIMEOUT, signal.wait()).await {
            Ok(fresh) => {
                channels = fresh;
                command = mix(&channels, &MIXER_CONFIG);
            }
            Err(_) => {
                command = FAILSAFE_POLICY.apply(command);
                warn!(
                    "No frames for {} ms, failsafe engaged",
                    RECEIVER_TIMEOUT.as_millis()
                );
            }
        }

        if let Err(e) = output.apply(&command).await {
            error!("Output error: {:?}", e);
        }

        tick = tick.wrapping_add(1);
        if tick % TELEMETRY_INTERVAL == 0 {
            info!(
                "ch%[{} {} {} {} {} {}] left={} right={}",
                channels.percent(0),
                channels.percent(1),
                channels.percent(2),
                channels.percent(3),
                channels.percent(4),
                channels.percent(5),
                command.left.speed,
                command.right.speed,
            );
        }
    }
}

/// Blink task - status heartbeat on the LED.
#[embassy_executor::task]
async fn blink_task(mut led: Output<'static>) {
    loop {
        led.toggle();
        Timer::after_millis(250).await;
    }
}
