//! VehicleGate Firmware: Main Entry Point
//!
//! Hexagonal architecture around a single blocking control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter          LogEventSink      Esp32TimeAdapter   │
//! │  (Ranging+Actuator)       (EventSink)       (TimePort)         │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              ControlLoop (pure logic)                  │    │
//! │  │  thresholds · GateActuator                             │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use log::info;

use vehiclegate::adapters::hardware::HardwareAdapter;
use vehiclegate::adapters::log_sink::LogEventSink;
use vehiclegate::app::service::ControlLoop;
use vehiclegate::config::SystemConfig;
use vehiclegate::drivers::delay::BlockingDelay;
use vehiclegate::drivers::gpio::{GpioInput, GpioOutput};
use vehiclegate::drivers::hw_init;
use vehiclegate::drivers::indicator_led::IndicatorLed;
use vehiclegate::drivers::servo::ServoDriver;
use vehiclegate::error::Error;
use vehiclegate::pins::{gpio_for, PinRole};
use vehiclegate::sensors::ultrasonic::{PulseTiming, Ultrasonic};

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  VehicleGate v{}                     ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration (compile-time defaults) ──────────────
    let config = SystemConfig::default();
    config.validate()?;
    info!("Config: {}", serde_json::to_string(&config)?);

    // ── 3. Initialise hardware peripherals ────────────────────
    if let Err(e) = hw_init::init_peripherals(config.log_baud_rate) {
        // Peripheral init failure is fatal.
        log::error!("{} ({}), halting", Error::from(e), e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 4. Construct adapters ─────────────────────────────────
    let mut hw = HardwareAdapter::new(
        Ultrasonic::new(
            GpioOutput::new(gpio_for(PinRole::EntryTrigger)),
            GpioInput::new(gpio_for(PinRole::EntryEcho)),
        ),
        Ultrasonic::new(
            GpioOutput::new(gpio_for(PinRole::ExitTrigger)),
            GpioInput::new(gpio_for(PinRole::ExitEcho)),
        ),
        PulseTiming::from(&config),
        ServoDriver::new(
            hw_init::LEDC_CH_SERVO,
            config.servo_min_pulse_us,
            config.servo_max_pulse_us,
        ),
        IndicatorLed::new(gpio_for(PinRole::ReadyLed)),
        IndicatorLed::new(gpio_for(PinRole::AlertLed)),
    );
    let mut log_sink = LogEventSink::new();
    let mut delay = BlockingDelay;

    // ── 5. Initial outputs: gate open, green on, red off ──────
    let mut control = ControlLoop::new(config);
    control.start(&mut hw, &mut log_sink);

    info!("System ready. Entering control loop.");

    // ── 6. Control loop (never returns) ───────────────────────
    control.run(&mut hw, &mut log_sink, &mut delay)
}
