//! One-shot hardware peripheral initialization.
//!
//! Configures GPIO directions from [`crate::pins::PIN_TABLE`], the LEDC timer and
//! channel driving the servo, and the console UART baud rate, using raw
//! ESP-IDF sys calls.  Called once from `main()` before the control loop.
//!
//! On host targets the register accessors are backed by an in-memory pin
//! bank so adapters and drivers can be exercised in tests.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use crate::error::ActuatorError;
#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    LedcInitFailed(i32),
    UartConfigFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::LedcInitFailed(rc)   => write!(f, "LEDC timer/channel config failed (rc={})", rc),
            Self::UartConfigFailed(rc) => write!(f, "console UART config failed (rc={})", rc),
        }
    }
}

impl From<HwInitError> for crate::error::Error {
    fn from(e: HwInitError) -> Self {
        match e {
            HwInitError::GpioConfigFailed(_) => Self::Init("GPIO config failed"),
            HwInitError::LedcInitFailed(_) => Self::Init("LEDC config failed"),
            HwInitError::UartConfigFailed(_) => Self::Init("console UART config failed"),
        }
    }
}

#[cfg(target_os = "espidf")]
use log::info;

/// LEDC channel carrying the servo signal.
pub const LEDC_CH_SERVO: u32 = 0;

#[cfg(target_os = "espidf")]
pub fn init_peripherals(log_baud_rate: u32) -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_log_uart(log_baud_rate)?;
        init_gpio()?;
        init_ledc()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals(_log_baud_rate: u32) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── Console UART ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_log_uart(baud: u32) -> Result<(), HwInitError> {
    // UART0 carries the log console.
    let ret = unsafe { uart_set_baudrate(0, baud) };
    if ret != ESP_OK as i32 { return Err(HwInitError::UartConfigFailed(ret)); }
    info!("hw_init: console UART at {} baud", baud);
    Ok(())
}

// ── GPIO ──────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio() -> Result<(), HwInitError> {
    for a in &pins::PIN_TABLE {
        // The servo line is claimed by LEDC below.
        if a.role == pins::PinRole::ServoSignal {
            continue;
        }
        let mode = match a.direction {
            pins::PinDirection::Output => gpio_mode_t_GPIO_MODE_OUTPUT,
            pins::PinDirection::Input => gpio_mode_t_GPIO_MODE_INPUT,
        };
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << a.gpio,
            mode,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
        if a.direction == pins::PinDirection::Output {
            unsafe { gpio_set_level(a.gpio, 0) };
        }
    }

    info!("hw_init: GPIO configured ({} pins)", pins::PIN_TABLE.len() - 1);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe to call from main context.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) -> Result<(), ActuatorError> {
    // SAFETY: gpio_set_level writes to an output pin configured in
    // init_gpio(). Main-loop only.
    let ret = unsafe { gpio_set_level(pin, u32::from(high)) };
    if ret != ESP_OK as i32 { return Err(ActuatorError::GpioWriteFailed); }
    Ok(())
}

// ── LEDC PWM (servo) ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_ledc() -> Result<(), HwInitError> {
    // Timer 0: servo frame (50 Hz, 14-bit)
    let timer0 = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: ledc_timer_t_LEDC_TIMER_0,
        duty_resolution: ledc_timer_bit_t_LEDC_TIMER_14_BIT,
        freq_hz: pins::SERVO_PWM_FREQ_HZ,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    let ret = unsafe { ledc_timer_config(&timer0) };
    if ret != ESP_OK as i32 { return Err(HwInitError::LedcInitFailed(ret)); }

    // Channel 0: servo signal, idle (no pulse) until the first setpoint.
    let ret = unsafe { ledc_channel_config(&ledc_channel_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        channel: LEDC_CH_SERVO,
        timer_sel: ledc_timer_t_LEDC_TIMER_0,
        gpio_num: pins::SERVO_GPIO,
        duty: 0,
        hpoint: 0,
        ..Default::default()
    }) };
    if ret != ESP_OK as i32 { return Err(HwInitError::LedcInitFailed(ret)); }

    info!("hw_init: LEDC configured (servo=CH0 @ {} Hz)", pins::SERVO_PWM_FREQ_HZ);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn ledc_set(channel: u32, duty: u32) -> Result<(), ActuatorError> {
    // SAFETY: LEDC channel was configured in init_ledc(); duty register
    // writes are race-free since only the main loop calls this function.
    let ret = unsafe { ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, duty) };
    if ret != ESP_OK as i32 { return Err(ActuatorError::PwmWriteFailed); }
    let ret = unsafe { ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel) };
    if ret != ESP_OK as i32 { return Err(ActuatorError::PwmWriteFailed); }
    Ok(())
}

// ── Host pin bank ─────────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
mod sim {
    use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

    const BANK: usize = 64;
    const LEDC_CHANNELS: usize = 8;

    static LEVELS: [AtomicBool; BANK] = [const { AtomicBool::new(false) }; BANK];
    static DUTIES: [AtomicU32; LEDC_CHANNELS] = [const { AtomicU32::new(0) }; LEDC_CHANNELS];

    pub fn level(pin: i32) -> bool {
        usize::try_from(pin)
            .ok()
            .and_then(|i| LEVELS.get(i))
            .is_some_and(|l| l.load(Ordering::Relaxed))
    }

    pub fn set_level(pin: i32, high: bool) -> bool {
        match usize::try_from(pin).ok().and_then(|i| LEVELS.get(i)) {
            Some(l) => {
                l.store(high, Ordering::Relaxed);
                true
            }
            None => false,
        }
    }

    pub fn duty(channel: u32) -> u32 {
        DUTIES
            .get(channel as usize)
            .map_or(0, |d| d.load(Ordering::Relaxed))
    }

    pub fn set_duty(channel: u32, duty: u32) -> bool {
        match DUTIES.get(channel as usize) {
            Some(d) => {
                d.store(duty, Ordering::Relaxed);
                true
            }
            None => false,
        }
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(pin: i32) -> bool {
    sim::level(pin)
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(pin: i32, high: bool) -> Result<(), ActuatorError> {
    if sim::set_level(pin, high) {
        Ok(())
    } else {
        Err(ActuatorError::GpioWriteFailed)
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set(channel: u32, duty: u32) -> Result<(), ActuatorError> {
    if sim::set_duty(channel, duty) {
        Ok(())
    } else {
        Err(ActuatorError::PwmWriteFailed)
    }
}

/// Drive a simulated input level (e.g. an echo line) from a host test.
#[cfg(not(target_os = "espidf"))]
pub fn sim_drive_input(pin: i32, high: bool) {
    sim::set_level(pin, high);
}

/// Last duty written to an LEDC channel on the host pin bank.
#[cfg(not(target_os = "espidf"))]
pub fn sim_ledc_duty(channel: u32) -> u32 {
    sim::duty(channel)
}
