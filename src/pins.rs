//! GPIO / peripheral pin assignments for the gate controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Renumber a pin here for a different deployment
//! and it propagates everywhere, including [`PIN_TABLE`] used at init.

// ---------------------------------------------------------------------------
// Gate servo (hobby servo, 50 Hz PWM)
// ---------------------------------------------------------------------------

/// LEDC PWM output driving the servo signal line.
pub const SERVO_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Status indicators (discrete LEDs, active HIGH)
// ---------------------------------------------------------------------------

/// Red alert indicator: lit while the gate is closed.
pub const ALERT_LED_GPIO: i32 = 8;
/// Green ready indicator: lit while the gate is open.
pub const READY_LED_GPIO: i32 = 10;

// ---------------------------------------------------------------------------
// Ultrasonic rangers (HC-SR04 style: trigger out, echo in)
// ---------------------------------------------------------------------------

pub const ENTRY_TRIG_GPIO: i32 = 2;
pub const ENTRY_ECHO_GPIO: i32 = 3;
pub const EXIT_TRIG_GPIO: i32 = 4;
pub const EXIT_ECHO_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// Servo frame rate.  Standard hobby servos expect a 20 ms period.
pub const SERVO_PWM_FREQ_HZ: u32 = 50;
/// One PWM period.  A servo pulse cannot be longer than this.
pub const SERVO_FRAME_US: u32 = 1_000_000 / SERVO_PWM_FREQ_HZ;
/// LEDC timer resolution for the servo channel.  14 bits at 50 Hz gives
/// ~1.2 µs per duty step, well below servo deadband.
pub const SERVO_PWM_RESOLUTION_BITS: u32 = 14;

// ---------------------------------------------------------------------------
// Pin role table
// ---------------------------------------------------------------------------

/// Direction a pin is configured for at init.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinDirection {
    Output,
    Input,
}

/// Logical signal carried by a physical pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinRole {
    ServoSignal,
    AlertLed,
    ReadyLed,
    EntryTrigger,
    EntryEcho,
    ExitTrigger,
    ExitEcho,
}

/// One row of the pin configuration table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinAssignment {
    pub role: PinRole,
    pub gpio: i32,
    pub direction: PinDirection,
}

const fn assign(role: PinRole, gpio: i32, direction: PinDirection) -> PinAssignment {
    PinAssignment { role, gpio, direction }
}

/// Every pin the firmware touches, in init order.
pub const PIN_TABLE: [PinAssignment; 7] = [
    assign(PinRole::ServoSignal, SERVO_GPIO, PinDirection::Output),
    assign(PinRole::AlertLed, ALERT_LED_GPIO, PinDirection::Output),
    assign(PinRole::ReadyLed, READY_LED_GPIO, PinDirection::Output),
    assign(PinRole::EntryTrigger, ENTRY_TRIG_GPIO, PinDirection::Output),
    assign(PinRole::EntryEcho, ENTRY_ECHO_GPIO, PinDirection::Input),
    assign(PinRole::ExitTrigger, EXIT_TRIG_GPIO, PinDirection::Output),
    assign(PinRole::ExitEcho, EXIT_ECHO_GPIO, PinDirection::Input),
];

/// Look up the GPIO assigned to `role`.
pub const fn gpio_for(role: PinRole) -> i32 {
    match role {
        PinRole::ServoSignal => SERVO_GPIO,
        PinRole::AlertLed => ALERT_LED_GPIO,
        PinRole::ReadyLed => READY_LED_GPIO,
        PinRole::EntryTrigger => ENTRY_TRIG_GPIO,
        PinRole::EntryEcho => ENTRY_ECHO_GPIO,
        PinRole::ExitTrigger => EXIT_TRIG_GPIO,
        PinRole::ExitEcho => EXIT_ECHO_GPIO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_gpio_is_assigned_twice() {
        for (i, a) in PIN_TABLE.iter().enumerate() {
            for b in &PIN_TABLE[i + 1..] {
                assert_ne!(a.gpio, b.gpio, "{:?} and {:?} share a pin", a.role, b.role);
            }
        }
    }

    #[test]
    fn echo_lines_are_inputs_and_everything_else_outputs() {
        for a in &PIN_TABLE {
            let expect = match a.role {
                PinRole::EntryEcho | PinRole::ExitEcho => PinDirection::Input,
                _ => PinDirection::Output,
            };
            assert_eq!(a.direction, expect, "{:?}", a.role);
        }
    }

    #[test]
    fn gpio_for_resolves_every_role() {
        assert_eq!(gpio_for(PinRole::ServoSignal), SERVO_GPIO);
        assert_eq!(gpio_for(PinRole::EntryTrigger), ENTRY_TRIG_GPIO);
        assert_eq!(gpio_for(PinRole::ExitEcho), EXIT_ECHO_GPIO);
        assert_eq!(gpio_for(PinRole::ReadyLed), READY_LED_GPIO);
    }

    #[test]
    fn gpio_for_agrees_with_table() {
        for a in &PIN_TABLE {
            assert_eq!(gpio_for(a.role), a.gpio, "{:?}", a.role);
        }
    }
}
