//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements   | Connects to                  |
//! |------------|--------------|------------------------------|
//! | `hardware` | RangingPort  | Ultrasonic trigger/echo GPIO |
//! |            | ActuatorPort | Servo LEDC PWM, LED GPIO     |
//! | `log_sink` | EventSink    | Serial log output            |
//! | `time`     | TimePort     | ESP32 system timer           |

pub mod hardware;
pub mod log_sink;
pub mod time;
