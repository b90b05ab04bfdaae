//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements   | Connects to                    |
//! |------------|--------------|--------------------------------|
//! | `hardware` | SensorPort   | ESP32 ADC (moisture probe)     |
//! |            | ActuatorPort | Pump relay GPIO                |
//! |            | DisplayPort  | Text display                   |
//! | `log_sink` | EventSink    | Serial / console log output    |
//! | `nvs`      | ConfigPort   | NVS / in-memory store          |
//! | `time`     | ClockPort    | ESP32 system timer / `Instant` |

pub mod hardware;
pub mod log_sink;
pub mod nvs;
pub mod time;
