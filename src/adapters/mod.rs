//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements      | Connects to               |
//! |------------|-----------------|---------------------------|
//! | `hardware` | BoardPort       | ESP32 ADC, GPIO           |
//! |            | SensorPort      | Moisture probe (ADC1)     |
//! |            | ActuatorPort    | Pump relay (GPIO)         |
//! |            | AbortInput      | Abort button (GPIO)       |
//! | `display`  | StatusSink      | OLED mirror on serial log |
//! | `chart`    | ChartSink       | In-memory rolling window  |
//! | `time`     | Clock           | ESP32 system timer        |

pub mod chart;
pub mod display;
pub mod hardware;
pub mod time;
