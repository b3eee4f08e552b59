//! # MQTT transport
//!
//! Delivers joystick messages to an MQTT broker. This is the concrete
//! [`JoyTransport`](crate::joy::JoyTransport) used by the application.
//!
//! ```text
//! mqtt/
//! ├── config.rs        - Broker endpoint, topic and client options
//! └── mqtt_handler.rs  - MqttTransport and the event loop driver task
//! ```
//!
//! Publishing is fire-and-forget: messages go out at QoS 0, not retained, and
//! `try_publish` never waits for the broker. The driver task owns the
//! `rumqttc` event loop and is the only place connection problems surface.

pub mod config;
pub mod mqtt_handler;

pub use config::MqttConfig;
pub use mqtt_handler::{MqttDriver, MqttTransport};
