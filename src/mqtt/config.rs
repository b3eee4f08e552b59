use serde::{Deserialize, Serialize};

/// Broker endpoint and publishing options for the MQTT transport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    pub host: String,
    pub port: u16,
    pub client_id: String,
    /// Topic the joystick messages are published on
    pub topic: String,
    pub user: Option<String>,
    pub pw: Option<String>,
    pub keep_alive_secs: u64,
    /// Pause before polling again after a connection error
    pub reconnect_delay_ms: u64,
    /// Capacity of the client request queue
    pub queue_capacity: usize,
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 1883,
            client_id: "virtual_joy_node".to_string(),
            topic: "joy".to_string(),
            user: None,
            pw: None,
            keep_alive_secs: 5,
            reconnect_delay_ms: 1000,
            queue_capacity: 10,
        }
    }
}
