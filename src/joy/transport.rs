//! Publish-only transport seam used by the broadcaster

use thiserror::Error;

use super::message::JoyMessage;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to serialize message: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Transport rejected message: {0}")]
    Rejected(String),

    #[error("Invalid transport endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Failed to close transport: {0}")]
    Close(String),
}

/// Sink for outbound joystick messages
///
/// `publish` must not block. Whether a rejected message is ever delivered is
/// up to the implementation.
pub trait JoyTransport: Send + 'static {
    fn publish(&mut self, message: &JoyMessage) -> Result<(), TransportError>;

    /// Tear down the connection; called once when broadcasting stops
    fn close(&mut self) -> Result<(), TransportError> {
        Ok(())
    }

    fn describe(&self) -> String;
}
