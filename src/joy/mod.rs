//! Joystick message, its transport seam and the fixed-rate broadcaster.

pub mod broadcaster;
pub mod message;
pub mod transport;

pub use broadcaster::{BroadcastSettings, BroadcastStats, BroadcasterHandle, PUBLISH_PERIOD_MS};
pub use message::{JoyMessage, FRAME_ID};
pub use transport::{JoyTransport, TransportError};
