//! Virtual controller model
//!
//! 1. [`state`] - The shared axes/buttons record and its single owner
//! 2. [`stick`] - Mouse-dragged analog sticks with clamp-to-disk mapping
//! 3. [`controls`] - Press/release table for buttons, triggers and d-pad
//!
//! # Data flow
//!
//! ```text
//! Mouse ──► Stick / Control ──► StateHandle ──► watch ──► Broadcaster
//!           (UI thread)          (single writer)          (tokio task)
//! ```

pub mod controls;
pub mod state;
pub mod stick;

pub use controls::{Control, ControlAction};
pub use state::{AxisField, ButtonField, ControllerState, StateHandle, AXIS_COUNT, BUTTON_COUNT};
pub use stick::{Stick, StickPhase, StickSide, STICK_THROW_RADIUS};
