use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::controller::{ControllerState, AXIS_COUNT, BUTTON_COUNT};

/// Fixed originator label carried in every header
pub const FRAME_ID: &str = "virtual_controller";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stamp {
    pub sec: i32,
    pub nanosec: u32,
}

// `sec` is a signed 32-bit field on the wire; times past 2038 saturate
impl From<DateTime<Utc>> for Stamp {
    fn from(time: DateTime<Utc>) -> Self {
        let secs = time.timestamp();
        Stamp {
            sec: i32::try_from(secs).unwrap_or(if secs < 0 { i32::MIN } else { i32::MAX }),
            nanosec: time.timestamp_subsec_nanos(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Header {
    pub stamp: Stamp,
    pub frame_id: String,
}

/// Standard joystick message: a header plus positional axes and buttons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoyMessage {
    pub header: Header,
    pub axes: [f32; AXIS_COUNT],
    pub buttons: [i32; BUTTON_COUNT],
}

impl JoyMessage {
    /// Verbatim snapshot of `state`, stamped with `time`
    pub fn snapshot(state: &ControllerState, time: DateTime<Utc>, frame_id: &str) -> Self {
        JoyMessage {
            header: Header {
                stamp: time.into(),
                frame_id: frame_id.to_string(),
            },
            axes: state.to_axes(),
            buttons: state.to_buttons(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

impl fmt::Display for JoyMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}.{:09} [{}] axes={:?} buttons={:?}",
            self.header.stamp.sec,
            self.header.stamp.nanosec,
            self.header.frame_id,
            self.axes,
            self.buttons
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{Control, StickSide, Stick};
    use chrono::TimeZone;

    #[test]
    fn snapshot_copies_state_verbatim() {
        let mut state = ControllerState::default();
        Control::Cross.press(&mut state);
        Control::R2.press(&mut state);
        Control::DPadLeft.press(&mut state);
        let mut stick = Stick::new(StickSide::Left);
        stick.drag_to(215.0, 265.0, &mut state);

        let time = Utc.timestamp_opt(1_700_000_000, 250_000_000).unwrap();
        let msg = JoyMessage::snapshot(&state, time, FRAME_ID);

        assert_eq!(msg.header.frame_id, "virtual_controller");
        assert_eq!(msg.header.stamp, Stamp { sec: 1_700_000_000, nanosec: 250_000_000 });
        assert_eq!(msg.axes, [-0.5, 0.5, 0.0, 0.0, 0.0, -1.0, 1.0, 0.0]);
        assert_eq!(msg.buttons, [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn stamp_saturates_outside_i32_range() {
        let late = Utc.with_ymd_and_hms(2040, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(Stamp::from(late).sec, i32::MAX);

        let early = Utc.with_ymd_and_hms(1800, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(Stamp::from(early).sec, i32::MIN);

        let edge = Utc.timestamp_opt(i32::MAX as i64, 5).unwrap();
        assert_eq!(Stamp::from(edge), Stamp { sec: i32::MAX, nanosec: 5 });
    }

    #[test]
    fn json_payload_has_joy_shape() {
        let msg = JoyMessage::snapshot(&ControllerState::default(), Utc::now(), FRAME_ID);
        let value: serde_json::Value = serde_json::from_slice(&msg.to_json().unwrap()).unwrap();

        assert_eq!(value["header"]["frame_id"], "virtual_controller");
        assert_eq!(value["axes"].as_array().unwrap().len(), 8);
        assert_eq!(value["buttons"].as_array().unwrap().len(), 11);
        assert!(value["header"]["stamp"]["sec"].is_i64());
    }
}
