//! Press/release mapping for every push control of the virtual controller
//!
//! Digital buttons write 1/0. Triggers are reported as axes and use the
//! "fully pressed is -1.0, fully released is +1.0" convention. The d-pad
//! writes ±1.0 to two shared axes, with left and up positive; opposing
//! directions overwrite each other and the last event wins.

use tracing::debug;

use super::state::{AxisField, ButtonField, ControllerState};

/// What a push control writes on press and on release
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlAction {
    Button(ButtonField),
    Axis {
        axis: AxisField,
        pressed: f32,
        released: f32,
    },
}

impl ControlAction {
    pub fn press(self, state: &mut ControllerState) {
        match self {
            ControlAction::Button(button) => state.set_button(button, true),
            ControlAction::Axis { axis, pressed, .. } => state.set_axis(axis, pressed),
        }
    }

    pub fn release(self, state: &mut ControllerState) {
        match self {
            ControlAction::Button(button) => state.set_button(button, false),
            ControlAction::Axis { axis, released, .. } => state.set_axis(axis, released),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Cross,
    Circle,
    Square,
    Triangle,
    L1,
    R1,
    L2,
    R2,
    Select,
    Start,
    Mode,
    L3,
    R3,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
}

const TRIGGER_PRESSED: f32 = -1.0;
const TRIGGER_RELEASED: f32 = 1.0;

impl Control {
    pub const ALL: [Control; 17] = [
        Control::Cross,
        Control::Circle,
        Control::Square,
        Control::Triangle,
        Control::L1,
        Control::R1,
        Control::L2,
        Control::R2,
        Control::Select,
        Control::Start,
        Control::Mode,
        Control::L3,
        Control::R3,
        Control::DPadUp,
        Control::DPadDown,
        Control::DPadLeft,
        Control::DPadRight,
    ];

    pub fn action(self) -> ControlAction {
        use ControlAction::{Axis, Button};
        match self {
            Control::Cross => Button(ButtonField::Cross),
            Control::Circle => Button(ButtonField::Circle),
            Control::Square => Button(ButtonField::Square),
            Control::Triangle => Button(ButtonField::Triangle),
            Control::L1 => Button(ButtonField::L1),
            Control::R1 => Button(ButtonField::R1),
            Control::L2 => Axis {
                axis: AxisField::LeftTrigger,
                pressed: TRIGGER_PRESSED,
                released: TRIGGER_RELEASED,
            },
            Control::R2 => Axis {
                axis: AxisField::RightTrigger,
                pressed: TRIGGER_PRESSED,
                released: TRIGGER_RELEASED,
            },
            Control::Select => Button(ButtonField::Select),
            Control::Start => Button(ButtonField::Start),
            Control::Mode => Button(ButtonField::Mode),
            Control::L3 => Button(ButtonField::L3),
            Control::R3 => Button(ButtonField::R3),
            Control::DPadUp => Axis {
                axis: AxisField::DPadY,
                pressed: 1.0,
                released: 0.0,
            },
            Control::DPadDown => Axis {
                axis: AxisField::DPadY,
                pressed: -1.0,
                released: 0.0,
            },
            // left is positive on the wire
            Control::DPadLeft => Axis {
                axis: AxisField::DPadX,
                pressed: 1.0,
                released: 0.0,
            },
            Control::DPadRight => Axis {
                axis: AxisField::DPadX,
                pressed: -1.0,
                released: 0.0,
            },
        }
    }

    pub fn press(self, state: &mut ControllerState) {
        debug!("{:?} pressed", self);
        self.action().press(state);
    }

    pub fn release(self, state: &mut ControllerState) {
        debug!("{:?} released", self);
        self.action().release(state);
    }
}
