//! Controller state record shared between the UI and the broadcaster
//!
//! Holds every analog axis and digital button of the virtual controller as
//! named fields. The positional layout expected on the wire is produced only
//! at the message boundary through [`ControllerState::to_axes`] and
//! [`ControllerState::to_buttons`].

use tokio::sync::watch;
use tracing::debug;

pub const AXIS_COUNT: usize = 8;
pub const BUTTON_COUNT: usize = 11;

/// Selector for one analog axis, ordered by wire position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisField {
    LeftStickX,
    LeftStickY,
    LeftTrigger,
    RightStickX,
    RightStickY,
    RightTrigger,
    DPadX,
    DPadY,
}

impl AxisField {
    pub const ALL: [AxisField; AXIS_COUNT] = [
        AxisField::LeftStickX,
        AxisField::LeftStickY,
        AxisField::LeftTrigger,
        AxisField::RightStickX,
        AxisField::RightStickY,
        AxisField::RightTrigger,
        AxisField::DPadX,
        AxisField::DPadY,
    ];

    /// Position of this axis in the outbound `axes` sequence
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Selector for one digital button, ordered by wire position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonField {
    Cross,
    Circle,
    Square,
    Triangle,
    L1,
    R1,
    Select,
    Start,
    Mode,
    L3,
    R3,
}

impl ButtonField {
    pub const ALL: [ButtonField; BUTTON_COUNT] = [
        ButtonField::Cross,
        ButtonField::Circle,
        ButtonField::Square,
        ButtonField::Triangle,
        ButtonField::L1,
        ButtonField::R1,
        ButtonField::Select,
        ButtonField::Start,
        ButtonField::Mode,
        ButtonField::L3,
        ButtonField::R3,
    ];

    /// Position of this button in the outbound `buttons` sequence
    pub fn index(self) -> usize {
        self as usize
    }
}

// Two-axis value of one analog stick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StickAxes {
    pub horizontal: f32,
    pub vertical: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Buttons {
    pub cross: bool,
    pub circle: bool,
    pub square: bool,
    pub triangle: bool,
    pub l1: bool,
    pub r1: bool,
    pub select: bool,
    pub start: bool,
    pub mode: bool,
    pub l3: bool,
    pub r3: bool,
}

/// Current value of every axis and button of the virtual controller
///
/// All fields start at zero. Writes are not validated; callers are expected
/// to hand in values already inside [-1.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControllerState {
    pub left_stick: StickAxes,
    pub left_trigger: f32,
    pub right_stick: StickAxes,
    pub right_trigger: f32,
    pub dpad: StickAxes,
    pub buttons: Buttons,
}

impl ControllerState {
    pub fn axis(&self, field: AxisField) -> f32 {
        match field {
            AxisField::LeftStickX => self.left_stick.horizontal,
            AxisField::LeftStickY => self.left_stick.vertical,
            AxisField::LeftTrigger => self.left_trigger,
            AxisField::RightStickX => self.right_stick.horizontal,
            AxisField::RightStickY => self.right_stick.vertical,
            AxisField::RightTrigger => self.right_trigger,
            AxisField::DPadX => self.dpad.horizontal,
            AxisField::DPadY => self.dpad.vertical,
        }
    }

    pub fn set_axis(&mut self, field: AxisField, value: f32) {
        *self.axis_mut(field) = value;
    }

    fn axis_mut(&mut self, field: AxisField) -> &mut f32 {
        match field {
            AxisField::LeftStickX => &mut self.left_stick.horizontal,
            AxisField::LeftStickY => &mut self.left_stick.vertical,
            AxisField::LeftTrigger => &mut self.left_trigger,
            AxisField::RightStickX => &mut self.right_stick.horizontal,
            AxisField::RightStickY => &mut self.right_stick.vertical,
            AxisField::RightTrigger => &mut self.right_trigger,
            AxisField::DPadX => &mut self.dpad.horizontal,
            AxisField::DPadY => &mut self.dpad.vertical,
        }
    }

    pub fn button(&self, field: ButtonField) -> bool {
        let b = &self.buttons;
        match field {
            ButtonField::Cross => b.cross,
            ButtonField::Circle => b.circle,
            ButtonField::Square => b.square,
            ButtonField::Triangle => b.triangle,
            ButtonField::L1 => b.l1,
            ButtonField::R1 => b.r1,
            ButtonField::Select => b.select,
            ButtonField::Start => b.start,
            ButtonField::Mode => b.mode,
            ButtonField::L3 => b.l3,
            ButtonField::R3 => b.r3,
        }
    }

    pub fn set_button(&mut self, field: ButtonField, pressed: bool) {
        let b = &mut self.buttons;
        let slot = match field {
            ButtonField::Cross => &mut b.cross,
            ButtonField::Circle => &mut b.circle,
            ButtonField::Square => &mut b.square,
            ButtonField::Triangle => &mut b.triangle,
            ButtonField::L1 => &mut b.l1,
            ButtonField::R1 => &mut b.r1,
            ButtonField::Select => &mut b.select,
            ButtonField::Start => &mut b.start,
            ButtonField::Mode => &mut b.mode,
            ButtonField::L3 => &mut b.l3,
            ButtonField::R3 => &mut b.r3,
        };
        *slot = pressed;
    }

    /// Positional axis sequence in wire order
    pub fn to_axes(&self) -> [f32; AXIS_COUNT] {
        AxisField::ALL.map(|field| self.axis(field))
    }

    /// Positional button sequence in wire order, 1 for pressed and 0 for released
    pub fn to_buttons(&self) -> [i32; BUTTON_COUNT] {
        ButtonField::ALL.map(|field| i32::from(self.button(field)))
    }
}

/// Owner of the single controller state instance
///
/// The UI writes through [`StateHandle::modify`]; readers take a
/// [`watch::Receiver`] from [`StateHandle::subscribe`] and only ever borrow.
pub struct StateHandle {
    sender: watch::Sender<ControllerState>,
}

impl StateHandle {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(ControllerState::default());
        debug!("Created controller state with {AXIS_COUNT} axes and {BUTTON_COUNT} buttons");
        Self { sender }
    }

    /// Mutate the state in place and wake every subscriber
    pub fn modify<F>(&self, mutate: F)
    where
        F: FnOnce(&mut ControllerState),
    {
        self.sender.send_modify(mutate);
    }

    pub fn current(&self) -> ControllerState {
        *self.sender.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ControllerState> {
        self.sender.subscribe()
    }
}

impl Default for StateHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_zeroed_with_fixed_lengths() {
        let state = ControllerState::default();
        assert_eq!(state.to_axes(), [0.0; AXIS_COUNT]);
        assert_eq!(state.to_buttons(), [0; BUTTON_COUNT]);
    }

    #[test]
    fn axis_fields_map_to_wire_positions() {
        let mut state = ControllerState::default();
        for (i, field) in AxisField::ALL.into_iter().enumerate() {
            assert_eq!(field.index(), i);
            state.set_axis(field, i as f32 / 10.0);
        }
        let axes = state.to_axes();
        for (i, value) in axes.iter().enumerate() {
            assert_eq!(*value, i as f32 / 10.0);
        }
        assert_eq!(state.left_trigger, 0.2);
        assert_eq!(state.right_stick.vertical, 0.4);
        assert_eq!(state.dpad.vertical, 0.7);
    }

    #[test]
    fn button_fields_map_to_wire_positions() {
        let mut state = ControllerState::default();
        state.set_button(ButtonField::Square, true);
        state.set_button(ButtonField::R3, true);
        assert_eq!(state.to_buttons(), [0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1]);

        state.set_button(ButtonField::Square, false);
        assert!(!state.button(ButtonField::Square));
        assert!(state.buttons.r3);
    }

    #[test]
    fn handle_publishes_modifications_to_subscribers() {
        let handle = StateHandle::new();
        let mut receiver = handle.subscribe();
        assert!(!receiver.has_changed().unwrap());

        handle.modify(|state| state.set_axis(AxisField::DPadX, 1.0));

        assert!(receiver.has_changed().unwrap());
        assert_eq!(receiver.borrow_and_update().dpad.horizontal, 1.0);
        assert_eq!(handle.current().dpad.horizontal, 1.0);
    }
}
