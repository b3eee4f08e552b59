// egui reports "held this frame"; this turns it into press/release edges.

use crate::controller::{Control, StateHandle, Stick, StickSide};

pub struct InputSurface {
    state: StateHandle,
    left: Stick,
    right: Stick,
    held: Vec<(Control, bool)>,
}

impl InputSurface {
    pub fn new(state: StateHandle) -> Self {
        Self {
            state,
            left: Stick::new(StickSide::Left),
            right: Stick::new(StickSide::Right),
            held: Control::ALL.iter().map(|control| (*control, false)).collect(),
        }
    }

    pub fn state(&self) -> &StateHandle {
        &self.state
    }

    pub fn stick(&self, side: StickSide) -> &Stick {
        match side {
            StickSide::Left => &self.left,
            StickSide::Right => &self.right,
        }
    }

    fn stick_mut(&mut self, side: StickSide) -> &mut Stick {
        match side {
            StickSide::Left => &mut self.left,
            StickSide::Right => &mut self.right,
        }
    }

    pub fn stick_pressed(&mut self, side: StickSide) {
        self.stick_mut(side).press();
    }

    /// Pointer position in window coordinates
    pub fn stick_dragged(&mut self, side: StickSide, px: f32, py: f32) {
        let Self {
            state, left, right, ..
        } = self;
        let stick = match side {
            StickSide::Left => left,
            StickSide::Right => right,
        };
        state.modify(|s| stick.drag_to(px, py, s));
    }

    pub fn stick_released(&mut self, side: StickSide) {
        let Self {
            state, left, right, ..
        } = self;
        let stick = match side {
            StickSide::Left => left,
            StickSide::Right => right,
        };
        state.modify(|s| stick.release(s));
    }

    /// Report whether `control` is held this frame; writes only on edges
    pub fn set_held(&mut self, control: Control, held: bool) {
        let Some(slot) = self.held.iter_mut().find(|slot| slot.0 == control) else {
            return;
        };
        if slot.1 == held {
            return;
        }
        slot.1 = held;
        if held {
            self.state.modify(|s| control.press(s));
        } else {
            self.state.modify(|s| control.release(s));
        }
    }
}
