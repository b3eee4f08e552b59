//! Analog stick emulation
//!
//! A stick is dragged with the mouse inside a disk of radius
//! [`STICK_THROW_RADIUS`] around its center. The pointer displacement is
//! clamped to that disk and written to the two stick axes, inverted so that
//! dragging right yields a negative horizontal value and dragging up yields a
//! positive vertical value. Releasing the stick snaps it back to the center.

use tracing::debug;

use super::state::{AxisField, ControllerState};

/// Maximum knob displacement in pixels
pub const STICK_THROW_RADIUS: f32 = 30.0;

pub const LEFT_STICK_CENTER: (f32, f32) = (200.0, 280.0);
pub const RIGHT_STICK_CENTER: (f32, f32) = (400.0, 280.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StickSide {
    Left,
    Right,
}

impl StickSide {
    pub fn center(self) -> (f32, f32) {
        match self {
            StickSide::Left => LEFT_STICK_CENTER,
            StickSide::Right => RIGHT_STICK_CENTER,
        }
    }

    /// Horizontal and vertical axis written by this stick
    pub fn axes(self) -> (AxisField, AxisField) {
        match self {
            StickSide::Left => (AxisField::LeftStickX, AxisField::LeftStickY),
            StickSide::Right => (AxisField::RightStickX, AxisField::RightStickY),
        }
    }
}

/// Clamp a displacement vector to the disk of the given radius
///
/// Vectors already inside the disk (the zero vector included) are returned
/// unchanged; longer ones keep their direction and get length `radius`.
pub fn clamp_to_disk(dx: f32, dy: f32, radius: f32) -> (f32, f32) {
    let dist = (dx * dx + dy * dy).sqrt();
    if dist > radius {
        let ratio = radius / dist;
        (dx * ratio, dy * ratio)
    } else {
        (dx, dy)
    }
}

/// Normalized axis values for an already clamped displacement
pub fn axis_values(dx: f32, dy: f32, radius: f32) -> (f32, f32) {
    (-(dx / radius), -(dy / radius))
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StickPhase {
    #[default]
    AtRest,
    /// Knob held away from the center by the given clamped offset
    Dragging { dx: f32, dy: f32 },
}

/// One draggable stick with its {AtRest, Dragging} state machine
#[derive(Debug, Clone)]
pub struct Stick {
    side: StickSide,
    phase: StickPhase,
}

impl Stick {
    pub fn new(side: StickSide) -> Self {
        Self {
            side,
            phase: StickPhase::AtRest,
        }
    }

    pub fn phase(&self) -> StickPhase {
        self.phase
    }

    fn is_dragging(&self) -> bool {
        matches!(self.phase, StickPhase::Dragging { .. })
    }

    /// Knob offset from the center, zero while at rest
    pub fn knob_offset(&self) -> (f32, f32) {
        match self.phase {
            StickPhase::AtRest => (0.0, 0.0),
            StickPhase::Dragging { dx, dy } => (dx, dy),
        }
    }

    /// Pointer pressed on the knob. Axes stay untouched until the first motion.
    pub fn press(&mut self) {
        if let StickPhase::AtRest = self.phase {
            debug!("{:?} stick grabbed", self.side);
            self.phase = StickPhase::Dragging { dx: 0.0, dy: 0.0 };
        }
    }

    /// Pointer moved to `(px, py)` while holding the knob
    ///
    /// Motion without a preceding press is treated as a grab.
    pub fn drag_to(&mut self, px: f32, py: f32, state: &mut ControllerState) {
        let (cx, cy) = self.side.center();
        let (dx, dy) = clamp_to_disk(px - cx, py - cy, STICK_THROW_RADIUS);
        self.phase = StickPhase::Dragging { dx, dy };

        let (horizontal, vertical) = axis_values(dx, dy, STICK_THROW_RADIUS);
        let (x_field, y_field) = self.side.axes();
        state.set_axis(x_field, horizontal);
        state.set_axis(y_field, vertical);
    }

    /// Pointer released: knob and both axes snap back to neutral
    pub fn release(&mut self, state: &mut ControllerState) {
        if self.is_dragging() {
            debug!("{:?} stick released", self.side);
        }
        self.phase = StickPhase::AtRest;
        let (x_field, y_field) = self.side.axes();
        state.set_axis(x_field, 0.0);
        state.set_axis(y_field, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn zero_displacement_is_not_rescaled() {
        assert_eq!(clamp_to_disk(0.0, 0.0, STICK_THROW_RADIUS), (0.0, 0.0));
    }

    #[test]
    fn displacement_on_the_rim_is_kept() {
        assert_eq!(clamp_to_disk(18.0, -24.0, 30.0), (18.0, -24.0));
    }

    #[test]
    fn rightward_drag_gives_negative_horizontal() {
        let mut state = ControllerState::default();
        let mut stick = Stick::new(StickSide::Left);
        let (cx, cy) = LEFT_STICK_CENTER;

        stick.press();
        stick.drag_to(cx + 15.0, cy, &mut state);

        assert_eq!(state.left_stick.horizontal, -0.5);
        assert_eq!(state.left_stick.vertical, 0.0);
    }

    #[test]
    fn upward_drag_gives_positive_vertical() {
        let mut state = ControllerState::default();
        let mut stick = Stick::new(StickSide::Left);
        let (cx, cy) = LEFT_STICK_CENTER;

        stick.drag_to(cx, cy - 15.0, &mut state);

        assert_eq!(state.left_stick.vertical, 0.5);
        assert_eq!(state.left_stick.horizontal, 0.0);
    }

    #[test]
    fn far_drag_saturates_at_full_deflection() {
        let mut state = ControllerState::default();
        let mut stick = Stick::new(StickSide::Right);
        let (cx, cy) = RIGHT_STICK_CENTER;

        stick.drag_to(cx - 300.0, cy, &mut state);

        assert!((state.right_stick.horizontal - 1.0).abs() < EPS);
        let (kx, ky) = stick.knob_offset();
        assert!((kx + STICK_THROW_RADIUS).abs() < EPS);
        assert_eq!(ky, 0.0);
        // left stick untouched
        assert_eq!(state.left_stick, Default::default());
    }

    #[test]
    fn press_alone_does_not_move_axes() {
        let mut state = ControllerState::default();
        let mut stick = Stick::new(StickSide::Right);
        stick.press();
        assert!(stick.is_dragging());
        assert_eq!(state, ControllerState::default());
        stick.release(&mut state);
        assert_eq!(stick.phase(), StickPhase::AtRest);
    }

    #[test]
    fn release_resets_and_is_idempotent() {
        let mut state = ControllerState::default();
        let mut stick = Stick::new(StickSide::Right);
        let (cx, cy) = RIGHT_STICK_CENTER;

        stick.press();
        stick.drag_to(cx + 7.0, cy - 22.0, &mut state);
        stick.drag_to(cx - 40.0, cy + 90.0, &mut state);
        stick.release(&mut state);

        assert_eq!(state.right_stick.horizontal, 0.0);
        assert_eq!(state.right_stick.vertical, 0.0);
        assert_eq!(stick.knob_offset(), (0.0, 0.0));

        let after_first = state;
        stick.release(&mut state);
        assert_eq!(state, after_first);
        assert_eq!(stick.phase(), StickPhase::AtRest);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(512))]

        #[test]
        fn prop_inside_disk_is_unchanged(angle in 0.0f32..std::f32::consts::TAU, frac in 0.0f32..=1.0) {
            let r = STICK_THROW_RADIUS * frac;
            let (dx, dy) = (r * angle.cos(), r * angle.sin());
            // stay strictly inside to avoid rounding across the rim
            prop_assume!((dx * dx + dy * dy).sqrt() <= STICK_THROW_RADIUS);
            prop_assert_eq!(clamp_to_disk(dx, dy, STICK_THROW_RADIUS), (dx, dy));
        }

        #[test]
        fn prop_outside_disk_keeps_direction(dx in -500.0f32..500.0, dy in -500.0f32..500.0) {
            let dist = (dx * dx + dy * dy).sqrt();
            prop_assume!(dist > STICK_THROW_RADIUS);

            let (cx, cy) = clamp_to_disk(dx, dy, STICK_THROW_RADIUS);
            let clamped = (cx * cx + cy * cy).sqrt();
            prop_assert!((clamped - STICK_THROW_RADIUS).abs() < EPS, "magnitude {}", clamped);
            prop_assert!((cx / clamped - dx / dist).abs() < EPS);
            prop_assert!((cy / clamped - dy / dist).abs() < EPS);
        }

        #[test]
        fn prop_axes_stay_in_unit_range(px in -1000.0f32..1000.0, py in -1000.0f32..1000.0) {
            let mut state = ControllerState::default();
            let mut stick = Stick::new(StickSide::Left);
            stick.drag_to(px, py, &mut state);
            let h = state.left_stick.horizontal;
            let v = state.left_stick.vertical;
            prop_assert!((-1.0 - EPS..=1.0 + EPS).contains(&h));
            prop_assert!((-1.0 - EPS..=1.0 + EPS).contains(&v));
            prop_assert!((h * h + v * v).sqrt() <= 1.0 + EPS);
        }
    }
}
