//! Fixed window layout: body silhouette, stick bases and push controls.
//! All coordinates are window pixels with the origin at the top left.

use eframe::egui::{pos2, vec2, Color32, Rect};

use crate::controller::Control;

pub const WINDOW_SIZE: [f32; 2] = [600.0, 500.0];
pub const WINDOW_TITLE: &str = "Virtual Joy Controller";

pub const STICK_BASE_RADIUS: f32 = 30.0;
pub const STICK_KNOB_RADIUS: f32 = 15.0;

/// Two grip circles (center, radius) and the bridge between them
pub const BODY_GRIPS: [((f32, f32), f32); 2] = [((175.0, 225.0), 125.0), ((425.0, 225.0), 125.0)];
pub const BODY_BRIDGE: ((f32, f32), (f32, f32)) = ((175.0, 150.0), (425.0, 300.0));

const BUTTON_HEIGHT: f32 = 26.0;
const CHAR_WIDTH: f32 = 9.0;
const BUTTON_PADDING: f32 = 12.0;

pub struct PushControlLayout {
    pub control: Control,
    pub label: &'static str,
    pub top_left: (f32, f32),
    pub width_chars: u8,
    pub fill: Color32,
}

impl PushControlLayout {
    pub fn rect(&self) -> Rect {
        let width = self.width_chars as f32 * CHAR_WIDTH + BUTTON_PADDING;
        Rect::from_min_size(pos2(self.top_left.0, self.top_left.1), vec2(width, BUTTON_HEIGHT))
    }
}

const fn push(
    control: Control,
    label: &'static str,
    x: f32,
    y: f32,
    width_chars: u8,
    fill: Color32,
) -> PushControlLayout {
    PushControlLayout {
        control,
        label,
        top_left: (x, y),
        width_chars,
        fill,
    }
}

const GRAY: Color32 = Color32::from_rgb(128, 128, 128);
const BLACK: Color32 = Color32::from_rgb(0, 0, 0);

pub const PUSH_CONTROLS: [PushControlLayout; 17] = [
    // face buttons
    push(Control::Cross, "X", 435.0, 220.0, 3, Color32::from_rgb(0, 0, 204)),
    push(Control::Circle, "●", 475.0, 190.0, 3, Color32::from_rgb(204, 0, 0)),
    push(Control::Square, "■", 395.0, 190.0, 3, Color32::from_rgb(204, 0, 204)),
    push(Control::Triangle, "▲", 435.0, 160.0, 3, Color32::from_rgb(0, 170, 0)),
    // shoulders and triggers
    push(Control::L1, "L1", 100.0, 80.0, 4, GRAY),
    push(Control::R1, "R1", 450.0, 80.0, 4, GRAY),
    push(Control::L2, "L2", 100.0, 50.0, 4, GRAY),
    push(Control::R2, "R2", 450.0, 50.0, 4, GRAY),
    // center cluster
    push(Control::Select, "SEL", 220.0, 190.0, 5, BLACK),
    push(Control::Start, "STA", 320.0, 190.0, 5, BLACK),
    push(Control::Mode, "PS", 280.0, 240.0, 4, Color32::from_rgb(17, 17, 17)),
    // stick clicks, next to their sticks
    push(Control::L3, "L3", 150.0, 280.0, 2, Color32::from_rgb(68, 68, 68)),
    push(Control::R3, "R3", 450.0, 280.0, 2, Color32::from_rgb(68, 68, 68)),
    // d-pad
    push(Control::DPadUp, "▲", 135.0, 160.0, 3, GRAY),
    push(Control::DPadDown, "▼", 135.0, 220.0, 3, GRAY),
    push(Control::DPadLeft, "◄", 95.0, 190.0, 3, GRAY),
    push(Control::DPadRight, "►", 175.0, 190.0, 3, GRAY),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_control_is_placed_once() {
        for control in Control::ALL {
            let placed = PUSH_CONTROLS.iter().filter(|p| p.control == control).count();
            assert_eq!(placed, 1, "{:?}", control);
        }
    }

    #[test]
    fn controls_fit_inside_the_window() {
        let window = Rect::from_min_size(pos2(0.0, 0.0), vec2(WINDOW_SIZE[0], WINDOW_SIZE[1]));
        for layout in &PUSH_CONTROLS {
            assert!(window.contains_rect(layout.rect()), "{} out of bounds", layout.label);
        }
    }
}
