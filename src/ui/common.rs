//! Colors and painter helpers for the controller window.

use eframe::egui::{pos2, CornerRadius, Painter, Pos2, Rect, Stroke, Vec2};

pub use eframe::egui::Color32;

use super::layout::{BODY_BRIDGE, BODY_GRIPS, STICK_BASE_RADIUS, STICK_KNOB_RADIUS};

/// Color palette of the controller window
pub struct UiColors;

impl UiColors {
    pub const CANVAS: Color32 = Color32::WHITE;

    /// Controller body silhouette (RGB: 51, 51, 51)
    pub const BODY: Color32 = Color32::from_rgb(51, 51, 51);

    /// Recess the stick sits in (RGB: 34, 34, 34)
    pub const STICK_BASE: Color32 = Color32::from_rgb(34, 34, 34);

    /// Stick knob (RGB: 85, 85, 85)
    pub const STICK_KNOB: Color32 = Color32::from_rgb(85, 85, 85);

    // while dragged
    pub const STICK_KNOB_ACTIVE: Color32 = Color32::from_rgb(110, 110, 110);

    pub const LABEL: Color32 = Color32::WHITE;
}

pub fn offset(origin: Pos2, (x, y): (f32, f32)) -> Pos2 {
    origin + Vec2::new(x, y)
}

/// Static controller silhouette: two grips joined by a bridge
pub fn paint_body(painter: &Painter, origin: Pos2) {
    for (center, radius) in BODY_GRIPS {
        painter.circle_filled(offset(origin, center), radius, UiColors::BODY);
    }
    let (min, max) = BODY_BRIDGE;
    let bridge = Rect::from_min_max(offset(origin, min), offset(origin, max));
    painter.rect_filled(bridge, CornerRadius::ZERO, UiColors::BODY);
}

pub fn paint_stick(painter: &Painter, center: Pos2, knob_offset: (f32, f32), active: bool) {
    painter.circle_filled(center, STICK_BASE_RADIUS, UiColors::STICK_BASE);
    let knob = pos2(center.x + knob_offset.0, center.y + knob_offset.1);
    let fill = if active {
        UiColors::STICK_KNOB_ACTIVE
    } else {
        UiColors::STICK_KNOB
    };
    painter.circle(knob, STICK_KNOB_RADIUS, fill, Stroke::new(1.0, Color32::WHITE));
}
