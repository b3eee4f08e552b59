//! Controller window. Fixed size, not resizable, positions from [`layout`].
//!
//! Push controls count as pressed while the mouse button that went down on
//! them is held, even after the pointer leaves the control.

pub mod common;
pub mod input;
pub mod layout;

use eframe::egui::{self, Button, Id, RichText, Sense};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::controller::{StateHandle, StickPhase, StickSide};

use self::common::{offset, paint_body, paint_stick, UiColors};
use self::input::InputSurface;
use self::layout::{PUSH_CONTROLS, STICK_KNOB_RADIUS};

pub use self::layout::{WINDOW_SIZE, WINDOW_TITLE};

// Polling rate for the shutdown token while the window is idle
const IDLE_REPAINT: Duration = Duration::from_millis(50);

pub struct VirtualJoyUI {
    input: InputSurface,
    shutdown: CancellationToken,
    close_requested: bool,
}

impl VirtualJoyUI {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        state: StateHandle,
        shutdown: CancellationToken,
    ) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Light);
        info!("Controller window ready");
        VirtualJoyUI {
            input: InputSurface::new(state),
            shutdown,
            close_requested: false,
        }
    }

    fn stick(&mut self, ui: &mut egui::Ui, origin: egui::Pos2, side: StickSide) {
        let center = offset(origin, side.center());
        let stick = self.input.stick(side);
        let (kx, ky) = stick.knob_offset();
        let knob = egui::pos2(center.x + kx, center.y + ky);

        let knob_rect =
            egui::Rect::from_center_size(knob, egui::Vec2::splat(STICK_KNOB_RADIUS * 2.0));
        let response = ui.interact(knob_rect, Id::new(("stick", side)), Sense::drag());

        if response.drag_started() {
            self.input.stick_pressed(side);
        }
        if response.dragged() {
            if let Some(pointer) = response.interact_pointer_pos() {
                let local = pointer - origin;
                self.input.stick_dragged(side, local.x, local.y);
            }
        }
        if response.drag_stopped() {
            self.input.stick_released(side);
        }

        let stick = self.input.stick(side);
        let grabbed = matches!(stick.phase(), StickPhase::Dragging { .. });
        paint_stick(ui.painter(), center, stick.knob_offset(), grabbed);
    }

    fn push_controls(&mut self, ui: &mut egui::Ui, origin: egui::Pos2) {
        for layout in &PUSH_CONTROLS {
            let rect = layout.rect().translate(origin.to_vec2());
            let label = RichText::new(layout.label).color(UiColors::LABEL);
            let response = ui.put(rect, Button::new(label).fill(layout.fill));
            self.input
                .set_held(layout.control, response.is_pointer_button_down_on());
        }
    }
}

impl eframe::App for VirtualJoyUI {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.shutdown.is_cancelled() && !self.close_requested {
            debug!("Shutdown requested, closing window");
            self.close_requested = true;
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(UiColors::CANVAS))
            .show(ctx, |ui| {
                let origin = ui.max_rect().min;
                paint_body(ui.painter(), origin);
                self.stick(ui, origin, StickSide::Left);
                self.stick(ui, origin, StickSide::Right);
                self.push_controls(ui, origin);
            });

        ctx.request_repaint_after(IDLE_REPAINT);
    }
}
