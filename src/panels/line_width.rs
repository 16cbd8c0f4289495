use eframe::egui::{self, Sense, Stroke, vec2};

use crate::event::{EditorEvent, EventBus};

/// One button per available width, each previewing its line.
pub fn line_width_bar(ui: &mut egui::Ui, widths: &[f32], selected: f32, bus: &EventBus) {
    for &width in widths {
        let (rect, response) = ui.allocate_exact_size(vec2(36.0, 28.0), Sense::click());
        let visuals = ui.style().interact_selectable(&response, width == selected);
        ui.painter().rect(rect, 3.0, visuals.weak_bg_fill, visuals.bg_stroke);
        let y = rect.center().y;
        ui.painter().line_segment(
            [egui::pos2(rect.left() + 6.0, y), egui::pos2(rect.right() - 6.0, y)],
            Stroke::new(width.min(rect.height() - 6.0), visuals.fg_stroke.color),
        );
        if response.on_hover_text(format!("{width} px")).clicked() {
            bus.emit(EditorEvent::WidthSelected(width));
        }
    }
}
