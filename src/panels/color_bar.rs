use eframe::egui::{self, Color32, Sense, Stroke, vec2};

use crate::event::{EditorEvent, EventBus};

const SWATCH_SIZE: f32 = 16.0;

/// Grid of color swatches plus a custom color button.
pub fn color_bar(ui: &mut egui::Ui, palette: &[Vec<Color32>], selected: Color32, bus: &EventBus) {
    ui.vertical(|ui| {
        ui.spacing_mut().item_spacing = vec2(2.0, 2.0);
        for row in palette {
            ui.horizontal(|ui| {
                for &color in row {
                    let (rect, response) = ui.allocate_exact_size(vec2(SWATCH_SIZE, SWATCH_SIZE), Sense::click());
                    let outline = if color == selected {
                        Stroke::new(2.0, ui.visuals().selection.stroke.color)
                    } else {
                        Stroke::new(1.0, Color32::DARK_GRAY)
                    };
                    ui.painter().rect_filled(rect, 2.0, color);
                    ui.painter().rect_stroke(rect, 2.0, outline);
                    if response.clicked() {
                        bus.emit(EditorEvent::ColorSelected(color));
                    }
                }
            });
        }
    });

    let mut custom = selected;
    if egui::color_picker::color_edit_button_srgba(ui, &mut custom, egui::color_picker::Alpha::OnlyBlend)
        .changed()
    {
        bus.emit(EditorEvent::ColorSelected(custom));
    }
}
