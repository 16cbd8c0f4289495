use eframe::egui;

use crate::event::{EditorEvent, EventBus};
use crate::params::FontSpec;
use crate::tools::ToolKind;

/// Tool picker. Emits `ToolSelected` when a different tool is clicked.
pub fn toolbar(ui: &mut egui::Ui, active: ToolKind, bus: &EventBus) {
    for kind in ToolKind::ALL {
        let label = format!("{} {}", kind.icon(), kind.name());
        if ui.selectable_label(active == kind, label).clicked() && active != kind {
            log::info!("Tool selected from UI: {}", kind.name());
            bus.emit(EditorEvent::ToolSelected(kind));
        }
    }
}

/// Family and size controls for the text tool.
pub fn font_picker<'a>(
    ui: &mut egui::Ui,
    families: impl Iterator<Item = &'a str>,
    current: &FontSpec,
    bus: &EventBus,
) {
    let mut family = current.family.clone();
    egui::ComboBox::from_id_salt("font_family")
        .selected_text(&family)
        .show_ui(ui, |ui| {
            for name in families {
                ui.selectable_value(&mut family, name.to_owned(), name);
            }
        });

    let mut size = current.size;
    ui.add(egui::DragValue::new(&mut size).range(6.0..=200.0).suffix(" px"));

    if family != current.family || size != current.size {
        bus.emit(EditorEvent::FontSelected(FontSpec::new(family, size)));
    }
}
