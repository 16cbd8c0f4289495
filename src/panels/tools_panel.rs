use crate::PaintApp;
use crate::tools::ToolKind;
use eframe::egui;

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("tools_panel").show(ctx, |ui| {
        // File row
        ui.horizontal(|ui| {
            if ui.button("New").clicked() {
                app.new_document();
            }
            if ui.button("Open…").clicked() {
                app.open_file_dialog();
            }
            if ui.button("Save").clicked() {
                app.save_current();
            }
            if ui.button("Save As…").clicked() {
                app.save_file_dialog();
            }
            ui.separator();
            match app.file_path() {
                Some(path) => ui.label(path.display().to_string()),
                None => ui.weak("Untitled"),
            };
            if let Some(notification) = &app.notification {
                ui.separator();
                let color = if notification.is_error {
                    ui.visuals().error_fg_color
                } else {
                    ui.visuals().weak_text_color()
                };
                ui.colored_label(color, &notification.message);
            }
        });

        ui.separator();

        // Pickers
        ui.horizontal(|ui| {
            super::toolbar(ui, app.canvas.active_tool_kind(), &app.bus);
            ui.separator();
            let palette = app.config.palette_colors();
            super::color_bar(ui, &palette, app.canvas.params().color(), &app.bus);
            ui.separator();
            super::line_width_bar(ui, &app.config.line_widths, app.canvas.params().width(), &app.bus);
            if app.canvas.active_tool_kind() == ToolKind::Text {
                ui.separator();
                super::font_picker(ui, app.canvas.fonts().families(), app.canvas.params().font(), &app.bus);
            }
        });

        ui.horizontal(|ui| {
            let (w, h) = app.canvas.bitmap().dimensions();
            ui.weak(format!(
                "{} ({}) · {w}x{h}",
                app.canvas.active_tool_kind().name(),
                app.canvas.active_tool().current_state_name()
            ));
            if let Some(rect) = app.canvas.selection() {
                ui.weak(format!(
                    "· selection {}x{} at ({}, {})",
                    rect.width(),
                    rect.height(),
                    rect.min.x,
                    rect.min.y
                ));
            }
        });
    });
}
