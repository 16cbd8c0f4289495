use crate::PaintApp;
use eframe::egui;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::both().show(ui, |ui| {
            let response = app.renderer.render(ui, &app.canvas);
            handle_pointer(app, ctx, &response);
        });
    });

    // Keyboard goes to the canvas only when no text field has focus.
    if !ctx.wants_keyboard_input() {
        handle_keyboard(app, ctx);
    }
}

fn handle_pointer(app: &mut PaintApp, ctx: &egui::Context, response: &egui::Response) {
    let origin = response.rect.min;
    let to_canvas = |pos: egui::Pos2| egui::pos2(pos.x - origin.x, pos.y - origin.y);
    let pointer = response
        .interact_pointer_pos()
        .or_else(|| ctx.input(|i| i.pointer.latest_pos()))
        .map(to_canvas);

    if response.drag_started() {
        // Begin where the button went down, not where the drag threshold was crossed.
        let press = ctx.input(|i| i.pointer.press_origin()).map(to_canvas).or(pointer);
        if let Some(pos) = press {
            app.canvas.begin_gesture(pos);
            app.last_canvas_pos = Some(pos);
        }
    }

    if response.dragged() {
        if let Some(pos) = pointer {
            app.canvas.continue_gesture(pos);
            app.last_canvas_pos = Some(pos);
        }
    }

    if response.drag_stopped() {
        if let Some(pos) = pointer.or(app.last_canvas_pos) {
            app.canvas.end_gesture(pos);
        }
        app.last_canvas_pos = None;
    } else if response.clicked() {
        if let Some(pos) = pointer {
            app.canvas.begin_gesture(pos);
            app.canvas.end_gesture(pos);
        }
    }
}

fn handle_keyboard(app: &mut PaintApp, ctx: &egui::Context) {
    let events = ctx.input(|i| i.events.clone());
    for event in events {
        match event {
            egui::Event::Text(text) if app.canvas.is_editing_text() => app.canvas.insert_text(&text),
            egui::Event::Key {
                key, pressed: true, ..
            } => handle_key(app, key),
            _ => {}
        }
    }
}

fn handle_key(app: &mut PaintApp, key: egui::Key) {
    if app.canvas.is_editing_text() {
        match key {
            egui::Key::Backspace => app.canvas.delete_backward(),
            egui::Key::Enter => app.canvas.confirm_text(),
            egui::Key::Escape => app.canvas.cancel_text(),
            _ => {}
        }
    } else if app.canvas.selection().is_some() {
        match key {
            egui::Key::Delete | egui::Key::Backspace => app.canvas.delete_selection(),
            egui::Key::Escape => app.canvas.clear_selection(),
            _ => {}
        }
    }
}
