// src/renderer.rs
use eframe::egui;

use crate::canvas::Canvas;

/// Displays the composed canvas frame as an egui texture.
///
/// The texture is re-uploaded only when the canvas revision changes.
#[derive(Default)]
pub struct Renderer {
    texture: Option<egui::TextureHandle>,
    uploaded_revision: Option<u64>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("has_texture", &self.texture.is_some())
            .field("uploaded_revision", &self.uploaded_revision)
            .finish()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the next `render` call will upload a new texture.
    pub fn needs_upload(&self, canvas: &Canvas) -> bool {
        self.uploaded_revision != Some(canvas.revision())
    }

    fn sync_texture(&mut self, ctx: &egui::Context, canvas: &Canvas) -> egui::TextureId {
        if self.needs_upload(canvas) || self.texture.is_none() {
            let image = canvas.compose_frame().to_color_image();
            match &mut self.texture {
                Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
                None => {
                    self.texture = Some(ctx.load_texture("canvas", image, egui::TextureOptions::NEAREST));
                }
            }
            self.uploaded_revision = Some(canvas.revision());
        }
        match &self.texture {
            Some(texture) => texture.id(),
            None => egui::TextureId::default(),
        }
    }

    /// Paints the canvas at 1:1 scale and returns the interactive response.
    ///
    /// The response rect's `min` is the canvas origin in screen space.
    pub fn render(&mut self, ui: &mut egui::Ui, canvas: &Canvas) -> egui::Response {
        let size = egui::vec2(canvas.bitmap().width() as f32, canvas.bitmap().height() as f32);
        let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
        let texture_id = self.sync_texture(ui.ctx(), canvas);
        painter.image(
            texture_id,
            response.rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
        response
    }
}
