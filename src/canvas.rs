use std::path::Path;

use egui::{Color32, Pos2, Rect};
use image::Rgba;

use crate::bitmap::{Bitmap, WHITE};
use crate::command::Command;
use crate::config::PaintConfig;
use crate::error::PaintResult;
use crate::event::{EditorEvent, EventHandler};
use crate::fonts::FontBook;
use crate::geometry::{clamp_to_bounds, PixelRect};
use crate::params::{DrawingParameters, FontSpec};
use crate::raster;
use crate::stroke::PendingStroke;
use crate::tools::{Overlay, Tool, ToolContext, ToolKind, ToolType};

/// The editing session: the bitmap, the drawing parameters and the active
/// tool with its pending edit.
///
/// All input goes through here. Points are clamped to the bitmap before a
/// tool sees them, and every edit a tool produces is executed against the
/// bitmap right away.
#[derive(Debug)]
pub struct Canvas {
    bitmap: Bitmap,
    params: DrawingParameters,
    fonts: FontBook,
    tool: ToolType,
    revision: u64,
}

impl Canvas {
    /// Blank white canvas with default parameters.
    pub fn new(width: u32, height: u32) -> PaintResult<Self> {
        Ok(Self::with_bitmap(Bitmap::new(width, height, WHITE)?))
    }

    pub fn with_bitmap(bitmap: Bitmap) -> Self {
        Self {
            bitmap,
            params: DrawingParameters::default(),
            fonts: FontBook::new(),
            tool: ToolType::default(),
            revision: 0,
        }
    }

    /// Builds a canvas from settings, registering configured font files.
    /// A font file that fails to load is logged and skipped.
    pub fn from_config(config: &PaintConfig) -> PaintResult<Self> {
        let bitmap = Bitmap::new(config.canvas_width, config.canvas_height, config.background_pixel())?;
        let mut canvas = Self::with_bitmap(bitmap);
        canvas.params = config.drawing_parameters();
        for font in &config.font_files {
            if let Err(err) = canvas.fonts.register_file(&font.family, &font.path) {
                log::error!("Could not load font {} from {}: {err}", font.family, font.path.display());
            }
        }
        Ok(canvas)
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    pub fn params(&self) -> &DrawingParameters {
        &self.params
    }

    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    pub fn fonts_mut(&mut self) -> &mut FontBook {
        &mut self.fonts
    }

    pub fn active_tool(&self) -> &ToolType {
        &self.tool
    }

    pub fn active_tool_kind(&self) -> ToolKind {
        self.tool.kind()
    }

    /// Bumped whenever the composed frame may have changed.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    fn execute(&mut self, command: Option<Command>) {
        if let Some(command) = command {
            command.execute(&mut self.bitmap, &self.fonts);
        }
        self.touch();
    }

    // Tool state machine

    /// Switches tools, resolving whatever the old tool had pending first.
    pub fn select_tool(&mut self, kind: ToolKind) {
        if kind == self.tool.kind() {
            return;
        }
        let ctx = ToolContext {
            bitmap: &self.bitmap,
            params: &self.params,
        };
        let pending = self.tool.deactivate(&ctx);
        log::info!("Tool changed: {} -> {}", self.tool.name(), kind.name());
        self.execute(pending);
        self.tool = kind.new_tool();
    }

    pub fn set_color(&mut self, color: Color32) {
        self.params.set_color(color);
        self.restyle_text();
    }

    pub fn set_width(&mut self, width: f32) {
        self.params.set_width(width);
    }

    pub fn set_font(&mut self, font: FontSpec) {
        if !self.fonts.contains(&font.family) {
            log::warn!("Selected font family {} is not loaded", font.family);
        }
        self.params.set_font(font);
        self.restyle_text();
    }

    // An open text edit follows the pickers until it is committed.
    fn restyle_text(&mut self) {
        if self.tool.as_text_tool_mut().is_some_and(|tool| tool.apply_style(&self.params)) {
            self.touch();
        }
    }

    // Gesture engine

    fn clamp(&self, pos: Pos2) -> Pos2 {
        let clamped = clamp_to_bounds(pos, self.bitmap.width(), self.bitmap.height());
        if clamped != pos {
            log::trace!("Clamped {pos:?} to {clamped:?}");
        }
        clamped
    }

    /// Starts a gesture. One still open from a lost release is committed
    /// first, so the new gesture starts from up-to-date pixels.
    pub fn begin_gesture(&mut self, pos: Pos2) {
        let pos = self.clamp(pos);
        if self.tool.is_gesture_active() {
            log::debug!("{} gesture still open, finishing it", self.tool.name());
            let ctx = ToolContext {
                bitmap: &self.bitmap,
                params: &self.params,
            };
            let command = self.tool.finish_gesture(&ctx);
            self.execute(command);
        }
        let ctx = ToolContext {
            bitmap: &self.bitmap,
            params: &self.params,
        };
        log::debug!("{} gesture begins at {pos:?}", self.tool.name());
        let command = self.tool.on_pointer_down(pos, &ctx);
        self.execute(command);
    }

    pub fn continue_gesture(&mut self, pos: Pos2) {
        let pos = self.clamp(pos);
        let ctx = ToolContext {
            bitmap: &self.bitmap,
            params: &self.params,
        };
        let command = self.tool.on_pointer_move(pos, &ctx);
        self.execute(command);
    }

    pub fn end_gesture(&mut self, pos: Pos2) {
        let pos = self.clamp(pos);
        let ctx = ToolContext {
            bitmap: &self.bitmap,
            params: &self.params,
        };
        let command = self.tool.on_pointer_up(pos, &ctx);
        log::debug!("{} gesture ends at {pos:?}", self.tool.name());
        self.execute(command);
    }

    pub fn is_gesture_active(&self) -> bool {
        self.tool.is_gesture_active()
    }

    pub fn pending_stroke(&self) -> Option<&PendingStroke> {
        match self.tool.overlay() {
            Some(Overlay::Stroke(stroke)) => Some(stroke),
            _ => None,
        }
    }

    /// Rasterizes the in-progress pencil stroke. No-op without one.
    pub fn commit_current_stroke(&mut self) {
        let command = self.tool.as_pencil_tool_mut().and_then(|pencil| pencil.finish_stroke());
        if command.is_some() {
            self.execute(command);
        }
    }

    // Selection

    pub fn selection(&self) -> Option<Rect> {
        self.tool.as_selection_tool().and_then(|tool| tool.selection())
    }

    pub fn is_dragging_selection(&self) -> bool {
        self.tool.as_selection_tool().is_some_and(|tool| tool.is_dragging())
    }

    /// Clears the selected pixels to background.
    pub fn delete_selection(&mut self) {
        let ctx = ToolContext {
            bitmap: &self.bitmap,
            params: &self.params,
        };
        if let Some(tool) = self.tool.as_selection_tool_mut() {
            let command = tool.delete_selection(&ctx);
            self.execute(command);
        }
    }

    /// Forgets the selection without touching pixels.
    pub fn clear_selection(&mut self) {
        if let Some(tool) = self.tool.as_selection_tool_mut() {
            tool.clear();
            self.touch();
        }
    }

    // Text input

    pub fn is_editing_text(&self) -> bool {
        self.tool.as_text_tool().is_some_and(|tool| tool.is_editing())
    }

    pub fn text_buffer(&self) -> Option<&str> {
        self.tool
            .as_text_tool()
            .and_then(|tool| tool.edit_state())
            .map(|edit| edit.buffer.as_str())
    }

    pub fn insert_text(&mut self, text: &str) {
        if self.tool.as_text_tool_mut().is_some_and(|tool| tool.insert_text(text)) {
            self.touch();
        }
    }

    pub fn delete_backward(&mut self) {
        if self.tool.as_text_tool_mut().is_some_and(|tool| tool.delete_backward()) {
            self.touch();
        }
    }

    pub fn confirm_text(&mut self) {
        if let Some(tool) = self.tool.as_text_tool_mut() {
            let command = tool.confirm();
            self.execute(command);
        }
    }

    pub fn cancel_text(&mut self) {
        if let Some(tool) = self.tool.as_text_tool_mut() {
            tool.cancel();
            self.touch();
        }
    }

    // Document

    /// Drops every pending edit of the active tool.
    fn reset_tool(&mut self) {
        self.tool = self.tool.kind().new_tool();
    }

    /// Replaces the bitmap and discards pending state.
    pub fn replace_bitmap(&mut self, bitmap: Bitmap) {
        self.bitmap = bitmap;
        self.reset_tool();
        self.touch();
    }

    pub fn new_document(&mut self, width: u32, height: u32) -> PaintResult<()> {
        let bitmap = Bitmap::new(width, height, self.bitmap.background())?;
        self.replace_bitmap(bitmap);
        log::info!("New {width}x{height} document");
        Ok(())
    }

    /// Loads an image file. On failure nothing changes.
    pub fn load(&mut self, path: &Path) -> PaintResult<()> {
        let bitmap = Bitmap::open(path, self.bitmap.background())?;
        log::info!("Loaded {} ({}x{})", path.display(), bitmap.width(), bitmap.height());
        self.replace_bitmap(bitmap);
        Ok(())
    }

    /// Writes the committed bitmap. Pending edits are not included.
    pub fn save(&self, path: &Path) -> PaintResult<()> {
        self.bitmap.save(path)?;
        log::info!("Saved {}", path.display());
        Ok(())
    }

    // Presentation

    pub fn overlay(&self) -> Option<Overlay<'_>> {
        self.tool.overlay()
    }

    /// The frame to display: the bitmap with the live overlay on top.
    /// The bitmap itself is left untouched.
    pub fn compose_frame(&self) -> Bitmap {
        let mut frame = self.bitmap.clone();
        let (w, h) = frame.dimensions();
        match self.overlay() {
            None => {}
            Some(Overlay::Stroke(stroke)) => {
                raster::stroke_polyline(
                    &mut frame,
                    stroke.points(),
                    stroke.color().to_srgba_unmultiplied(),
                    stroke.thickness(),
                );
            }
            Some(Overlay::Selection { rect, lifted }) => {
                let dest = PixelRect::from_rect(rect, w, h);
                if let Some((source, pixels)) = lifted {
                    frame.clear_rect(PixelRect::from_rect(source, w, h));
                    frame.paste(pixels, dest.x as i64, dest.y as i64);
                }
                raster::dashed_outline(&mut frame, dest);
            }
            Some(Overlay::Text {
                anchor,
                text,
                font,
                color,
            }) => {
                if let Ok(face) = self.fonts.resolve(&font.family) {
                    let rgba = color.to_srgba_unmultiplied();
                    raster::draw_text(&mut frame, face, font.size, anchor, text, rgba);
                    let (top, height) = raster::caret_position(face, font.size, anchor, text);
                    let bottom = Pos2::new(top.x, top.y + height);
                    raster::stroke_polyline(&mut frame, &[top, bottom], rgba, 1.0);
                }
            }
        }
        frame
    }

    pub fn background(&self) -> Rgba<u8> {
        self.bitmap.background()
    }
}

impl EventHandler for Canvas {
    fn handle_event(&mut self, event: &EditorEvent) {
        match event {
            EditorEvent::ToolSelected(kind) => self.select_tool(*kind),
            EditorEvent::ColorSelected(color) => self.set_color(*color),
            EditorEvent::WidthSelected(width) => self.set_width(*width),
            EditorEvent::FontSelected(font) => self.set_font(font.clone()),
        }
    }
}
