use std::path::{Path, PathBuf};

use crate::bitmap::Bitmap;
use crate::canvas::Canvas;
use crate::config::{to_color32, PaintConfig};
use crate::event::EventBus;
use crate::params::FontSpec;
use crate::panels;
use crate::renderer::Renderer;
use crate::tools::ToolKind;

/// Settings remembered between runs.
/// We derive Deserialize/Serialize so we can persist app state on shutdown.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct PersistedState {
    pub tool: ToolKind,
    pub color: [u8; 4],
    pub line_width: f32,
    pub font: FontSpec,
    pub file_path: String,
}

impl Default for PersistedState {
    fn default() -> Self {
        let config = PaintConfig::default();
        Self {
            tool: ToolKind::default(),
            color: config.color,
            line_width: config.line_width,
            font: config.font,
            file_path: String::new(),
        }
    }
}

/// Extensions offered in the Open/Save dialogs.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tif", "tiff", "webp"];

/// A one-line, non-fatal status message.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub is_error: bool,
}

#[derive(Debug)]
pub struct PaintApp {
    pub(crate) canvas: Canvas,
    pub(crate) bus: EventBus,
    pub(crate) renderer: Renderer,
    pub(crate) config: PaintConfig,
    /// Where the image was last opened from or saved to.
    pub(crate) file_path: Option<PathBuf>,
    pub(crate) notification: Option<Notification>,
    pub(crate) last_canvas_pos: Option<egui::Pos2>,
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: PaintConfig, initial_file: Option<PathBuf>) -> Self {
        let restored: Option<PersistedState> = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY));
        Self::from_parts(config, restored, initial_file)
    }

    /// Builds the app without a window, from settings and optional restored state.
    pub fn from_parts(config: PaintConfig, restored: Option<PersistedState>, initial_file: Option<PathBuf>) -> Self {
        let canvas = Canvas::from_config(&config).unwrap_or_else(|err| {
            log::error!("Invalid canvas settings ({err}), using defaults");
            let defaults = PaintConfig::default();
            let background = defaults.background_pixel();
            let pixels = image::RgbaImage::from_pixel(defaults.canvas_width, defaults.canvas_height, background);
            Canvas::with_bitmap(Bitmap::from_image(pixels, background))
        });

        let mut app = Self {
            canvas,
            bus: EventBus::new(),
            renderer: Renderer::new(),
            config,
            file_path: None,
            notification: None,
            last_canvas_pos: None,
        };

        if let Some(state) = restored {
            app.canvas.set_color(to_color32(state.color));
            app.canvas.set_width(state.line_width);
            app.canvas.set_font(state.font);
            app.canvas.select_tool(state.tool);
            app.file_path = (!state.file_path.is_empty()).then(|| PathBuf::from(state.file_path));
        }

        if let Some(path) = initial_file {
            app.open_file(&path);
        }
        app
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn persisted_state(&self) -> PersistedState {
        let params = self.canvas.params();
        PersistedState {
            tool: self.canvas.active_tool_kind(),
            color: params.color().to_srgba_unmultiplied(),
            line_width: params.width(),
            font: params.font().clone(),
            file_path: self
                .file_path
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
        }
    }

    fn notify(&mut self, message: String, is_error: bool) {
        if is_error {
            log::error!("{message}");
        }
        self.notification = Some(Notification { message, is_error });
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    fn file_dialog(&self) -> rfd::FileDialog {
        let dialog = rfd::FileDialog::new().add_filter("Image", IMAGE_EXTENSIONS);
        match self.file_path.as_deref().and_then(Path::parent) {
            Some(dir) => dialog.set_directory(dir),
            None => dialog,
        }
    }

    /// Asks for an image to open.
    pub fn open_file_dialog(&mut self) {
        if let Some(path) = self.file_dialog().pick_file() {
            self.open_file(&path);
        }
    }

    /// Asks where to save, suggesting the current file name.
    pub fn save_file_dialog(&mut self) {
        let file_name = self
            .file_path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "untitled.png".to_owned());
        if let Some(path) = self.file_dialog().set_file_name(file_name).save_file() {
            self.save_file(&path);
        }
    }

    /// Saves to the current file, or asks for one if there is none yet.
    pub fn save_current(&mut self) {
        match self.file_path.clone() {
            Some(path) => self.save_file(&path),
            None => self.save_file_dialog(),
        }
    }

    /// Loads an image file. Failures leave the canvas as is.
    pub fn open_file(&mut self, path: &Path) {
        match self.canvas.load(path) {
            Ok(()) => {
                self.file_path = Some(path.to_path_buf());
                self.notify(format!("Opened {}", path.display()), false);
            }
            Err(err) => self.notify(format!("Could not open {}: {err}", path.display()), true),
        }
    }

    pub fn save_file(&mut self, path: &Path) {
        match self.canvas.save(path) {
            Ok(()) => {
                self.file_path = Some(path.to_path_buf());
                self.notify(format!("Saved {}", path.display()), false);
            }
            Err(err) => self.notify(format!("Could not save {}: {err}", path.display()), true),
        }
    }

    pub fn new_document(&mut self) {
        let (w, h) = (self.config.canvas_width, self.config.canvas_height);
        match self.canvas.new_document(w, h) {
            Ok(()) => {
                self.file_path = None;
                self.notify(format!("New {w}x{h} image"), false);
            }
            Err(err) => self.notify(format!("Could not create image: {err}"), true),
        }
    }

    /// Delivers queued picker events to the canvas.
    pub fn dispatch_events(&mut self) -> usize {
        self.bus.dispatch(&mut self.canvas)
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.persisted_state());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        panels::tools_panel(self, ctx);
        // Picker events apply before this frame's pointer input.
        self.dispatch_events();
        panels::central_panel(self, ctx);
    }
}
