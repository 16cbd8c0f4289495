use std::path::{Path, PathBuf};

use egui::Color32;
use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::error::PaintResult;
use crate::params::{DrawingParameters, FontSpec};

/// Environment variable naming a JSON settings file.
pub const CONFIG_ENV_VAR: &str = "BITMAP_PAINT_CONFIG";

/// An extra font to register with the text tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontFile {
    pub family: String,
    pub path: PathBuf,
}

/// Startup settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing keys fall back to defaults
pub struct PaintConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub background: [u8; 4],
    pub color: [u8; 4],
    pub line_width: f32,
    pub font: FontSpec,
    /// Color bar swatches, row by row.
    pub palette: Vec<Vec<[u8; 4]>>,
    /// Widths offered by the line-width picker.
    pub line_widths: Vec<f32>,
    pub font_files: Vec<FontFile>,
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 600,
            background: [255, 255, 255, 255],
            color: [0, 0, 0, 255],
            line_width: 2.0,
            font: FontSpec::default(),
            palette: vec![
                vec![
                    [0, 0, 0, 255],
                    [128, 128, 128, 255],
                    [128, 0, 0, 255],
                    [128, 128, 0, 255],
                    [0, 128, 0, 255],
                    [0, 128, 128, 255],
                    [0, 0, 128, 255],
                    [128, 0, 128, 255],
                ],
                vec![
                    [255, 255, 255, 255],
                    [192, 192, 192, 255],
                    [255, 0, 0, 255],
                    [255, 255, 0, 255],
                    [0, 255, 0, 255],
                    [0, 255, 255, 255],
                    [0, 0, 255, 255],
                    [255, 0, 255, 255],
                ],
            ],
            line_widths: vec![1.0, 2.0, 4.0, 8.0, 12.0, 20.0],
            font_files: Vec::new(),
        }
    }
}

impl PaintConfig {
    pub fn load_from_file(path: &Path) -> PaintResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save_to_file(&self, path: &Path) -> PaintResult<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Reads the file named by [`CONFIG_ENV_VAR`], or the defaults when the
    /// variable is unset or the file is unusable.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV_VAR) else {
            return Self::default();
        };
        let path = PathBuf::from(path);
        match Self::load_from_file(&path) {
            Ok(config) => {
                log::info!("Loaded settings from {}", path.display());
                config
            }
            Err(err) => {
                log::error!("Ignoring settings file {}: {err}", path.display());
                Self::default()
            }
        }
    }

    pub fn background_pixel(&self) -> Rgba<u8> {
        Rgba(self.background)
    }

    pub fn palette_colors(&self) -> Vec<Vec<Color32>> {
        self.palette
            .iter()
            .map(|row| row.iter().map(|&c| to_color32(c)).collect())
            .collect()
    }

    pub fn drawing_parameters(&self) -> DrawingParameters {
        DrawingParameters::new(to_color32(self.color), self.line_width, self.font.clone())
    }
}

pub fn to_color32([r, g, b, a]: [u8; 4]) -> Color32 {
    Color32::from_rgba_unmultiplied(r, g, b, a)
}
