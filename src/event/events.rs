use egui::Color32;

use crate::params::FontSpec;
use crate::tools::ToolKind;

/// Notifications emitted by the toolbar and pickers.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    ToolSelected(ToolKind),
    ColorSelected(Color32),
    WidthSelected(f32),
    FontSelected(FontSpec),
}
