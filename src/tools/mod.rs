use egui::{Color32, Pos2, Rect};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::bitmap::Bitmap;
use crate::command::Command;
use crate::params::{DrawingParameters, FontSpec};
use crate::stroke::PendingStroke;

mod pencil;
pub use pencil::PencilTool;

mod rect_select;
pub use rect_select::RectSelectTool;

mod text;
pub use text::{TextEditState, TextTool};

/// What a tool may look at while handling input.
///
/// The bitmap is read-only here: edits leave a tool as a [`Command`].
pub struct ToolContext<'a> {
    pub bitmap: &'a Bitmap,
    pub params: &'a DrawingParameters,
}

/// The uncommitted state a tool wants drawn on top of the bitmap.
#[derive(Debug, Clone, Copy)]
pub enum Overlay<'a> {
    Stroke(&'a PendingStroke),
    Selection {
        rect: Rect,
        /// Pixels being dragged, with the rectangle they were lifted from.
        lifted: Option<(Rect, &'a RgbaImage)>,
    },
    Text {
        anchor: Pos2,
        text: &'a str,
        font: &'a FontSpec,
        color: Color32,
    },
}

/// Tool trait defines the interface for all canvas tools
pub trait Tool {
    fn kind(&self) -> ToolKind;

    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Pointer pressed on the canvas. May return a command that finalizes a
    /// previous, still-open edit.
    fn on_pointer_down(&mut self, pos: Pos2, ctx: &ToolContext<'_>) -> Option<Command>;

    /// Pointer dragged while held down.
    fn on_pointer_move(&mut self, pos: Pos2, ctx: &ToolContext<'_>) -> Option<Command>;

    /// Pointer released; returns the command that commits the gesture, if any.
    fn on_pointer_up(&mut self, pos: Pos2, ctx: &ToolContext<'_>) -> Option<Command>;

    /// Closes a gesture whose release never arrived. The canvas applies the
    /// result before passing on the next press, so the tool sees a bitmap
    /// that already contains it.
    fn finish_gesture(&mut self, ctx: &ToolContext<'_>) -> Option<Command>;

    /// Called when another tool is selected. Destructive pending edits are
    /// returned for commit, everything else is dropped.
    fn deactivate(&mut self, ctx: &ToolContext<'_>) -> Option<Command>;

    /// True between pointer down and pointer up.
    fn is_gesture_active(&self) -> bool;

    fn overlay(&self) -> Option<Overlay<'_>>;
}

/// The selectable tools, as emitted by the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolKind {
    #[default]
    Pencil,
    RectSelect,
    Text,
}

impl ToolKind {
    pub const ALL: [ToolKind; 3] = [ToolKind::Pencil, ToolKind::RectSelect, ToolKind::Text];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Pencil => "Pencil",
            ToolKind::RectSelect => "Select",
            ToolKind::Text => "Text",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ToolKind::Pencil => "✏",
            ToolKind::RectSelect => "⬚",
            ToolKind::Text => "A",
        }
    }

    /// Fresh tool with no pending state.
    pub fn new_tool(self) -> ToolType {
        match self {
            ToolKind::Pencil => ToolType::Pencil(PencilTool::new()),
            ToolKind::RectSelect => ToolType::RectSelect(RectSelectTool::new()),
            ToolKind::Text => ToolType::Text(TextTool::new()),
        }
    }
}

/// Enum over all tools, so the canvas can hold one without boxing.
#[derive(Debug, Clone)]
pub enum ToolType {
    Pencil(PencilTool),
    RectSelect(RectSelectTool),
    Text(TextTool),
}

impl Default for ToolType {
    fn default() -> Self {
        ToolKind::default().new_tool()
    }
}

impl Tool for ToolType {
    fn kind(&self) -> ToolKind {
        match self {
            Self::Pencil(tool) => tool.kind(),
            Self::RectSelect(tool) => tool.kind(),
            Self::Text(tool) => tool.kind(),
        }
    }

    fn on_pointer_down(&mut self, pos: Pos2, ctx: &ToolContext<'_>) -> Option<Command> {
        match self {
            Self::Pencil(tool) => tool.on_pointer_down(pos, ctx),
            Self::RectSelect(tool) => tool.on_pointer_down(pos, ctx),
            Self::Text(tool) => tool.on_pointer_down(pos, ctx),
        }
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &ToolContext<'_>) -> Option<Command> {
        match self {
            Self::Pencil(tool) => tool.on_pointer_move(pos, ctx),
            Self::RectSelect(tool) => tool.on_pointer_move(pos, ctx),
            Self::Text(tool) => tool.on_pointer_move(pos, ctx),
        }
    }

    fn on_pointer_up(&mut self, pos: Pos2, ctx: &ToolContext<'_>) -> Option<Command> {
        match self {
            Self::Pencil(tool) => tool.on_pointer_up(pos, ctx),
            Self::RectSelect(tool) => tool.on_pointer_up(pos, ctx),
            Self::Text(tool) => tool.on_pointer_up(pos, ctx),
        }
    }

    fn finish_gesture(&mut self, ctx: &ToolContext<'_>) -> Option<Command> {
        match self {
            Self::Pencil(tool) => tool.finish_gesture(ctx),
            Self::RectSelect(tool) => tool.finish_gesture(ctx),
            Self::Text(tool) => tool.finish_gesture(ctx),
        }
    }

    fn deactivate(&mut self, ctx: &ToolContext<'_>) -> Option<Command> {
        match self {
            Self::Pencil(tool) => tool.deactivate(ctx),
            Self::RectSelect(tool) => tool.deactivate(ctx),
            Self::Text(tool) => tool.deactivate(ctx),
        }
    }

    fn is_gesture_active(&self) -> bool {
        match self {
            Self::Pencil(tool) => tool.is_gesture_active(),
            Self::RectSelect(tool) => tool.is_gesture_active(),
            Self::Text(tool) => tool.is_gesture_active(),
        }
    }

    fn overlay(&self) -> Option<Overlay<'_>> {
        match self {
            Self::Pencil(tool) => tool.overlay(),
            Self::RectSelect(tool) => tool.overlay(),
            Self::Text(tool) => tool.overlay(),
        }
    }
}

// Helper methods for ToolType
impl ToolType {
    pub fn as_pencil_tool_mut(&mut self) -> Option<&mut PencilTool> {
        match self {
            Self::Pencil(tool) => Some(tool),
            _ => None,
        }
    }

    pub fn as_selection_tool(&self) -> Option<&RectSelectTool> {
        match self {
            Self::RectSelect(tool) => Some(tool),
            _ => None,
        }
    }

    pub fn as_selection_tool_mut(&mut self) -> Option<&mut RectSelectTool> {
        match self {
            Self::RectSelect(tool) => Some(tool),
            _ => None,
        }
    }

    pub fn as_text_tool(&self) -> Option<&TextTool> {
        match self {
            Self::Text(tool) => Some(tool),
            _ => None,
        }
    }

    pub fn as_text_tool_mut(&mut self) -> Option<&mut TextTool> {
        match self {
            Self::Text(tool) => Some(tool),
            _ => None,
        }
    }

    /// Short state label for the status line.
    pub fn current_state_name(&self) -> &'static str {
        match self {
            Self::Pencil(tool) if tool.is_drawing() => "Drawing",
            Self::RectSelect(tool) if tool.is_dragging() => "Moving",
            Self::RectSelect(tool) if tool.is_gesture_active() => "Selecting",
            Self::RectSelect(tool) if tool.has_selection() => "Selected",
            Self::Text(tool) if tool.is_editing() => "Typing",
            _ => "Idle",
        }
    }
}
