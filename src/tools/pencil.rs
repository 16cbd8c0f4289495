use egui::Pos2;

use super::{Overlay, Tool, ToolContext, ToolKind};
use crate::command::Command;
use crate::stroke::PendingStroke;

/// Freehand drawing. Collects one stroke per drag and commits it on release.
#[derive(Debug, Clone, Default)]
pub struct PencilTool {
    // Transient state: the stroke being drawn (if any)
    current_stroke: Option<PendingStroke>,
}

impl PencilTool {
    pub fn new() -> Self {
        Self { current_stroke: None }
    }

    pub fn is_drawing(&self) -> bool {
        self.current_stroke.is_some()
    }

    pub fn pending_stroke(&self) -> Option<&PendingStroke> {
        self.current_stroke.as_ref()
    }

    /// Hands the current stroke over for commit. No-op without a stroke.
    pub fn finish_stroke(&mut self) -> Option<Command> {
        self.current_stroke
            .take()
            .map(|stroke| Command::CommitStroke(stroke.into_stroke()))
    }
}

impl Tool for PencilTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Pencil
    }

    fn on_pointer_down(&mut self, pos: Pos2, ctx: &ToolContext<'_>) -> Option<Command> {
        // A press without a release in between: keep what was drawn.
        let previous = self.finish_stroke();
        self.current_stroke = Some(PendingStroke::new(pos, ctx.params.color(), ctx.params.width()));
        previous
    }

    fn on_pointer_move(&mut self, pos: Pos2, _ctx: &ToolContext<'_>) -> Option<Command> {
        match &mut self.current_stroke {
            Some(stroke) => {
                stroke.add_point(pos);
            }
            None => log::debug!("Pencil move without a stroke, ignoring"),
        }
        None
    }

    fn on_pointer_up(&mut self, pos: Pos2, ctx: &ToolContext<'_>) -> Option<Command> {
        if self.current_stroke.is_none() {
            log::debug!("Pencil release without a stroke, ignoring");
            return None;
        }
        self.on_pointer_move(pos, ctx);
        self.finish_stroke()
    }

    fn finish_gesture(&mut self, _ctx: &ToolContext<'_>) -> Option<Command> {
        self.finish_stroke()
    }

    fn deactivate(&mut self, _ctx: &ToolContext<'_>) -> Option<Command> {
        self.finish_stroke()
    }

    fn is_gesture_active(&self) -> bool {
        self.is_drawing()
    }

    fn overlay(&self) -> Option<Overlay<'_>> {
        self.current_stroke.as_ref().map(Overlay::Stroke)
    }
}
