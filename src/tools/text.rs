use egui::{Color32, Pos2};

use super::{Overlay, Tool, ToolContext, ToolKind};
use crate::command::Command;
use crate::params::{DrawingParameters, FontSpec};

/// An open text insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEditState {
    pub buffer: String,
    pub anchor: Pos2,
    pub font: FontSpec,
    pub color: Color32,
}

/// Click to place a text anchor, type, then confirm to rasterize.
#[derive(Debug, Clone, Default)]
pub struct TextTool {
    edit: Option<TextEditState>,
}

impl TextTool {
    pub fn new() -> Self {
        Self { edit: None }
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    pub fn edit_state(&self) -> Option<&TextEditState> {
        self.edit.as_ref()
    }

    /// Appends typed text. Ignored when no edit is open.
    pub fn insert_text(&mut self, text: &str) -> bool {
        match &mut self.edit {
            Some(edit) if !text.is_empty() => {
                edit.buffer.push_str(text);
                true
            }
            _ => false,
        }
    }

    /// Removes the last character.
    pub fn delete_backward(&mut self) -> bool {
        self.edit
            .as_mut()
            .and_then(|edit| edit.buffer.pop())
            .is_some()
    }

    /// Closes the edit and returns its commit. Empty edits are discarded.
    pub fn confirm(&mut self) -> Option<Command> {
        let edit = self.edit.take()?;
        if edit.buffer.is_empty() {
            log::debug!("Discarding empty text edit");
            return None;
        }
        Some(Command::CommitText {
            anchor: edit.anchor,
            text: edit.buffer,
            font: edit.font,
            color: edit.color,
        })
    }

    /// Picks up the current color and font, so a style change made while
    /// typing applies to the whole edit.
    pub fn apply_style(&mut self, params: &DrawingParameters) -> bool {
        let Some(edit) = &mut self.edit else {
            return false;
        };
        edit.color = params.color();
        edit.font = params.font().clone();
        true
    }

    /// Closes the edit without drawing anything.
    pub fn cancel(&mut self) {
        self.edit = None;
    }
}

impl Tool for TextTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Text
    }

    fn on_pointer_down(&mut self, pos: Pos2, ctx: &ToolContext<'_>) -> Option<Command> {
        let previous = self.confirm();
        self.edit = Some(TextEditState {
            buffer: String::new(),
            anchor: pos,
            font: ctx.params.font().clone(),
            color: ctx.params.color(),
        });
        previous
    }

    fn on_pointer_move(&mut self, _pos: Pos2, _ctx: &ToolContext<'_>) -> Option<Command> {
        None
    }

    fn on_pointer_up(&mut self, _pos: Pos2, _ctx: &ToolContext<'_>) -> Option<Command> {
        None
    }

    fn finish_gesture(&mut self, _ctx: &ToolContext<'_>) -> Option<Command> {
        None
    }

    fn deactivate(&mut self, _ctx: &ToolContext<'_>) -> Option<Command> {
        self.confirm()
    }

    fn is_gesture_active(&self) -> bool {
        false
    }

    fn overlay(&self) -> Option<Overlay<'_>> {
        self.edit.as_ref().map(|edit| Overlay::Text {
            anchor: edit.anchor,
            text: &edit.buffer,
            font: &edit.font,
            color: edit.color,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::{Bitmap, WHITE};
    use crate::params::DrawingParameters;
    use egui::pos2;

    #[test]
    fn test_typing_and_confirm() {
        let bitmap = Bitmap::new(50, 50, WHITE).unwrap();
        let params = DrawingParameters::default();
        let ctx = ToolContext { bitmap: &bitmap, params: &params };
        let mut tool = TextTool::new();

        assert!(!tool.insert_text("x"));
        tool.on_pointer_down(pos2(4.0, 6.0), &ctx);
        assert!(tool.insert_text("Hix"));
        assert!(tool.delete_backward());
        assert_eq!(tool.edit_state().unwrap().buffer, "Hi");

        match tool.confirm() {
            Some(Command::CommitText { anchor, text, .. }) => {
                assert_eq!(anchor, pos2(4.0, 6.0));
                assert_eq!(text, "Hi");
            }
            other => panic!("expected text commit, got {other:?}"),
        }
        assert!(!tool.is_editing());
    }

    #[test]
    fn test_empty_edit_discarded() {
        let bitmap = Bitmap::new(50, 50, WHITE).unwrap();
        let params = DrawingParameters::default();
        let ctx = ToolContext { bitmap: &bitmap, params: &params };
        let mut tool = TextTool::new();

        tool.on_pointer_down(pos2(1.0, 1.0), &ctx);
        assert!(!tool.delete_backward());
        assert!(tool.deactivate(&ctx).is_none());
        assert!(!tool.is_editing());
    }

    #[test]
    fn test_new_click_commits_previous_edit() {
        let bitmap = Bitmap::new(50, 50, WHITE).unwrap();
        let params = DrawingParameters::default();
        let ctx = ToolContext { bitmap: &bitmap, params: &params };
        let mut tool = TextTool::new();

        tool.on_pointer_down(pos2(1.0, 1.0), &ctx);
        tool.insert_text("a");
        let previous = tool.on_pointer_down(pos2(20.0, 20.0), &ctx);
        assert!(matches!(previous, Some(Command::CommitText { ref text, .. }) if text == "a"));
        assert_eq!(tool.edit_state().unwrap().anchor, pos2(20.0, 20.0));
        assert!(tool.edit_state().unwrap().buffer.is_empty());
    }

    #[test]
    fn test_cancel_drops_edit() {
        let bitmap = Bitmap::new(50, 50, WHITE).unwrap();
        let params = DrawingParameters::default();
        let ctx = ToolContext { bitmap: &bitmap, params: &params };
        let mut tool = TextTool::new();
        tool.on_pointer_down(pos2(1.0, 1.0), &ctx);
        tool.insert_text("gone");
        tool.cancel();
        assert!(tool.confirm().is_none());
    }

    #[test]
    fn test_style_change_while_typing() {
        let bitmap = Bitmap::new(50, 50, WHITE).unwrap();
        let mut params = DrawingParameters::default();
        let mut tool = TextTool::new();
        assert!(!tool.apply_style(&params));

        tool.on_pointer_down(pos2(1.0, 1.0), &ToolContext { bitmap: &bitmap, params: &params });
        tool.insert_text("ab");
        params.set_color(Color32::BLUE);
        params.set_font(FontSpec::new("Hack", 30.0));
        assert!(tool.apply_style(&params));

        match tool.confirm() {
            Some(Command::CommitText { font, color, .. }) => {
                assert_eq!(color, Color32::BLUE);
                assert_eq!(font, FontSpec::new("Hack", 30.0));
            }
            other => panic!("expected text commit, got {other:?}"),
        }
    }
}
