use egui::{Pos2, Rect, Vec2, pos2};
use image::RgbaImage;

use super::{Overlay, Tool, ToolContext, ToolKind};
use crate::command::Command;
use crate::geometry::{rect_contains, snap_to_pixel, PixelRect};

// Gesture the select tool is in the middle of
#[derive(Clone)]
enum SelectGesture {
    Idle,
    /// Rubber-banding a new rectangle from `anchor`.
    Marking { anchor: Pos2 },
    /// Moving a lifted copy of the pixels under `source`.
    Dragging {
        source: Rect,
        pixels: RgbaImage,
        offset: Vec2,
    },
}

impl std::fmt::Debug for SelectGesture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Marking { anchor } => f.debug_struct("Marking").field("anchor", anchor).finish(),
            Self::Dragging { source, offset, .. } => f
                .debug_struct("Dragging")
                .field("source", source)
                .field("offset", offset)
                .finish_non_exhaustive(),
        }
    }
}

/// Rectangular marquee selection.
///
/// Drawing a rectangle never touches the bitmap. Dragging inside an
/// existing selection lifts a copy of its pixels; the copy follows the
/// pointer as an overlay and is only written back on release.
#[derive(Debug, Clone)]
pub struct RectSelectTool {
    rect: Rect,
    has_selection: bool,
    gesture: SelectGesture,
}

impl Default for RectSelectTool {
    fn default() -> Self {
        Self::new()
    }
}

impl RectSelectTool {
    pub fn new() -> Self {
        Self {
            rect: Rect::ZERO,
            has_selection: false,
            gesture: SelectGesture::Idle,
        }
    }

    /// The confirmed selection rectangle, if any.
    pub fn selection(&self) -> Option<Rect> {
        self.has_selection.then_some(self.rect)
    }

    pub fn has_selection(&self) -> bool {
        self.has_selection
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, SelectGesture::Dragging { .. })
    }

    /// Where inside the rectangle the current drag grabbed it.
    pub fn drag_offset(&self) -> Option<Vec2> {
        match &self.gesture {
            SelectGesture::Dragging { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    pub fn lifted_pixels(&self) -> Option<&RgbaImage> {
        match &self.gesture {
            SelectGesture::Dragging { pixels, .. } => Some(pixels),
            _ => None,
        }
    }

    /// Drops the selection. A drag in progress is abandoned, leaving the
    /// bitmap as it was before the lift.
    pub fn clear(&mut self) {
        self.gesture = SelectGesture::Idle;
        self.has_selection = false;
        self.rect = Rect::ZERO;
    }

    /// Clears the selected pixels to background and drops the selection.
    pub fn delete_selection(&mut self, ctx: &ToolContext<'_>) -> Option<Command> {
        let target = match &self.gesture {
            SelectGesture::Dragging { source, .. } => *source,
            _ if self.has_selection => self.rect,
            _ => return None,
        };
        self.clear();
        let (w, h) = ctx.bitmap.dimensions();
        Some(Command::ClearRect(PixelRect::from_rect(target, w, h)))
    }

    fn begin_marking(&mut self, pos: Pos2) {
        self.has_selection = false;
        self.rect = Rect::from_min_max(pos, pos);
        self.gesture = SelectGesture::Marking { anchor: pos };
    }

    /// Lifts the selected pixels. `in_hand` is a block that was dropped on
    /// this rectangle but is not in `ctx.bitmap` yet.
    fn begin_drag(&mut self, pos: Pos2, ctx: &ToolContext<'_>, in_hand: Option<RgbaImage>) {
        let pixels = in_hand.unwrap_or_else(|| {
            let (w, h) = ctx.bitmap.dimensions();
            ctx.bitmap.copy_rect(PixelRect::from_rect(self.rect, w, h))
        });
        log::debug!("Lifted {}x{} block from {:?}", pixels.width(), pixels.height(), self.rect);
        self.gesture = SelectGesture::Dragging {
            source: self.rect,
            pixels,
            offset: pos - self.rect.min,
        };
    }

    fn update(&mut self, pos: Pos2, ctx: &ToolContext<'_>) {
        match &self.gesture {
            SelectGesture::Idle => log::debug!("Select move without a gesture, ignoring"),
            SelectGesture::Marking { anchor } => {
                self.rect = Rect::from_two_pos(*anchor, pos);
            }
            SelectGesture::Dragging { offset, .. } => {
                let (w, h) = ctx.bitmap.dimensions();
                let size = self.rect.size();
                let min = pos - *offset;
                let min = pos2(
                    min.x.round().clamp(0.0, (w as f32 - size.x).max(0.0)),
                    min.y.round().clamp(0.0, (h as f32 - size.y).max(0.0)),
                );
                self.rect = Rect::from_min_size(min, size);
            }
        }
    }

    fn settle_marking(&mut self) {
        self.gesture = SelectGesture::Idle;
        self.has_selection = self.rect.width() > 0.0 && self.rect.height() > 0.0;
        if !self.has_selection {
            self.rect = Rect::ZERO;
        }
    }

    /// Ends a drag by dropping the block at the current rectangle.
    fn drop_block(&mut self, ctx: &ToolContext<'_>) -> Option<Command> {
        let SelectGesture::Dragging { source, pixels, .. } =
            std::mem::replace(&mut self.gesture, SelectGesture::Idle)
        else {
            return None;
        };
        if source.min == self.rect.min {
            return None;
        }
        let (w, h) = ctx.bitmap.dimensions();
        let dest = PixelRect::from_rect(self.rect, w, h);
        Some(Command::MoveSelection {
            source: PixelRect::from_rect(source, w, h),
            dest_x: dest.x,
            dest_y: dest.y,
            pixels,
        })
    }
}

impl Tool for RectSelectTool {
    fn kind(&self) -> ToolKind {
        ToolKind::RectSelect
    }

    fn on_pointer_down(&mut self, pos: Pos2, ctx: &ToolContext<'_>) -> Option<Command> {
        let pos = snap_to_pixel(pos);
        let previous = self.finish_gesture(ctx);
        if self.has_selection && rect_contains(self.rect, pos) {
            let in_hand = match &previous {
                Some(Command::MoveSelection { pixels, .. }) => Some(pixels.clone()),
                _ => None,
            };
            self.begin_drag(pos, ctx, in_hand);
        } else {
            // Clicking outside replaces the marquee; pixels stay untouched.
            self.begin_marking(pos);
        }
        previous
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &ToolContext<'_>) -> Option<Command> {
        self.update(snap_to_pixel(pos), ctx);
        None
    }

    fn on_pointer_up(&mut self, pos: Pos2, ctx: &ToolContext<'_>) -> Option<Command> {
        let pos = snap_to_pixel(pos);
        match self.gesture {
            SelectGesture::Idle => {
                log::debug!("Select release without a gesture, ignoring");
                None
            }
            SelectGesture::Marking { .. } => {
                self.update(pos, ctx);
                self.settle_marking();
                None
            }
            SelectGesture::Dragging { .. } => {
                self.update(pos, ctx);
                self.drop_block(ctx)
            }
        }
    }

    fn finish_gesture(&mut self, ctx: &ToolContext<'_>) -> Option<Command> {
        match self.gesture {
            SelectGesture::Idle => None,
            SelectGesture::Marking { .. } => {
                self.settle_marking();
                None
            }
            SelectGesture::Dragging { .. } => self.drop_block(ctx),
        }
    }

    fn deactivate(&mut self, ctx: &ToolContext<'_>) -> Option<Command> {
        let command = self.drop_block(ctx);
        self.clear();
        command
    }

    fn is_gesture_active(&self) -> bool {
        !matches!(self.gesture, SelectGesture::Idle)
    }

    fn overlay(&self) -> Option<Overlay<'_>> {
        match &self.gesture {
            SelectGesture::Dragging { source, pixels, .. } => Some(Overlay::Selection {
                rect: self.rect,
                lifted: Some((*source, pixels)),
            }),
            SelectGesture::Marking { .. } => Some(Overlay::Selection {
                rect: self.rect,
                lifted: None,
            }),
            SelectGesture::Idle if self.has_selection => Some(Overlay::Selection {
                rect: self.rect,
                lifted: None,
            }),
            SelectGesture::Idle => None,
        }
    }
}
