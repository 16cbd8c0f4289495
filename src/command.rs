use egui::{Color32, Pos2};
use image::RgbaImage;

use crate::bitmap::Bitmap;
use crate::fonts::FontBook;
use crate::geometry::PixelRect;
use crate::params::FontSpec;
use crate::raster;
use crate::stroke::Stroke;

/// A finished edit, ready to be merged into the bitmap.
///
/// Tools never touch the bitmap themselves; they hand one of these to the
/// canvas, which executes it immediately.
#[derive(Debug, Clone)]
pub enum Command {
    /// Rasterizes a pencil stroke.
    CommitStroke(Stroke),
    /// Moves a lifted block: clears `source` to background, then pastes
    /// `pixels` with their top-left corner at `dest`.
    MoveSelection {
        source: PixelRect,
        dest_x: u32,
        dest_y: u32,
        pixels: RgbaImage,
    },
    /// Rasterizes text with its first line's top-left corner at `anchor`.
    CommitText {
        anchor: Pos2,
        text: String,
        font: FontSpec,
        color: Color32,
    },
    /// Fills a region with the background color.
    ClearRect(PixelRect),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::CommitStroke(_) => "CommitStroke",
            Command::MoveSelection { .. } => "MoveSelection",
            Command::CommitText { .. } => "CommitText",
            Command::ClearRect(_) => "ClearRect",
        }
    }

    /// True when executing would leave the bitmap untouched.
    pub fn is_empty(&self) -> bool {
        match self {
            Command::CommitStroke(stroke) => stroke.is_empty(),
            Command::MoveSelection {
                source,
                dest_x,
                dest_y,
                pixels,
            } => source.is_empty() || pixels.is_empty() || (source.x == *dest_x && source.y == *dest_y),
            Command::CommitText { text, .. } => text.is_empty(),
            Command::ClearRect(rect) => rect.is_empty(),
        }
    }

    /// Applies the edit to `bitmap`. Returns whether anything was drawn.
    pub fn execute(&self, bitmap: &mut Bitmap, fonts: &FontBook) -> bool {
        if self.is_empty() {
            log::debug!("Skipping empty {}", self.name());
            return false;
        }
        match self {
            Command::CommitStroke(stroke) => {
                raster::stroke_polyline(
                    bitmap,
                    stroke.points(),
                    stroke.color().to_srgba_unmultiplied(),
                    stroke.thickness(),
                );
            }
            Command::MoveSelection {
                source,
                dest_x,
                dest_y,
                pixels,
            } => {
                bitmap.clear_rect(*source);
                bitmap.paste(pixels, *dest_x as i64, *dest_y as i64);
            }
            Command::CommitText {
                anchor,
                text,
                font,
                color,
            } => {
                let face = match fonts.resolve(&font.family) {
                    Ok(face) => face,
                    Err(err) => {
                        log::warn!("Dropping text commit: {err}");
                        return false;
                    }
                };
                raster::draw_text(bitmap, face, font.size, *anchor, text, color.to_srgba_unmultiplied());
            }
            Command::ClearRect(rect) => bitmap.clear_rect(*rect),
        }
        log::debug!("Executed {}", self.name());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::WHITE;
    use egui::pos2;
    use image::Rgba;

    #[test]
    fn test_empty_text_is_noop() {
        let mut bitmap = Bitmap::new(50, 50, WHITE).unwrap();
        let cmd = Command::CommitText {
            anchor: pos2(5.0, 5.0),
            text: String::new(),
            font: FontSpec::default(),
            color: Color32::BLACK,
        };
        assert!(!cmd.execute(&mut bitmap, &FontBook::new()));
        assert_eq!(bitmap.count_differing(bitmap.bounds(), WHITE), 0);
    }

    #[test]
    fn test_text_stays_inside_glyph_bounds() {
        let fonts = FontBook::new();
        let mut bitmap = Bitmap::new(120, 60, WHITE).unwrap();
        let font = FontSpec::default();
        let anchor = pos2(10.0, 8.0);
        let cmd = Command::CommitText {
            anchor,
            text: "Hi".to_owned(),
            font: font.clone(),
            color: Color32::BLACK,
        };
        assert!(cmd.execute(&mut bitmap, &fonts));

        let face = fonts.resolve(&font.family).unwrap();
        let bounds = raster::text_bounds(face, font.size, anchor, "Hi", 120, 60).unwrap();
        let inside = bitmap.count_differing(bounds, WHITE);
        let total = bitmap.count_differing(bitmap.bounds(), WHITE);
        assert!(inside > 0);
        assert_eq!(inside, total);
    }

    #[test]
    fn test_move_to_same_place_is_noop() {
        let mut bitmap = Bitmap::new(10, 10, WHITE).unwrap();
        bitmap.fill_rect(PixelRect::new(2, 2, 2, 2), Rgba([0, 0, 0, 255]));
        let before = bitmap.clone();
        let source = PixelRect::new(2, 2, 2, 2);
        let cmd = Command::MoveSelection {
            source,
            dest_x: 2,
            dest_y: 2,
            pixels: bitmap.copy_rect(source),
        };
        assert!(!cmd.execute(&mut bitmap, &FontBook::new()));
        assert_eq!(bitmap, before);
    }

    #[test]
    fn test_overlapping_move_keeps_block_intact() {
        let mut bitmap = Bitmap::new(10, 10, WHITE).unwrap();
        let red = Rgba([255, 0, 0, 255]);
        let source = PixelRect::new(2, 2, 4, 4);
        bitmap.fill_rect(source, red);
        let cmd = Command::MoveSelection {
            source,
            dest_x: 4,
            dest_y: 4,
            pixels: bitmap.copy_rect(source),
        };
        assert!(cmd.execute(&mut bitmap, &FontBook::new()));
        assert_eq!(bitmap.count_differing(PixelRect::new(4, 4, 4, 4), red), 0);
        assert_eq!(bitmap.pixel(2, 2), Some(WHITE));
        assert_eq!(bitmap.count_differing(bitmap.bounds(), WHITE), 16);
    }
}
