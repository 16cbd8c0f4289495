//! Pixel-level drawing primitives used by commits and by the live overlay.

use ab_glyph::{point, Font, FontArc, Glyph, PxScale, ScaleFont};
use egui::{Pos2, pos2};
use image::Rgba;

use crate::bitmap::Bitmap;
use crate::geometry::{distance_to_segment, PixelRect};

/// Source-over blend of a straight-alpha color onto a straight-alpha pixel.
pub fn blend(dst: Rgba<u8>, src: [u8; 4], coverage: f32) -> Rgba<u8> {
    let sa = (src[3] as f32 / 255.0) * coverage.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return dst;
    }
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let mix = |s: u8, d: u8| -> u8 {
        let v = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };
    Rgba([
        mix(src[0], dst[0]),
        mix(src[1], dst[1]),
        mix(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}

/// Draws connected segments through `points` with round caps and joins.
///
/// A single point renders as a filled dot. Coverage is accumulated per
/// stroke with `max` and blended once, so overlapping segments at a joint
/// do not darken it.
pub fn stroke_polyline(bitmap: &mut Bitmap, points: &[Pos2], color: [u8; 4], width: f32) {
    let Some(first) = points.first() else {
        return;
    };
    let radius = (width * 0.5).max(0.5);
    let reach = radius + 1.0;

    let (mut min, mut max) = (*first, *first);
    for p in points {
        min = min.min(*p);
        max = max.max(*p);
    }
    let x0 = ((min.x - reach).floor() as i64).max(0);
    let y0 = ((min.y - reach).floor() as i64).max(0);
    let x1 = ((max.x + reach).ceil() as i64).min(bitmap.width() as i64);
    let y1 = ((max.y + reach).ceil() as i64).min(bitmap.height() as i64);
    if x1 <= x0 || y1 <= y0 {
        return;
    }
    let buf_w = (x1 - x0) as usize;
    let mut coverage = vec![0.0f32; buf_w * (y1 - y0) as usize];

    let segments: Vec<(Pos2, Pos2)> = if points.len() == 1 {
        vec![(*first, *first)]
    } else {
        points.windows(2).map(|w| (w[0], w[1])).collect()
    };

    for (a, b) in segments {
        let sx0 = ((a.x.min(b.x) - reach).floor() as i64).max(x0);
        let sy0 = ((a.y.min(b.y) - reach).floor() as i64).max(y0);
        let sx1 = ((a.x.max(b.x) + reach).ceil() as i64).min(x1);
        let sy1 = ((a.y.max(b.y) + reach).ceil() as i64).min(y1);
        for y in sy0..sy1 {
            for x in sx0..sx1 {
                let center = pos2(x as f32 + 0.5, y as f32 + 0.5);
                let cov = (radius + 0.5 - distance_to_segment(center, a, b)).clamp(0.0, 1.0);
                if cov > 0.0 {
                    let idx = (y - y0) as usize * buf_w + (x - x0) as usize;
                    coverage[idx] = coverage[idx].max(cov);
                }
            }
        }
    }

    for (idx, cov) in coverage.into_iter().enumerate() {
        if cov > 0.0 {
            let x = x0 + (idx % buf_w) as i64;
            let y = y0 + (idx / buf_w) as i64;
            bitmap.blend_pixel(x, y, color, cov);
        }
    }
}

/// Draws a one pixel dashed outline just inside `rect` (marching-ants style).
pub fn dashed_outline(bitmap: &mut Bitmap, rect: PixelRect) {
    const DASH: u32 = 4;
    const DARK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const LIGHT: Rgba<u8> = Rgba([255, 255, 255, 255]);
    if rect.is_empty() {
        return;
    }
    let pick = |i: u32| if (i / DASH) % 2 == 0 { DARK } else { LIGHT };
    let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);
    for x in rect.x..rect.right() {
        bitmap.put_pixel(x, rect.y, pick(x - rect.x));
        bitmap.put_pixel(x, bottom, pick(x - rect.x));
    }
    for y in rect.y..rect.bottom() {
        bitmap.put_pixel(rect.x, y, pick(y - rect.y));
        bitmap.put_pixel(right, y, pick(y - rect.y));
    }
}

/// Lays out `text` with its first line's top-left corner at `anchor`.
/// `'\n'` starts a new line.
fn layout_glyphs(font: &FontArc, size: f32, anchor: Pos2, text: &str) -> Vec<Glyph> {
    let scale = PxScale::from(size);
    let scaled = font.as_scaled(scale);
    let line_height = scaled.height() + scaled.line_gap();
    let mut glyphs = Vec::new();

    for (line_idx, line) in text.split('\n').enumerate() {
        let mut caret = point(anchor.x, anchor.y + scaled.ascent() + line_idx as f32 * line_height);
        let mut previous = None;
        for ch in line.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                caret.x += scaled.kern(prev, id);
            }
            glyphs.push(id.with_scale_and_position(scale, caret));
            caret.x += scaled.h_advance(id);
            previous = Some(id);
        }
    }
    glyphs
}

/// Rasterizes `text` into the bitmap with anti-aliased glyph coverage.
pub fn draw_text(bitmap: &mut Bitmap, font: &FontArc, size: f32, anchor: Pos2, text: &str, color: [u8; 4]) {
    for glyph in layout_glyphs(font, size, anchor, text) {
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|x, y, cov| {
                let px = bounds.min.x as i64 + x as i64;
                let py = bounds.min.y as i64 + y as i64;
                bitmap.blend_pixel(px, py, color, cov);
            });
        }
    }
}

/// Pixel bounding box of the glyphs `draw_text` would paint, clipped to
/// the bitmap. `None` when nothing would be drawn.
pub fn text_bounds(
    font: &FontArc,
    size: f32,
    anchor: Pos2,
    text: &str,
    bitmap_w: u32,
    bitmap_h: u32,
) -> Option<PixelRect> {
    let mut extent: Option<(Pos2, Pos2)> = None;
    for glyph in layout_glyphs(font, size, anchor, text) {
        if let Some(outlined) = font.outline_glyph(glyph) {
            let b = outlined.px_bounds();
            let (min, max) = (pos2(b.min.x, b.min.y), pos2(b.max.x, b.max.y));
            extent = Some(match extent {
                Some((lo, hi)) => (lo.min(min), hi.max(max)),
                None => (min, max),
            });
        }
    }
    let (min, max) = extent?;
    let rect = PixelRect::from_rect(egui::Rect::from_min_max(min, max), bitmap_w, bitmap_h);
    (!rect.is_empty()).then_some(rect)
}

/// Top of the caret after the last character and the caret height.
pub fn caret_position(font: &FontArc, size: f32, anchor: Pos2, text: &str) -> (Pos2, f32) {
    let scaled = font.as_scaled(PxScale::from(size));
    let line_height = scaled.height() + scaled.line_gap();
    let line_idx = text.matches('\n').count();
    let last_line = text.rsplit('\n').next().unwrap_or_default();

    let mut x = anchor.x;
    let mut previous = None;
    for ch in last_line.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = previous {
            x += scaled.kern(prev, id);
        }
        x += scaled.h_advance(id);
        previous = Some(id);
    }
    (pos2(x, anchor.y + line_idx as f32 * line_height), scaled.height())
}
