use egui::{Pos2, Rect, pos2};

/// An integer rectangle in bitmap pixel space.
///
/// Covers the half-open pixel range `[x, x + width) × [y, y + height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Converts a canvas rectangle into pixel space, rounding the corners to
    /// whole pixels and clipping to a `bounds_w × bounds_h` bitmap.
    pub fn from_rect(rect: Rect, bounds_w: u32, bounds_h: u32) -> Self {
        let clip = |v: f32, max: u32| -> u32 {
            if v.is_nan() {
                0
            } else {
                (v.round().max(0.0) as u32).min(max)
            }
        };
        let x0 = clip(rect.min.x, bounds_w);
        let y0 = clip(rect.min.y, bounds_h);
        let x1 = clip(rect.max.x, bounds_w).max(x0);
        let y1 = clip(rect.max.y, bounds_h).max(y0);
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn to_rect(self) -> Rect {
        Rect::from_min_max(
            pos2(self.x as f32, self.y as f32),
            pos2(self.right() as f32, self.bottom() as f32),
        )
    }
}

/// Clamps a point into `[0, width] × [0, height]`.
pub fn clamp_to_bounds(pos: Pos2, width: u32, height: u32) -> Pos2 {
    let fix = |v: f32| if v.is_finite() { v } else { 0.0 };
    pos2(
        fix(pos.x).clamp(0.0, width as f32),
        fix(pos.y).clamp(0.0, height as f32),
    )
}

/// Rounds a point to the nearest pixel corner.
pub fn snap_to_pixel(pos: Pos2) -> Pos2 {
    pos2(pos.x.round(), pos.y.round())
}

/// Half-open containment: a point on the max edge is outside.
pub fn rect_contains(rect: Rect, pos: Pos2) -> bool {
    pos.x >= rect.min.x && pos.x < rect.max.x && pos.y >= rect.min.y && pos.y < rect.max.y
}

/// Euclidean distance from `p` to the segment `a..b`.
pub fn distance_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}
