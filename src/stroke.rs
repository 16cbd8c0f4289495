use egui::{Color32, Pos2};

// Finished stroke, ready to be rasterized
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    points: Vec<Pos2>,
    color: Color32,
    thickness: f32,
}

// Stroke still being drawn
#[derive(Debug, Clone, PartialEq)]
pub struct PendingStroke {
    points: Vec<Pos2>,
    color: Color32,
    thickness: f32,
}

impl Stroke {
    pub fn new(color: Color32, thickness: f32, points: Vec<Pos2>) -> Self {
        Self {
            points,
            color,
            thickness,
        }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl PendingStroke {
    // Start a stroke at the press position
    pub fn new(start: Pos2, color: Color32, thickness: f32) -> Self {
        Self {
            points: vec![start],
            color,
            thickness,
        }
    }

    /// Appends a point unless it repeats the last one.
    pub fn add_point(&mut self, point: Pos2) -> bool {
        if self.points.last() == Some(&point) {
            return false;
        }
        self.points.push(point);
        true
    }

    pub fn into_stroke(self) -> Stroke {
        Stroke::new(self.color, self.thickness, self.points)
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }
}
