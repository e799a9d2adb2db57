use crate::config::Color;
use crate::math::{Point3, Vector3};

slotmap::new_key_type! {
    /// Unique identifier for a marker in the scene.
    pub struct MarkerId;
}

/// Geometry of a drawing aid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarkerShape {
    /// A small sphere centered on the marker position.
    Sphere { diameter: f64 },
    /// A line from the marker position to `end`.
    Line { end: Point3 },
}

/// A visible drawing aid: sketch points, sketch segments and drag handles.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerData {
    /// Sphere center, or line start.
    pub position: Point3,
    /// Marker geometry.
    pub shape: MarkerShape,
    /// Material color.
    pub color: Color,
}

impl MarkerData {
    /// Creates a sphere marker.
    #[must_use]
    pub fn sphere(position: Point3, diameter: f64, color: Color) -> Self {
        Self {
            position,
            shape: MarkerShape::Sphere { diameter },
            color,
        }
    }

    /// Creates a line marker.
    #[must_use]
    pub fn line(start: Point3, end: Point3, color: Color) -> Self {
        Self {
            position: start,
            shape: MarkerShape::Line { end },
            color,
        }
    }

    /// Moves the whole marker.
    pub fn translate(&mut self, delta: &Vector3) {
        self.position += delta;
        if let MarkerShape::Line { end } = &mut self.shape {
            *end += delta;
        }
    }
}
