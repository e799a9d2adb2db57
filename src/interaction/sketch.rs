use crate::math::Point3;

/// A closed sketch, ready to be triangulated.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    boundary: Vec<Point3>,
}

impl Polygon {
    /// The boundary points in the order they were drawn.
    #[must_use]
    pub fn boundary(&self) -> &[Point3] {
        &self.boundary
    }
}

/// The shape being sketched: ordered points plus the segments joining
/// consecutive points.
///
/// `segments.len() == points.len().saturating_sub(1)` always holds.
#[derive(Debug, Clone, Default)]
pub struct ShapeBuilder {
    points: Vec<Point3>,
    segments: Vec<(usize, usize)>,
}

impl ShapeBuilder {
    /// Creates an empty sketch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a point, returning the segment that now joins it to the
    /// previous point.
    pub fn add_point(&mut self, point: Point3) -> Option<(usize, usize)> {
        self.points.push(point);
        let n = self.points.len();
        let segment = (n > 1).then(|| (n - 2, n - 1));
        if let Some(segment) = segment {
            self.segments.push(segment);
        }
        debug_assert_eq!(self.segments.len(), n - 1);
        segment
    }

    /// Closes the sketch into a polygon.
    ///
    /// With fewer than three points nothing happens and `None` is returned.
    /// Otherwise the sketch is emptied.
    pub fn close(&mut self) -> Option<Polygon> {
        if self.points.len() < 3 {
            return None;
        }
        self.segments.clear();
        Some(Polygon {
            boundary: std::mem::take(&mut self.points),
        })
    }

    /// Discards the sketch. Returns whether there was anything to discard.
    pub fn reset(&mut self) -> bool {
        let had_points = !self.points.is_empty();
        self.points.clear();
        self.segments.clear();
        had_points
    }

    /// The points drawn so far.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Index pairs of the segments drawn so far.
    #[must_use]
    pub fn segments(&self) -> &[(usize, usize)] {
        &self.segments
    }

    /// Whether no point has been drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
