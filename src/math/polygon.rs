use super::{up, Point2, Point3, Vector3, TOLERANCE};

/// Computes the unit normal of a closed polygon using Newell's method.
///
/// Returns `None` for degenerate (collinear or repeated) boundaries.
#[must_use]
pub fn newell_normal(points: &[Point3]) -> Option<Vector3> {
    let n = points.len();
    let mut normal = Vector3::zeros();
    for i in 0..n {
        let curr = &points[i];
        let next = &points[(i + 1) % n];
        normal.x += (curr.y - next.y) * (curr.z + next.z);
        normal.y += (curr.z - next.z) * (curr.x + next.x);
        normal.z += (curr.x - next.x) * (curr.y + next.y);
    }
    let len = normal.norm();
    if len < TOLERANCE {
        return None;
    }
    Some(normal / len)
}

/// An orthonormal frame on the plane of a flat boundary.
///
/// `u × v == normal`, so a loop that is counterclockwise in `(u, v)` winds
/// counterclockwise around `normal`.
#[derive(Debug, Clone, Copy)]
pub struct PlaneFrame {
    origin: Point3,
    u_dir: Vector3,
    v_dir: Vector3,
    normal: Vector3,
}

impl PlaneFrame {
    /// Builds the frame of a boundary, with the normal turned to face the
    /// world up axis whenever the plane is not vertical.
    #[must_use]
    pub fn from_boundary(points: &[Point3]) -> Option<Self> {
        let mut normal = newell_normal(points)?;
        if normal.dot(&up()) < -TOLERANCE {
            normal = -normal;
        }

        // Any axis not parallel to the normal seeds the in-plane direction.
        let seed = if normal.x.abs() < 0.9 {
            Vector3::x()
        } else {
            Vector3::z()
        };
        let u_dir = (seed - normal * seed.dot(&normal)).normalize();
        let v_dir = normal.cross(&u_dir);

        Some(Self {
            origin: points[0],
            u_dir,
            v_dir,
            normal,
        })
    }

    /// The unit plane normal.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Projects a point onto the plane's `(u, v)` coordinates.
    #[must_use]
    pub fn project(&self, point: &Point3) -> Point2 {
        let d = point - self.origin;
        Point2::new(d.dot(&self.u_dir), d.dot(&self.v_dir))
    }

    /// Signed area of a boundary in `(u, v)`; positive when counterclockwise.
    #[must_use]
    pub fn signed_area(&self, points: &[Point3]) -> f64 {
        let uv: Vec<Point2> = points.iter().map(|p| self.project(p)).collect();
        let n = uv.len();
        let mut twice = 0.0;
        for i in 0..n {
            let a = uv[i];
            let b = uv[(i + 1) % n];
            twice += a.x * b.y - b.x * a.y;
        }
        twice / 2.0
    }
}
