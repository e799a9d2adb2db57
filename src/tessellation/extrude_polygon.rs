use crate::error::{Result, TessellationError};
use crate::math::{Point3, TOLERANCE};

use super::tessellate_polygon::{plane_frame, triangulate_cap};
use super::{compute_normals, MeshBuffers};

/// Builds a closed prism over a flat boundary.
///
/// The top cap lies on the boundary plane and the body extends `depth` along
/// the negated plane normal, so lifting the result by `depth` puts the base
/// back on the original plane.
pub struct ExtrudePolygon<'a> {
    boundary: &'a [Point3],
    depth: f64,
}

impl<'a> ExtrudePolygon<'a> {
    /// Creates a new `ExtrudePolygon` operation.
    #[must_use]
    pub fn new(boundary: &'a [Point3], depth: f64) -> Self {
        Self { boundary, depth }
    }

    /// Executes the extrusion.
    ///
    /// # Errors
    ///
    /// Returns an error if the depth is not positive or the boundary cannot be
    /// triangulated.
    #[allow(clippy::cast_possible_truncation)]
    pub fn execute(&self) -> Result<MeshBuffers> {
        if self.depth.is_nan() || self.depth <= TOLERANCE {
            return Err(
                TessellationError::Degenerate("extrusion depth must be positive".into()).into(),
            );
        }

        let frame = plane_frame(self.boundary)?;
        let normal = *frame.normal();
        let cap = triangulate_cap(self.boundary, &frame)?;

        // Walk the rim counterclockwise around the normal so side quads face outward.
        let rim = if frame.signed_area(&cap.points) >= 0.0 {
            cap.points.clone()
        } else {
            cap.points.iter().rev().copied().collect()
        };
        let offset = -normal * self.depth;

        let mut mesh = MeshBuffers::default();

        // Top cap: triangles already wind around +normal.
        mesh.positions.extend_from_slice(&cap.points);
        mesh.indices.extend_from_slice(&cap.triangles);

        // Bottom cap: same triangles, reversed, shifted down.
        let base = mesh.positions.len() as u32;
        mesh.positions.extend(cap.points.iter().map(|p| p + offset));
        mesh.indices.extend(
            cap.triangles
                .iter()
                .map(|t| [t[0] + base, t[2] + base, t[1] + base]),
        );

        // Side walls: one flat quad per rim edge, with its own vertices.
        let n = rim.len();
        for i in 0..n {
            let j = (i + 1) % n;
            let base = mesh.positions.len() as u32;
            mesh.positions.extend([rim[i], rim[j], rim[j] + offset, rim[i] + offset]);
            mesh.indices.push([base, base + 3, base + 2]);
            mesh.indices.push([base, base + 2, base + 1]);
        }

        mesh.normals = compute_normals(&mesh.positions, &mesh.indices);
        Ok(mesh)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector3;
    use crate::operations::canonical_vertices;
    use approx::assert_relative_eq;

    fn g(x: f64, z: f64) -> Point3 {
        Point3::new(x, 0.0, z)
    }

    /// Extent of a set of positions along a direction.
    fn extent_along(positions: &[Point3], dir: &Vector3) -> f64 {
        let (lo, hi) = positions
            .iter()
            .map(|p| p.coords.dot(dir))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), d| {
                (lo.min(d), hi.max(d))
            });
        hi - lo
    }

    #[test]
    fn triangle_prism_has_8_triangles() {
        let mesh = ExtrudePolygon::new(&[g(0.0, 0.0), g(3.0, 0.0), g(1.5, 2.0)], 3.0)
            .execute()
            .unwrap();
        // 2 caps + 3 walls × 2
        assert_eq!(mesh.indices.len(), 8);
        assert_eq!(canonical_vertices(&mesh.positions).len(), 6);
    }

    #[test]
    fn prism_hangs_below_the_boundary_plane() {
        let mesh = ExtrudePolygon::new(&[g(0.0, 0.0), g(2.0, 0.0), g(2.0, 2.0), g(0.0, 2.0)], 1.5)
            .execute()
            .unwrap();
        assert_relative_eq!(extent_along(&mesh.positions, &Vector3::y()), 1.5);
        let top = mesh.positions.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        assert_relative_eq!(top, 0.0);
    }

    #[test]
    fn all_triangles_face_outward() {
        let boundary = [g(0.0, 0.0), g(4.0, 0.0), g(5.0, 2.0), g(2.0, 4.0), g(-1.0, 2.0)];
        for winding in [boundary.to_vec(), boundary.iter().rev().copied().collect()] {
            let mesh = ExtrudePolygon::new(&winding, 2.0).execute().unwrap();
            // Every triangle's plane must have the whole solid on its inner side.
            for tri in &mesh.indices {
                let [a, b, c] = tri.map(|i| mesh.positions[i as usize]);
                let face = (b - a).cross(&(c - a));
                for p in &mesh.positions {
                    assert!(face.dot(&(p - a)) <= 1e-9, "triangle {tri:?} faces inward");
                }
            }
        }
    }

    #[test]
    fn zero_depth_is_rejected() {
        let result = ExtrudePolygon::new(&[g(0.0, 0.0), g(1.0, 0.0), g(0.0, 1.0)], 0.0).execute();
        assert!(result.is_err());
    }
}
