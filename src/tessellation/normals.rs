use crate::math::{Point3, Vector3, TOLERANCE};

/// Recomputes per-vertex normals from positions and triangle indices.
///
/// Each triangle contributes its area-weighted face normal to its three
/// vertices; the sums are then normalized. Vertices not referenced by any
/// non-degenerate triangle get a zero normal.
#[must_use]
pub fn compute_normals(positions: &[Point3], indices: &[[u32; 3]]) -> Vec<Vector3> {
    let mut normals = vec![Vector3::zeros(); positions.len()];

    for tri in indices {
        let [a, b, c] = tri.map(|i| i as usize);
        let (Some(pa), Some(pb), Some(pc)) = (positions.get(a), positions.get(b), positions.get(c))
        else {
            continue;
        };
        let face = (pb - pa).cross(&(pc - pa));
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }

    for n in &mut normals {
        let len = n.norm();
        *n = if len < TOLERANCE { Vector3::zeros() } else { *n / len };
    }

    normals
}
