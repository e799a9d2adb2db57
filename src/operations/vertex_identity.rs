use std::collections::HashSet;

use crate::math::Point3;

/// Extracts the distinct positions of a raw position buffer, in first
/// occurrence order.
///
/// Positions are compared exactly; `-0.0` and `0.0` are the same coordinate.
#[must_use]
pub fn canonical_vertices(positions: &[Point3]) -> Vec<Point3> {
    let mut seen = HashSet::with_capacity(positions.len());
    positions
        .iter()
        .filter(|p| seen.insert(position_key(p)))
        .copied()
        .collect()
}

/// Like [`canonical_vertices`], for a flat `[x, y, z, x, y, z, ...]` buffer.
///
/// Trailing components that do not form a full triple are ignored.
#[must_use]
pub fn canonical_vertices_from_flat(components: &[f64]) -> Vec<Point3> {
    let points: Vec<Point3> = components
        .chunks_exact(3)
        .map(|c| Point3::new(c[0], c[1], c[2]))
        .collect();
    canonical_vertices(&points)
}

fn position_key(p: &Point3) -> [u64; 3] {
    // Adding zero folds -0.0 into 0.0.
    [p.x, p.y, p.z].map(|c| (c + 0.0).to_bits())
}
