use super::Point3;

/// Compares two points coordinate-wise after rounding each axis to
/// `decimals` decimal places.
///
/// Drag handles and the mesh vertices they drive accumulate the same deltas
/// through different paths, so their bit patterns can drift apart. Matching
/// on rounded coordinates keeps them paired.
#[must_use]
pub fn matches_at_precision(a: &Point3, b: &Point3, decimals: u32) -> bool {
    let scale = 10f64.powi(i32::try_from(decimals).unwrap_or(i32::MAX));
    a.coords
        .iter()
        .zip(b.coords.iter())
        .all(|(x, y)| (x * scale).round() == (y * scale).round())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_points_match() {
        let a = Point3::new(1.0, -2.5, 0.125);
        assert!(matches_at_precision(&a, &a, 2));
    }

    #[test]
    fn drift_below_precision_matches() {
        let a = Point3::new(0.1 + 0.2, 1.0, 0.0);
        let b = Point3::new(0.3, 1.000_000_1, 0.0);
        assert!(matches_at_precision(&a, &b, 2));
    }

    #[test]
    fn difference_at_precision_does_not_match() {
        let a = Point3::new(1.0, 1.0, 1.0);
        let b = Point3::new(1.0, 1.02, 1.0);
        assert!(!matches_at_precision(&a, &b, 2));
        assert!(matches_at_precision(&a, &b, 1));
    }
}
