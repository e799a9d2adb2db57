mod polygon;
mod precision;

pub use polygon::{newell_normal, PlaneFrame};
pub use precision::matches_at_precision;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// The world up axis. The ground plane is the XZ plane through the origin.
#[must_use]
pub fn up() -> Vector3 {
    Vector3::y()
}
