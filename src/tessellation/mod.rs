mod extrude_polygon;
mod normals;
mod tessellate_polygon;

pub use extrude_polygon::ExtrudePolygon;
pub use normals::compute_normals;
pub use tessellate_polygon::TessellatePolygon;

use crate::error::Result;
use crate::math::{Point3, Vector3};

/// Raw render buffers of a triangle mesh.
///
/// Positions are not shared between unrelated faces, so the same point may
/// appear several times.
#[derive(Debug, Clone, Default)]
pub struct MeshBuffers {
    /// Vertex positions.
    pub positions: Vec<Point3>,
    /// Vertex normals, one per position.
    pub normals: Vec<Vector3>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

/// Builds renderable meshes from polygon boundaries.
///
/// The editor treats this as an opaque collaborator: it hands over an ordered
/// boundary and receives populated buffers.
pub trait MeshFactory {
    /// Triangulates a flat, closed boundary.
    ///
    /// # Errors
    ///
    /// Returns an error if the boundary cannot be triangulated.
    fn polygon(&self, boundary: &[Point3]) -> Result<MeshBuffers>;

    /// Builds a prism of height `depth` whose top cap lies on the boundary's
    /// plane and whose body extends against the plane normal.
    ///
    /// # Errors
    ///
    /// Returns an error if the boundary cannot be triangulated.
    fn extrude_polygon(&self, boundary: &[Point3], depth: f64) -> Result<MeshBuffers>;
}

/// Default [`MeshFactory`] backed by a constrained Delaunay triangulation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CdtMeshFactory;

impl MeshFactory for CdtMeshFactory {
    fn polygon(&self, boundary: &[Point3]) -> Result<MeshBuffers> {
        TessellatePolygon::new(boundary).execute()
    }

    fn extrude_polygon(&self, boundary: &[Point3], depth: f64) -> Result<MeshBuffers> {
        ExtrudePolygon::new(boundary, depth).execute()
    }
}
