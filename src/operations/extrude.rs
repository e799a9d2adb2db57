use tracing::info;

use crate::config::Color;
use crate::error::{Result, TessellationError};
use crate::math::PlaneFrame;
use crate::scene::{MeshData, MeshId, Scene};
use crate::tessellation::MeshFactory;

use super::canonical_vertices;

/// Replaces a flat polygon mesh with a prism solid of the given depth.
pub struct Extrude {
    polygon: MeshId,
    depth: f64,
    color: Option<Color>,
}

impl Extrude {
    /// Creates a new `Extrude` operation.
    #[must_use]
    pub fn new(polygon: MeshId, depth: f64) -> Self {
        Self {
            polygon,
            depth,
            color: None,
        }
    }

    /// Sets the material color of the produced solid.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Executes the extrusion, disposing the polygon and returning the solid.
    ///
    /// The boundary is recovered from the polygon's position buffer. The
    /// factory builds the prism hanging below the boundary plane; the solid
    /// node is then raised by `depth` along the plane normal so its base sits
    /// where the polygon was.
    ///
    /// # Errors
    ///
    /// Returns an error if the polygon is not in the scene or the factory
    /// cannot build the prism. The scene is left untouched on error.
    pub fn execute<F: MeshFactory + ?Sized>(&self, scene: &mut Scene, factory: &F) -> Result<MeshId> {
        let boundary = canonical_vertices(scene.mesh(self.polygon)?.positions());
        let frame = PlaneFrame::from_boundary(&boundary).ok_or_else(|| {
            TessellationError::Degenerate("polygon has no enclosed area".into())
        })?;
        let buffers = factory.extrude_polygon(&boundary, self.depth)?;

        let mut solid = MeshData::new(shape_name(&boundary), buffers);
        if let Some(color) = self.color {
            solid = solid.with_color(color);
        }
        solid.translate_node(&(frame.normal() * self.depth));

        scene.remove_mesh(self.polygon)?;
        let id = scene.add_mesh(solid);
        info!(polygon = ?self.polygon, solid = ?id, boundary = boundary.len(), depth = self.depth, "extruded polygon");
        Ok(id)
    }
}

/// Names a shape after its first boundary point.
pub(crate) fn shape_name(boundary: &[crate::math::Point3]) -> String {
    match boundary.first() {
        Some(p) => format!("shape({}, {}, {})", p.x, p.y, p.z),
        None => "shape".into(),
    }
}
