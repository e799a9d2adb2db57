use crate::config::Color;
use crate::math::{Point3, Vector3};
use crate::tessellation::MeshBuffers;

slotmap::new_key_type! {
    /// Unique identifier for a mesh in the scene.
    pub struct MeshId;
}

/// Outline overlay drawn along a mesh's edges to mark it as selected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeHighlight {
    /// Line width of the overlay.
    pub width: f32,
    /// Line color of the overlay.
    pub color: Color,
}

/// Render-side state of a mesh: its buffers plus the node attributes the
/// editor toggles.
#[derive(Debug, Clone)]
pub struct MeshData {
    name: String,
    buffers: MeshBuffers,
    translation: Vector3,
    edges: Option<EdgeHighlight>,
    pickable: bool,
    color: Option<Color>,
}

impl MeshData {
    /// Creates a pickable, unhighlighted mesh at the origin.
    #[must_use]
    pub fn new(name: impl Into<String>, buffers: MeshBuffers) -> Self {
        Self {
            name: name.into(),
            buffers,
            translation: Vector3::zeros(),
            edges: None,
            pickable: true,
            color: None,
        }
    }

    /// Sets the material color.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// The mesh name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The material color, if any.
    #[must_use]
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// The local-space position buffer.
    #[must_use]
    pub fn positions(&self) -> &[Point3] {
        &self.buffers.positions
    }

    /// The normal buffer.
    #[must_use]
    pub fn normals(&self) -> &[Vector3] {
        &self.buffers.normals
    }

    /// The triangle index buffer.
    #[must_use]
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.buffers.indices
    }

    /// Replaces the position and normal buffers together.
    pub fn commit(&mut self, positions: Vec<Point3>, normals: Vec<Vector3>) {
        debug_assert_eq!(positions.len(), normals.len());
        self.buffers.positions = positions;
        self.buffers.normals = normals;
    }

    /// The node translation applied on top of the local positions.
    #[must_use]
    pub fn translation(&self) -> &Vector3 {
        &self.translation
    }

    /// Moves the node without touching the vertex buffers.
    pub fn translate_node(&mut self, delta: &Vector3) {
        self.translation += delta;
    }

    /// Maps a local-space position to world space.
    #[must_use]
    pub fn world_point(&self, local: &Point3) -> Point3 {
        local + self.translation
    }

    /// All positions in world space.
    #[must_use]
    pub fn world_positions(&self) -> Vec<Point3> {
        self.positions().iter().map(|p| self.world_point(p)).collect()
    }

    /// Turns the edge highlight on.
    pub fn enable_edges(&mut self, width: f32, color: Color) {
        self.edges = Some(EdgeHighlight { width, color });
    }

    /// Turns the edge highlight off.
    pub fn disable_edges(&mut self) {
        self.edges = None;
    }

    /// The current edge highlight, if enabled.
    #[must_use]
    pub fn edges(&self) -> Option<&EdgeHighlight> {
        self.edges.as_ref()
    }

    /// Whether pointer picks can land on this mesh.
    #[must_use]
    pub fn is_pickable(&self) -> bool {
        self.pickable
    }

    /// Sets whether pointer picks can land on this mesh.
    pub fn set_pickable(&mut self, pickable: bool) {
        self.pickable = pickable;
    }
}
