mod marker;
mod mesh;

pub use marker::{MarkerData, MarkerId, MarkerShape};
pub use mesh::{EdgeHighlight, MeshData, MeshId};

use crate::error::SceneError;
use slotmap::SlotMap;

/// Central arena that owns every mesh and marker on screen.
///
/// Everything else refers to scene entities through typed IDs (generational
/// indices), so a disposed entity can never be reached through a stale ID.
#[derive(Debug)]
pub struct Scene {
    meshes: SlotMap<MeshId, MeshData>,
    markers: SlotMap<MarkerId, MarkerData>,
    ground_pickable: bool,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            meshes: SlotMap::with_key(),
            markers: SlotMap::with_key(),
            ground_pickable: true,
        }
    }
}

impl Scene {
    /// Creates a new, empty scene with a pickable ground.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Ground ---

    /// Whether pointer picks can land on the ground plane.
    #[must_use]
    pub fn is_ground_pickable(&self) -> bool {
        self.ground_pickable
    }

    /// Sets whether pointer picks can land on the ground plane.
    pub fn set_ground_pickable(&mut self, pickable: bool) {
        self.ground_pickable = pickable;
    }

    // --- Mesh operations ---

    /// Inserts a mesh and returns its ID.
    pub fn add_mesh(&mut self, data: MeshData) -> MeshId {
        self.meshes.insert(data)
    }

    /// Returns a reference to the mesh data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the scene.
    pub fn mesh(&self, id: MeshId) -> Result<&MeshData, SceneError> {
        self.meshes
            .get(id)
            .ok_or_else(|| SceneError::EntityNotFound("mesh".into()))
    }

    /// Returns a mutable reference to the mesh data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the scene.
    pub fn mesh_mut(&mut self, id: MeshId) -> Result<&mut MeshData, SceneError> {
        self.meshes
            .get_mut(id)
            .ok_or_else(|| SceneError::EntityNotFound("mesh".into()))
    }

    /// Disposes a mesh, returning its data.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the scene.
    pub fn remove_mesh(&mut self, id: MeshId) -> Result<MeshData, SceneError> {
        self.meshes
            .remove(id)
            .ok_or_else(|| SceneError::EntityNotFound("mesh".into()))
    }

    /// Whether the mesh is still in the scene.
    #[must_use]
    pub fn contains_mesh(&self, id: MeshId) -> bool {
        self.meshes.contains_key(id)
    }

    /// Iterates over all meshes.
    pub fn meshes(&self) -> impl Iterator<Item = (MeshId, &MeshData)> {
        self.meshes.iter()
    }

    /// Number of meshes in the scene.
    #[must_use]
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    // --- Marker operations ---

    /// Inserts a marker and returns its ID.
    pub fn add_marker(&mut self, data: MarkerData) -> MarkerId {
        self.markers.insert(data)
    }

    /// Returns a reference to the marker data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the scene.
    pub fn marker(&self, id: MarkerId) -> Result<&MarkerData, SceneError> {
        self.markers
            .get(id)
            .ok_or_else(|| SceneError::EntityNotFound("marker".into()))
    }

    /// Returns a mutable reference to the marker data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the scene.
    pub fn marker_mut(&mut self, id: MarkerId) -> Result<&mut MarkerData, SceneError> {
        self.markers
            .get_mut(id)
            .ok_or_else(|| SceneError::EntityNotFound("marker".into()))
    }

    /// Disposes a marker, returning its data.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the scene.
    pub fn remove_marker(&mut self, id: MarkerId) -> Result<MarkerData, SceneError> {
        self.markers
            .remove(id)
            .ok_or_else(|| SceneError::EntityNotFound("marker".into()))
    }

    /// Iterates over all markers.
    pub fn markers(&self) -> impl Iterator<Item = (MarkerId, &MarkerData)> {
        self.markers.iter()
    }

    /// Number of markers in the scene.
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point3, Vector3};
    use crate::tessellation::MeshBuffers;

    #[test]
    fn removed_mesh_id_is_stale() {
        let mut scene = Scene::new();
        let id = scene.add_mesh(MeshData::new("a", MeshBuffers::default()));
        scene.remove_mesh(id).unwrap();
        assert!(scene.mesh(id).is_err());
        assert!(!scene.contains_mesh(id));
        // A new mesh never reuses the stale ID.
        let other = scene.add_mesh(MeshData::new("b", MeshBuffers::default()));
        assert_ne!(id, other);
        assert!(scene.mesh(id).is_err());
    }

    #[test]
    fn line_marker_translates_both_ends() {
        let mut scene = Scene::new();
        let id = scene.add_marker(MarkerData::line(
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            [0.0; 4],
        ));
        scene.marker_mut(id).unwrap().translate(&Vector3::new(0.0, 2.0, 0.0));
        let marker = scene.marker(id).unwrap();
        assert_eq!(marker.position, Point3::new(0.0, 2.0, 0.0));
        assert_eq!(
            marker.shape,
            MarkerShape::Line {
                end: Point3::new(1.0, 2.0, 0.0)
            }
        );
    }

    #[test]
    fn world_point_applies_node_translation() {
        let mut mesh = MeshData::new("a", MeshBuffers::default());
        mesh.translate_node(&Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(
            mesh.world_point(&Point3::new(1.0, 0.0, 0.0)),
            Point3::new(1.0, 1.0, 0.0)
        );
    }
}
