use slotmap::SecondaryMap;
use tracing::{debug, info};

use crate::math::{up, Point3, Vector3};
use crate::operations::canonical_vertices;
use crate::scene::{MeshId, Scene};

use super::{Command, DeformTarget, Notice};

/// Drag behavior attached to a mesh once it has been selected for moving.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragBinding {
    /// Normal of the plane drags are constrained to.
    pub plane_normal: Vector3,
    /// Bindings only respond while move mode is active.
    pub enabled: bool,
}

impl DragBinding {
    /// Removes the component of `delta` along the plane normal.
    #[must_use]
    pub fn constrain(&self, delta: &Vector3) -> Vector3 {
        delta - self.plane_normal * delta.dot(&self.plane_normal)
    }
}

/// A drag handle bound to one canonical vertex of the edited mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexHandle {
    /// Last known local-space position of the vertex this handle drives.
    pub reference: Point3,
}

#[derive(Debug, Clone)]
struct HandleSet {
    mesh: MeshId,
    handles: Vec<VertexHandle>,
}

/// Tracks the last completed polygon, the shape grabbed for move/edit, the
/// drag bindings of moved meshes, and the vertex handles of the edit session.
///
/// Holds IDs only; the meshes themselves belong to the [`Scene`].
#[derive(Debug, Clone, Default)]
pub struct Selection {
    last_polygon: Option<MeshId>,
    active: Option<MeshId>,
    bindings: SecondaryMap<MeshId, DragBinding>,
    handles: Option<HandleSet>,
}

impl Selection {
    /// The most recently closed polygon, awaiting extrusion.
    #[must_use]
    pub fn last_polygon(&self) -> Option<MeshId> {
        self.last_polygon
    }

    /// Records a freshly closed polygon.
    pub fn set_last_polygon(&mut self, polygon: MeshId) {
        self.last_polygon = Some(polygon);
    }

    /// The mesh currently grabbed for move/edit.
    #[must_use]
    pub fn active(&self) -> Option<MeshId> {
        self.active
    }

    /// The drag binding of a mesh, if it was ever selected for moving.
    #[must_use]
    pub fn binding(&self, mesh: MeshId) -> Option<&DragBinding> {
        self.bindings.get(mesh)
    }

    /// The vertex handles of the current edit session, indexed by canonical
    /// vertex index.
    #[must_use]
    pub fn handles(&self) -> &[VertexHandle] {
        self.handles
            .as_ref()
            .map(|set| set.handles.as_slice())
            .unwrap_or_default()
    }

    /// The mesh the current vertex handles belong to.
    #[must_use]
    pub fn handle_mesh(&self) -> Option<MeshId> {
        self.handles.as_ref().map(|set| set.mesh)
    }

    /// Grabs `picked` for moving: highlights it and binds a drag behavior
    /// constrained to the horizontal plane.
    pub fn select_for_move(&mut self, picked: MeshId) -> Vec<Command> {
        let mut commands = Vec::new();
        if let Some(previous) = self.active.filter(|&prev| prev != picked) {
            commands.push(Command::Highlight {
                mesh: previous,
                enabled: false,
            });
        }

        self.bindings.insert(
            picked,
            DragBinding {
                plane_normal: up(),
                enabled: true,
            },
        );
        commands.push(Command::Highlight {
            mesh: picked,
            enabled: true,
        });
        self.active = Some(picked);
        info!(mesh = ?picked, "selected for move");
        commands
    }

    /// Prepares the active mesh for vertex editing.
    ///
    /// Without an active mesh this only raises [`Notice::NoSelection`].
    /// Handles are created once per session; calling this again keeps them.
    pub fn select_for_edit(&mut self, scene: &Scene) -> Vec<Command> {
        let Some(mesh_id) = self.active else {
            return vec![Command::Notify(Notice::NoSelection)];
        };
        let Ok(mesh) = scene.mesh(mesh_id) else {
            self.forget(mesh_id);
            return vec![Command::Notify(Notice::NoSelection)];
        };

        let mut commands = vec![
            Command::Highlight {
                mesh: mesh_id,
                enabled: false,
            },
            Command::SetMeshPickable {
                mesh: mesh_id,
                pickable: false,
            },
        ];

        if self.handles.is_none() {
            let vertices = canonical_vertices(mesh.positions());
            commands.extend(vertices.iter().enumerate().map(|(index, v)| {
                Command::SpawnHandle {
                    index,
                    position: mesh.world_point(v),
                }
            }));
            info!(mesh = ?mesh_id, handles = vertices.len(), "vertex handles created");
            self.handles = Some(HandleSet {
                mesh: mesh_id,
                handles: vertices
                    .into_iter()
                    .map(|reference| VertexHandle { reference })
                    .collect(),
            });
        }
        commands
    }

    /// Ends the edit session: disposes the handles and makes the mesh
    /// pickable again.
    pub fn leave_edit(&mut self, scene: &Scene) -> Vec<Command> {
        let Some(set) = self.handles.take() else {
            return Vec::new();
        };
        let mut commands = vec![Command::ClearHandles];
        if scene.contains_mesh(set.mesh) {
            commands.push(Command::SetMeshPickable {
                mesh: set.mesh,
                pickable: true,
            });
        }
        commands
    }

    /// Releases the active mesh, turning its highlight off.
    pub fn clear_active(&mut self, scene: &Scene) -> Vec<Command> {
        match self.active.take() {
            Some(mesh) if scene.contains_mesh(mesh) => vec![Command::Highlight {
                mesh,
                enabled: false,
            }],
            _ => Vec::new(),
        }
    }

    /// Enables or disables every drag binding.
    pub fn set_bindings_enabled(&mut self, enabled: bool) {
        for (_, binding) in &mut self.bindings {
            binding.enabled = enabled;
        }
    }

    /// Turns a mesh drag into a whole-mesh deform, if the mesh has an enabled
    /// binding.
    #[must_use]
    pub fn drag_mesh(&self, mesh: MeshId, delta: &Vector3) -> Vec<Command> {
        match self.bindings.get(mesh) {
            Some(binding) if binding.enabled => vec![Command::Deform {
                target: DeformTarget::Mesh(mesh),
                delta: binding.constrain(delta),
                vertex: None,
            }],
            _ => Vec::new(),
        }
    }

    /// Turns a handle drag into a targeted deform of the mesh plus a move of
    /// the handle marker, then advances the handle's reference position.
    pub fn drag_handle(&mut self, index: usize, delta: &Vector3) -> Vec<Command> {
        let Some(set) = self.handles.as_mut() else {
            return Vec::new();
        };
        let Some(handle) = set.handles.get_mut(index) else {
            debug!(index, "drag on unknown vertex handle");
            return Vec::new();
        };
        let commands = vec![
            Command::Deform {
                target: DeformTarget::Mesh(set.mesh),
                delta: *delta,
                vertex: Some(handle.reference),
            },
            Command::Deform {
                target: DeformTarget::Handle(index),
                delta: *delta,
                vertex: None,
            },
        ];
        handle.reference += delta;
        commands
    }

    /// Records that `polygon` was extruded into `solid`, which becomes the
    /// active mesh. Any other mesh still grabbed loses its highlight.
    pub fn adopt_extrusion(&mut self, scene: &Scene, polygon: MeshId, solid: MeshId) -> Vec<Command> {
        self.forget(polygon);
        let released = self.active.replace(solid);
        match released {
            Some(mesh) if mesh != solid && scene.contains_mesh(mesh) => vec![Command::Highlight {
                mesh,
                enabled: false,
            }],
            _ => Vec::new(),
        }
    }

    /// Drops every reference to a disposed mesh.
    pub fn forget(&mut self, mesh: MeshId) {
        if self.last_polygon == Some(mesh) {
            self.last_polygon = None;
        }
        if self.active == Some(mesh) {
            self.active = None;
        }
        if self.handle_mesh() == Some(mesh) {
            self.handles = None;
        }
        self.bindings.remove(mesh);
    }
}
