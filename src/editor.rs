use tracing::{info, warn};

use crate::config::EditorConfig;
use crate::error::Result;
use crate::interaction::{
    Command, DeformTarget, DragDelta, DragTarget, InputEvent, InteractionState, Mode, Notice,
    PickResult, PointerButton, PointerDown, Polygon,
};
use crate::math::{up, Vector3};
use crate::operations::{shape_name, Deform, Extrude};
use crate::scene::{MarkerData, MarkerId, MeshData, MeshId, Scene};
use crate::tessellation::{CdtMeshFactory, MeshFactory};

/// The polygon editor: a scene, the interaction state machine driving it, and
/// the mesh factory used to build shapes.
///
/// Events are handled one at a time; every command an event produces is
/// applied to the scene before [`Editor::handle`] returns.
#[derive(Debug)]
pub struct Editor<F = CdtMeshFactory> {
    config: EditorConfig,
    scene: Scene,
    state: InteractionState,
    factory: F,
    sketch_markers: Vec<MarkerId>,
    handle_markers: Vec<MarkerId>,
}

impl Editor<CdtMeshFactory> {
    /// Creates an editor with the default triangulator.
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        Self::with_factory(config, CdtMeshFactory)
    }
}

impl Default for Editor<CdtMeshFactory> {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl<F: MeshFactory> Editor<F> {
    /// Creates an editor backed by a custom mesh factory.
    #[must_use]
    pub fn with_factory(config: EditorConfig, factory: F) -> Self {
        Self {
            config,
            scene: Scene::new(),
            state: InteractionState::new(),
            factory,
            sketch_markers: Vec::new(),
            handle_markers: Vec::new(),
        }
    }

    /// The editor configuration.
    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The scene holding every mesh and marker.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The interaction state.
    #[must_use]
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// The current mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    /// Markers of the sketch in progress: points and segments, in creation order.
    #[must_use]
    pub fn sketch_markers(&self) -> &[MarkerId] {
        &self.sketch_markers
    }

    /// The marker of vertex handle `index`.
    #[must_use]
    pub fn handle_marker(&self, index: usize) -> Option<MarkerId> {
        self.handle_markers.get(index).copied()
    }

    /// The prompt to show while edit mode has nothing to edit.
    #[must_use]
    pub fn prompt(&self) -> Option<&'static str> {
        let selection = self.state.selection();
        (self.mode() == Mode::Edit && selection.handle_mesh().is_none())
            .then_some("Select a shape in move mode first")
    }

    /// Handles one input event and applies its commands.
    ///
    /// Returns the notices raised by interactions that had nothing to act on.
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh factory fails or a command refers to a
    /// mesh that is no longer in the scene.
    pub fn handle(&mut self, event: &InputEvent) -> Result<Vec<Notice>> {
        let commands = self.state.dispatch(&self.scene, event);
        let mut notices = Vec::new();
        for command in commands {
            self.apply(command, &mut notices)?;
        }
        Ok(notices)
    }

    /// Presses a mode control.
    ///
    /// # Errors
    ///
    /// See [`Editor::handle`].
    pub fn select_mode(&mut self, mode: Mode) -> Result<Vec<Notice>> {
        self.handle(&InputEvent::ModeSelected(mode))
    }

    /// Releases a mode control.
    ///
    /// # Errors
    ///
    /// See [`Editor::handle`].
    pub fn release_mode(&mut self, mode: Mode) -> Result<Vec<Notice>> {
        self.handle(&InputEvent::ModeReleased(mode))
    }

    /// Primary press with the given pick result.
    ///
    /// # Errors
    ///
    /// See [`Editor::handle`].
    pub fn press(&mut self, pick: PickResult) -> Result<Vec<Notice>> {
        self.handle(&InputEvent::PointerDown(PointerDown {
            button: PointerButton::Primary,
            pick,
        }))
    }

    /// Secondary press, which closes the sketch in draw mode.
    ///
    /// # Errors
    ///
    /// See [`Editor::handle`].
    pub fn press_secondary(&mut self) -> Result<Vec<Notice>> {
        self.handle(&InputEvent::PointerDown(PointerDown {
            button: PointerButton::Secondary,
            pick: PickResult::miss(),
        }))
    }

    /// One drag step on `target`.
    ///
    /// # Errors
    ///
    /// See [`Editor::handle`].
    pub fn drag(&mut self, target: DragTarget, delta: Vector3) -> Result<Vec<Notice>> {
        self.handle(&InputEvent::Drag(DragDelta { target, delta }))
    }

    fn apply(&mut self, command: Command, notices: &mut Vec<Notice>) -> Result<()> {
        match command {
            Command::SpawnPoint(position) => {
                let marker = MarkerData::sphere(
                    position,
                    self.config.marker_diameter,
                    self.config.point_color,
                );
                self.sketch_markers.push(self.scene.add_marker(marker));
            }
            Command::SpawnSegment { from, to } => {
                let marker = MarkerData::line(from, to, self.config.line_color);
                self.sketch_markers.push(self.scene.add_marker(marker));
            }
            Command::ClearSketch => {
                for id in self.sketch_markers.drain(..) {
                    self.scene.remove_marker(id)?;
                }
            }
            Command::CreatePolygon(polygon) => {
                let id = self.create_polygon(&polygon)?;
                self.state.selection_mut().set_last_polygon(id);
            }
            Command::Extrude { polygon } => {
                let solid = Extrude::new(polygon, self.config.extrude_depth)
                    .with_color(self.config.solid_color)
                    .execute(&mut self.scene, &self.factory)?;
                let released = self
                    .state
                    .selection_mut()
                    .adopt_extrusion(&self.scene, polygon, solid);
                for command in released {
                    self.apply(command, notices)?;
                }
            }
            Command::SetGroundPickable(pickable) => self.scene.set_ground_pickable(pickable),
            Command::SetMeshPickable { mesh, pickable } => {
                self.scene.mesh_mut(mesh)?.set_pickable(pickable);
            }
            Command::Highlight { mesh, enabled } => self.highlight(mesh, enabled)?,
            Command::Deform {
                target: DeformTarget::Mesh(mesh),
                delta,
                vertex,
            } => {
                let mut deform = Deform::new(mesh, delta);
                if let Some(vertex) = vertex {
                    deform = deform.targeting(vertex, self.config.match_decimals);
                }
                deform.execute(&mut self.scene)?;
            }
            Command::Deform {
                target: DeformTarget::Handle(index),
                delta,
                ..
            } => {
                if let Some(&marker) = self.handle_markers.get(index) {
                    self.scene.marker_mut(marker)?.translate(&delta);
                }
            }
            Command::SpawnHandle { index, position } => {
                debug_assert_eq!(index, self.handle_markers.len());
                let marker = MarkerData::sphere(
                    position,
                    self.config.marker_diameter,
                    self.config.point_color,
                );
                self.handle_markers.push(self.scene.add_marker(marker));
            }
            Command::ClearHandles => {
                for id in self.handle_markers.drain(..) {
                    self.scene.remove_marker(id)?;
                }
            }
            Command::Notify(notice) => {
                warn!(%notice, "interaction skipped");
                notices.push(notice);
            }
        }
        Ok(())
    }

    fn create_polygon(&mut self, polygon: &Polygon) -> Result<MeshId> {
        let boundary = polygon.boundary();
        let buffers = self.factory.polygon(boundary)?;
        let mut mesh = MeshData::new(shape_name(boundary), buffers);
        mesh.enable_edges(self.config.edge_width, self.config.edge_color);
        mesh.translate_node(&(up() * self.config.ground_lift));
        let id = self.scene.add_mesh(mesh);
        info!(mesh = ?id, points = boundary.len(), "polygon created");
        Ok(id)
    }

    fn highlight(&mut self, id: MeshId, enabled: bool) -> Result<()> {
        let lift = up() * self.config.ground_lift;
        let mesh = self.scene.mesh_mut(id)?;
        if !enabled {
            mesh.disable_edges();
            return Ok(());
        }
        if mesh.edges().is_none() {
            mesh.translate_node(&lift);
        }
        mesh.enable_edges(self.config.edge_width, self.config.edge_color);
        Ok(())
    }
}
