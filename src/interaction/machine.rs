use tracing::{debug, info};

use crate::scene::Scene;

use super::{
    Command, DragDelta, DragTarget, InputEvent, Mode, Notice, PickTarget, PointerButton,
    PointerDown, Selection, ShapeBuilder,
};

/// The interaction state machine.
///
/// Owns the mode, the sketch in progress and the selection. [`dispatch`]
/// reads the scene but never mutates it: every side effect comes back as a
/// [`Command`] for the caller to apply, in order, before the next event.
///
/// [`dispatch`]: InteractionState::dispatch
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    mode: Mode,
    sketch: ShapeBuilder,
    selection: Selection,
}

impl InteractionState {
    /// Creates a state machine in draw mode with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The sketch in progress.
    #[must_use]
    pub fn sketch(&self) -> &ShapeBuilder {
        &self.sketch
    }

    /// The selection state.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Mutable selection state, for recording the outcome of applied commands.
    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    /// Routes one input event to the handler of the current mode.
    pub fn dispatch(&mut self, scene: &Scene, event: &InputEvent) -> Vec<Command> {
        match event {
            InputEvent::PointerDown(pointer) => self.pointer_down(scene, pointer),
            InputEvent::Drag(drag) => self.drag(drag),
            InputEvent::ModeSelected(mode) => self.transition(scene, *mode),
            InputEvent::ModeReleased(Mode::Extrude) if self.mode == Mode::Extrude => {
                self.transition(scene, Mode::Draw)
            }
            InputEvent::ModeReleased(_) => Vec::new(),
        }
    }

    fn pointer_down(&mut self, scene: &Scene, pointer: &PointerDown) -> Vec<Command> {
        debug!(mode = %self.mode, ?pointer, "pointer down");
        match self.mode {
            Mode::Draw => self.on_draw(pointer),
            Mode::Extrude => self.on_extrude(scene),
            Mode::Move => self.on_move(scene, pointer),
            Mode::Edit => self.selection.select_for_edit(scene),
        }
    }

    fn on_draw(&mut self, pointer: &PointerDown) -> Vec<Command> {
        match pointer.button {
            PointerButton::Primary => {
                let (Some(PickTarget::Ground), Some(point)) = (pointer.pick.target, pointer.pick.point)
                else {
                    return Vec::new();
                };
                let mut commands = vec![Command::SpawnPoint(point)];
                if let Some((from, to)) = self.sketch.add_point(point) {
                    let points = self.sketch.points();
                    commands.push(Command::SpawnSegment {
                        from: points[from],
                        to: points[to],
                    });
                }
                commands
            }
            PointerButton::Secondary => match self.sketch.close() {
                Some(polygon) => {
                    info!(points = polygon.boundary().len(), "shape closed");
                    vec![Command::ClearSketch, Command::CreatePolygon(polygon)]
                }
                None => vec![Command::Notify(Notice::InsufficientPoints)],
            },
        }
    }

    fn on_extrude(&mut self, scene: &Scene) -> Vec<Command> {
        let mut commands = Vec::new();
        if self.sketch.reset() {
            commands.push(Command::ClearSketch);
        }
        let polygon = self
            .selection
            .last_polygon()
            .filter(|&polygon| scene.contains_mesh(polygon));
        // Must precede the extrude command: a factory error drops what follows.
        commands.extend(self.transition(scene, Mode::Draw));
        match polygon {
            Some(polygon) => commands.push(Command::Extrude { polygon }),
            None => commands.push(Command::Notify(Notice::NoActivePolygon)),
        }
        commands
    }

    fn on_move(&mut self, scene: &Scene, pointer: &PointerDown) -> Vec<Command> {
        match pointer.pick.target {
            Some(PickTarget::Mesh(mesh)) if scene.contains_mesh(mesh) => {
                self.selection.select_for_move(mesh)
            }
            _ => Vec::new(),
        }
    }

    fn drag(&mut self, drag: &DragDelta) -> Vec<Command> {
        match drag.target {
            DragTarget::Mesh(mesh) => self.selection.drag_mesh(mesh, &drag.delta),
            DragTarget::Handle(index) if self.mode == Mode::Edit => {
                self.selection.drag_handle(index, &drag.delta)
            }
            DragTarget::Handle(_) => Vec::new(),
        }
    }

    /// Leaves the current mode and enters `next`.
    fn transition(&mut self, scene: &Scene, next: Mode) -> Vec<Command> {
        if next == self.mode {
            // Re-selecting edit retries handle creation, e.g. after a move pick.
            return if next == Mode::Edit {
                self.selection.select_for_edit(scene)
            } else {
                Vec::new()
            };
        }

        let mut commands = Vec::new();
        match self.mode {
            Mode::Draw => {
                if self.sketch.reset() {
                    commands.push(Command::ClearSketch);
                }
            }
            Mode::Move => self.selection.set_bindings_enabled(false),
            Mode::Edit => commands.extend(self.selection.leave_edit(scene)),
            Mode::Extrude => {}
        }

        info!(from = %self.mode, to = %next, "mode changed");
        let previous = std::mem::replace(&mut self.mode, next);

        match next {
            Mode::Draw => {
                // The extrude round trip keeps the selection; leaving move/edit ends it.
                if matches!(previous, Mode::Move | Mode::Edit) {
                    commands.extend(self.selection.clear_active(scene));
                }
                commands.push(Command::SetGroundPickable(true));
            }
            Mode::Extrude => {}
            Mode::Move => {
                self.selection.set_bindings_enabled(true);
                commands.push(Command::SetGroundPickable(false));
            }
            Mode::Edit => commands.extend(self.selection.select_for_edit(scene)),
        }
        commands
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point3, Vector3};
    use crate::interaction::{DeformTarget, PickResult};
    use crate::scene::MeshData;
    use crate::tessellation::{CdtMeshFactory, MeshFactory};

    fn click(point: Point3) -> InputEvent {
        InputEvent::PointerDown(PointerDown {
            button: PointerButton::Primary,
            pick: PickResult::ground(point),
        })
    }

    fn right_click() -> InputEvent {
        InputEvent::PointerDown(PointerDown {
            button: PointerButton::Secondary,
            pick: PickResult::miss(),
        })
    }

    #[test]
    fn starts_in_draw_mode() {
        assert_eq!(InteractionState::new().mode(), Mode::Draw);
    }

    #[test]
    fn draw_clicks_spawn_points_and_segments() {
        let scene = Scene::new();
        let mut state = InteractionState::new();
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);

        assert_eq!(state.dispatch(&scene, &click(a)), vec![Command::SpawnPoint(a)]);
        assert_eq!(
            state.dispatch(&scene, &click(b)),
            vec![Command::SpawnPoint(b), Command::SpawnSegment { from: a, to: b }]
        );
    }

    #[test]
    fn clicks_off_the_ground_are_ignored_in_draw_mode() {
        let mut scene = Scene::new();
        let mesh = scene.add_mesh(MeshData::new("m", Default::default()));
        let mut state = InteractionState::new();
        let event = InputEvent::PointerDown(PointerDown {
            button: PointerButton::Primary,
            pick: PickResult::mesh(mesh, Point3::origin()),
        });

        assert!(state.dispatch(&scene, &event).is_empty());
        assert!(state.sketch().is_empty());
    }

    #[test]
    fn closing_two_points_is_a_notice() {
        let scene = Scene::new();
        let mut state = InteractionState::new();
        state.dispatch(&scene, &click(Point3::origin()));
        state.dispatch(&scene, &click(Point3::new(1.0, 0.0, 0.0)));

        assert_eq!(
            state.dispatch(&scene, &right_click()),
            vec![Command::Notify(Notice::InsufficientPoints)]
        );
        assert_eq!(state.sketch().points().len(), 2);
    }

    #[test]
    fn leaving_draw_discards_the_sketch() {
        let scene = Scene::new();
        let mut state = InteractionState::new();
        state.dispatch(&scene, &click(Point3::origin()));
        state.dispatch(&scene, &click(Point3::new(1.0, 0.0, 0.0)));

        let commands = state.dispatch(&scene, &InputEvent::ModeSelected(Mode::Move));

        assert_eq!(
            commands,
            vec![Command::ClearSketch, Command::SetGroundPickable(false)]
        );
        assert!(state.sketch().is_empty());
        assert!(state.sketch().segments().is_empty());
    }

    #[test]
    fn extrude_without_polygon_reverts_to_draw() {
        let scene = Scene::new();
        let mut state = InteractionState::new();
        state.dispatch(&scene, &InputEvent::ModeSelected(Mode::Extrude));
        assert_eq!(state.mode(), Mode::Extrude);

        let commands = state.dispatch(&scene, &click(Point3::origin()));

        assert_eq!(
            commands,
            vec![
                Command::SetGroundPickable(true),
                Command::Notify(Notice::NoActivePolygon)
            ]
        );
        assert_eq!(state.mode(), Mode::Draw);
    }

    #[test]
    fn releasing_extrude_reverts_to_draw() {
        let scene = Scene::new();
        let mut state = InteractionState::new();
        state.dispatch(&scene, &InputEvent::ModeSelected(Mode::Extrude));
        state.dispatch(&scene, &InputEvent::ModeReleased(Mode::Extrude));
        assert_eq!(state.mode(), Mode::Draw);

        // Releasing other controls does nothing.
        state.dispatch(&scene, &InputEvent::ModeSelected(Mode::Move));
        state.dispatch(&scene, &InputEvent::ModeReleased(Mode::Move));
        assert_eq!(state.mode(), Mode::Move);
    }

    #[test]
    fn extrude_targets_last_polygon() {
        let mut scene = Scene::new();
        let buffers = CdtMeshFactory
            .polygon(&[Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 0.0, 1.0)])
            .unwrap();
        let polygon = scene.add_mesh(MeshData::new("p", buffers));
        let mut state = InteractionState::new();
        state.selection_mut().set_last_polygon(polygon);
        state.dispatch(&scene, &InputEvent::ModeSelected(Mode::Extrude));

        let commands = state.dispatch(&scene, &click(Point3::origin()));

        assert_eq!(
            commands,
            vec![Command::SetGroundPickable(true), Command::Extrude { polygon }]
        );
        assert_eq!(state.mode(), Mode::Draw);
    }

    #[test]
    fn extrude_keeps_the_active_selection_until_the_solid_exists() {
        let mut scene = Scene::new();
        let buffers = CdtMeshFactory
            .polygon(&[Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 0.0, 1.0)])
            .unwrap();
        let polygon = scene.add_mesh(MeshData::new("p", buffers));
        let mut state = InteractionState::new();
        state.selection_mut().set_last_polygon(polygon);
        state.dispatch(&scene, &InputEvent::ModeSelected(Mode::Move));
        state.dispatch(
            &scene,
            &InputEvent::PointerDown(PointerDown {
                button: PointerButton::Primary,
                pick: PickResult::mesh(polygon, Point3::origin()),
            }),
        );
        state.dispatch(&scene, &InputEvent::ModeSelected(Mode::Extrude));

        let commands = state.dispatch(&scene, &click(Point3::origin()));

        assert!(!commands
            .iter()
            .any(|c| matches!(c, Command::Highlight { enabled: false, .. })));
        assert_eq!(commands.last(), Some(&Command::Extrude { polygon }));
        assert_eq!(state.selection().active(), Some(polygon));
    }

    #[test]
    fn mesh_drags_only_apply_in_move_mode() {
        let mut scene = Scene::new();
        let mesh = scene.add_mesh(MeshData::new("m", Default::default()));
        let mut state = InteractionState::new();
        state.dispatch(&scene, &InputEvent::ModeSelected(Mode::Move));
        state.dispatch(
            &scene,
            &InputEvent::PointerDown(PointerDown {
                button: PointerButton::Primary,
                pick: PickResult::mesh(mesh, Point3::origin()),
            }),
        );
        let drag = InputEvent::Drag(DragDelta {
            target: DragTarget::Mesh(mesh),
            delta: Vector3::new(2.0, 0.0, 0.0),
        });

        assert_eq!(
            state.dispatch(&scene, &drag),
            vec![Command::Deform {
                target: DeformTarget::Mesh(mesh),
                delta: Vector3::new(2.0, 0.0, 0.0),
                vertex: None,
            }]
        );

        state.dispatch(&scene, &InputEvent::ModeSelected(Mode::Edit));
        assert!(state.dispatch(&scene, &drag).is_empty());

        // Re-entering move reuses the binding.
        state.dispatch(&scene, &InputEvent::ModeSelected(Mode::Move));
        assert_eq!(state.dispatch(&scene, &drag).len(), 1);
    }

    #[test]
    fn edit_without_selection_is_inert() {
        let scene = Scene::new();
        let mut state = InteractionState::new();

        let commands = state.dispatch(&scene, &InputEvent::ModeSelected(Mode::Edit));

        assert_eq!(commands, vec![Command::Notify(Notice::NoSelection)]);
        assert_eq!(state.mode(), Mode::Edit);
        let drag = InputEvent::Drag(DragDelta {
            target: DragTarget::Handle(0),
            delta: Vector3::x(),
        });
        assert!(state.dispatch(&scene, &drag).is_empty());
    }
}
