use crate::math::{Point3, Vector3};
use crate::scene::{MarkerId, MeshId};

use super::Mode;

/// Mouse button of a pointer-down event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// What a pick ray landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickTarget {
    Ground,
    Mesh(MeshId),
    Marker(MarkerId),
}

/// Result of the scene's pick query under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PickResult {
    /// The topmost pickable object, if any.
    pub target: Option<PickTarget>,
    /// World-space intersection point.
    pub point: Option<Point3>,
}

impl PickResult {
    /// Nothing under the pointer.
    #[must_use]
    pub fn miss() -> Self {
        Self::default()
    }

    /// The ground plane, hit at `point`.
    #[must_use]
    pub fn ground(point: Point3) -> Self {
        Self {
            target: Some(PickTarget::Ground),
            point: Some(point),
        }
    }

    /// A mesh, hit at `point`.
    #[must_use]
    pub fn mesh(id: MeshId, point: Point3) -> Self {
        Self {
            target: Some(PickTarget::Mesh(id)),
            point: Some(point),
        }
    }

    /// Whether the ray hit anything.
    #[must_use]
    pub fn hit(&self) -> bool {
        self.target.is_some()
    }
}

/// A pointer press on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerDown {
    pub button: PointerButton,
    pub pick: PickResult,
}

/// What a drag gesture is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    /// A whole mesh bound for dragging in move mode.
    Mesh(MeshId),
    /// A vertex handle, by canonical vertex index.
    Handle(usize),
}

/// One incremental step of a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragDelta {
    pub target: DragTarget,
    /// World-space displacement since the previous step.
    pub delta: Vector3,
}

/// Input delivered to the editor, processed strictly in arrival order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(PointerDown),
    Drag(DragDelta),
    /// A mode control was pressed.
    ModeSelected(Mode),
    /// A mode control was released.
    ModeReleased(Mode),
}
