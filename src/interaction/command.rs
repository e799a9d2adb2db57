use std::fmt;

use crate::math::{Point3, Vector3};
use crate::scene::MeshId;

use super::Polygon;

/// What a deform command moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeformTarget {
    Mesh(MeshId),
    /// The marker of a vertex handle, by canonical vertex index.
    Handle(usize),
}

/// An interaction that was requested but had nothing to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// A shape was closed with fewer than three points.
    InsufficientPoints,
    /// Extrusion was requested with no completed polygon.
    NoActivePolygon,
    /// Edit mode was entered with no selected shape.
    NoSelection,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Notice::InsufficientPoints => "a shape needs at least three points",
            Notice::NoActivePolygon => "no polygon to extrude",
            Notice::NoSelection => "select a shape in move mode first",
        };
        f.write_str(message)
    }
}

/// A side effect requested by the state machine, applied to the scene by the
/// caller in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Show a sketch point marker.
    SpawnPoint(Point3),
    /// Show a sketch segment marker.
    SpawnSegment { from: Point3, to: Point3 },
    /// Dispose every sketch marker.
    ClearSketch,
    /// Triangulate a closed sketch and record it as the last completed polygon.
    CreatePolygon(Polygon),
    /// Extrude a polygon mesh into a solid.
    Extrude { polygon: MeshId },
    SetGroundPickable(bool),
    SetMeshPickable { mesh: MeshId, pickable: bool },
    /// Toggle the edge highlight of a mesh.
    Highlight { mesh: MeshId, enabled: bool },
    /// Move a mesh (optionally only the vertices at `vertex`) or a handle marker.
    Deform {
        target: DeformTarget,
        delta: Vector3,
        vertex: Option<Point3>,
    },
    /// Show the marker of vertex handle `index` at a world position.
    SpawnHandle { index: usize, position: Point3 },
    /// Dispose every vertex handle marker.
    ClearHandles,
    Notify(Notice),
}
