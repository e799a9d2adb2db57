use std::collections::{HashMap, HashSet, VecDeque};

use spade::handles::{FixedFaceHandle, FixedVertexHandle, InnerTag};
use spade::{
    ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation,
};

use crate::error::{Result, TessellationError};
use crate::math::{PlaneFrame, Point3};

use super::MeshBuffers;

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Triangulates a flat closed boundary into a single-sided cap facing the
/// boundary plane's (up-facing) normal.
pub struct TessellatePolygon<'a> {
    boundary: &'a [Point3],
}

impl<'a> TessellatePolygon<'a> {
    /// Creates a new `TessellatePolygon` operation.
    #[must_use]
    pub fn new(boundary: &'a [Point3]) -> Self {
        Self { boundary }
    }

    /// Executes the tessellation.
    ///
    /// # Errors
    ///
    /// Returns an error if the boundary is degenerate or self-intersecting.
    pub fn execute(&self) -> Result<MeshBuffers> {
        let frame = plane_frame(self.boundary)?;
        let cap = triangulate_cap(self.boundary, &frame)?;
        let normal = *frame.normal();
        Ok(MeshBuffers {
            normals: vec![normal; cap.points.len()],
            positions: cap.points,
            indices: cap.triangles,
        })
    }
}

/// A triangulated cap. `points` are the distinct boundary points in first
/// insertion order, carried over bit-for-bit from the input.
pub(crate) struct Cap {
    pub points: Vec<Point3>,
    pub triangles: Vec<[u32; 3]>,
}

pub(crate) fn plane_frame(boundary: &[Point3]) -> Result<PlaneFrame> {
    if boundary.len() < 3 {
        return Err(TessellationError::Degenerate("boundary needs at least 3 points".into()).into());
    }
    PlaneFrame::from_boundary(boundary).ok_or_else(|| {
        TessellationError::Degenerate("boundary has no enclosed area".into()).into()
    })
}

/// Triangulates the interior of `boundary`, winding every triangle
/// counterclockwise around the frame normal.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn triangulate_cap(boundary: &[Point3], frame: &PlaneFrame) -> Result<Cap> {
    let mut cdt = Cdt::new();
    let mut points = Vec::with_capacity(boundary.len());
    let mut vertex_map: HashMap<usize, u32> = HashMap::new();

    let mut handles = Vec::with_capacity(boundary.len());
    for point in boundary {
        let uv = frame.project(point);
        let handle = cdt
            .insert(SpadePoint2::new(uv.x, uv.y))
            .map_err(|e: InsertionError| TessellationError::Failed(format!("CDT insert: {e}")))?;
        vertex_map.entry(handle.index()).or_insert_with(|| {
            points.push(*point);
            (points.len() - 1) as u32
        });
        handles.push(handle);
    }

    insert_constraint_loop(&mut cdt, &handles)?;
    let interior = classify_interior_faces(&cdt);

    let mut triangles = Vec::new();
    for face in cdt.inner_faces() {
        if !interior.contains(&face.fix().index()) {
            continue;
        }
        let mut tri = [0u32; 3];
        for (slot, vh) in tri.iter_mut().zip(face.vertices()) {
            *slot = *vertex_map.get(&vh.fix().index()).ok_or_else(|| {
                TessellationError::Failed("triangulation introduced a new vertex".into())
            })?;
        }
        triangles.push(tri);
    }

    if triangles.is_empty() {
        return Err(TessellationError::Degenerate("boundary encloses no triangles".into()).into());
    }

    Ok(Cap { points, triangles })
}

/// Closes the loop of inserted vertices with constraint edges.
fn insert_constraint_loop(cdt: &mut Cdt, handles: &[FixedVertexHandle]) -> Result<()> {
    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from == to {
            continue;
        }
        if !cdt.can_add_constraint(from, to) {
            return Err(TessellationError::Failed("boundary intersects itself".into()).into());
        }
        cdt.add_constraint(from, to);
    }
    Ok(())
}

/// Classifies which inner faces of the CDT are inside the boundary using flood-fill.
///
/// Starts from faces adjacent to the outer (infinite) face at depth 0. Each time
/// a constraint edge is crossed, depth increments. Odd depth = interior.
fn classify_interior_faces(cdt: &Cdt) -> HashSet<usize> {
    let mut interior = HashSet::new();
    let mut depth_map: HashMap<usize, u32> = HashMap::new();
    let mut queue: VecDeque<(FixedFaceHandle<InnerTag>, u32)> = VecDeque::new();

    let outer_fix = cdt.outer_face().fix();

    for edge in cdt.directed_edges() {
        if edge.face().fix() != outer_fix {
            continue;
        }
        if let Some(inner) = edge.rev().face().as_inner() {
            let idx = inner.fix().index();
            if depth_map.contains_key(&idx) {
                continue;
            }
            let depth = u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
            depth_map.insert(idx, depth);
            if depth % 2 == 1 {
                interior.insert(idx);
            }
            queue.push_back((inner.fix(), depth));
        }
    }

    while let Some((face_fix, depth)) = queue.pop_front() {
        let face = cdt.face(face_fix);
        for edge in face.adjacent_edges() {
            let Some(neighbor) = edge.rev().face().as_inner() else {
                continue;
            };
            let n_idx = neighbor.fix().index();
            if depth_map.contains_key(&n_idx) {
                continue;
            }
            let new_depth = depth + u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
            depth_map.insert(n_idx, new_depth);
            if new_depth % 2 == 1 {
                interior.insert(n_idx);
            }
            queue.push_back((neighbor.fix(), new_depth));
        }
    }

    interior
}
