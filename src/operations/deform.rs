use tracing::debug;

use crate::error::Result;
use crate::math::{matches_at_precision, Point3, Vector3};
use crate::scene::{MeshId, Scene};
use crate::tessellation::compute_normals;

/// Translates all vertices of a mesh, or only those at one position, and
/// recomputes its normals.
pub struct Deform {
    mesh: MeshId,
    delta: Vector3,
    target: Option<(Point3, u32)>,
}

impl Deform {
    /// Creates a `Deform` operation that moves every vertex of `mesh`.
    #[must_use]
    pub fn new(mesh: MeshId, delta: Vector3) -> Self {
        Self {
            mesh,
            delta,
            target: None,
        }
    }

    /// Restricts the operation to vertices matching `vertex` when both are
    /// rounded to `decimals` decimal places.
    #[must_use]
    pub fn targeting(mut self, vertex: Point3, decimals: u32) -> Self {
        self.target = Some((vertex, decimals));
        self
    }

    /// Executes the deformation and returns how many vertices moved.
    ///
    /// Normals are recomputed even when nothing moved.
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh is not in the scene.
    pub fn execute(&self, scene: &mut Scene) -> Result<usize> {
        let mesh = scene.mesh_mut(self.mesh)?;
        let (positions, moved) = deform_positions(mesh.positions(), &self.delta, self.target);
        let normals = compute_normals(&positions, mesh.indices());
        mesh.commit(positions, normals);

        if moved == 0 {
            debug!(mesh = ?self.mesh, target = ?self.target, "deform matched no vertices");
        }
        Ok(moved)
    }
}

/// Applies `delta` to the positions selected by `target` (all of them when
/// `None`). Unselected positions are copied unchanged.
#[must_use]
pub fn deform_positions(
    positions: &[Point3],
    delta: &Vector3,
    target: Option<(Point3, u32)>,
) -> (Vec<Point3>, usize) {
    let mut moved = 0;
    let out = positions
        .iter()
        .map(|p| {
            let hit = match target {
                None => true,
                Some((v, decimals)) => matches_at_precision(p, &v, decimals),
            };
            if hit {
                moved += 1;
                p + delta
            } else {
                *p
            }
        })
        .collect();
    (out, moved)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::scene::MeshData;
    use crate::tessellation::{ExtrudePolygon, TessellatePolygon};
    use approx::assert_relative_eq;

    fn g(x: f64, z: f64) -> Point3 {
        Point3::new(x, 0.0, z)
    }

    fn scene_with(buffers: crate::tessellation::MeshBuffers) -> (Scene, MeshId) {
        let mut scene = Scene::new();
        let id = scene.add_mesh(MeshData::new("m", buffers));
        (scene, id)
    }

    #[test]
    fn untargeted_deform_shifts_every_vertex() {
        let buffers = ExtrudePolygon::new(&[g(0.0, 0.0), g(1.0, 0.0), g(0.0, 1.0)], 1.0)
            .execute()
            .unwrap();
        let before = buffers.positions.clone();
        let (mut scene, id) = scene_with(buffers);
        let delta = Vector3::new(2.0, 0.0, -0.5);

        let moved = Deform::new(id, delta).execute(&mut scene).unwrap();

        let mesh = scene.mesh(id).unwrap();
        assert_eq!(moved, before.len());
        for (old, new) in before.iter().zip(mesh.positions()) {
            assert_eq!(*new, old + delta);
        }
        assert_eq!(mesh.normals(), compute_normals(mesh.positions(), mesh.indices()));
    }

    #[test]
    fn targeted_deform_moves_only_matching_vertices() {
        let buffers = ExtrudePolygon::new(&[g(0.0, 0.0), g(1.0, 0.0), g(0.0, 1.0)], 1.0)
            .execute()
            .unwrap();
        let before = buffers.positions.clone();
        let (mut scene, id) = scene_with(buffers);
        let target = g(1.0, 0.0);
        let delta = Vector3::new(0.0, 0.5, 0.0);

        let moved = Deform::new(id, delta)
            .targeting(Point3::new(1.0, 0.001, 0.0), 2)
            .execute(&mut scene)
            .unwrap();

        let mesh = scene.mesh(id).unwrap();
        // Top cap + two walls share that corner.
        assert_eq!(moved, 3);
        for (old, new) in before.iter().zip(mesh.positions()) {
            if *old == target {
                assert_eq!(*new, old + delta);
            } else {
                assert_eq!(new.coords.map(f64::to_bits), old.coords.map(f64::to_bits));
            }
        }
    }

    #[test]
    fn lifting_a_corner_tilts_the_normals() {
        let buffers =
            TessellatePolygon::new(&[g(0.0, 0.0), g(1.0, 0.0), g(1.0, 1.0), g(0.0, 1.0)])
                .execute()
                .unwrap();
        let (mut scene, id) = scene_with(buffers);
        let before = scene.mesh(id).unwrap().normals().to_vec();

        Deform::new(id, Vector3::new(0.0, 0.5, 0.0))
            .targeting(g(1.0, 1.0), 2)
            .execute(&mut scene)
            .unwrap();

        let mesh = scene.mesh(id).unwrap();
        assert_ne!(mesh.normals(), before.as_slice());
        for n in mesh.normals() {
            assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn missed_target_still_recomputes_normals() {
        let mut buffers = TessellatePolygon::new(&[g(0.0, 0.0), g(1.0, 0.0), g(0.0, 1.0)])
            .execute()
            .unwrap();
        // Stale normals must not survive a deform.
        buffers.normals = vec![Vector3::x(); buffers.positions.len()];
        let before = buffers.positions.clone();
        let (mut scene, id) = scene_with(buffers);

        let moved = Deform::new(id, Vector3::new(0.0, 1.0, 0.0))
            .targeting(g(5.0, 5.0), 2)
            .execute(&mut scene)
            .unwrap();

        let mesh = scene.mesh(id).unwrap();
        assert_eq!(moved, 0);
        assert_eq!(mesh.positions(), before.as_slice());
        for n in mesh.normals() {
            assert_relative_eq!(*n, Vector3::y());
        }
    }

    #[test]
    fn missing_mesh_is_an_error() {
        let mut scene = Scene::new();
        let id = scene.add_mesh(MeshData::new("m", Default::default()));
        scene.remove_mesh(id).unwrap();
        assert!(Deform::new(id, Vector3::x()).execute(&mut scene).is_err());
    }
}
