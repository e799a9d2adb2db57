mod deform;
mod extrude;
mod vertex_identity;

pub use deform::{deform_positions, Deform};
pub use extrude::Extrude;
pub(crate) use extrude::shape_name;
pub use vertex_identity::{canonical_vertices, canonical_vertices_from_flat};
