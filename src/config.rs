/// An RGBA color with components in `[0, 1]`.
pub type Color = [f32; 4];

/// Parameters controlling how the editor builds and presents shapes.
#[derive(Debug, Clone, Copy)]
pub struct EditorConfig {
    /// Height of the prism produced by an extrusion.
    pub extrude_depth: f64,
    /// Decimal places used when matching a drag handle to mesh vertices.
    pub match_decimals: u32,
    /// Width of the edge highlight overlay.
    pub edge_width: f32,
    /// Color of the edge highlight overlay.
    pub edge_color: Color,
    /// Vertical offset applied to a highlighted shape to avoid z-fighting
    /// with the ground.
    pub ground_lift: f64,
    /// Diameter of sketch point and drag handle markers.
    pub marker_diameter: f64,
    /// Color of sketch points and drag handles.
    pub point_color: Color,
    /// Color of sketch segments.
    pub line_color: Color,
    /// Color of extruded solids.
    pub solid_color: Color,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            extrude_depth: 1.0,
            match_decimals: 2,
            edge_width: 4.0,
            edge_color: [0.0, 0.0, 1.0, 1.0],
            ground_lift: 1e-5,
            marker_diameter: 0.1,
            point_color: [1.0, 0.0, 0.0, 1.0],
            line_color: [0.0, 0.0, 1.0, 1.0],
            solid_color: [0.0, 1.0, 0.0, 1.0],
        }
    }
}
