use std::fmt;

/// The active interaction behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Clicking the ground adds sketch points; secondary click closes the shape.
    #[default]
    Draw,
    /// Transient: the next pointer-down extrudes the last polygon.
    Extrude,
    /// Clicking a shape selects it and makes it draggable.
    Move,
    /// The selected shape exposes one drag handle per vertex.
    Edit,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Draw => "draw",
            Mode::Extrude => "extrude",
            Mode::Move => "move",
            Mode::Edit => "edit",
        };
        f.write_str(name)
    }
}
