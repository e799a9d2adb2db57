//! Pointer-driven interaction: modes, input events, and the state machine
//! that turns them into scene commands.

mod command;
mod event;
mod machine;
mod mode;
mod selection;
mod sketch;

pub use command::{Command, DeformTarget, Notice};
pub use event::{DragDelta, DragTarget, InputEvent, PickResult, PickTarget, PointerButton, PointerDown};
pub use machine::InteractionState;
pub use mode::Mode;
pub use selection::{DragBinding, Selection, VertexHandle};
pub use sketch::{Polygon, ShapeBuilder};
