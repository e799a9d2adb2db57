pub mod config;
pub mod editor;
pub mod error;
pub mod interaction;
pub mod math;
pub mod operations;
pub mod scene;
pub mod tessellation;

pub use config::EditorConfig;
pub use editor::Editor;
pub use error::{EditorError, Result};
