use thiserror::Error;

/// Top-level error type for the polygon editor.
///
/// Everything reported here comes from a collaborator (the scene arena or the
/// triangulator). Benign interaction outcomes are [`crate::interaction::Notice`]s,
/// not errors.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// Errors related to the scene arena.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),
}

/// Errors related to tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("degenerate boundary: {0}")]
    Degenerate(String),

    #[error("tessellation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`EditorError`].
pub type Result<T> = std::result::Result<T, EditorError>;
