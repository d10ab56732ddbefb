use thiserror::Error;

/// Fatal start-up failures. Nothing after a successful start can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// The container the canvas is mounted into does not exist or is not usable.
    #[error("Root element not found: {0}")]
    MissingRootElement(String),

    /// No drawing context could be acquired for the canvas.
    #[error("Drawing context not found: {0}")]
    MissingDrawingContext(String),
}
