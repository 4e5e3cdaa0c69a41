use thiserror::Error;

/// Failures while bringing up the window, context and driver.
///
/// Errors reported by the driver once it is running are not represented here;
/// they are classified and logged by [`crate::glutils::GlContext::check_errors`].
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("Error while building OpenGL window: {0}")]
    Window(String),

    #[error("Error while creating OpenGL context: {0}")]
    Context(String),

    #[error("unresolved OpenGL entry points: {}", .missing.join(", "))]
    EntryPoints { missing: Vec<&'static str> },
}
