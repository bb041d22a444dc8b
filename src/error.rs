//! Engine error types

use thiserror::Error;

/// Errors surfaced to the host application
#[derive(Debug, Error)]
pub enum WarpError {
    /// No drawable surface exists for the requested target id. Fatal to the
    /// construction call; no partial instance is registered.
    #[error("no drawable surface for target `{0}`")]
    InvalidTarget(String),

    /// The surface exists but a 2D drawing context could not be acquired.
    #[error("2d context unavailable for target `{0}`")]
    NoContext(String),
}
