//! Export of laid-out diagrams.
//!
//! The layout engine draws onto a [`LayeredOutput`]; an [`Exporter`] turns
//! that output plus the [`Diagram`] metrics into a file.
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering rendering failures and I/O
//! errors. [`Error`] converts into [`PrismError::Export`] at the crate
//! boundary.
//!
//! [`PrismError::Export`]: crate::PrismError::Export

/// SVG export backend.
pub mod svg;

use prism_core::draw::LayeredOutput;

use crate::layout::Diagram;

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// Exports a rendered diagram to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the output cannot be produced, or
    /// [`Error::Io`] if writing it fails.
    fn export_diagram(&self, diagram: &Diagram, output: LayeredOutput) -> Result<(), Error>;
}

/// Errors that can occur during diagram export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
