//! Export functionality for placed diagrams.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! converting a placed [`Diagram`] into an output format. It is the final
//! stage in the Plateau pipeline.
//!
//! ```text
//! Builders (Pgm, Node, Plate)
//!     ↓ build
//! Placed geometry (Diagram)
//!     ↓ export (this module)
//! Output file
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] — SVG output via [`svg::Svg`] (in-memory) and
//!   [`svg::SvgFile`] (file-writing exporter)
//!
//! Export operations return [`Error`], covering rendering failures and I/O
//! errors. [`Error`] converts into [`PlateauError::Export`] at the crate
//! boundary.
//!
//! [`Diagram`]: crate::layout::Diagram
//! [`PlateauError::Export`]: crate::PlateauError::Export

/// SVG export backend.
pub mod svg;

use crate::layout::Diagram;

/// Abstraction for diagram export backends.
///
/// Implementors convert a placed [`Diagram`] into a specific output format.
/// See the [`svg`] module for the built-in SVG implementation.
pub trait Exporter {
    /// Exports a placed diagram to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the diagram cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export_diagram(&mut self, diagram: &Diagram) -> Result<(), Error>;
}

/// Errors that can occur during diagram export.
///
/// This type is converted into [`PlateauError::Export`] at the crate
/// boundary via the [`From`] implementation in [`crate::error`].
///
/// [`PlateauError::Export`]: crate::PlateauError::Export
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
