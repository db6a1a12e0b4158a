//! Error types for Plateau operations.
//!
//! This module provides the main error type [`PlateauError`] which covers
//! the failure modes of building and rendering a PGM: malformed symbols,
//! inconsistent placement requests, unresolvable node references, and
//! export failures.

use std::io;

use thiserror::Error;

use plateau_core::identifier::Id;

/// The main error type for Plateau operations.
#[derive(Debug, Error)]
pub enum PlateauError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("symbol error: {0}")]
    Symbol(String),

    #[error("unknown node `{0}`")]
    UnknownNode(Id),

    #[error("duplicate node `{0}`")]
    DuplicateNode(Id),

    #[error("node `{0}` has no placement; give it coordinates or anchor it to another node")]
    MissingPlacement(Id),

    #[error("node `{0}` was given more than one placement")]
    ConflictingPlacement(Id),

    #[error("circular placement involving node `{0}`")]
    PlacementCycle(Id),

    #[error(
        "parameter node `{0}` must name the node it belongs to, \
         via `of` or a relative placement"
    )]
    MissingParamTarget(Id),

    #[error("plate `{0}` must contain at least one node")]
    EmptyPlate(String),

    #[error("diagram has no nodes")]
    Empty,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for PlateauError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}
