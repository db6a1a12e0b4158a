//! Error adapter for converting PlateauError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;

use plateau::PlateauError;

/// Adapter wrapping a [`PlateauError`] for rich terminal reporting.
pub struct ErrorAdapter(pub PlateauError);

impl fmt::Debug for ErrorAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            PlateauError::Io(_) => "plateau::io",
            PlateauError::Symbol(_) => "plateau::symbol",
            PlateauError::UnknownNode(_)
            | PlateauError::DuplicateNode(_)
            | PlateauError::MissingParamTarget(_)
            | PlateauError::EmptyPlate(_)
            | PlateauError::Empty => "plateau::model",
            PlateauError::MissingPlacement(_)
            | PlateauError::ConflictingPlacement(_)
            | PlateauError::PlacementCycle(_) => "plateau::placement",
            PlateauError::Config(_) => "plateau::config",
            PlateauError::Export(_) => "plateau::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help: &str = match &self.0 {
            PlateauError::MissingPlacement(_) => {
                "give the node coordinates with `at`, or anchor it to another node"
            }
            PlateauError::ConflictingPlacement(_) => {
                "a node takes exactly one placement; remove the extras"
            }
            PlateauError::PlacementCycle(_) => {
                "break the cycle by placing one of the involved nodes absolutely"
            }
            PlateauError::MissingParamTarget(_) => {
                "add `of = [\"node\"]` or anchor the parameter to its target node"
            }
            PlateauError::Symbol(_) => {
                "only `_{...}` subscripts, `^2`, and \\tilde/\\hat/\\bar modifiers are understood"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }
}
