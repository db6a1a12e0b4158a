//! Core types for Plateau PGM diagrams.
//!
//! This crate provides the foundation used by the `plateau` library:
//! geometric primitives, interned identifiers, color handling, and
//! reusable drawing definitions (strokes, text styles).

pub mod color;
pub mod draw;
pub mod geometry;
pub mod identifier;
