//! Reusable drawing definitions shared by diagram renderers.
//!
//! These types describe *how* something is drawn (stroke color and dash
//! pattern, label font and size) independently of *where* it ends up; the
//! layout stage decides positions and the exporter combines the two.

mod stroke;
mod text;

pub use stroke::{StrokeDefinition, StrokeStyle};
pub use text::TextStyle;
