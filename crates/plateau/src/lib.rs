//! Plateau: a builder library for probabilistic graphical model diagrams.
//!
//! Plateau turns a declarative description of a PGM (nodes, the plates that
//! group them, and the edges between them) into a rendered SVG diagram.
//! Nodes are labeled with LaTeX-style math symbols, referred to by names
//! derived from those symbols, and placed relative to each other instead of
//! on a fixed grid.
//!
//! # Pipeline
//!
//! ```text
//! Builders (Pgm, Node, Plate)
//!     ↓ build
//! Placed geometry (Diagram)
//!     ↓ export
//! SVG document
//! ```
//!
//! # Examples
//!
//! A coin-flip model, built bottom-up:
//!
//! ```
//! use plateau::{Pgm, model::{Node, Plate}};
//!
//! let pgm = Pgm::new()
//!     .with_node(Node::latent(r"$\theta$").at(1.0, 2.0))
//!     .with_node(Node::hyper(r"$\alpha$").above("theta"))
//!     .with_plate(
//!         Plate::new("$i = 1..N$")
//!             .with_node(Node::data("$x_i$").below("theta")),
//!     );
//!
//! let svg = pgm.render_svg()?;
//! assert!(svg.contains("</svg>"));
//! # Ok::<(), plateau::PlateauError>(())
//! ```

pub mod config;
pub mod export;
pub mod layout;
pub mod model;
pub mod symbol;

mod error;

pub use error::PlateauError;

// Re-export the core primitives so downstream users need only one crate.
pub use plateau_core::{color, draw, geometry, identifier};

use log::debug;

use plateau_core::{geometry::Size, identifier::Id};

use crate::{
    config::AppConfig,
    export::svg::Svg,
    layout::Diagram,
    model::{Node, Plate, PlateMember},
};

/// Top-level builder for a PGM diagram.
///
/// A `Pgm` collects [`Node`] and [`Plate`] builders, then resolves them into
/// a placed [`Diagram`] with [`Pgm::build`] or straight to markup with
/// [`Pgm::render_svg`]. All deferred validation happens at build time, so
/// builder chains themselves never fail.
#[derive(Debug, Clone, Default)]
pub struct Pgm {
    config: AppConfig,
    nodes: Vec<Node>,
    plates: Vec<Plate>,
    shape: Option<Size>,
}

impl Pgm {
    /// Creates an empty diagram builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration wholesale.
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Overrides the placement offsets, in diagram units.
    pub fn with_offsets(mut self, vertical: f32, horizontal: f32) -> Self {
        self.config.layout.vertical_offset = vertical;
        self.config.layout.horizontal_offset = horizontal;
        self
    }

    /// Overrides the computed canvas extent, in diagram units.
    pub fn with_shape(mut self, width: f32, height: f32) -> Self {
        self.shape = Some(Size::new(width, height));
        self
    }

    /// Adds a top-level node.
    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    /// Adds several top-level nodes.
    pub fn with_nodes(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.nodes.extend(nodes);
        self
    }

    /// Adds a plate and the nodes it owns.
    pub fn with_plate(mut self, plate: Plate) -> Self {
        self.plates.push(plate);
        self
    }

    /// Looks up a node builder by name, top-level or plate-owned.
    ///
    /// # Errors
    ///
    /// Returns [`PlateauError::UnknownNode`] if no node has that name.
    /// Symbol errors from other builders may surface during the search.
    pub fn get_node(&self, name: impl Into<Id>) -> Result<&Node, PlateauError> {
        let name = name.into();
        let owned = self.plates.iter().flat_map(|plate| {
            plate.members().iter().filter_map(|member| match member {
                PlateMember::Node(node) => Some(node),
                PlateMember::Ref(_) => None,
            })
        });
        for node in self.nodes.iter().chain(owned) {
            if node.name()? == name {
                return Ok(node);
            }
        }
        Err(PlateauError::UnknownNode(name))
    }

    /// Resolves all builders into a placed diagram.
    ///
    /// # Errors
    ///
    /// Surfaces everything the builders deferred: malformed symbols,
    /// missing or conflicting placements, unknown node references,
    /// placement cycles, parameters without targets, and empty plates
    /// or diagrams.
    pub fn build(&self) -> Result<Diagram, PlateauError> {
        layout::solve(self)
    }

    /// Builds the diagram and renders it to an SVG string.
    pub fn render_svg(&self) -> Result<String, PlateauError> {
        let diagram = self.build()?;
        let document = Svg::new(self.config.style.clone())
            .render(&diagram)
            .map_err(PlateauError::from)?;
        let markup = document.to_string();
        debug!(bytes = markup.len(); "rendered svg document");
        Ok(markup)
    }

    /// The configuration the diagram will be built with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub(crate) fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub(crate) fn plates(&self) -> &[Plate] {
        &self.plates
    }

    pub(crate) fn shape(&self) -> Option<Size> {
        self.shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_node_searches_plates() {
        let pgm = Pgm::new()
            .with_node(Node::latent(r"$\theta$").at(1.0, 1.0))
            .with_plate(Plate::new("$i$").with_node(Node::data("$x_i$").below("theta")));

        assert!(pgm.get_node("theta").is_ok());
        assert!(pgm.get_node("x_i").is_ok());
        assert!(matches!(
            pgm.get_node("ghost"),
            Err(PlateauError::UnknownNode(_))
        ));
    }

    #[test]
    fn test_with_offsets_feeds_layout() {
        let pgm = Pgm::new()
            .with_offsets(2.0, 1.5)
            .with_node(Node::latent("$a$").at(1.0, 1.0))
            .with_node(Node::latent("$b$").above("a"));
        let diagram = pgm.build().unwrap();
        assert_eq!(diagram.get("b".into()).unwrap().center().y(), 3.0);
    }

    #[test]
    fn test_render_svg_end_to_end() {
        let svg = Pgm::new()
            .with_node(Node::latent(r"$\theta$").at(1.0, 2.0))
            .with_node(Node::data("$x$").below("theta"))
            .render_svg()
            .unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
    }
}
