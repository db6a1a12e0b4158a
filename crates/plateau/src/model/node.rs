//! Node builder for PGM diagrams.

use plateau_core::{geometry::Point, identifier::Id};

use crate::{error::PlateauError, model::Placement, model::Position, symbol};

/// The role a node plays in the model, which controls its default styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// An unobserved random variable.
    Latent,
    /// An observed random variable, shaded when rendered.
    Data,
    /// A parameter of another node.
    Param,
    /// A fixed hyperparameter, rendered as a small solid dot.
    Hyper,
    /// A borderless text annotation.
    Text,
}

/// Fluent builder for a single diagram node.
///
/// A node is labeled by a LaTeX-style math symbol, from which its identifier
/// is derived (see [`symbol::name_from_symbol`]), and is placed either at
/// absolute coordinates or relative to another node by name. Validation that
/// cannot happen mid-chain (a missing placement, a parameter with nothing to
/// point at) is deferred to [`Pgm::build`].
///
/// # Examples
///
/// ```
/// use plateau::model::Node;
///
/// let theta = Node::latent(r"$\theta$").at(1.0, 1.0).with_edge_to("x");
/// let x = Node::data(r"$x$").below("theta");
/// let alpha = Node::hyper(r"$\alpha$").above("theta");
/// ```
///
/// [`Pgm::build`]: crate::Pgm::build
#[derive(Debug, Clone)]
pub struct Node {
    symbol: String,
    explicit_name: Option<Id>,
    kind: NodeKind,
    position: Option<Position>,
    conflicting_placement: bool,
    shift: Point,
    scale: f32,
    observed: Option<bool>,
    fixed: Option<bool>,
    label_offset: Option<Point>,
    edges_to: Vec<Id>,
    of: Vec<Id>,
}

impl Node {
    const DEFAULT_SCALE: f32 = 2.0;

    fn new(symbol: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            symbol: symbol.into(),
            explicit_name: None,
            kind,
            position: None,
            conflicting_placement: false,
            shift: Point::default(),
            scale: Self::DEFAULT_SCALE,
            observed: None,
            fixed: None,
            label_offset: None,
            edges_to: Vec::new(),
            of: Vec::new(),
        }
    }

    /// Creates an unobserved random variable node.
    pub fn latent(symbol: impl Into<String>) -> Self {
        Self::new(symbol, NodeKind::Latent)
    }

    /// Creates an observed data node (shaded by default).
    pub fn data(symbol: impl Into<String>) -> Self {
        Self::new(symbol, NodeKind::Data)
    }

    /// Creates a parameter node.
    ///
    /// A parameter must name the node(s) it belongs to via [`Node::of`] or
    /// [`Node::of_all`], or implicitly by anchoring it to that node with a
    /// relative placement. Either way, an edge from the parameter to its
    /// target is added at build time.
    pub fn param(symbol: impl Into<String>) -> Self {
        Self::new(symbol, NodeKind::Param)
    }

    /// Creates a fixed hyperparameter node.
    ///
    /// Like [`Node::param`], but `fixed` by default: rendered as a small
    /// solid dot with the label offset to the side.
    pub fn hyper(symbol: impl Into<String>) -> Self {
        Self::new(symbol, NodeKind::Hyper)
    }

    /// Creates a borderless text annotation node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(text, NodeKind::Text)
    }

    // --- placement -------------------------------------------------------

    /// Places the node at absolute coordinates, in diagram units.
    ///
    /// An absolute position is exact: [`Node::shifted`] has no effect on it.
    pub fn at(self, x: f32, y: f32) -> Self {
        self.set_position(Position::At(Point::new(x, y)))
    }

    /// Places the node above the named anchor node.
    pub fn above(self, anchor: impl Into<Id>) -> Self {
        self.place(Placement::Above, anchor)
    }

    /// Places the node above the anchor, nudged left.
    pub fn above_left(self, anchor: impl Into<Id>) -> Self {
        self.place(Placement::AboveLeft, anchor)
    }

    /// Places the node above the anchor, nudged right.
    pub fn above_right(self, anchor: impl Into<Id>) -> Self {
        self.place(Placement::AboveRight, anchor)
    }

    /// Places the node below the named anchor node.
    pub fn below(self, anchor: impl Into<Id>) -> Self {
        self.place(Placement::Below, anchor)
    }

    /// Places the node below the anchor, nudged left.
    pub fn below_left(self, anchor: impl Into<Id>) -> Self {
        self.place(Placement::BelowLeft, anchor)
    }

    /// Places the node below the anchor, nudged right.
    pub fn below_right(self, anchor: impl Into<Id>) -> Self {
        self.place(Placement::BelowRight, anchor)
    }

    /// Places the node to the left of the named anchor node.
    pub fn left_of(self, anchor: impl Into<Id>) -> Self {
        self.place(Placement::LeftOf, anchor)
    }

    /// Places the node to the left of the anchor, nudged up.
    pub fn left_of_above(self, anchor: impl Into<Id>) -> Self {
        self.place(Placement::LeftOfAbove, anchor)
    }

    /// Places the node to the left of the anchor, nudged down.
    pub fn left_of_below(self, anchor: impl Into<Id>) -> Self {
        self.place(Placement::LeftOfBelow, anchor)
    }

    /// Places the node to the right of the named anchor node.
    pub fn right_of(self, anchor: impl Into<Id>) -> Self {
        self.place(Placement::RightOf, anchor)
    }

    /// Places the node to the right of the anchor, nudged up.
    pub fn right_of_above(self, anchor: impl Into<Id>) -> Self {
        self.place(Placement::RightOfAbove, anchor)
    }

    /// Places the node to the right of the anchor, nudged down.
    pub fn right_of_below(self, anchor: impl Into<Id>) -> Self {
        self.place(Placement::RightOfBelow, anchor)
    }

    fn place(self, placement: Placement, anchor: impl Into<Id>) -> Self {
        self.set_position(Position::Relative {
            placement,
            anchor: anchor.into(),
        })
    }

    fn set_position(mut self, position: Position) -> Self {
        if self.position.is_some() {
            // Surfaced as ConflictingPlacement when the diagram is built.
            self.conflicting_placement = true;
        }
        self.position = Some(position);
        self
    }

    // --- modifiers -------------------------------------------------------

    /// Nudges a relatively-placed node after its position is computed.
    pub fn shifted(mut self, dx: f32, dy: f32) -> Self {
        self.shift = Point::new(dx, dy);
        self
    }

    /// Sets the node scale. Defaults to 2.0.
    pub fn scaled(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Overrides whether the node is drawn shaded.
    pub fn observed(mut self, observed: bool) -> Self {
        self.observed = Some(observed);
        self
    }

    /// Overrides whether the node is drawn as a fixed dot.
    pub fn fixed(mut self, fixed: bool) -> Self {
        self.fixed = Some(fixed);
        self
    }

    /// Overrides the identifier derived from the symbol.
    pub fn named(mut self, name: impl Into<Id>) -> Self {
        self.explicit_name = Some(name.into());
        self
    }

    /// Sets the label offset in pixels, for fixed nodes.
    pub fn with_label_offset(mut self, dx: f32, dy: f32) -> Self {
        self.label_offset = Some(Point::new(dx, dy));
        self
    }

    /// Adds a directed edge from this node to the named node.
    pub fn with_edge_to(mut self, name: impl Into<Id>) -> Self {
        self.edges_to.push(name.into());
        self
    }

    /// Adds directed edges from this node to each named node.
    pub fn with_edges_to<I>(mut self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Id>,
    {
        self.edges_to.extend(names.into_iter().map(Into::into));
        self
    }

    /// Declares the node this parameter belongs to.
    pub fn of(mut self, name: impl Into<Id>) -> Self {
        self.of.push(name.into());
        self
    }

    /// Declares several nodes this parameter belongs to.
    pub fn of_all<I>(mut self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Id>,
    {
        self.of.extend(names.into_iter().map(Into::into));
        self
    }

    // --- accessors -------------------------------------------------------

    /// The node's identifier: the explicit name if one was set, otherwise
    /// derived from the symbol.
    ///
    /// # Errors
    ///
    /// Returns [`PlateauError::Symbol`] if the symbol cannot be parsed.
    pub fn name(&self) -> Result<Id, PlateauError> {
        match self.explicit_name {
            Some(name) => Ok(name),
            None => symbol::name_from_symbol(&self.symbol).map(|name| Id::new(&name)),
        }
    }

    /// The node's label symbol.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The node's kind.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Whether the node is rendered shaded. Data nodes are observed unless
    /// overridden.
    pub fn is_observed(&self) -> bool {
        self.observed.unwrap_or(self.kind == NodeKind::Data)
    }

    /// Whether the node is rendered as a fixed dot. Hyperparameters are
    /// fixed unless overridden.
    pub fn is_fixed(&self) -> bool {
        self.fixed.unwrap_or(self.kind == NodeKind::Hyper)
    }

    pub(crate) fn position(&self) -> Option<Position> {
        self.position
    }

    pub(crate) fn has_conflicting_placement(&self) -> bool {
        self.conflicting_placement
    }

    pub(crate) fn shift(&self) -> Point {
        self.shift
    }

    pub(crate) fn scale(&self) -> f32 {
        self.scale
    }

    pub(crate) fn label_offset(&self) -> Option<Point> {
        self.label_offset
    }

    pub(crate) fn edges_to(&self) -> &[Id] {
        &self.edges_to
    }

    pub(crate) fn of_targets(&self) -> &[Id] {
        &self.of
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_derivation() {
        let node = Node::latent(r"$\sigma_c^2$");
        assert_eq!(node.name().unwrap(), "sigma_c_sq");
    }

    #[test]
    fn test_explicit_name_wins() {
        let node = Node::latent(r"$\sigma_c^2$").named("noise");
        assert_eq!(node.name().unwrap(), "noise");
    }

    #[test]
    fn test_bad_symbol_is_an_error() {
        let node = Node::latent(r"$x^3$");
        assert!(node.name().is_err());
    }

    #[test]
    fn test_kind_defaults() {
        assert!(Node::data("$x$").is_observed());
        assert!(!Node::latent("$x$").is_observed());
        assert!(Node::hyper("$a$").is_fixed());
        assert!(!Node::param("$a$").is_fixed());

        // Defaults are overridable
        assert!(!Node::data("$x$").observed(false).is_observed());
        assert!(Node::latent("$x$").fixed(true).is_fixed());
    }

    #[test]
    fn test_second_placement_is_recorded_as_conflict() {
        let node = Node::latent("$x$").at(0.0, 0.0).above("y");
        assert!(node.has_conflicting_placement());

        let node = Node::latent("$x$").at(0.0, 0.0);
        assert!(!node.has_conflicting_placement());
    }

    #[test]
    fn test_edges_accumulate() {
        let node = Node::latent("$w$")
            .at(0.0, 0.0)
            .with_edge_to("x")
            .with_edges_to(["y", "z"]);
        assert_eq!(node.edges_to().len(), 3);
    }

    #[test]
    fn test_param_of_accumulates() {
        let param = Node::param("$y$").at(1.0, 1.0).of_all(["x", "w"]);
        assert_eq!(param.of_targets(), [Id::new("x"), Id::new("w")]);

        let single = Node::param("$y$").at(1.0, 1.0).of("x");
        assert_eq!(single.of_targets(), [Id::new("x")]);
    }
}
