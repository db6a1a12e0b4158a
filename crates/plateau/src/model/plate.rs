//! Plate builder for repeated sub-structures.

use std::str::FromStr;

use plateau_core::{color::Color, geometry::Rect, identifier::Id};

use crate::model::Node;

/// Corner of a plate where its label is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LabelPosition {
    #[default]
    BottomRight,
    BottomLeft,
    TopRight,
    TopLeft,
}

impl FromStr for LabelPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bottom-right" => Ok(Self::BottomRight),
            "bottom-left" => Ok(Self::BottomLeft),
            "top-right" => Ok(Self::TopRight),
            "top-left" => Ok(Self::TopLeft),
            other => Err(format!(
                "unknown label position `{other}`; expected one of \
                 bottom-right, bottom-left, top-right, top-left"
            )),
        }
    }
}

/// A node owned by a plate, or a reference to a node defined elsewhere.
///
/// Referenced nodes count towards the plate's bounding box, but the plate
/// does not claim them for the purpose of placement clearance. This matters
/// for plates that overlap: a shared node belongs to the plate that defines
/// it and is merely surrounded by the others.
#[derive(Debug, Clone)]
pub enum PlateMember {
    Node(Node),
    Ref(Id),
}

/// Fluent builder for a plate, the rounded box that marks repetition in a
/// PGM. Nodes added with [`Plate::with_node`] belong to the plate; nodes
/// named with [`Plate::with_node_ref`] are enclosed without being owned.
///
/// # Examples
///
/// ```
/// use plateau::model::{Node, Plate};
///
/// let plate = Plate::new("$n = 1..N$")
///     .with_node(Node::latent("$z_n$").at(1.0, 1.0))
///     .with_node(Node::data("$x_n$").below("z_n"));
/// ```
#[derive(Debug, Clone)]
pub struct Plate {
    label: String,
    label_position: LabelPosition,
    shift: f32,
    bbox_color: Option<Color>,
    rect: Option<Rect>,
    members: Vec<PlateMember>,
}

impl Plate {
    const DEFAULT_SHIFT: f32 = -0.1;

    /// Creates an empty plate with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            label_position: LabelPosition::default(),
            shift: Self::DEFAULT_SHIFT,
            bbox_color: None,
            rect: None,
            members: Vec::new(),
        }
    }

    /// Adds a node owned by this plate.
    pub fn with_node(mut self, node: Node) -> Self {
        self.members.push(PlateMember::Node(node));
        self
    }

    /// Adds several nodes owned by this plate.
    pub fn with_nodes(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.members
            .extend(nodes.into_iter().map(PlateMember::Node));
        self
    }

    /// Encloses a node defined elsewhere without taking ownership of it.
    pub fn with_node_ref(mut self, name: impl Into<Id>) -> Self {
        self.members.push(PlateMember::Ref(name.into()));
        self
    }

    /// Sets the label's vertical adjustment, in diagram units.
    pub fn with_shift(mut self, shift: f32) -> Self {
        self.shift = shift;
        self
    }

    /// Sets the corner where the label is drawn.
    pub fn with_label_position(mut self, position: LabelPosition) -> Self {
        self.label_position = position;
        self
    }

    /// Overrides the computed bounding rectangle.
    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = Some(rect);
        self
    }

    /// Fills the plate with the given color instead of leaving it open.
    pub fn with_bbox_color(mut self, color: Color) -> Self {
        self.bbox_color = Some(color);
        self
    }

    /// The plate's label text.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn label_position(&self) -> LabelPosition {
        self.label_position
    }

    pub(crate) fn shift(&self) -> f32 {
        self.shift
    }

    pub(crate) fn bbox_color(&self) -> Option<&Color> {
        self.bbox_color.as_ref()
    }

    pub(crate) fn rect_override(&self) -> Option<Rect> {
        self.rect
    }

    pub(crate) fn members(&self) -> &[PlateMember] {
        &self.members
    }
}
