//! Builder model for PGM diagrams.
//!
//! This module holds the user-facing builders that describe a PGM before
//! layout: [`Node`] for random variables, parameters, and annotations, and
//! [`Plate`] for repeated sub-structures. The builders record intent only;
//! everything is validated and resolved when [`Pgm::build`] runs.
//!
//! [`Pgm::build`]: crate::Pgm::build

mod node;
mod plate;

pub use node::{Node, NodeKind};
pub use plate::{LabelPosition, Plate, PlateMember};

use plateau_core::{geometry::Point, identifier::Id};

/// Relative placement of a node with respect to an anchor node.
///
/// The cardinal variants (`Above`, `Below`, `LeftOf`, `RightOf`) offset the
/// node by the configured vertical or horizontal offset. The directional
/// variants add a fixed lateral nudge on top: `AboveLeft`/`AboveRight` and
/// `BelowLeft`/`BelowRight` nudge along x, `LeftOfAbove`/`LeftOfBelow` and
/// `RightOfAbove`/`RightOfBelow` nudge along y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    Above,
    AboveLeft,
    AboveRight,
    Below,
    BelowLeft,
    BelowRight,
    LeftOf,
    LeftOfAbove,
    LeftOfBelow,
    RightOf,
    RightOfAbove,
    RightOfBelow,
}

impl Placement {
    /// Base offset from the anchor, given the configured offsets.
    pub(crate) fn base_offset(self, vertical: f32, horizontal: f32) -> Point {
        match self {
            Self::Above | Self::AboveLeft | Self::AboveRight => Point::new(0.0, vertical),
            Self::Below | Self::BelowLeft | Self::BelowRight => Point::new(0.0, -vertical),
            Self::LeftOf | Self::LeftOfAbove | Self::LeftOfBelow => Point::new(-horizontal, 0.0),
            Self::RightOf | Self::RightOfAbove | Self::RightOfBelow => Point::new(horizontal, 0.0),
        }
    }

    /// Fixed lateral nudge applied by the directional variants.
    pub(crate) fn nudge(self) -> Point {
        const NUDGE: f32 = 0.3;
        match self {
            Self::AboveLeft | Self::BelowLeft => Point::new(-NUDGE, 0.0),
            Self::AboveRight | Self::BelowRight => Point::new(NUDGE, 0.0),
            Self::LeftOfAbove | Self::RightOfAbove => Point::new(0.0, NUDGE),
            Self::LeftOfBelow | Self::RightOfBelow => Point::new(0.0, -NUDGE),
            _ => Point::default(),
        }
    }

    /// True for `left_of*` placements.
    pub(crate) fn is_leftward(self) -> bool {
        matches!(self, Self::LeftOf | Self::LeftOfAbove | Self::LeftOfBelow)
    }

    /// True for `right_of*` placements.
    pub(crate) fn is_rightward(self) -> bool {
        matches!(self, Self::RightOf | Self::RightOfAbove | Self::RightOfBelow)
    }

    /// True for `below*` placements. Controls the default label offset of
    /// fixed nodes, which would otherwise collide with their anchor.
    pub(crate) fn is_downward(self) -> bool {
        matches!(self, Self::Below | Self::BelowLeft | Self::BelowRight)
    }
}

/// Where a node goes: absolute coordinates, or relative to an anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// Absolute coordinates in diagram units. Shifts are ignored.
    At(Point),
    /// Placed relative to the named anchor node.
    Relative { placement: Placement, anchor: Id },
}
