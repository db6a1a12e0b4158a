//! Geometric primitives for PGM diagram layout.
//!
//! This module provides the value types used throughout Plateau for node
//! placement and plate sizing.
//!
//! # Coordinate System
//!
//! Plateau's model space follows the mathematical convention rather than the
//! screen convention:
//!
//! ```text
//!    +Y
//!     ▲
//!     │
//!     │
//!   (0,0) ────────► +X
//! ```
//!
//! - **Origin**: bottom-left at `(0, 0)`
//! - **X-axis**: increases rightward
//! - **Y-axis**: increases upward
//!
//! Coordinates are expressed in abstract diagram units; the SVG exporter is
//! responsible for flipping the y-axis and scaling units to pixels.

/// A 2D point in diagram unit space.
///
/// # Examples
///
/// ```
/// # use plateau_core::geometry::Point;
/// let anchor = Point::new(1.0, 2.0);
/// let shifted = anchor.add(Point::new(0.0, -1.0));
/// assert_eq!(shifted.y(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point.
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point.
    pub fn y(self) -> f32 {
        self.y
    }

    /// Checks if both coordinates are zero.
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point component-wise, returning a new point.
    pub fn add(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point component-wise, returning a new point.
    pub fn sub(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Multiplies both coordinates by the given factor.
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Width and height dimensions of a diagram or element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size.
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size.
    pub fn height(self) -> f32 {
        self.height
    }

    /// Multiplies both dimensions by the given factor.
    pub fn scale(self, factor: f32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }
}

/// A rectangle anchored at its bottom-left corner, in y-up model space.
///
/// Plates and the overall diagram extent are described by `Rect`. Unlike a
/// min/max bounding box, a `Rect` keeps its width and height explicit, which
/// matches how plate margins and overlap adjustments are calculated.
///
/// # Examples
///
/// ```
/// # use plateau_core::geometry::{Point, Rect};
/// let rect = Rect::new(0.0, 0.0, 2.0, 1.0);
/// assert_eq!(rect.right(), 2.0);
/// assert_eq!(rect.top(), 1.0);
/// assert!(rect.contains(Point::new(1.0, 0.5)));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl Rect {
    /// Creates a rectangle from its bottom-left corner and dimensions.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the x-coordinate of the bottom-left corner.
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the bottom-left corner.
    pub fn y(self) -> f32 {
        self.y
    }

    /// Returns the width of the rectangle.
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height of the rectangle.
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns the x-coordinate of the right edge.
    pub fn right(self) -> f32 {
        self.x + self.width
    }

    /// Returns the y-coordinate of the top edge.
    pub fn top(self) -> f32 {
        self.y + self.height
    }

    /// Returns true if the point lies inside the rectangle (inclusive).
    pub fn contains(self, point: Point) -> bool {
        point.x() >= self.x
            && point.x() <= self.right()
            && point.y() >= self.y
            && point.y() <= self.top()
    }

    /// Moves the corner and grows the dimensions by the given deltas.
    pub fn adjust(self, dx: f32, dy: f32, dw: f32, dh: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width + dw,
            height: self.height + dh,
        }
    }

    /// Expands this rectangle to contain another.
    pub fn union(self, other: Rect) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let top = self.top().max(other.top());
        Self {
            x,
            y,
            width: right - x,
            height: top - y,
        }
    }

    /// Expands this rectangle to contain a point.
    pub fn expand_to(self, point: Point) -> Self {
        let x = self.x.min(point.x());
        let y = self.y.min(point.y());
        let right = self.right().max(point.x());
        let top = self.top().max(point.y());
        Self {
            x,
            y,
            width: right - x,
            height: top - y,
        }
    }

    /// Grows the rectangle outward by the same amount on all sides.
    pub fn inflate(self, amount: f32) -> Self {
        Self {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + 2.0 * amount,
            height: self.height + 2.0 * amount,
        }
    }
}

/// Rounds a coordinate to two decimal places.
///
/// Plate sizing and shared-edge detection work on coordinates rounded to two
/// decimals so that accumulated floating point error does not change which
/// edges count as shared.
pub fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// Computes the axis-aligned bounding rectangle of a set of points.
///
/// Returns `None` for an empty iterator.
pub fn bounding_rect(points: impl IntoIterator<Item = Point>) -> Option<Rect> {
    let mut iter = points.into_iter();
    let first = iter.next()?;
    let rect = Rect::new(first.x(), first.y(), 0.0, 0.0);
    Some(iter.fold(rect, Rect::expand_to))
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;

    #[test]
    fn test_point_ops() {
        let p = Point::new(1.0, 2.0);
        assert_eq!(p.add(Point::new(0.5, -1.0)), Point::new(1.5, 1.0));
        assert_eq!(p.sub(Point::new(1.0, 2.0)), Point::default());
        assert_eq!(p.scale(2.0), Point::new(2.0, 4.0));
        assert!(Point::default().is_zero());
        assert!(!p.is_zero());
    }

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!(approx_eq!(f32, a.distance(b), 5.0));
        assert!(approx_eq!(f32, a.distance(a), 0.0));
    }

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(rect.right(), 4.0);
        assert_eq!(rect.top(), 6.0);
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(0.0, 0.0, 2.0, 2.0);
        assert!(rect.contains(Point::new(1.0, 1.0)));
        assert!(rect.contains(Point::new(0.0, 2.0)));
        assert!(!rect.contains(Point::new(2.1, 1.0)));
        assert!(!rect.contains(Point::new(1.0, -0.1)));
    }

    #[test]
    fn test_rect_adjust() {
        let rect = Rect::new(1.0, 1.0, 2.0, 2.0).adjust(-0.15, 0.0, 0.15, 0.3);
        assert!(approx_eq!(f32, rect.x(), 0.85));
        assert!(approx_eq!(f32, rect.width(), 2.15));
        assert!(approx_eq!(f32, rect.height(), 2.3));
    }

    #[test]
    fn test_rect_union() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        let b = Rect::new(2.0, -1.0, 1.0, 1.0);
        let merged = a.union(b);
        assert_eq!(merged.x(), 0.0);
        assert_eq!(merged.y(), -1.0);
        assert_eq!(merged.right(), 3.0);
        assert_eq!(merged.top(), 1.0);
    }

    #[test]
    fn test_rect_inflate() {
        let rect = Rect::new(1.0, 1.0, 2.0, 2.0).inflate(0.5);
        assert_eq!(rect.x(), 0.5);
        assert_eq!(rect.y(), 0.5);
        assert_eq!(rect.width(), 3.0);
        assert_eq!(rect.height(), 3.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.004), 1.0);
        assert_eq!(round2(1.005), 1.01);
        assert_eq!(round2(-0.349_999_99), -0.35);
    }

    #[test]
    fn test_bounding_rect() {
        let points = [
            Point::new(1.0, 1.0),
            Point::new(-1.0, 2.0),
            Point::new(0.5, -0.5),
        ];
        let rect = bounding_rect(points).unwrap();
        assert_eq!(rect.x(), -1.0);
        assert_eq!(rect.y(), -0.5);
        assert_eq!(rect.right(), 1.0);
        assert_eq!(rect.top(), 2.0);
    }

    #[test]
    fn test_bounding_rect_empty() {
        assert!(bounding_rect(std::iter::empty()).is_none());
    }

    #[test]
    fn test_bounding_rect_single_point() {
        let rect = bounding_rect([Point::new(2.0, 3.0)]).unwrap();
        assert_eq!(rect.x(), 2.0);
        assert_eq!(rect.y(), 3.0);
        assert_eq!(rect.width(), 0.0);
        assert_eq!(rect.height(), 0.0);
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            /// Every input point lies inside its bounding rectangle.
            #[test]
            fn bounding_rect_contains_inputs(
                coords in prop::collection::vec((-100.0f32..100.0, -100.0f32..100.0), 1..20)
            ) {
                let points: Vec<Point> = coords.iter().map(|&(x, y)| Point::new(x, y)).collect();
                let rect = bounding_rect(points.iter().copied()).unwrap();
                for point in points {
                    prop_assert!(rect.contains(point));
                }
            }

            /// Union always covers both inputs.
            #[test]
            fn union_covers_both(
                (ax, ay, aw, ah) in (-50.0f32..50.0, -50.0f32..50.0, 0.0f32..50.0, 0.0f32..50.0),
                (bx, by, bw, bh) in (-50.0f32..50.0, -50.0f32..50.0, 0.0f32..50.0, 0.0f32..50.0),
            ) {
                let a = Rect::new(ax, ay, aw, ah);
                let b = Rect::new(bx, by, bw, bh);
                let merged = a.union(b);
                prop_assert!(merged.x() <= a.x() && merged.x() <= b.x());
                prop_assert!(merged.right() >= a.right() && merged.right() >= b.right());
                prop_assert!(merged.y() <= a.y() && merged.y() <= b.y());
                prop_assert!(merged.top() >= a.top() && merged.top() >= b.top());
            }
        }
    }
}
