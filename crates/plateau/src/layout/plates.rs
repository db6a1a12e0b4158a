//! Plate sizing and overlap deconfliction.

use std::collections::{HashMap, HashSet};

use log::debug;

use plateau_core::{
    color::Color,
    geometry::{Point, Rect, bounding_rect, round2},
    identifier::Id,
};

use crate::{
    error::PlateauError,
    model::{LabelPosition, Plate, PlateMember},
};

/// Margins between a plate's outermost node centers and its border. The
/// bottom margin is smaller than the top one because the label usually sits
/// at the bottom.
const MARGIN_LEFT: f32 = 0.4;
const MARGIN_BOTTOM: f32 = 0.35;
const MARGIN_RIGHT: f32 = 0.4;
const MARGIN_TOP: f32 = 0.4;

/// How far an enclosing plate is pushed out past an enclosed one.
const SURROUND: f32 = 0.15;

/// A plate with its final rectangle and resolved styling.
#[derive(Debug, Clone)]
pub struct PlacedPlate {
    label: String,
    rect: Rect,
    label_position: LabelPosition,
    shift: f32,
    bbox_color: Option<Color>,
}

impl PlacedPlate {
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Bounding rectangle in diagram units.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn label_position(&self) -> LabelPosition {
        self.label_position
    }

    /// Vertical label adjustment in diagram units.
    pub fn shift(&self) -> f32 {
        self.shift
    }

    /// Fill color, if the plate is not left open.
    pub fn bbox_color(&self) -> Option<&Color> {
        self.bbox_color.as_ref()
    }
}

/// Sizes every plate around its members, then adjusts overlapping plates so
/// their borders stay distinguishable.
pub(super) fn place(
    plates: &[Plate],
    centers: &HashMap<Id, Point>,
) -> Result<Vec<PlacedPlate>, PlateauError> {
    let mut rects = Vec::with_capacity(plates.len());
    let mut member_sets = Vec::with_capacity(plates.len());
    for plate in plates {
        let names = member_names(plate)?;
        let rect = match plate.rect_override() {
            Some(rect) => rect,
            None => enclosing_rect(&names, centers)
                .ok_or_else(|| PlateauError::EmptyPlate(plate.label().to_string()))?,
        };
        rects.push(rect);
        member_sets.push(names.into_iter().collect::<HashSet<Id>>());
    }

    deconflict(&mut rects, &member_sets, plates);

    Ok(plates
        .iter()
        .zip(rects)
        .map(|(plate, rect)| PlacedPlate {
            label: plate.label().to_string(),
            rect,
            label_position: plate.label_position(),
            shift: plate.shift(),
            bbox_color: plate.bbox_color().cloned(),
        })
        .collect())
}

/// All node names a plate encloses, owned members and references alike.
fn member_names(plate: &Plate) -> Result<Vec<Id>, PlateauError> {
    plate
        .members()
        .iter()
        .map(|member| match member {
            PlateMember::Node(node) => node.name(),
            PlateMember::Ref(name) => Ok(*name),
        })
        .collect()
}

/// The rectangle that encloses the named node centers with label margins.
fn enclosing_rect(names: &[Id], centers: &HashMap<Id, Point>) -> Option<Rect> {
    let bounds = bounding_rect(names.iter().map(|name| centers[name]))?;
    Some(with_margins(bounds))
}

/// Expands a bounding box of node centers by the label margins. Also used
/// to frame the whole diagram, which sizes its canvas as if a plate
/// surrounded everything.
pub(super) fn with_margins(bounds: Rect) -> Rect {
    Rect::new(
        bounds.x() - MARGIN_LEFT,
        bounds.y() - MARGIN_BOTTOM,
        round2(bounds.width() + MARGIN_LEFT + MARGIN_RIGHT),
        round2(bounds.height() + MARGIN_BOTTOM + MARGIN_TOP),
    )
}

/// Adjusts every overlapping pair of plates, earlier-defined plates first.
fn deconflict(rects: &mut [Rect], member_sets: &[HashSet<Id>], plates: &[Plate]) {
    for i in 0..rects.len() {
        for j in ((i + 1)..rects.len()).rev() {
            if member_sets[i].is_disjoint(&member_sets[j]) {
                continue;
            }
            debug!(
                plate = plates[i].label(),
                other = plates[j].label();
                "deconflicting overlapping plates"
            );
            deconflict_pair(rects, member_sets, i, j);
        }
    }
}

fn deconflict_pair(rects: &mut [Rect], member_sets: &[HashSet<Id>], i: usize, j: usize) {
    if member_sets[i] == member_sets[j] {
        surround(rects, j, i);
    } else if member_sets[i].is_superset(&member_sets[j]) {
        surround(rects, i, j);
    } else if member_sets[j].is_superset(&member_sets[i]) {
        surround(rects, j, i);
    } else {
        // Partial overlap: nudge the later plate down and stretch both.
        rects[j] = rects[j].adjust(0.0, -0.2, 0.0, 0.2);
        rects[i] = rects[i].adjust(0.0, 0.0, 0.0, 0.1);
    }
}

/// Grows the outer plate past the inner one along every shared edge.
///
/// Edges count as shared when they agree to two decimals. A shared bottom
/// edge resets the height delta accumulated from a shared right edge.
fn surround(rects: &mut [Rect], outer: usize, inner: usize) {
    let s = rects[outer];
    let o = rects[inner];
    let mut dx = 0.0;
    let mut dy = 0.0;
    let mut dw = 0.0;
    let mut dh = 0.0;

    if round2(s.x()) == round2(o.x()) {
        dx = -SURROUND;
        dw = SURROUND;
    }
    if round2(s.right()) == round2(o.right()) {
        dy = -SURROUND;
        dw += SURROUND;
        dh = 2.0 * SURROUND;
    }
    if round2(s.y()) == round2(o.y()) {
        dy = -SURROUND;
        dh = SURROUND;
    }
    if round2(s.top()) == round2(o.top()) {
        dh += SURROUND;
    }

    rects[outer] = s.adjust(dx, dy, dw, dh);
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;

    fn set(names: &[&str]) -> HashSet<Id> {
        names.iter().map(|name| Id::new(name)).collect()
    }

    #[test]
    fn test_enclosing_rect_margins() {
        let centers: HashMap<Id, Point> = [
            (Id::new("a"), Point::new(1.0, 1.0)),
            (Id::new("b"), Point::new(3.0, 2.0)),
        ]
        .into();
        let rect = enclosing_rect(&[Id::new("a"), Id::new("b")], &centers).unwrap();
        assert!(approx_eq!(f32, rect.x(), 0.6));
        assert!(approx_eq!(f32, rect.y(), 0.65));
        assert!(approx_eq!(f32, rect.width(), 2.8));
        assert!(approx_eq!(f32, rect.height(), 1.75));
    }

    #[test]
    fn test_surround_identical_rects_grow_on_all_edges() {
        let rect = Rect::new(1.0, 1.0, 2.0, 2.0);
        let mut rects = vec![rect, rect];
        surround(&mut rects, 0, 1);

        let outer = rects[0];
        assert!(approx_eq!(f32, outer.x(), 0.85));
        assert!(approx_eq!(f32, outer.y(), 0.85));
        assert!(approx_eq!(f32, outer.width(), 2.3));
        // A shared bottom resets the height from the shared right edge, so
        // the total is amount (bottom) + amount (top), not 3x.
        assert!(approx_eq!(f32, outer.height(), 2.3));
        assert_eq!(rects[1], rect);
    }

    #[test]
    fn test_surround_only_shared_edges_move() {
        // Same left edge, everything else different.
        let mut rects = vec![Rect::new(1.0, 1.0, 3.0, 3.0), Rect::new(1.0, 1.5, 2.0, 2.0)];
        surround(&mut rects, 0, 1);
        let outer = rects[0];
        assert!(approx_eq!(f32, outer.x(), 0.85));
        assert!(approx_eq!(f32, outer.y(), 1.0));
        assert!(approx_eq!(f32, outer.width(), 3.15));
        assert!(approx_eq!(f32, outer.height(), 3.0));
    }

    #[test]
    fn test_partial_overlap_nudges_both() {
        let member_sets = [set(&["a", "b"]), set(&["b", "c"])];
        let mut rects = [Rect::new(0.0, 0.0, 2.0, 2.0), Rect::new(1.0, 0.0, 2.0, 2.0)];
        deconflict_pair(&mut rects, &member_sets, 0, 1);

        assert!(approx_eq!(f32, rects[1].y(), -0.2));
        assert!(approx_eq!(f32, rects[1].height(), 2.2));
        assert!(approx_eq!(f32, rects[0].height(), 2.1));
    }

    #[test]
    fn test_superset_plate_surrounds_subset() {
        let member_sets = [set(&["a", "b", "c"]), set(&["b"])];
        let rect = Rect::new(0.0, 0.0, 2.0, 2.0);
        let mut rects = [rect, Rect::new(0.5, 0.5, 1.0, 1.0)];
        deconflict_pair(&mut rects, &member_sets, 0, 1);

        // No shared edges, so the superset plate is left untouched.
        assert_eq!(rects[0], rect);
    }
}
