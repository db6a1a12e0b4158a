//! Layout pipeline: resolves builder intent into placed geometry.
//!
//! [`solve`] runs the full pipeline over a [`Pgm`]: flatten and validate the
//! builders, order placement dependencies topologically, compute node
//! centers, resolve edges, size the plates, and measure the diagram extent.
//! The output [`Diagram`] is pure geometry; rendering it is the exporter's
//! job.
//!
//! [`Pgm`]: crate::Pgm

mod plates;

pub use plates::PlacedPlate;

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, info, trace};
use petgraph::{
    algo::toposort,
    graph::{DiGraph, NodeIndex},
};

use plateau_core::{
    geometry::{Point, Size, bounding_rect},
    identifier::Id,
};

use crate::{
    Pgm,
    error::PlateauError,
    model::{Node, NodeKind, PlateMember, Position},
};

/// Extra horizontal clearance when a node sits beside an anchor that is
/// enclosed by a plate the node is not part of.
const PLATE_CLEARANCE: f32 = 0.1;

/// Extra extent on each axis when the diagram contains plates, so the
/// outermost plate borders stay inside the canvas.
const PLATE_EXTENT_PAD: f32 = 0.3;

/// A node with its final center position and resolved styling.
#[derive(Debug, Clone)]
pub struct PlacedNode {
    name: Id,
    symbol: String,
    kind: NodeKind,
    center: Point,
    scale: f32,
    observed: bool,
    fixed: bool,
    label_offset: Point,
}

impl PlacedNode {
    pub fn name(&self) -> Id {
        self.name
    }

    /// The raw label symbol, as given to the builder.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Center position in diagram units.
    pub fn center(&self) -> Point {
        self.center
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Whether the node is drawn shaded.
    pub fn is_observed(&self) -> bool {
        self.observed
    }

    /// Whether the node is drawn as a small solid dot.
    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    /// Label offset in pixels, honored for fixed nodes.
    pub fn label_offset(&self) -> Point {
        self.label_offset
    }
}

/// A fully placed diagram, ready for export.
#[derive(Debug, Clone, Default)]
pub struct Diagram {
    nodes: IndexMap<Id, PlacedNode>,
    plates: Vec<PlacedPlate>,
    edges: Vec<(Id, Id)>,
    extent: Size,
}

impl Diagram {
    /// Placed nodes, in definition order.
    pub fn nodes(&self) -> impl Iterator<Item = &PlacedNode> {
        self.nodes.values()
    }

    /// Looks up a placed node by name.
    pub fn get(&self, name: Id) -> Option<&PlacedNode> {
        self.nodes.get(&name)
    }

    /// Placed plates, in definition order.
    pub fn plates(&self) -> &[PlacedPlate] {
        &self.plates
    }

    /// Directed edges as `(from, to)` pairs of node names.
    pub fn edges(&self) -> &[(Id, Id)] {
        &self.edges
    }

    /// Diagram extent in units, measured from the origin.
    pub fn extent(&self) -> Size {
        self.extent
    }
}

/// A builder node paired with its resolved name and owning plate.
struct FlatNode<'a> {
    node: &'a Node,
    name: Id,
    plate: Option<usize>,
}

/// Resolves a [`Pgm`]'s builders into a placed [`Diagram`].
///
/// [`Pgm`]: crate::Pgm
pub(crate) fn solve(pgm: &Pgm) -> Result<Diagram, PlateauError> {
    let flat = flatten(pgm)?;
    if flat.is_empty() {
        return Err(PlateauError::Empty);
    }
    let by_name: HashMap<Id, usize> = flat
        .iter()
        .enumerate()
        .map(|(index, entry)| (entry.name, index))
        .collect();

    validate_references(pgm, &flat, &by_name)?;

    let order = placement_order(&flat, &by_name)?;
    let centers = place_nodes(pgm, &flat, &by_name, &order)?;
    let edges = resolve_edges(&flat, &centers)?;
    let placed_plates = plates::place(pgm.plates(), &centers)?;
    let extent = measure_extent(pgm, &centers, !placed_plates.is_empty());

    info!(
        nodes = flat.len(),
        plates = placed_plates.len(),
        edges = edges.len();
        "layout solved"
    );

    let nodes = flat
        .iter()
        .map(|entry| {
            let center = centers[&entry.name];
            (entry.name, placed_node(entry, center))
        })
        .collect();

    Ok(Diagram {
        nodes,
        plates: placed_plates,
        edges,
        extent,
    })
}

/// Collects top-level and plate-owned nodes into one list, rejecting
/// duplicates and builders whose deferred errors must now surface.
fn flatten(pgm: &Pgm) -> Result<Vec<FlatNode<'_>>, PlateauError> {
    let top_level = pgm.nodes().iter().map(|node| (node, None));
    let owned = pgm.plates().iter().enumerate().flat_map(|(index, plate)| {
        plate.members().iter().filter_map(move |member| match member {
            PlateMember::Node(node) => Some((node, Some(index))),
            PlateMember::Ref(_) => None,
        })
    });

    let mut flat: Vec<FlatNode<'_>> = Vec::new();
    let mut seen = HashMap::new();
    for (node, plate) in top_level.chain(owned) {
        let name = node.name()?;
        if seen.insert(name, ()).is_some() {
            return Err(PlateauError::DuplicateNode(name));
        }
        if node.has_conflicting_placement() {
            return Err(PlateauError::ConflictingPlacement(name));
        }
        if node.position().is_none() {
            return Err(PlateauError::MissingPlacement(name));
        }
        flat.push(FlatNode { node, name, plate });
    }
    Ok(flat)
}

/// Checks that every name mentioned anywhere resolves to a defined node,
/// and that no plate is empty.
fn validate_references(
    pgm: &Pgm,
    flat: &[FlatNode<'_>],
    by_name: &HashMap<Id, usize>,
) -> Result<(), PlateauError> {
    let check = |name: Id| {
        if by_name.contains_key(&name) {
            Ok(())
        } else {
            Err(PlateauError::UnknownNode(name))
        }
    };

    for entry in flat {
        if let Some(Position::Relative { anchor, .. }) = entry.node.position() {
            check(anchor)?;
        }
        for target in entry.node.edges_to() {
            check(*target)?;
        }
        for target in entry.node.of_targets() {
            check(*target)?;
        }
    }

    for plate in pgm.plates() {
        if plate.members().is_empty() {
            return Err(PlateauError::EmptyPlate(plate.label().to_string()));
        }
        for member in plate.members() {
            if let PlateMember::Ref(name) = member {
                check(*name)?;
            }
        }
    }

    Ok(())
}

/// Topologically orders nodes so every anchor is placed before the nodes
/// that hang off it.
fn placement_order(
    flat: &[FlatNode<'_>],
    by_name: &HashMap<Id, usize>,
) -> Result<Vec<usize>, PlateauError> {
    let mut graph: DiGraph<Id, ()> = DiGraph::new();
    let mut indices: HashMap<Id, NodeIndex> = HashMap::new();
    for entry in flat {
        indices.insert(entry.name, graph.add_node(entry.name));
    }
    for entry in flat {
        if let Some(Position::Relative { anchor, .. }) = entry.node.position() {
            graph.add_edge(indices[&anchor], indices[&entry.name], ());
        }
    }

    let sorted =
        toposort(&graph, None).map_err(|cycle| PlateauError::PlacementCycle(graph[cycle.node_id()]))?;
    Ok(sorted.into_iter().map(|index| by_name[&graph[index]]).collect())
}

/// Computes every node's center, walking in placement order.
fn place_nodes(
    pgm: &Pgm,
    flat: &[FlatNode<'_>],
    by_name: &HashMap<Id, usize>,
    order: &[usize],
) -> Result<HashMap<Id, Point>, PlateauError> {
    let layout = &pgm.config().layout;
    let mut centers: HashMap<Id, Point> = HashMap::new();

    for &index in order {
        let entry = &flat[index];
        let position = entry
            .node
            .position()
            .ok_or(PlateauError::MissingPlacement(entry.name))?;

        let center = match position {
            Position::At(point) => point,
            Position::Relative { placement, anchor } => {
                let anchor_center = centers[&anchor];
                let mut center = anchor_center
                    .add(placement.base_offset(layout.vertical_offset, layout.horizontal_offset))
                    .add(placement.nudge());

                // Leave room for the plate border when reaching across it.
                let anchor_plate = flat[by_name[&anchor]].plate;
                let crosses_plate = anchor_plate.is_some() && anchor_plate != entry.plate;
                if crosses_plate && placement.is_leftward() {
                    center = center.add(Point::new(-PLATE_CLEARANCE, 0.0));
                } else if crosses_plate && placement.is_rightward() {
                    center = center.add(Point::new(PLATE_CLEARANCE, 0.0));
                }

                center.add(entry.node.shift())
            }
        };

        debug!(node = entry.name.to_string(), x = center.x(), y = center.y(); "placed node");
        centers.insert(entry.name, center);
    }

    Ok(centers)
}

/// Gathers each parameter's implied edge to the node it belongs to,
/// followed by the node's explicit edges.
fn resolve_edges(
    flat: &[FlatNode<'_>],
    centers: &HashMap<Id, Point>,
) -> Result<Vec<(Id, Id)>, PlateauError> {
    let mut edges = Vec::new();
    for entry in flat {
        if matches!(entry.node.kind(), NodeKind::Param | NodeKind::Hyper) {
            if !entry.node.of_targets().is_empty() {
                for target in entry.node.of_targets() {
                    edges.push((entry.name, *target));
                }
            } else if let Some(Position::Relative { anchor, .. }) = entry.node.position() {
                edges.push((entry.name, anchor));
            } else {
                return Err(PlateauError::MissingParamTarget(entry.name));
            }
        }

        for target in entry.node.edges_to() {
            edges.push((entry.name, *target));
        }
    }

    for (from, to) in &edges {
        trace!(from = from.to_string(), to = to.to_string(); "resolved edge");
    }
    debug_assert!(edges.iter().all(|(from, to)| {
        centers.contains_key(from) && centers.contains_key(to)
    }));
    Ok(edges)
}

/// Measures the canvas extent from node centers, padded for plates, unless
/// an explicit shape overrides it.
fn measure_extent(pgm: &Pgm, centers: &HashMap<Id, Point>, has_plates: bool) -> Size {
    if let Some(shape) = pgm.shape() {
        return shape;
    }

    // `solve` rejects empty diagrams before this point.
    let bounds = bounding_rect(centers.values().copied()).unwrap_or_default();
    let framed = plates::with_margins(bounds);
    let mut x_units = framed.right();
    let mut y_units = framed.top();
    if has_plates {
        x_units += PLATE_EXTENT_PAD;
        y_units += PLATE_EXTENT_PAD;
    }
    Size::new(x_units, y_units)
}

fn placed_node(entry: &FlatNode<'_>, center: Point) -> PlacedNode {
    let below = matches!(
        entry.node.position(),
        Some(Position::Relative { placement, .. }) if placement.is_downward()
    );
    let label_offset = entry.node.label_offset().unwrap_or_else(|| {
        if below {
            Point::new(0.0, -25.0)
        } else {
            Point::new(0.0, 10.0)
        }
    });

    PlacedNode {
        name: entry.name,
        symbol: entry.node.symbol().to_string(),
        kind: entry.node.kind(),
        center,
        scale: entry.node.scale(),
        observed: entry.node.is_observed(),
        fixed: entry.node.is_fixed(),
        label_offset,
    }
}
