//! TOML model manifests.
//!
//! A manifest describes a PGM declaratively: an optional `[pgm]` table with
//! layout overrides, `[[node]]` tables for the nodes, and `[[plate]]` tables
//! that claim nodes by name. The manifest is a thin skin over the builder
//! API; everything it cannot check syntactically is validated when the
//! [`Pgm`] is built.
//!
//! ```toml
//! [[node]]
//! symbol = '$\theta$'
//! at = [1.0, 2.0]
//!
//! [[node]]
//! symbol = '$x_i$'
//! kind = "data"
//! below = "theta"
//!
//! [[plate]]
//! label = "$i = 1..N$"
//! nodes = ["x_i"]
//! ```

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use plateau::{
    Pgm, PlateauError,
    color::Color,
    config::AppConfig,
    geometry::Rect,
    model::{LabelPosition, Node, Plate},
    symbol,
};

/// A parsed model manifest.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pgm: PgmSpec,

    #[serde(default, rename = "node")]
    nodes: Vec<NodeSpec>,

    #[serde(default, rename = "plate")]
    plates: Vec<PlateSpec>,
}

/// The optional `[pgm]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PgmSpec {
    vertical_offset: Option<f32>,
    horizontal_offset: Option<f32>,
    shape: Option<[f32; 2]>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum KindSpec {
    #[default]
    Latent,
    Data,
    Param,
    Hyper,
    Text,
}

/// A `[[node]]` table.
///
/// Placement keys mirror the builder methods; giving more than one is
/// reported as a conflicting placement at build time.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NodeSpec {
    symbol: String,

    #[serde(default)]
    kind: KindSpec,

    /// Overrides the name derived from the symbol.
    name: Option<String>,

    at: Option<[f32; 2]>,
    above: Option<String>,
    above_left: Option<String>,
    above_right: Option<String>,
    below: Option<String>,
    below_left: Option<String>,
    below_right: Option<String>,
    left_of: Option<String>,
    left_of_above: Option<String>,
    left_of_below: Option<String>,
    right_of: Option<String>,
    right_of_above: Option<String>,
    right_of_below: Option<String>,

    shift: Option<[f32; 2]>,
    scale: Option<f32>,
    observed: Option<bool>,
    fixed: Option<bool>,
    label_offset: Option<[f32; 2]>,

    #[serde(default)]
    of: Vec<String>,

    #[serde(default)]
    edges_to: Vec<String>,
}

impl NodeSpec {
    /// The name this node will answer to.
    fn node_name(&self) -> Result<String, PlateauError> {
        match &self.name {
            Some(name) => Ok(name.clone()),
            None => symbol::name_from_symbol(&self.symbol),
        }
    }

    fn build(&self) -> Node {
        let mut node = match self.kind {
            KindSpec::Latent => Node::latent(&self.symbol),
            KindSpec::Data => Node::data(&self.symbol),
            KindSpec::Param => Node::param(&self.symbol),
            KindSpec::Hyper => Node::hyper(&self.symbol),
            KindSpec::Text => Node::text(&self.symbol),
        };

        if let Some([x, y]) = self.at {
            node = node.at(x, y);
        }
        if let Some(anchor) = &self.above {
            node = node.above(anchor);
        }
        if let Some(anchor) = &self.above_left {
            node = node.above_left(anchor);
        }
        if let Some(anchor) = &self.above_right {
            node = node.above_right(anchor);
        }
        if let Some(anchor) = &self.below {
            node = node.below(anchor);
        }
        if let Some(anchor) = &self.below_left {
            node = node.below_left(anchor);
        }
        if let Some(anchor) = &self.below_right {
            node = node.below_right(anchor);
        }
        if let Some(anchor) = &self.left_of {
            node = node.left_of(anchor);
        }
        if let Some(anchor) = &self.left_of_above {
            node = node.left_of_above(anchor);
        }
        if let Some(anchor) = &self.left_of_below {
            node = node.left_of_below(anchor);
        }
        if let Some(anchor) = &self.right_of {
            node = node.right_of(anchor);
        }
        if let Some(anchor) = &self.right_of_above {
            node = node.right_of_above(anchor);
        }
        if let Some(anchor) = &self.right_of_below {
            node = node.right_of_below(anchor);
        }

        if let Some([dx, dy]) = self.shift {
            node = node.shifted(dx, dy);
        }
        if let Some(scale) = self.scale {
            node = node.scaled(scale);
        }
        if let Some(observed) = self.observed {
            node = node.observed(observed);
        }
        if let Some(fixed) = self.fixed {
            node = node.fixed(fixed);
        }
        if let Some([dx, dy]) = self.label_offset {
            node = node.with_label_offset(dx, dy);
        }
        if let Some(name) = &self.name {
            node = node.named(name);
        }

        node.of_all(&self.of).with_edges_to(&self.edges_to)
    }
}

/// A `[[plate]]` table.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlateSpec {
    label: String,

    /// Names of the nodes this plate encloses. The first plate to name a
    /// node owns it; later plates merely surround it.
    #[serde(default)]
    nodes: Vec<String>,

    shift: Option<f32>,
    position: Option<String>,
    rect: Option<[f32; 4]>,
    bbox_color: Option<String>,
}

impl Manifest {
    /// Converts the manifest into a [`Pgm`] builder.
    ///
    /// # Errors
    ///
    /// Returns [`PlateauError::Config`] for unparseable colors or label
    /// positions, and [`PlateauError::Symbol`] for symbols no name can be
    /// derived from. Structural problems (unknown names, duplicate nodes,
    /// placement conflicts) surface later, from [`Pgm::build`].
    pub fn into_pgm(self, config: AppConfig) -> Result<Pgm, PlateauError> {
        let mut config = config;
        if let Some(vertical) = self.pgm.vertical_offset {
            config.layout.vertical_offset = vertical;
        }
        if let Some(horizontal) = self.pgm.horizontal_offset {
            config.layout.horizontal_offset = horizontal;
        }

        let mut pgm = Pgm::new().with_config(config);
        if let Some([width, height]) = self.pgm.shape {
            pgm = pgm.with_shape(width, height);
        }

        // The first plate to name a node owns it.
        let mut owner: HashMap<&str, usize> = HashMap::new();
        for (index, plate) in self.plates.iter().enumerate() {
            for name in &plate.nodes {
                owner.entry(name.as_str()).or_insert(index);
            }
        }

        let mut defined: HashSet<String> = HashSet::new();
        let mut top_level: Vec<Node> = Vec::new();
        let mut owned: Vec<Vec<Node>> = vec![Vec::new(); self.plates.len()];
        for spec in &self.nodes {
            let name = spec.node_name()?;
            let node = spec.build();
            match owner.get(name.as_str()) {
                Some(&plate) => owned[plate].push(node),
                None => top_level.push(node),
            }
            defined.insert(name);
        }
        pgm = pgm.with_nodes(top_level);

        for (index, (spec, nodes)) in self.plates.iter().zip(owned).enumerate() {
            let mut plate = Plate::new(&spec.label).with_nodes(nodes);
            for name in &spec.nodes {
                let owns = defined.contains(name) && owner.get(name.as_str()) == Some(&index);
                if !owns {
                    // Owned elsewhere, or never defined; the build reports
                    // the latter as an unknown node.
                    plate = plate.with_node_ref(name);
                }
            }
            if let Some(shift) = spec.shift {
                plate = plate.with_shift(shift);
            }
            if let Some(position) = &spec.position {
                let position: LabelPosition = position
                    .parse()
                    .map_err(PlateauError::Config)?;
                plate = plate.with_label_position(position);
            }
            if let Some([x, y, width, height]) = spec.rect {
                plate = plate.with_rect(Rect::new(x, y, width, height));
            }
            if let Some(color) = &spec.bbox_color {
                let color = Color::new(color).map_err(|err| {
                    PlateauError::Config(format!("invalid plate color `{color}`: {err}"))
                })?;
                plate = plate.with_bbox_color(color);
            }
            pgm = pgm.with_plate(plate);
        }

        Ok(pgm)
    }
}
