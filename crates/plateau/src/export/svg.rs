//! SVG rendering for placed diagrams.

use std::path::PathBuf;

use log::debug;
use svg::node::element as svg_element;

use plateau_core::{
    apply_stroke,
    draw::{StrokeDefinition, TextStyle},
    geometry::Point,
};

use super::{Error, Exporter};
use crate::{
    config::StyleConfig,
    layout::{Diagram, PlacedNode, PlacedPlate},
    model::{LabelPosition, NodeKind},
    symbol,
};

/// Pixel inset between a plate border and its corner label.
const PLATE_LABEL_INSET: f32 = 10.0;

/// In-memory SVG renderer.
///
/// Converts a placed [`Diagram`] into an [`svg::Document`] without touching
/// the filesystem. Use [`SvgFile`] to write the document to disk through the
/// [`Exporter`] interface.
///
/// # Examples
///
/// ```no_run
/// use plateau::{Pgm, config::StyleConfig, export::svg::Svg, model::Node};
///
/// let pgm = Pgm::new().with_node(Node::latent(r"$\theta$").at(1.0, 1.0));
/// let diagram = pgm.build()?;
/// let document = Svg::new(StyleConfig::default()).render(&diagram)?;
/// # Ok::<(), plateau::PlateauError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Svg {
    style: StyleConfig,
}

/// Maps y-up diagram units onto the y-down SVG pixel grid.
struct Canvas {
    grid: f32,
    margin: f32,
    top: f32,
}

impl Canvas {
    fn x(&self, units: f32) -> f32 {
        self.margin + units * self.grid
    }

    fn y(&self, units: f32) -> f32 {
        self.margin + (self.top - units) * self.grid
    }

    fn point(&self, point: Point) -> (f32, f32) {
        (self.x(point.x()), self.y(point.y()))
    }
}

impl Svg {
    pub fn new(style: StyleConfig) -> Self {
        Self { style }
    }

    /// Renders the diagram to an SVG document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if a configured color cannot be parsed.
    pub fn render(&self, diagram: &Diagram) -> Result<svg::Document, Error> {
        let extent = diagram.extent();
        let canvas = Canvas {
            grid: self.style.grid_unit,
            margin: self.style.margin,
            top: extent.height(),
        };
        let width = extent.width() * self.style.grid_unit + 2.0 * self.style.margin;
        let height = extent.height() * self.style.grid_unit + 2.0 * self.style.margin;

        let mut doc = svg::Document::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height);

        if let Some(background) = self.style.background_color().map_err(Error::Render)? {
            let rect = svg_element::Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", width)
                .set("height", height)
                .set("fill", &background);
            doc = doc.add(rect);
        }

        doc = doc.add(arrowhead_definitions());

        for plate in diagram.plates() {
            doc = self.render_plate(doc, plate, &canvas);
        }
        for (from, to) in diagram.edges() {
            // Both endpoints were validated during layout.
            let (Some(from), Some(to)) = (diagram.get(*from), diagram.get(*to)) else {
                continue;
            };
            if let Some(line) = self.render_edge(from, to, &canvas) {
                doc = doc.add(line);
            }
        }
        for node in diagram.nodes() {
            doc = self.render_node(doc, node, &canvas);
        }

        Ok(doc)
    }

    fn render_plate(
        &self,
        doc: svg::Document,
        plate: &PlacedPlate,
        canvas: &Canvas,
    ) -> svg::Document {
        let rect = plate.rect();
        let mut border = svg_element::Rectangle::new()
            .set("x", canvas.x(rect.x()))
            .set("y", canvas.y(rect.top()))
            .set("width", rect.width() * canvas.grid)
            .set("height", rect.height() * canvas.grid)
            .set("fill-opacity", 0.2);
        border = match plate.bbox_color() {
            Some(color) => border.set("fill", color),
            None => border.set("fill", "none"),
        };
        let border = apply_stroke!(border, &StrokeDefinition::default());

        let (px, anchor) = match plate.label_position() {
            LabelPosition::BottomLeft | LabelPosition::TopLeft => {
                (canvas.x(rect.x()) + PLATE_LABEL_INSET, "start")
            }
            LabelPosition::BottomRight | LabelPosition::TopRight => {
                (canvas.x(rect.right()) - PLATE_LABEL_INSET, "end")
            }
        };
        let mut py = match plate.label_position() {
            LabelPosition::BottomLeft | LabelPosition::BottomRight => {
                canvas.y(rect.y()) - PLATE_LABEL_INSET
            }
            LabelPosition::TopLeft | LabelPosition::TopRight => {
                canvas.y(rect.top()) + PLATE_LABEL_INSET
            }
        };
        // Positive shift raises the label, negative tucks it toward (or
        // past) the bottom border.
        py -= plate.shift() * canvas.grid;

        let style = TextStyle::new(self.style.label_font.clone(), self.style.font_size);
        let label = style
            .apply(svg_element::Text::new(symbol::display_text(plate.label())))
            .set("x", px)
            .set("y", py)
            .set("text-anchor", anchor);

        doc.add(border).add(label)
    }

    fn render_edge(
        &self,
        from: &PlacedNode,
        to: &PlacedNode,
        canvas: &Canvas,
    ) -> Option<svg_element::Line> {
        let (x1, y1) = canvas.point(from.center());
        let (x2, y2) = canvas.point(to.center());
        let length = (x2 - x1).hypot(y2 - y1);
        if length == 0.0 {
            debug!(from = from.name().to_string(), to = to.name().to_string();
                "skipping zero-length edge");
            return None;
        }

        // Trim the line back to each node's boundary so the arrowhead lands
        // on the circle instead of the center.
        let (ux, uy) = ((x2 - x1) / length, (y2 - y1) / length);
        let r_from = self.node_radius(from);
        let r_to = self.node_radius(to);

        let line = svg_element::Line::new()
            .set("x1", x1 + ux * r_from)
            .set("y1", y1 + uy * r_from)
            .set("x2", x2 - ux * r_to)
            .set("y2", y2 - uy * r_to)
            .set("marker-end", "url(#arrowhead)");
        Some(apply_stroke!(line, &StrokeDefinition::default()))
    }

    fn render_node(&self, doc: svg::Document, node: &PlacedNode, canvas: &Canvas) -> svg::Document {
        let (cx, cy) = canvas.point(node.center());
        let label_text = symbol::display_text(node.symbol());
        let style = if node.symbol().contains('$') {
            TextStyle::math(self.style.label_font.clone(), self.style.font_size)
        } else {
            TextStyle::new(self.style.label_font.clone(), self.style.font_size)
        };
        let label = |x: f32, y: f32| {
            style
                .apply(svg_element::Text::new(label_text.clone()))
                .set("x", x)
                .set("y", y)
        };

        match node.kind() {
            NodeKind::Text => doc.add(label(cx, cy)),
            _ if node.is_fixed() => {
                let dot = svg_element::Circle::new()
                    .set("cx", cx)
                    .set("cy", cy)
                    .set("r", self.style.fixed_dot_radius)
                    .set("fill", "black");
                let offset = node.label_offset();
                doc.add(dot).add(label(cx + offset.x(), cy - offset.y()))
            }
            _ => {
                let fill: svg::node::Value = if node.is_observed() {
                    match self.style.observed_fill() {
                        Ok(color) => (&color).into(),
                        Err(_) => "lightgray".into(),
                    }
                } else {
                    "white".into()
                };
                let circle = svg_element::Circle::new()
                    .set("cx", cx)
                    .set("cy", cy)
                    .set("r", self.node_radius(node))
                    .set("fill", fill);
                let circle = apply_stroke!(circle, &StrokeDefinition::default());
                doc.add(circle).add(label(cx, cy))
            }
        }
    }

    /// Visual radius of a node in pixels, as used for edge trimming.
    fn node_radius(&self, node: &PlacedNode) -> f32 {
        if node.is_fixed() {
            self.style.fixed_dot_radius
        } else if node.kind() == NodeKind::Text {
            0.0
        } else {
            node.scale() * self.style.node_unit * self.style.grid_unit
        }
    }
}

/// Arrowhead marker shared by all edges.
fn arrowhead_definitions() -> svg_element::Definitions {
    let path = svg_element::Path::new()
        .set("d", "M 0 0 L 10 5 L 0 10 z")
        .set("fill", "black");
    let marker = svg_element::Marker::new()
        .set("id", "arrowhead")
        .set("viewBox", "0 0 10 10")
        .set("refX", 9)
        .set("refY", 5)
        .set("markerWidth", 6)
        .set("markerHeight", 6)
        .set("orient", "auto")
        .add(path);
    svg_element::Definitions::new().add(marker)
}

/// File-writing SVG exporter.
///
/// # Examples
///
/// ```no_run
/// use plateau::{Pgm, config::StyleConfig, export::Exporter, export::svg::SvgFile, model::Node};
///
/// let pgm = Pgm::new().with_node(Node::latent(r"$\theta$").at(1.0, 1.0));
/// let diagram = pgm.build()?;
/// SvgFile::new("model.svg", StyleConfig::default()).export_diagram(&diagram)?;
/// # Ok::<(), plateau::PlateauError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SvgFile {
    path: PathBuf,
    renderer: Svg,
}

impl SvgFile {
    pub fn new(path: impl Into<PathBuf>, style: StyleConfig) -> Self {
        Self {
            path: path.into(),
            renderer: Svg::new(style),
        }
    }
}

impl Exporter for SvgFile {
    fn export_diagram(&mut self, diagram: &Diagram) -> Result<(), Error> {
        let document = self.renderer.render(diagram)?;
        svg::save(&self.path, &document).map_err(Error::Io)
    }
}
