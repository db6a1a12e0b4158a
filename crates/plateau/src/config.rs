//! Application configuration for layout and rendering.

use serde::Deserialize;

use plateau_core::color::Color;

/// Application configuration loaded from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Style configuration section
    #[serde(default)]
    pub style: StyleConfig,
}

/// Layout configuration section.
///
/// Offsets are in diagram units and control how far a relatively-placed
/// node sits from its anchor.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    /// Distance for `above`/`below` placements
    #[serde(default = "default_vertical_offset")]
    pub vertical_offset: f32,

    /// Distance for `left_of`/`right_of` placements
    #[serde(default = "default_horizontal_offset")]
    pub horizontal_offset: f32,
}

fn default_vertical_offset() -> f32 {
    1.0
}

fn default_horizontal_offset() -> f32 {
    0.8
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            vertical_offset: default_vertical_offset(),
            horizontal_offset: default_horizontal_offset(),
        }
    }
}

/// Style configuration section.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleConfig {
    /// Pixels per diagram unit
    #[serde(default = "default_grid_unit")]
    pub grid_unit: f32,

    /// Outer margin around the rendered content, in pixels
    #[serde(default = "default_margin")]
    pub margin: f32,

    /// Node radius per unit of node scale, in diagram units
    #[serde(default = "default_node_unit")]
    pub node_unit: f32,

    /// Radius of the solid dot drawn for fixed nodes, in pixels
    #[serde(default = "default_fixed_dot_radius")]
    pub fixed_dot_radius: f32,

    /// Label font size in pixels
    #[serde(default = "default_font_size")]
    pub font_size: f32,

    /// Label font family
    #[serde(default = "default_label_font")]
    pub label_font: String,

    /// Fill color for observed nodes
    #[serde(default = "default_observed_fill")]
    observed_fill: String,

    /// Optional background color for the whole diagram
    #[serde(default)]
    background_color: Option<String>,
}

fn default_grid_unit() -> f32 {
    72.0
}

fn default_margin() -> f32 {
    36.0
}

fn default_node_unit() -> f32 {
    0.1
}

fn default_fixed_dot_radius() -> f32 {
    4.0
}

fn default_font_size() -> f32 {
    18.0
}

fn default_label_font() -> String {
    "Georgia, serif".to_string()
}

fn default_observed_fill() -> String {
    "#cbcbcb".to_string()
}

impl StyleConfig {
    /// Get the fill color used for observed (shaded) nodes.
    pub fn observed_fill(&self) -> Result<Color, String> {
        Color::new(&self.observed_fill)
            .map_err(|err| format!("Invalid observed fill in config: {err}"))
    }

    /// Get the background color from configuration.
    /// Returns None if no background color is configured.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            grid_unit: default_grid_unit(),
            margin: default_margin(),
            node_unit: default_node_unit(),
            fixed_dot_radius: default_fixed_dot_radius(),
            font_size: default_font_size(),
            label_font: default_label_font(),
            observed_fill: default_observed_fill(),
            background_color: None,
        }
    }
}
