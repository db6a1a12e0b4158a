//! Text style definitions for node labels and plate captions.

use crate::color::Color;

/// Visual style for a piece of diagram text.
///
/// PGM labels are short math symbols, so the style is deliberately small:
/// font family, size, color, and whether the text is italicized (math
/// symbols are, plate captions are not).
///
/// # Examples
///
/// ```
/// use plateau_core::draw::TextStyle;
/// use svg::node::element as svg_element;
///
/// let style = TextStyle::math("Georgia, serif", 18.0);
/// let label = style.apply(svg_element::Text::new("θ"));
/// ```
#[derive(Debug, Clone)]
pub struct TextStyle {
    font_family: String,
    font_size: f32,
    color: Color,
    italic: bool,
}

impl TextStyle {
    /// Creates an upright text style.
    pub fn new(font_family: impl Into<String>, font_size: f32) -> Self {
        Self {
            font_family: font_family.into(),
            font_size,
            color: Color::default(),
            italic: false,
        }
    }

    /// Creates an italic text style, used for math symbols.
    pub fn math(font_family: impl Into<String>, font_size: f32) -> Self {
        Self {
            italic: true,
            ..Self::new(font_family, font_size)
        }
    }

    /// Returns the font size in pixels.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Returns a copy of this style with the font scaled by the given factor.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            font_size: self.font_size * factor,
            ..self.clone()
        }
    }

    /// Sets the text color.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Applies this style to an SVG text element, centered on its position.
    pub fn apply(&self, text: svg::node::element::Text) -> svg::node::element::Text {
        let mut text = text
            .set("font-family", self.font_family.clone())
            .set("font-size", self.font_size)
            .set("fill", &self.color)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central");
        if self.italic {
            text = text.set("font-style", "italic");
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_style_accessors() {
        let style = TextStyle::new("serif", 18.0);
        assert_eq!(style.font_size(), 18.0);
    }

    #[test]
    fn test_text_style_scaled() {
        let style = TextStyle::math("serif", 18.0).scaled(0.5);
        assert_eq!(style.font_size(), 9.0);
    }

    #[test]
    fn test_apply_sets_attributes() {
        let style = TextStyle::math("serif", 18.0);
        let rendered = style
            .apply(svg::node::element::Text::new("σ"))
            .to_string();
        assert!(rendered.contains("font-size=\"18\""));
        assert!(rendered.contains("font-style=\"italic\""));
        assert!(rendered.contains("text-anchor=\"middle\""));
    }

    #[test]
    fn test_apply_upright() {
        let style = TextStyle::new("serif", 12.0);
        let rendered = style
            .apply(svg::node::element::Text::new("N"))
            .to_string();
        assert!(!rendered.contains("font-style"));
    }
}
