//! Stroke and line-style definitions.
//!
//! Wires, glyph outlines and crossings are solid; section separators are
//! dashed and row boundaries dash-dot.
//!
//! | Property | SVG attribute | Example |
//! |----------|---------------|---------|
//! | `color` | `stroke`, `stroke-opacity` | `"black"`, `0.5` |
//! | `width` | `stroke-width` | `4.0` |
//! | `style` | `stroke-dasharray` | `"6,6"`, `"12,6,2,6"` |

use crate::color::Color;

/// Line pattern of a stroke.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    /// Section separators and Bell-pair frames
    Dashed,
    /// Row boundaries
    DashDot,
}

impl StrokeStyle {
    /// Returns the SVG dasharray, or `None` for solid lines.
    pub fn to_svg_value(&self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("6,6"),
            Self::DashDot => Some("12,6,2,6"),
        }
    }
}

/// Color, width and pattern of an outline.
///
/// # Examples
///
/// ```
/// use prism_core::{color::Color, draw::{StrokeDefinition, StrokeStyle}};
///
/// let stroke = StrokeDefinition::dashed(Color::new("gray").unwrap(), 6.0);
/// assert_eq!(stroke.style(), StrokeStyle::Dashed);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
}

impl StrokeDefinition {
    fn with_pattern(color: Color, width: f32, style: StrokeStyle) -> Self {
        Self {
            color,
            width,
            style,
        }
    }

    pub fn solid(color: Color, width: f32) -> Self {
        Self::with_pattern(color, width, StrokeStyle::Solid)
    }

    pub fn dashed(color: Color, width: f32) -> Self {
        Self::with_pattern(color, width, StrokeStyle::Dashed)
    }

    pub fn dash_dot(color: Color, width: f32) -> Self {
        Self::with_pattern(color, width, StrokeStyle::DashDot)
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::solid(Color::default(), 1.0)
    }
}

/// Sets the stroke attributes of an SVG element.
///
/// The dasharray is only written for non-solid styles.
///
/// ```
/// use prism_core::{color::Color, draw::StrokeDefinition};
/// use svg::node::element::Line;
///
/// let stroke = StrokeDefinition::solid(Color::new("black").unwrap(), 2.0);
/// let line = prism_core::apply_stroke!(Line::new().set("x2", 100), &stroke);
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width());

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_thin_black_solid() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.width(), 1.0);
        assert_eq!(stroke.color().to_string(), "black");
        assert_eq!(stroke.style(), StrokeStyle::Solid);
    }

    #[test]
    fn test_constructors_set_pattern() {
        let color = Color::named("gray");
        assert_eq!(StrokeDefinition::solid(color, 2.0).style(), StrokeStyle::Solid);
        assert_eq!(StrokeDefinition::dashed(color, 6.0).style(), StrokeStyle::Dashed);

        let boundary = StrokeDefinition::dash_dot(color, 3.0);
        assert_eq!(boundary.style(), StrokeStyle::DashDot);
        assert_eq!(boundary.width(), 3.0);
    }

    #[test]
    fn test_dasharray_only_for_patterns() {
        assert_eq!(StrokeStyle::Solid.to_svg_value(), None);
        assert_eq!(StrokeStyle::Dashed.to_svg_value(), Some("6,6"));
        assert_eq!(StrokeStyle::DashDot.to_svg_value(), Some("12,6,2,6"));
    }
}
