//! Absolute-coordinate drawing commands.
//!
//! The layout engine never touches SVG directly; it emits [`DrawCommand`]s
//! into a [`Canvas`](super::Canvas). Each command pairs one [`Primitive`]
//! with the [`RenderLayer`] it belongs to.

use svg::node::{Text as SvgText, element as svg_element};

use super::{RenderLayer, StrokeDefinition, layer::SvgNode};
use crate::{
    apply_stroke,
    color::Color,
    geometry::{Bounds, Point},
};

/// Horizontal alignment of a text primitive relative to its anchor point.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    /// Text starts at the anchor point
    Start,
    /// Text is centered on the anchor point (default)
    #[default]
    Middle,
    /// Text ends at the anchor point
    End,
}

impl TextAnchor {
    fn to_svg_value(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Fill and outline of a closed shape. Either may be absent.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Paint {
    fill: Option<Color>,
    stroke: Option<StrokeDefinition>,
}

impl Paint {
    /// A shape filled with `color` and no outline.
    pub fn filled(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
        }
    }

    /// An unfilled shape with the given outline.
    pub fn outlined(stroke: StrokeDefinition) -> Self {
        Self {
            fill: None,
            stroke: Some(stroke),
        }
    }

    /// Adds an outline to this paint (builder style).
    pub fn with_stroke(mut self, stroke: StrokeDefinition) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    pub fn stroke(&self) -> Option<&StrokeDefinition> {
        self.stroke.as_ref()
    }
}

/// A single drawable shape in absolute diagram coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line {
        from: Point,
        to: Point,
        stroke: StrokeDefinition,
    },
    Rect {
        bounds: Bounds,
        paint: Paint,
    },
    Circle {
        center: Point,
        radius: f32,
        paint: Paint,
    },
    Polygon {
        points: Vec<Point>,
        paint: Paint,
    },
    /// Text; `content` may contain newlines, one `<tspan>` per line.
    Text {
        position: Point,
        content: String,
        font_size: f32,
        color: Color,
        anchor: TextAnchor,
    },
}

/// A primitive bound to a rendering layer.
///
/// # Examples
///
/// ```
/// # use prism_core::draw::{DrawCommand, RenderLayer, StrokeDefinition};
/// # use prism_core::geometry::Point;
/// let wire = DrawCommand::line(
///     RenderLayer::Wire,
///     Point::new(0.0, 25.0),
///     Point::new(100.0, 25.0),
///     StrokeDefinition::default(),
/// );
/// assert_eq!(wire.layer(), RenderLayer::Wire);
/// assert!(wire.to_svg().to_string().starts_with("<line"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    layer: RenderLayer,
    primitive: Primitive,
}

impl DrawCommand {
    pub fn new(layer: RenderLayer, primitive: Primitive) -> Self {
        Self { layer, primitive }
    }

    /// Creates a straight line command.
    pub fn line(layer: RenderLayer, from: Point, to: Point, stroke: StrokeDefinition) -> Self {
        Self::new(layer, Primitive::Line { from, to, stroke })
    }

    /// Creates a rectangle command.
    pub fn rect(layer: RenderLayer, bounds: Bounds, paint: Paint) -> Self {
        Self::new(layer, Primitive::Rect { bounds, paint })
    }

    /// Creates a circle command.
    pub fn circle(layer: RenderLayer, center: Point, radius: f32, paint: Paint) -> Self {
        Self::new(
            layer,
            Primitive::Circle {
                center,
                radius,
                paint,
            },
        )
    }

    /// Creates a closed polygon command.
    pub fn polygon(layer: RenderLayer, points: Vec<Point>, paint: Paint) -> Self {
        Self::new(layer, Primitive::Polygon { points, paint })
    }

    /// Creates a black, centered text command on the [`RenderLayer::Text`] layer.
    pub fn text(position: Point, content: impl Into<String>, font_size: f32) -> Self {
        Self::new(
            RenderLayer::Text,
            Primitive::Text {
                position,
                content: content.into(),
                font_size,
                color: Color::default(),
                anchor: TextAnchor::default(),
            },
        )
    }

    /// Replaces the anchor of a text command. Other primitives are returned unchanged.
    pub fn with_anchor(mut self, new_anchor: TextAnchor) -> Self {
        if let Primitive::Text { anchor, .. } = &mut self.primitive {
            *anchor = new_anchor;
        }
        self
    }

    pub fn layer(&self) -> RenderLayer {
        self.layer
    }

    pub fn primitive(&self) -> &Primitive {
        &self.primitive
    }

    /// Converts the command into an SVG node.
    pub fn to_svg(&self) -> SvgNode {
        match &self.primitive {
            Primitive::Line { from, to, stroke } => {
                let line = svg_element::Line::new()
                    .set("x1", from.x())
                    .set("y1", from.y())
                    .set("x2", to.x())
                    .set("y2", to.y());
                Box::new(apply_stroke!(line, stroke))
            }
            Primitive::Rect { bounds, paint } => {
                let rect = svg_element::Rectangle::new()
                    .set("x", bounds.min_x())
                    .set("y", bounds.min_y())
                    .set("width", bounds.width())
                    .set("height", bounds.height());
                Box::new(paint_element(rect, paint))
            }
            Primitive::Circle {
                center,
                radius,
                paint,
            } => {
                let circle = svg_element::Circle::new()
                    .set("cx", center.x())
                    .set("cy", center.y())
                    .set("r", *radius);
                Box::new(paint_element(circle, paint))
            }
            Primitive::Polygon { points, paint } => {
                let points = points
                    .iter()
                    .map(|p| format!("{},{}", p.x(), p.y()))
                    .collect::<Vec<_>>()
                    .join(" ");
                let polygon = svg_element::Polygon::new().set("points", points);
                Box::new(paint_element(polygon, paint))
            }
            Primitive::Text {
                position,
                content,
                font_size,
                color,
                anchor,
            } => Box::new(render_text(*position, content, *font_size, color, *anchor)),
        }
    }
}

fn paint_element<T>(element: T, paint: &Paint) -> T
where
    T: svg::Node + SetAttr,
{
    let element = match paint.fill() {
        Some(fill) => element
            .set_attr("fill", fill.to_string())
            .set_attr("fill-opacity", fill.alpha()),
        None => element.set_attr("fill", "none"),
    };
    match paint.stroke() {
        Some(stroke) => element.apply_stroke(stroke),
        None => element,
    }
}

/// Attribute setting shared by the closed-shape SVG elements.
trait SetAttr: Sized {
    fn set_attr<V: Into<svg::node::Value>>(self, name: &str, value: V) -> Self;
    fn apply_stroke(self, stroke: &StrokeDefinition) -> Self;
}

macro_rules! impl_set_attr {
    ($($ty:ty),*) => {
        $(
            impl SetAttr for $ty {
                fn set_attr<V: Into<svg::node::Value>>(self, name: &str, value: V) -> Self {
                    self.set(name, value)
                }

                fn apply_stroke(self, stroke: &StrokeDefinition) -> Self {
                    apply_stroke!(self, stroke)
                }
            }
        )*
    };
}

impl_set_attr!(
    svg_element::Rectangle,
    svg_element::Circle,
    svg_element::Polygon
);

/// Multi-line text is vertically centered on `position`.
fn render_text(
    position: Point,
    content: &str,
    font_size: f32,
    color: &Color,
    anchor: TextAnchor,
) -> svg_element::Text {
    let lines: Vec<&str> = content.lines().collect();
    let line_height = font_size * 1.2;
    let first_line_y = position.y() - line_height * (lines.len().max(1) - 1) as f32 / 2.0;

    let mut text = svg_element::Text::new("")
        .set("x", position.x())
        .set("y", first_line_y)
        .set("text-anchor", anchor.to_svg_value())
        .set("dominant-baseline", "central")
        .set("font-family", "sans-serif")
        .set("font-size", font_size)
        .set("fill", color.to_string());

    for (index, line) in lines.into_iter().enumerate() {
        let dy = if index == 0 { 0.0 } else { line_height };
        let tspan = svg_element::TSpan::new("")
            .set("x", position.x())
            .set("dy", dy)
            .add(SvgText::new(line));
        text = text.add(tspan);
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_to_svg_carries_stroke() {
        let command = DrawCommand::line(
            RenderLayer::Separator,
            Point::new(10.0, 0.0),
            Point::new(10.0, 50.0),
            StrokeDefinition::dashed(Color::new("gray").unwrap(), 6.0),
        );
        let svg = command.to_svg().to_string();
        assert!(svg.contains("x1=\"10\""));
        assert!(svg.contains("y2=\"50\""));
        assert!(svg.contains("stroke=\"gray\""));
        assert!(svg.contains("stroke-dasharray=\"6,6\""));
    }

    #[test]
    fn test_rect_fill_and_outline() {
        let bounds = Bounds::new_from_corners(Point::new(5.0, 5.0), Point::new(25.0, 15.0));
        let command = DrawCommand::rect(
            RenderLayer::Glyph,
            bounds,
            Paint::filled(Color::new("mediumpurple").unwrap())
                .with_stroke(StrokeDefinition::default()),
        );
        let svg = command.to_svg().to_string();
        assert!(svg.starts_with("<rect"));
        assert!(svg.contains("width=\"20\""));
        assert!(svg.contains("fill=\"mediumpurple\""));
        assert!(svg.contains("stroke=\"black\""));
    }

    #[test]
    fn test_outlined_shape_has_no_fill() {
        let command = DrawCommand::circle(
            RenderLayer::Glyph,
            Point::new(0.0, 0.0),
            4.0,
            Paint::outlined(StrokeDefinition::default()),
        );
        let svg = command.to_svg().to_string();
        assert!(svg.contains("fill=\"none\""));
        assert!(svg.contains("r=\"4\""));
    }

    #[test]
    fn test_polygon_points() {
        let command = DrawCommand::polygon(
            RenderLayer::Glyph,
            vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 5.0),
                Point::new(0.0, 10.0),
            ],
            Paint::filled(Color::new("orchid").unwrap()),
        );
        let svg = command.to_svg().to_string();
        assert!(svg.contains("points=\"0,0 10,5 0,10\""));
    }

    #[test]
    fn test_multiline_text_emits_tspans() {
        let command = DrawCommand::text(Point::new(50.0, 50.0), "BS\nθ=45º", 14.0)
            .with_anchor(TextAnchor::Start);
        assert_eq!(command.layer(), RenderLayer::Text);

        let svg = command.to_svg().to_string();
        assert_eq!(svg.matches("<tspan").count(), 2);
        assert!(svg.contains("text-anchor=\"start\""));
        assert!(svg.contains("θ=45º"));
    }

    #[test]
    fn test_with_anchor_ignores_non_text() {
        let line = DrawCommand::line(
            RenderLayer::Wire,
            Point::default(),
            Point::new(1.0, 0.0),
            StrokeDefinition::default(),
        );
        assert_eq!(line.clone().with_anchor(TextAnchor::End), line);
    }
}
