//! Visual forms of the layout events.
//!
//! A [`Painter`] turns a placement decision (row, column, channels) into
//! absolute-coordinate [`DrawCommand`]s. It makes no placement decisions of
//! its own.

use prism_core::{
    color::Color,
    draw::{Canvas, DrawCommand, Paint, RenderLayer, StrokeDefinition, TextAnchor},
    geometry::{Bounds, Point},
};

use super::grid::GridMetrics;
use crate::circuit::{BellVariant, Channel, DetectorCondition, EmptyKind, Polarization};

/// Stroke width of wires and outlines, before scaling.
const LINE_WIDTH: f32 = 4.0;

/// Stroke width of page boundaries, before scaling.
pub(super) const BOUNDARY_WIDTH: f32 = 3.0;

mod palette {
    use prism_core::color::Color;

    pub fn source() -> Color {
        Color::named("orchid")
    }

    pub fn open() -> Color {
        Color::named("darkorchid")
    }

    pub fn empty() -> Color {
        Color::named("lightblue")
    }

    pub fn gate_bound() -> Color {
        Color::named("darkcyan")
    }

    pub fn bell_frame() -> Color {
        Color::named("thistle")
    }

    pub fn detector() -> Color {
        Color::named("steelblue")
    }

    pub fn ignored() -> Color {
        Color::named("red")
    }

    pub fn element() -> Color {
        Color::named("mediumpurple")
    }

    pub fn emphasized() -> Color {
        Color::named("mediumorchid")
    }

    pub fn separator() -> Color {
        Color::named("gray")
    }
}

fn line_stroke(grid: GridMetrics) -> StrokeDefinition {
    StrokeDefinition::solid(Color::default(), grid.stroke_width(LINE_WIDTH))
}

pub(super) struct Painter<'c, C: Canvas> {
    grid: GridMetrics,
    canvas: &'c mut C,
}

impl<'c, C: Canvas> Painter<'c, C> {
    pub fn new(grid: GridMetrics, canvas: &'c mut C) -> Self {
        Self { grid, canvas }
    }

    fn segment(&mut self, from: Point, to: Point) {
        let stroke = line_stroke(self.grid);
        self.canvas
            .draw(DrawCommand::line(RenderLayer::Wire, from, to, stroke));
    }

    fn text(&mut self, position: Point, content: impl Into<String>) {
        self.canvas.draw(DrawCommand::text(
            position,
            content,
            self.grid.font_size(),
        ));
    }

    /// Channel index written just above the wire, at `x`.
    fn channel_label(&mut self, row: usize, x: f32, channel: Channel) {
        let y = self.grid.channel_y(row, channel) - self.grid.units(0.3);
        self.canvas.draw(
            DrawCommand::text(
                Point::new(x + self.grid.units(0.05), y),
                channel.to_string(),
                self.grid.font_size(),
            )
            .with_anchor(TextAnchor::Start),
        );
    }

    /// Wire on `channel` from the left edge of column `from` to the left
    /// edge of column `to`. A wire starting the row carries the channel label.
    pub fn wire(&mut self, row: usize, channel: Channel, from: usize, to: usize) {
        let y = self.grid.channel_y(row, channel);
        let start = if from == 0 {
            self.channel_label(row, 0.0, channel);
            self.grid.units(0.25)
        } else {
            self.grid.column_x(from)
        };
        self.segment(Point::new(start, y), Point::new(self.grid.column_x(to), y));
    }

    fn triangle(&mut self, row: usize, column: usize, channel: Channel, fill: Color) {
        let origin = self.grid.cell(row, column, channel);
        let points = vec![
            Point::new(origin.x() + self.grid.units(0.5), origin.y() + self.grid.units(0.5)),
            Point::new(origin.x() + self.grid.units(0.5), origin.y() - self.grid.units(0.5)),
            Point::new(origin.x() + self.grid.units(1.5), origin.y()),
        ];
        let paint = Paint::filled(fill).with_stroke(line_stroke(self.grid));
        self.canvas
            .draw(DrawCommand::polygon(RenderLayer::Glyph, points, paint));

        // Leads in and out of the triangle
        self.segment(
            Point::new(origin.x() + self.grid.units(0.25), origin.y()),
            Point::new(origin.x() + self.grid.units(0.5), origin.y()),
        );
        self.segment(
            Point::new(origin.x() + self.grid.units(1.5), origin.y()),
            Point::new(origin.x() + self.grid.units(2.0), origin.y()),
        );
    }

    /// Photon source showing the channel's cumulative photon count.
    pub fn source(&mut self, row: usize, column: usize, channel: Channel, total: u32) {
        self.triangle(row, column, channel, palette::source());
        let origin = self.grid.cell(row, column, channel);
        self.text(
            Point::new(origin.x() + self.grid.units(0.75), origin.y()),
            total.to_string(),
        );
        self.channel_label(row, origin.x(), channel);
    }

    pub fn empty(&mut self, row: usize, column: usize, channel: Channel, kind: EmptyKind) {
        let (fill, mark) = match kind {
            EmptyKind::Open => (palette::open(), "x"),
            EmptyKind::Empty => (palette::empty(), "0"),
            EmptyKind::GateBound => (palette::gate_bound(), "G"),
        };
        self.triangle(row, column, channel, fill);
        let origin = self.grid.cell(row, column, channel);
        self.text(Point::new(origin.x() + self.grid.units(0.75), origin.y()), mark);
        self.channel_label(row, origin.x(), channel);
    }

    /// Paired source over `channel` and `channel + 1`.
    pub fn bell(
        &mut self,
        row: usize,
        column: usize,
        channel: Channel,
        paired_label: Channel,
        variant: BellVariant,
    ) {
        let x = self.grid.column_x(column);
        let upper = self.grid.channel_y(row, channel);
        let lower = self.grid.channel_y(row, channel + 1);

        let frame = Bounds::new_from_corners(
            Point::new(x + self.grid.units(0.2), upper - self.grid.units(0.5)),
            Point::new(x + self.grid.units(1.8), lower + self.grid.units(0.5)),
        );
        let frame_stroke =
            StrokeDefinition::dashed(Color::default(), self.grid.stroke_width(BOUNDARY_WIDTH));
        self.canvas.draw(DrawCommand::rect(
            RenderLayer::Frame,
            frame,
            Paint::filled(palette::bell_frame()).with_stroke(frame_stroke),
        ));

        for (track, label) in [(channel, channel), (channel + 1, paired_label)] {
            self.triangle(row, column, track, palette::source());
            let y = self.grid.channel_y(row, track);
            self.text(Point::new(x + self.grid.units(0.9), y), variant.label());
            self.channel_label(row, x, label);
        }
    }

    /// D-shaped detector coloured by its condition.
    pub fn detector(
        &mut self,
        row: usize,
        column: usize,
        channel: Channel,
        condition: DetectorCondition,
        polarization: Option<Polarization>,
    ) {
        let origin = self.grid.cell(row, column, channel);
        let fill = match condition {
            DetectorCondition::Count(_) | DetectorCondition::Unconditional => palette::detector(),
            DetectorCondition::Ignored => palette::ignored(),
            DetectorCondition::GateBound => palette::gate_bound(),
        };
        let outlined = Paint::filled(fill).with_stroke(line_stroke(self.grid));

        self.canvas.draw(DrawCommand::circle(
            RenderLayer::Glyph,
            Point::new(origin.x() + self.grid.units(0.5), origin.y()),
            self.grid.units(0.5),
            outlined.clone(),
        ));
        self.canvas.draw(DrawCommand::rect(
            RenderLayer::Glyph,
            Bounds::new_from_corners(
                Point::new(origin.x(), origin.y() - self.grid.units(0.5)),
                Point::new(origin.x() + self.grid.units(0.5), origin.y() + self.grid.units(0.5)),
            ),
            outlined,
        ));
        // Covers the circle outline where it meets the square half
        self.canvas.draw(DrawCommand::rect(
            RenderLayer::Glyph,
            Bounds::new_from_corners(
                Point::new(origin.x() + self.grid.units(0.45), origin.y() - self.grid.units(0.47)),
                Point::new(origin.x() + self.grid.units(0.55), origin.y() + self.grid.units(0.47)),
            ),
            Paint::filled(fill),
        ));

        let mark = match (condition, polarization) {
            (DetectorCondition::Count(n), None) => Some(n.to_string()),
            (DetectorCondition::Count(n), Some(polarization)) => Some(format!("{n}{polarization}")),
            (DetectorCondition::GateBound, _) => Some("G".to_string()),
            _ => None,
        };
        if let Some(mark) = mark {
            self.text(Point::new(origin.x() + self.grid.units(0.4), origin.y()), mark);
        }

        self.text(
            Point::new(origin.x() + self.grid.units(1.5), origin.y()),
            channel.to_string(),
        );
    }

    /// Boxed element over `width` contiguous channels.
    pub fn element(
        &mut self,
        row: usize,
        column: usize,
        start: Channel,
        width: usize,
        label: &str,
        emphasized: bool,
    ) {
        let x = self.grid.column_x(column);
        let first = self.grid.channel_y(row, start);
        let last = self.grid.channel_y(row, start + width - 1);

        let fill = if emphasized {
            palette::emphasized()
        } else {
            palette::element()
        };
        self.canvas.draw(DrawCommand::rect(
            RenderLayer::Glyph,
            Bounds::new_from_corners(
                Point::new(x + self.grid.units(0.2), first - self.grid.units(0.3)),
                Point::new(x + self.grid.units(1.8), last + self.grid.units(0.3)),
            ),
            Paint::filled(fill).with_stroke(line_stroke(self.grid)),
        ));

        for channel in start..start + width {
            let y = self.grid.channel_y(row, channel);
            self.segment(Point::new(x, y), Point::new(x + self.grid.units(0.2), y));
            self.segment(
                Point::new(x + self.grid.units(1.8), y),
                Point::new(x + self.grid.units(2.0), y),
            );
        }

        self.canvas.draw(DrawCommand::text(
            Point::new(x + self.grid.units(1.0), (first + last) / 2.0),
            label.trim(),
            (self.grid.font_size() - 2.0).max(1.0),
        ));
    }

    /// Crossing between the `upper` and `lower` tracks inside one column.
    /// Each diagonal is drawn only if its originating side is still live.
    pub fn crossing(
        &mut self,
        row: usize,
        column: usize,
        upper: Channel,
        lower: Channel,
        from_upper: bool,
        from_lower: bool,
    ) {
        let start = self.grid.column_x(column);
        let end = self.grid.column_x(column + 1);
        let upper_y = self.grid.channel_y(row, upper);
        let lower_y = self.grid.channel_y(row, lower);

        if from_upper {
            self.segment(Point::new(start, upper_y), Point::new(end, lower_y));
        }
        if from_lower {
            self.segment(Point::new(start, lower_y), Point::new(end, upper_y));
        }
    }

    /// Square-wave delay line.
    pub fn delay(&mut self, row: usize, column: usize, channel: Channel) {
        let origin = self.grid.cell(row, column, channel);
        let (x, y) = (origin.x(), origin.y());
        let high = y + self.grid.units(0.3);

        for step in 0..4 {
            let left = x + self.grid.units(0.5 * step as f32);
            let right = left + self.grid.units(0.5);
            let level = if step % 2 == 0 { high } else { y };
            self.segment(Point::new(left, level), Point::new(right, level));
            self.segment(Point::new(left, high), Point::new(left, y));
        }
    }

    /// Vertical line across all tracks of a row at `x`.
    pub fn rule(&mut self, row: usize, x: f32, stroke: StrokeDefinition) {
        let (top, bottom) = self.grid.row_span(row);
        self.canvas.draw(DrawCommand::line(
            RenderLayer::Separator,
            Point::new(x, top),
            Point::new(x, bottom),
            stroke,
        ));
    }

    /// Gray dashed section separator through the centre of a column.
    pub fn separator(&mut self, row: usize, column: usize) {
        let stroke =
            StrokeDefinition::dashed(palette::separator(), self.grid.stroke_width(6.0));
        self.rule(row, self.grid.column_center(column), stroke);
    }

    /// Black dash-dot boundary at `x`.
    pub fn boundary(&mut self, row: usize, x: f32, width: f32) {
        let stroke = StrokeDefinition::dash_dot(Color::default(), self.grid.stroke_width(width));
        self.rule(row, x, stroke);
    }
}

#[cfg(test)]
mod tests {
    use prism_core::draw::Primitive;

    use super::*;

    fn grid() -> GridMetrics {
        GridMetrics::new(100.0, 3, 14.0)
    }

    fn texts(commands: &[DrawCommand]) -> Vec<String> {
        commands
            .iter()
            .filter_map(|command| match command.primitive() {
                Primitive::Text { content, .. } => Some(content.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_wire_from_row_start_is_labelled() {
        let mut commands: Vec<DrawCommand> = Vec::new();
        Painter::new(grid(), &mut commands).wire(0, 1, 0, 2);

        assert_eq!(texts(&commands), vec!["1"]);
        let line = commands
            .iter()
            .find(|command| command.layer() == RenderLayer::Wire)
            .unwrap();
        match line.primitive() {
            Primitive::Line { from, to, .. } => {
                assert_eq!(from.x(), 12.5);
                assert_eq!(to.x(), 200.0);
                assert_eq!(from.y(), to.y());
            }
            other => panic!("expected a line, got {other:?}"),
        }
    }

    #[test]
    fn test_wire_mid_row_is_unlabelled() {
        let mut commands: Vec<DrawCommand> = Vec::new();
        Painter::new(grid(), &mut commands).wire(0, 1, 1, 2);
        assert!(texts(&commands).is_empty());
        assert_eq!(commands.len(), 1);
    }

    #[test]
    fn test_source_shows_total() {
        let mut commands: Vec<DrawCommand> = Vec::new();
        Painter::new(grid(), &mut commands).source(0, 2, 0, 3);
        assert_eq!(texts(&commands), vec!["3", "0"]);
        assert!(
            commands
                .iter()
                .any(|command| matches!(command.primitive(), Primitive::Polygon { .. }))
        );
    }

    #[test]
    fn test_empty_marks() {
        for (kind, mark) in [
            (EmptyKind::Open, "x"),
            (EmptyKind::Empty, "0"),
            (EmptyKind::GateBound, "G"),
        ] {
            let mut commands: Vec<DrawCommand> = Vec::new();
            Painter::new(grid(), &mut commands).empty(0, 0, 2, kind);
            assert_eq!(texts(&commands)[0], mark);
        }
    }

    #[test]
    fn test_bell_labels_both_tracks() {
        let mut commands: Vec<DrawCommand> = Vec::new();
        Painter::new(grid(), &mut commands).bell(0, 1, 0, 2, BellVariant::Polarization);

        assert_eq!(texts(&commands), vec!["H/V", "0", "H/V", "2"]);
        assert!(
            commands
                .iter()
                .any(|command| command.layer() == RenderLayer::Frame)
        );
    }

    #[test]
    fn test_detector_marks() {
        let cases = [
            (DetectorCondition::Count(1), None, vec!["1", "2"]),
            (
                DetectorCondition::Count(1),
                Some(Polarization::Vertical),
                vec!["1V", "2"],
            ),
            (DetectorCondition::Unconditional, None, vec!["2"]),
            (DetectorCondition::Ignored, None, vec!["2"]),
            (DetectorCondition::GateBound, None, vec!["G", "2"]),
        ];
        for (condition, polarization, expected) in cases {
            let mut commands: Vec<DrawCommand> = Vec::new();
            Painter::new(grid(), &mut commands).detector(0, 0, 2, condition, polarization);
            assert_eq!(texts(&commands), expected);
        }
    }

    #[test]
    fn test_element_leads_on_every_channel() {
        let mut commands: Vec<DrawCommand> = Vec::new();
        Painter::new(grid(), &mut commands).element(0, 0, 0, 3, "     RND", true);

        let leads = commands
            .iter()
            .filter(|command| command.layer() == RenderLayer::Wire)
            .count();
        assert_eq!(leads, 6);
        assert_eq!(texts(&commands), vec!["RND"]);
    }

    #[test]
    fn test_crossing_respects_live_sides() {
        let mut commands: Vec<DrawCommand> = Vec::new();
        Painter::new(grid(), &mut commands).crossing(0, 1, 0, 2, false, true);
        assert_eq!(commands.len(), 1);
        match commands[0].primitive() {
            Primitive::Line { from, to, .. } => {
                assert_eq!(from.y(), grid().channel_y(0, 2));
                assert_eq!(to.y(), grid().channel_y(0, 0));
            }
            other => panic!("expected a line, got {other:?}"),
        }
    }

    #[test]
    fn test_delay_segments() {
        let mut commands: Vec<DrawCommand> = Vec::new();
        Painter::new(grid(), &mut commands).delay(0, 0, 0);
        assert_eq!(commands.len(), 8);
    }
}
