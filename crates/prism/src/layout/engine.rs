//! Single-pass replay of an event log.
//!
//! The engine walks the log once, left to right and top to bottom. Every
//! event is placed at the highest cursor over the channels it occupies;
//! those cursors then move one column past it. When a placement would not
//! fit on the current row, the whole diagram breaks to a new row first.

use std::ops::RangeInclusive;

use log::{debug, info, trace};

use prism_core::{draw::Canvas, geometry::Size};

use super::{
    cursor::CursorState,
    glyphs::{BOUNDARY_WIDTH, Painter},
    grid::GridMetrics,
};
use crate::{
    PrismError,
    circuit::{Channel, Event, EventLog},
    config::LayoutConfig,
};

/// Where one event ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    event: usize,
    row: usize,
    column: Option<usize>,
    first_channel: Channel,
    last_channel: Channel,
}

impl Placement {
    /// Index of the event in the replayed log.
    pub fn event(&self) -> usize {
        self.event
    }

    pub fn row(&self) -> usize {
        self.row
    }

    /// Column the event occupies, or `None` if it consumed no column
    /// (row breaks, initial crossings on empty tracks, wire extensions that
    /// did not move the cursor).
    pub fn column(&self) -> Option<usize> {
        self.column
    }

    pub fn channels(&self) -> RangeInclusive<Channel> {
        self.first_channel..=self.last_channel
    }
}

/// Result of one replay.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    placements: Vec<Placement>,
    rows_used: usize,
    paginations: usize,
    size: Size,
}

impl Diagram {
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Number of printed rows that received content.
    pub fn rows_used(&self) -> usize {
        self.rows_used
    }

    /// Number of row breaks, implicit and explicit.
    pub fn paginations(&self) -> usize {
        self.paginations
    }

    /// Canvas size in pixels.
    pub fn size(&self) -> Size {
        self.size
    }
}

/// Replay state for one render.
///
/// # Examples
///
/// ```
/// # use prism::{circuit::Event, config::LayoutConfig, layout::LayoutEngine};
/// # use prism_core::draw::DrawCommand;
/// let mut engine = LayoutEngine::new(2, &LayoutConfig::default()).unwrap();
/// let mut commands: Vec<DrawCommand> = Vec::new();
///
/// engine.place(&Event::InitPhotons { channel: 1, count: 2 }, &mut commands);
/// assert_eq!(engine.cursors(), &[0, 1]);
/// ```
#[derive(Debug)]
pub struct LayoutEngine {
    grid: GridMetrics,
    capacity: usize,
    rows: usize,
    state: CursorState,
    placements: Vec<Placement>,
    paginations: usize,
}

impl LayoutEngine {
    /// Creates an engine for `channels` tracks.
    ///
    /// # Errors
    ///
    /// Returns [`PrismError::LayoutConfiguration`] if the page capacity is
    /// zero, there are no channels, or the column width is not a positive
    /// finite number.
    pub fn new(channels: usize, config: &LayoutConfig) -> Result<Self, PrismError> {
        if config.depth() < 1 {
            return Err(PrismError::LayoutConfiguration(
                "page capacity must be at least one column".to_string(),
            ));
        }
        if channels == 0 {
            return Err(PrismError::LayoutConfiguration(
                "a diagram needs at least one channel".to_string(),
            ));
        }
        let pixels_per_column = config.pixels_per_column();
        if !pixels_per_column.is_finite() || pixels_per_column <= 0.0 {
            return Err(PrismError::LayoutConfiguration(format!(
                "invalid column width {pixels_per_column}"
            )));
        }

        Ok(Self {
            grid: GridMetrics::new(pixels_per_column, channels, config.font_size()),
            capacity: config.depth(),
            rows: config.rows(),
            state: CursorState::new(channels, !config.start_lines()),
            placements: Vec::new(),
            paginations: 0,
        })
    }

    pub fn grid(&self) -> GridMetrics {
        self.grid
    }

    pub fn cursors(&self) -> &[usize] {
        self.state.cursors()
    }

    pub fn ended(&self) -> &[bool] {
        self.state.ended_flags()
    }

    pub fn row(&self) -> usize {
        self.state.row()
    }

    pub fn paginations(&self) -> usize {
        self.paginations
    }

    fn channels(&self) -> usize {
        self.grid.channels()
    }

    fn painter<'c, C: Canvas>(&self, canvas: &'c mut C) -> Painter<'c, C> {
        Painter::new(self.grid, canvas)
    }

    /// Replays a whole log and returns the finished diagram.
    pub fn replay<C: Canvas>(mut self, log: &EventLog, canvas: &mut C) -> Diagram {
        info!(channels = self.channels(), events = log.len(); "Replaying event log");
        for event in log {
            self.place(event, canvas);
        }
        self.finish()
    }

    /// Places a single event, drawing it on `canvas`.
    pub fn place<C: Canvas>(&mut self, event: &Event, canvas: &mut C) -> Placement {
        let all = 0..=self.channels() - 1;
        let column = match event {
            &Event::AddWire { channel, column } => self.place_wire(channel, column, canvas),
            &Event::InitPhotons { channel, count } => {
                let column = self.reserve(self.state.cursor(channel), canvas);
                self.state.set_ended(channel..=channel, false);
                let total = self.state.add_photons(channel, count);
                let row = self.state.row();
                self.painter(canvas).source(row, column, channel, total);
                self.state.advance(channel..=channel, column + 1);
                Some(column)
            }
            &Event::EmptyMarker { channel, kind } => {
                let column = self.reserve(self.state.cursor(channel), canvas);
                self.state.set_ended(channel..=channel, false);
                let row = self.state.row();
                self.painter(canvas).empty(row, column, channel, kind);
                self.state.advance(channel..=channel, column + 1);
                Some(column)
            }
            &Event::BellPair {
                channel,
                paired_label,
                variant,
            } => {
                let span = channel..=channel + 1;
                self.state.set_ended(span.clone(), false);
                let column = self.place_span(span.clone(), canvas);
                let row = self.state.row();
                self.painter(canvas)
                    .bell(row, column, channel, paired_label, variant);
                self.state.advance(span, column + 1);
                Some(column)
            }
            &Event::FinalDetector {
                channel,
                condition,
                polarization,
            } => {
                let column = self.reserve(self.state.cursor(channel), canvas);
                self.state.set_ended(channel..=channel, true);
                let row = self.state.row();
                self.painter(canvas)
                    .detector(row, column, channel, condition, polarization);
                self.state.advance(channel..=channel, column + 1);
                Some(column)
            }
            Event::Element {
                start,
                width,
                label,
                emphasized,
            } => {
                let span = event.channel_span().unwrap_or(*start..=*start);
                let width = (*width).max(1);
                self.state.set_ended(span.clone(), false);
                let column = self.place_span(span.clone(), canvas);
                let row = self.state.row();
                self.painter(canvas)
                    .element(row, column, *start, width, label, *emphasized);
                self.state.advance(span, column + 1);
                Some(column)
            }
            &Event::Rewire { a, b, initial } => self.place_rewire(a, b, initial, canvas),
            &Event::Delay { channel } => {
                let column = self.reserve(self.state.cursor(channel), canvas);
                let row = self.state.row();
                self.painter(canvas).delay(row, column, channel);
                self.state.advance(channel..=channel, column + 1);
                Some(column)
            }
            Event::Separator => {
                let column = self.reserve(self.state.global_max(), canvas);
                self.pad_all(column + 1, canvas);
                let row = self.state.row();
                self.painter(canvas).separator(row, column);
                self.state.advance(all.clone(), column + 1);
                Some(column)
            }
            &Event::HardSeparator { line_width } => {
                let column = self.reserve(self.state.global_max(), canvas);
                self.pad_all(column + 1, canvas);
                let row = self.state.row();
                let x = self.grid.column_center(column);
                self.painter(canvas).boundary(row, x, line_width);
                self.state.advance(all.clone(), column + 1);
                Some(column)
            }
            Event::Newline => {
                self.paginate(canvas);
                None
            }
        };

        let span = event.channel_span().unwrap_or(all);
        let placement = Placement {
            event: self.placements.len(),
            row: self.state.row(),
            column,
            first_channel: *span.start(),
            last_channel: *span.end(),
        };
        trace!(kind = event.kind(), row = placement.row, column:? = placement.column; "Placed event");
        self.placements.push(placement);
        placement
    }

    /// Consumes the engine and returns the finished diagram.
    pub fn finish(self) -> Diagram {
        let rows_used = self.state.row() + 1;
        let size = self
            .grid
            .canvas_size(self.capacity, self.rows.max(rows_used));
        info!(rows_used, paginations = self.paginations; "Layout complete");
        Diagram {
            placements: self.placements,
            rows_used,
            paginations: self.paginations,
            size,
        }
    }

    /// Returns the column to place at, breaking to a new row if `target`
    /// does not fit on the current one.
    fn reserve<C: Canvas>(&mut self, target: usize, canvas: &mut C) -> usize {
        if target + 1 > self.capacity {
            self.paginate(canvas);
            0
        } else {
            target
        }
    }

    /// Closes the current row at its rightmost cursor and opens the next one.
    fn paginate<C: Canvas>(&mut self, canvas: &mut C) {
        let closing = self.state.global_max();
        self.pad_all(closing, canvas);

        let row = self.state.row();
        let closing_x = self.grid.column_x(closing);
        let opening_x = self.grid.units(0.1);
        let mut painter = self.painter(canvas);
        painter.boundary(row, closing_x, BOUNDARY_WIDTH);
        painter.boundary(row + 1, opening_x, BOUNDARY_WIDTH);

        self.state.next_row();
        self.paginations += 1;
        debug!(row = self.state.row(), closing_column = closing; "Started a new row");
    }

    /// Draws the live wire of `channel` up to `column`. Cursors are not moved.
    fn pad<C: Canvas>(&mut self, channel: Channel, column: usize, canvas: &mut C) {
        let from = self.state.cursor(channel);
        if column > from && !self.state.ended(channel) {
            let row = self.state.row();
            self.painter(canvas).wire(row, channel, from, column);
        }
    }

    fn pad_all<C: Canvas>(&mut self, column: usize, canvas: &mut C) {
        for channel in 0..self.channels() {
            self.pad(channel, column, canvas);
        }
    }

    /// Places a multi-channel glyph: reserves the highest cursor of the span
    /// and wires every channel of the span up to it.
    fn place_span<C: Canvas>(&mut self, span: RangeInclusive<Channel>, canvas: &mut C) -> usize {
        let column = self.reserve(self.state.max_over(span.clone()), canvas);
        for channel in span {
            self.pad(channel, column, canvas);
        }
        column
    }

    fn place_wire<C: Canvas>(
        &mut self,
        channel: Channel,
        column: usize,
        canvas: &mut C,
    ) -> Option<usize> {
        let target = column.min(self.capacity);
        if target <= self.state.cursor(channel) {
            return None;
        }
        self.pad(channel, target, canvas);
        self.state.extend(channel, target);
        Some(target)
    }

    fn place_rewire<C: Canvas>(
        &mut self,
        a: Channel,
        b: Channel,
        initial: bool,
        canvas: &mut C,
    ) -> Option<usize> {
        let (upper, lower) = (a.min(b), a.max(b));
        let span = upper..=lower;
        let target = self.state.max_over(span.clone());

        // Nothing has been drawn on these tracks yet: only identities move
        let column = if initial && target == 0 {
            None
        } else {
            let column = self.reserve(target, canvas);
            self.pad(upper, column, canvas);
            self.pad(lower, column, canvas);
            for channel in upper + 1..lower {
                self.pad(channel, column + 1, canvas);
            }

            let row = self.state.row();
            let from_upper = !self.state.ended(upper);
            let from_lower = !self.state.ended(lower);
            self.painter(canvas)
                .crossing(row, column, upper, lower, from_upper, from_lower);
            self.state.advance(span, column + 1);
            Some(column)
        };

        self.state.swap_ended(upper, lower);
        column
    }
}

/// Replays `log` for a circuit of `channels` tracks onto `canvas`.
///
/// # Errors
///
/// Fails with [`PrismError::LayoutConfiguration`] before anything is drawn
/// if the configuration makes placement impossible.
pub fn render<C: Canvas>(
    log: &EventLog,
    channels: usize,
    config: &LayoutConfig,
    canvas: &mut C,
) -> Result<Diagram, PrismError> {
    let engine = LayoutEngine::new(channels, config)?;
    Ok(engine.replay(log, canvas))
}
