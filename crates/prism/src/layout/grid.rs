//! Cell geometry: mapping (row, column, channel) to pixels.
//!
//! All lengths derive from one unit `u`, half a column wide. Column `c`
//! spans `x ∈ [2c·u, (2c + 2)·u]`. Channel `ch` of row `r` is centred at
//! `y = (0.5 + 1.1·ch + r·(1.1·n + 0.4))·u` for a circuit of `n` channels.

use prism_core::geometry::{Point, Size};

use crate::circuit::Channel;

/// Vertical distance between neighbouring channels, in units.
const CHANNEL_PITCH: f32 = 1.1;

/// Extra spacing below the last channel of a row, in units.
const ROW_GAP: f32 = 0.4;

/// Unit size at which stroke widths are specified.
const REFERENCE_UNIT: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    unit: f32,
    channels: usize,
    font_size: f32,
}

impl GridMetrics {
    pub fn new(pixels_per_column: f32, channels: usize, font_size: f32) -> Self {
        Self {
            unit: pixels_per_column / 2.0,
            channels,
            font_size,
        }
    }

    /// Half a column, in pixels.
    pub fn unit(self) -> f32 {
        self.unit
    }

    pub fn channels(self) -> usize {
        self.channels
    }

    pub fn font_size(self) -> f32 {
        self.font_size
    }

    /// Converts a length in units to pixels.
    pub fn units(self, amount: f32) -> f32 {
        amount * self.unit
    }

    /// Scales a stroke width so lines keep their weight relative to the cells.
    pub fn stroke_width(self, width: f32) -> f32 {
        width * self.unit / REFERENCE_UNIT
    }

    /// Left edge of a column.
    pub fn column_x(self, column: usize) -> f32 {
        2.0 * column as f32 * self.unit
    }

    /// Horizontal centre of a column.
    pub fn column_center(self, column: usize) -> f32 {
        (2.0 * column as f32 + 1.0) * self.unit
    }

    /// Height of one printed row.
    pub fn row_height(self) -> f32 {
        (CHANNEL_PITCH * self.channels as f32 + ROW_GAP) * self.unit
    }

    /// Top edge of a printed row.
    pub fn row_top(self, row: usize) -> f32 {
        row as f32 * self.row_height()
    }

    /// Centre line of a channel on a printed row.
    pub fn channel_y(self, row: usize, channel: Channel) -> f32 {
        (0.5 + CHANNEL_PITCH * channel as f32) * self.unit + self.row_top(row)
    }

    /// Point on a channel's centre line at the left edge of a column.
    pub fn cell(self, row: usize, column: usize, channel: Channel) -> Point {
        Point::new(self.column_x(column), self.channel_y(row, channel))
    }

    /// Vertical extent of the channel tracks on a row, glyph margins included.
    pub fn row_span(self, row: usize) -> (f32, f32) {
        let last = self.channels.saturating_sub(1);
        (
            self.channel_y(row, 0) - self.unit,
            self.channel_y(row, last) + self.unit,
        )
    }

    /// Canvas size for a page capacity of `depth` columns and `rows` rows.
    pub fn canvas_size(self, depth: usize, rows: usize) -> Size {
        Size::new(
            (depth + 1) as f32 * 2.0 * self.unit,
            rows as f32 * self.row_height() + 0.5 * self.unit,
        )
    }
}
