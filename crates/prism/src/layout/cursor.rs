//! Per-channel replay state.

use std::ops::RangeInclusive;

use crate::circuit::Channel;

/// Next free column and terminal flag of every channel, plus the active row.
///
/// Created fresh for each replay. Cursors only move forward, except at a
/// page boundary where all of them return to zero together.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorState {
    cursors: Vec<usize>,
    ended: Vec<bool>,
    photons: Vec<u32>,
    row: usize,
}

impl CursorState {
    /// `ended` is the initial terminal flag of every channel; `true` hides
    /// a channel's wire until its first content.
    pub fn new(channels: usize, ended: bool) -> Self {
        Self {
            cursors: vec![0; channels],
            ended: vec![ended; channels],
            photons: vec![0; channels],
            row: 0,
        }
    }

    pub fn cursors(&self) -> &[usize] {
        &self.cursors
    }

    pub fn ended_flags(&self) -> &[bool] {
        &self.ended
    }

    pub fn cursor(&self, channel: Channel) -> usize {
        self.cursors[channel]
    }

    pub fn ended(&self, channel: Channel) -> bool {
        self.ended[channel]
    }

    pub fn row(&self) -> usize {
        self.row
    }

    /// Highest cursor over a span of channels.
    pub fn max_over(&self, span: RangeInclusive<Channel>) -> usize {
        self.cursors[span].iter().copied().max().unwrap_or(0)
    }

    /// Highest cursor over all channels.
    pub fn global_max(&self) -> usize {
        self.cursors.iter().copied().max().unwrap_or(0)
    }

    /// Moves every cursor in `span` to `column`.
    pub fn advance(&mut self, span: RangeInclusive<Channel>, column: usize) {
        self.cursors[span].fill(column);
    }

    /// Moves a single cursor forward to `column`, never backward.
    pub fn extend(&mut self, channel: Channel, column: usize) {
        let cursor = &mut self.cursors[channel];
        *cursor = (*cursor).max(column);
    }

    pub fn set_ended(&mut self, span: RangeInclusive<Channel>, ended: bool) {
        self.ended[span].fill(ended);
    }

    pub fn swap_ended(&mut self, a: Channel, b: Channel) {
        self.ended.swap(a, b);
    }

    /// Adds photons to a channel's tally and returns the new total.
    pub fn add_photons(&mut self, channel: Channel, count: u32) -> u32 {
        let total = &mut self.photons[channel];
        *total = total.saturating_add(count);
        *total
    }

    /// Starts a new row: all cursors return to zero at once.
    pub fn next_row(&mut self) {
        self.cursors.fill(0);
        self.row += 1;
    }
}
