//! Error types for Prism operations.
//!
//! This module provides the main error type [`PrismError`], covering the
//! two failure modes of diagram construction (a bad channel reference while
//! recording, an unusable page capacity before replay) plus the I/O and
//! export failures of the surrounding pipeline.

use std::io;

use thiserror::Error;

/// The main error type for Prism operations.
#[derive(Debug, Error)]
pub enum PrismError {
    /// A recording call referenced a channel outside `[0, channels)`.
    #[error("channel {channel} is out of range for a circuit with {channels} channels")]
    InvalidChannel { channel: usize, channels: usize },

    /// The layout parameters make placement impossible.
    #[error("Layout configuration error: {0}")]
    LayoutConfiguration(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for PrismError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}
