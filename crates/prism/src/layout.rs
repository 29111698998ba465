//! Layout of recorded circuits.
//!
//! Replays an [`EventLog`](crate::circuit::EventLog) against per-channel
//! cursors, assigning every event a row, a column and a channel range, and
//! draws the result onto a [`Canvas`](prism_core::draw::Canvas).
//!
//! # Example
//!
//! ```
//! # use prism::{circuit::Recorder, config::LayoutConfig, layout};
//! # use prism::draw::DrawCommand;
//! let mut recorder = Recorder::new(2);
//! recorder.init_photons(0, 1).unwrap();
//! recorder.gate(&[0, 1], "BS", false).unwrap();
//!
//! let mut commands: Vec<DrawCommand> = Vec::new();
//! let diagram = layout::render(recorder.log(), 2, &LayoutConfig::default(), &mut commands).unwrap();
//! assert_eq!(diagram.placements()[1].column(), Some(1));
//! ```

mod cursor;
mod engine;
mod glyphs;
mod grid;

pub use cursor::CursorState;
pub use engine::{Diagram, LayoutEngine, Placement, render};
pub use grid::GridMetrics;
