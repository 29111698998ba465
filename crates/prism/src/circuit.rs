//! Event recording for circuit diagrams.
//!
//! A circuit is described incrementally through a [`Recorder`], which
//! appends primitive [`Event`]s to an [`EventLog`]. No coordinates are
//! computed here; the log is replayed later by the [`layout`](crate::layout)
//! engine.

mod event;
mod recorder;

pub use event::{BellVariant, Channel, DetectorCondition, EmptyKind, Event, Polarization};
pub use recorder::{EventLog, Recorder};
