//! Append-only event recording.
//!
//! [`Recorder`] translates circuit-construction calls into [`Event`]s.
//! Channel indices are validated here, once; the layout engine trusts the
//! log it is handed. Multi-channel calls on non-adjacent channels are
//! bracketed with synthetic rewires so that every recorded element spans a
//! contiguous range.

use log::{debug, trace};

use super::event::{
    BellVariant, Channel, DetectorCondition, EmptyKind, Event, Polarization,
};
use crate::PrismError;

/// Ordered sequence of layout events. Insertion order is replay order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of explicit row breaks in the log.
    pub fn newline_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, Event::Newline))
            .count()
    }

    fn push(&mut self, event: Event) {
        trace!(event:?; "Recorded event");
        self.events.push(event);
    }

    /// Returns true if any event of this log occupies `channel`.
    fn defines(&self, channel: Channel) -> bool {
        self.events.iter().any(|event| {
            event
                .channel_span()
                .is_some_and(|span| span.contains(&channel))
        })
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

/// Records layout events for a circuit with a fixed number of channels.
///
/// # Examples
///
/// ```
/// # use prism::circuit::{Event, Recorder};
/// let mut recorder = Recorder::new(6);
/// recorder.gate(&[2, 5], "BS", false).unwrap();
///
/// // Channel 5 is brought next to channel 2 and restored afterwards
/// assert_eq!(recorder.log().len(), 3);
/// assert_eq!(
///     recorder.log().events()[0],
///     Event::Rewire { a: 5, b: 3, initial: false }
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Recorder {
    channels: usize,
    log: EventLog,
}

impl Recorder {
    /// Creates a recorder with an empty log.
    pub fn new(channels: usize) -> Self {
        Self {
            channels,
            log: EventLog::new(),
        }
    }

    /// Returns the number of channels of the circuit.
    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn into_log(self) -> EventLog {
        self.log
    }

    pub(crate) fn check(&self, channel: Channel) -> Result<(), PrismError> {
        if channel < self.channels {
            Ok(())
        } else {
            Err(PrismError::InvalidChannel {
                channel,
                channels: self.channels,
            })
        }
    }

    pub(crate) fn check_all(&self, channels: &[Channel]) -> Result<(), PrismError> {
        channels.iter().try_for_each(|&channel| self.check(channel))
    }

    /// Extends `channel`'s wire up to `column`.
    pub fn add_wire(&mut self, channel: Channel, column: usize) -> Result<(), PrismError> {
        self.check(channel)?;
        self.log.push(Event::AddWire { channel, column });
        Ok(())
    }

    /// Records an initial photon occupancy marker.
    pub fn init_photons(&mut self, channel: Channel, count: u32) -> Result<(), PrismError> {
        self.check(channel)?;
        self.log.push(Event::InitPhotons { channel, count });
        Ok(())
    }

    /// Records a placeholder for a channel without photons.
    pub fn empty_marker(&mut self, channel: Channel, kind: EmptyKind) -> Result<(), PrismError> {
        self.check(channel)?;
        self.log.push(Event::EmptyMarker { channel, kind });
        Ok(())
    }

    /// Records a paired source on two channels.
    ///
    /// The channels are ordered top-to-bottom first. If they are not adjacent
    /// the lower one is rewired next to the upper one for the source and
    /// restored afterwards; the leading rewire is marked as initial.
    ///
    /// # Panics
    ///
    /// Panics if `a` and `b` are the same channel.
    pub fn bell_pair(
        &mut self,
        a: Channel,
        b: Channel,
        variant: BellVariant,
    ) -> Result<(), PrismError> {
        assert_ne!(a, b, "a paired source needs two distinct channels");
        self.check_all(&[a, b])?;
        let (upper, lower) = (a.min(b), a.max(b));

        let adjacent = lower == upper + 1;
        if !adjacent {
            debug!(upper, lower; "Bracketing bell pair with rewires");
            self.log.push(Event::Rewire {
                a: lower,
                b: upper + 1,
                initial: true,
            });
        }
        self.log.push(Event::BellPair {
            channel: upper,
            paired_label: lower,
            variant,
        });
        if !adjacent {
            self.log.push(Event::Rewire {
                a: upper + 1,
                b: lower,
                initial: false,
            });
        }
        Ok(())
    }

    /// Records a boxed element on `width` contiguous channels starting at
    /// `start`, without any bracketing.
    ///
    /// # Panics
    ///
    /// Panics if `width` is zero.
    pub fn element(
        &mut self,
        start: Channel,
        width: usize,
        label: impl Into<String>,
        emphasized: bool,
    ) -> Result<(), PrismError> {
        assert!(width >= 1, "an element spans at least one channel");
        self.check(start)?;
        self.check(start + width - 1)?;
        self.log.push(Event::Element {
            start,
            width,
            label: label.into(),
            emphasized,
        });
        Ok(())
    }

    /// Records a gate on an arbitrary channel list.
    ///
    /// The first channel is the base. Every other channel `channels[i]` that
    /// is not already at `base + i` is rewired there before the element and
    /// back afterwards, so `m` misplaced channels add exactly `2m` rewires.
    /// Channels are taken in the order given.
    ///
    /// # Panics
    ///
    /// Panics if `channels` is empty.
    pub fn gate(
        &mut self,
        channels: &[Channel],
        label: impl Into<String>,
        emphasized: bool,
    ) -> Result<(), PrismError> {
        assert!(!channels.is_empty(), "a gate needs at least one channel");
        self.check_all(channels)?;
        let base = channels[0];
        let width = channels.len();
        self.check(base + width - 1)?;

        let misplaced: Vec<(Channel, Channel)> = channels
            .iter()
            .enumerate()
            .skip(1)
            .filter(|&(i, &channel)| channel != base + i)
            .map(|(i, &channel)| (channel, base + i))
            .collect();

        if !misplaced.is_empty() {
            debug!(base, width, rewires = misplaced.len(); "Bracketing gate with rewires");
        }
        for &(channel, slot) in &misplaced {
            self.log.push(Event::Rewire {
                a: channel,
                b: slot,
                initial: false,
            });
        }
        self.log.push(Event::Element {
            start: base,
            width,
            label: label.into(),
            emphasized,
        });
        for &(channel, slot) in &misplaced {
            self.log.push(Event::Rewire {
                a: slot,
                b: channel,
                initial: false,
            });
        }
        Ok(())
    }

    /// Records a terminal detector.
    pub fn final_detector(
        &mut self,
        channel: Channel,
        condition: DetectorCondition,
        polarization: Option<Polarization>,
    ) -> Result<(), PrismError> {
        self.check(channel)?;
        self.log.push(Event::FinalDetector {
            channel,
            condition,
            polarization,
        });
        Ok(())
    }

    /// Records a crossing between two channels.
    pub fn rewire(&mut self, a: Channel, b: Channel, initial: bool) -> Result<(), PrismError> {
        self.check_all(&[a, b])?;
        self.log.push(Event::Rewire { a, b, initial });
        Ok(())
    }

    pub fn delay(&mut self, channel: Channel) -> Result<(), PrismError> {
        self.check(channel)?;
        self.log.push(Event::Delay { channel });
        Ok(())
    }

    /// Records a full-width section separator.
    pub fn separator(&mut self) {
        self.log.push(Event::Separator);
    }

    /// Records a full-width boundary line of the given stroke width.
    pub fn hard_separator(&mut self, line_width: f32) {
        self.log.push(Event::HardSeparator { line_width });
    }

    /// Records an explicit row break.
    pub fn newline(&mut self) {
        self.log.push(Event::Newline);
    }

    /// Appends another circuit's events to this one.
    ///
    /// Open-channel markers of the continuation are dropped on channels this
    /// log already defines. Channel indices are not renumbered; every
    /// appended event must fit this circuit's channel count.
    pub fn concatenate(&mut self, continuation: &EventLog) -> Result<(), PrismError> {
        let spliced: Vec<Event> = continuation
            .iter()
            .filter(|event| match event {
                Event::EmptyMarker {
                    channel,
                    kind: EmptyKind::Open,
                } => !self.log.defines(*channel),
                _ => true,
            })
            .cloned()
            .collect();

        for event in &spliced {
            if let Some(span) = event.channel_span() {
                self.check(*span.end())?;
            }
        }

        debug!(
            appended = spliced.len(),
            dropped = continuation.len() - spliced.len();
            "Concatenating event logs"
        );
        self.log.events.extend(spliced);
        Ok(())
    }
}
