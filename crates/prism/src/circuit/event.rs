//! The closed vocabulary of layout events.

use std::{fmt, ops::RangeInclusive};

/// Index of a horizontal channel track, in `[0, channels)`.
pub type Channel = usize;

/// Which placeholder an empty channel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmptyKind {
    /// Left open so another device can be concatenated onto it
    Open,
    /// Holds zero photons
    Empty,
    /// Initialised by an enclosing gate definition
    GateBound,
}

/// Encoding shown inside a Bell-pair source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BellVariant {
    /// Path-encoded pair, labelled `0/1`
    Path,
    /// Polarization-encoded pair, labelled `H/V`
    Polarization,
}

impl BellVariant {
    pub fn label(self) -> &'static str {
        match self {
            Self::Path => "0/1",
            Self::Polarization => "H/V",
        }
    }
}

/// Post-selection condition of a detector.
///
/// Mirrors the integer codes used by circuit descriptions: `n >= 0` is an
/// exact photon count, `-1` unconditional, `-2` ignored and `-3` a detector
/// that belongs to an enclosing gate definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectorCondition {
    Count(u32),
    Unconditional,
    Ignored,
    GateBound,
}

impl DetectorCondition {
    /// Decodes an integer condition code. Returns `None` below `-3`.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(Self::Unconditional),
            -2 => Some(Self::Ignored),
            -3 => Some(Self::GateBound),
            n => u32::try_from(n).ok().map(Self::Count),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            // Saturates: codes above i32::MAX are not representable
            Self::Count(n) => i32::try_from(n).unwrap_or(i32::MAX),
            Self::Unconditional => -1,
            Self::Ignored => -2,
            Self::GateBound => -3,
        }
    }
}

/// Polarization mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarization {
    Horizontal,
    Vertical,
    /// Any further mode index, shown as `P<n>`.
    Mode(u32),
}

impl Polarization {
    /// Maps a mode index to a polarization: `0` is H, `1` is V.
    pub fn from_index(index: u32) -> Self {
        match index {
            0 => Self::Horizontal,
            1 => Self::Vertical,
            n => Self::Mode(n),
        }
    }
}

impl fmt::Display for Polarization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => write!(f, "H"),
            Self::Vertical => write!(f, "V"),
            Self::Mode(n) => write!(f, "P{n}"),
        }
    }
}

/// One abstract, replay-ready instruction.
///
/// Events reference channels by index only and carry no coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Extend a channel's wire up to `column`.
    AddWire { channel: Channel, column: usize },
    InitPhotons { channel: Channel, count: u32 },
    EmptyMarker { channel: Channel, kind: EmptyKind },
    /// A paired source over `channel` and `channel + 1`; the lower track is
    /// labelled `paired_label`.
    BellPair {
        channel: Channel,
        paired_label: Channel,
        variant: BellVariant,
    },
    FinalDetector {
        channel: Channel,
        condition: DetectorCondition,
        polarization: Option<Polarization>,
    },
    /// A boxed gate over `width` contiguous channels starting at `start`.
    Element {
        start: Channel,
        width: usize,
        label: String,
        emphasized: bool,
    },
    /// A crossing that swaps the logical identity of two tracks.
    Rewire {
        a: Channel,
        b: Channel,
        initial: bool,
    },
    Delay { channel: Channel },
    Separator,
    HardSeparator { line_width: f32 },
    Newline,
}

impl Event {
    /// Returns the channels the event occupies, or `None` for events that
    /// span the whole diagram.
    ///
    /// A rewire occupies both endpoints and every channel between them.
    pub fn channel_span(&self) -> Option<RangeInclusive<Channel>> {
        match *self {
            Self::AddWire { channel, .. }
            | Self::InitPhotons { channel, .. }
            | Self::EmptyMarker { channel, .. }
            | Self::FinalDetector { channel, .. }
            | Self::Delay { channel } => Some(channel..=channel),
            Self::BellPair { channel, .. } => Some(channel..=channel + 1),
            Self::Element { start, width, .. } => Some(start..=start + width.max(1) - 1),
            Self::Rewire { a, b, .. } => Some(a.min(b)..=a.max(b)),
            Self::Separator | Self::HardSeparator { .. } | Self::Newline => None,
        }
    }

    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AddWire { .. } => "add_wire",
            Self::InitPhotons { .. } => "init_photons",
            Self::EmptyMarker { .. } => "empty_marker",
            Self::BellPair { .. } => "bell_pair",
            Self::FinalDetector { .. } => "final_detector",
            Self::Element { .. } => "element",
            Self::Rewire { .. } => "rewire",
            Self::Delay { .. } => "delay",
            Self::Separator => "separator",
            Self::HardSeparator { .. } => "hard_separator",
            Self::Newline => "newline",
        }
    }
}
