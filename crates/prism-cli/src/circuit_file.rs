//! TOML circuit descriptions.
//!
//! A circuit file names the channel count and an ordered list of steps,
//! each mapping onto one [`Device`] call:
//!
//! ```toml
//! channels = 3
//!
//! [[step]]
//! op = "photons"
//! channel = 0
//!
//! [[step]]
//! op = "beamsplitter"
//! channels = [0, 2]
//! theta = 45.0
//! phi = 0.0
//!
//! [[step]]
//! op = "detector"
//! channel = 0
//! condition = 1
//! ```
//!
//! An optional `[layout]` table replaces the layout section of the loaded
//! configuration.

use log::{debug, trace};
use serde::Deserialize;
use thiserror::Error;

use prism::{
    PrismError,
    circuit::{Channel, DetectorCondition, Polarization},
    config::LayoutConfig,
    device::Device,
};

/// Circuit-file errors for CLI
#[derive(Debug, Error)]
pub enum CircuitFileError {
    #[error("Failed to parse circuit file: {0}")]
    Parse(String),

    #[error("Step {step}: invalid detector condition {code}")]
    InvalidCondition { step: usize, code: i32 },

    #[error("Step {step}: {message}")]
    InvalidQubits { step: usize, message: String },

    #[error("Step {step}: a paired source needs two distinct channels, got {channel} twice")]
    InvalidPair { step: usize, channel: Channel },
}

impl From<CircuitFileError> for PrismError {
    fn from(err: CircuitFileError) -> Self {
        PrismError::Config(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
pub struct CircuitFile {
    channels: usize,

    #[serde(default)]
    layout: Option<LayoutConfig>,

    #[serde(default, rename = "step")]
    steps: Vec<Step>,
}

fn one() -> u32 {
    1
}

fn unconditional() -> i32 {
    -1
}

fn boundary_width() -> f32 {
    3.0
}

/// One device call.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Photons {
        channel: Channel,
        #[serde(default = "one")]
        count: u32,
    },
    Open {
        channel: Channel,
    },
    Empty {
        channel: Channel,
    },
    Qubits {
        values: Vec<u32>,
        #[serde(default)]
        ancilla: Vec<u32>,
        qmap: Vec<[Channel; 2]>,
    },
    PolQubits {
        values: Vec<u32>,
        #[serde(default)]
        ancilla: Vec<u32>,
        qmap: Vec<Channel>,
    },
    Bell {
        channels: [Channel; 2],
    },
    BellPol {
        channels: [Channel; 2],
    },
    Qd {
        channels: [Channel; 2],
    },
    Beamsplitter {
        channels: [Channel; 2],
        theta: f64,
        phi: f64,
        #[serde(default)]
        emphasized: bool,
    },
    Dielectric {
        channels: [Channel; 2],
        t: f64,
        r: f64,
    },
    Mmi2 {
        channels: [Channel; 2],
    },
    Nsx {
        channels: [Channel; 3],
    },
    RandomCircuit,
    Rewire {
        channels: [Channel; 2],
    },
    PhaseShifter {
        channel: Channel,
        phi: f64,
        #[serde(default)]
        emphasized: bool,
    },
    Loss {
        channel: Channel,
        loss: f64,
    },
    Rotator {
        channel: Channel,
        theta: f64,
        phi: f64,
    },
    PolBeamsplitter {
        channels: [Channel; 2],
        polarization: u32,
        theta: f64,
    },
    PolPhaseShifter {
        channel: Channel,
        polarization: u32,
        phi: f64,
        #[serde(default)]
        emphasized: bool,
    },
    PolFilter {
        channel: Channel,
        polarization: u32,
    },
    Half {
        channel: Channel,
        alpha: f64,
    },
    Quarter {
        channel: Channel,
        alpha: f64,
    },
    Delay {
        channel: Channel,
    },
    Detector {
        channel: Channel,
        #[serde(default = "unconditional")]
        condition: i32,
        polarization: Option<u32>,
    },
    Ignore {
        channel: Channel,
    },
    Separator,
    Newline,
    HardSeparator {
        #[serde(default = "boundary_width")]
        width: f32,
    },
}

impl CircuitFile {
    /// Parses a circuit description.
    ///
    /// # Errors
    ///
    /// Returns [`CircuitFileError::Parse`] for malformed TOML or unknown
    /// steps.
    pub fn parse(source: &str) -> Result<Self, CircuitFileError> {
        toml::from_str(source).map_err(|err| CircuitFileError::Parse(err.to_string()))
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn layout(&self) -> Option<&LayoutConfig> {
        self.layout.as_ref()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Replays the steps onto a new device.
    ///
    /// # Errors
    ///
    /// Returns `PrismError` for out-of-range channels or invalid detector
    /// conditions. The step index is logged at debug level.
    pub fn build(&self) -> Result<Device, PrismError> {
        let mut device = Device::new(self.channels);
        for (index, step) in self.steps.iter().enumerate() {
            trace!(index, step:?; "Applying step");
            step.apply(index, &mut device).inspect_err(|err| {
                debug!(index, err:err = *err; "Step failed");
            })?;
        }
        debug!(steps = self.steps.len(), events = device.log().len(); "Circuit built");
        Ok(device)
    }
}

impl Step {
    fn apply(&self, index: usize, device: &mut Device) -> Result<(), PrismError> {
        match *self {
            Self::Photons { channel, count } => device.add_photons(count, channel),
            Self::Open { channel } => device.open_channel(channel),
            Self::Empty { channel } => device.empty_channel(channel),
            Self::Qubits {
                ref values,
                ref ancilla,
                ref qmap,
            } => {
                let mapped: Vec<Channel> = qmap.iter().flatten().copied().collect();
                check_qubits(index, device.channels(), values.len(), qmap.len(), ancilla, &mapped)?;
                device.qubits(values, ancilla, qmap)
            }
            Self::PolQubits {
                ref values,
                ref ancilla,
                ref qmap,
            } => {
                check_qubits(index, device.channels(), values.len(), qmap.len(), ancilla, qmap)?;
                device.pol_qubits(values, ancilla, qmap)
            }
            Self::Bell { channels: [a, b] } => {
                check_pair(index, a, b)?;
                device.add_bell(a, b)
            }
            Self::BellPol { channels: [a, b] } => {
                check_pair(index, a, b)?;
                device.add_bell_pol(a, b)
            }
            Self::Qd { channels: [a, b] } => {
                check_pair(index, a, b)?;
                device.add_qd(a, b)
            }
            Self::Beamsplitter {
                channels: [a, b],
                theta,
                phi,
                emphasized,
            } => device.beamsplitter(a, b, theta, phi, emphasized),
            Self::Dielectric {
                channels: [a, b],
                t,
                r,
            } => device.dielectric(a, b, t, r),
            Self::Mmi2 { channels: [a, b] } => device.mmi2(a, b),
            Self::Nsx { channels: [a, b, c] } => device.nsx(a, b, c),
            Self::RandomCircuit => device.random_circuit(),
            Self::Rewire { channels: [a, b] } => device.rewire(a, b),
            Self::PhaseShifter {
                channel,
                phi,
                emphasized,
            } => device.phase_shifter(channel, phi, emphasized),
            Self::Loss { channel, loss } => device.loss(channel, loss),
            Self::Rotator {
                channel,
                theta,
                phi,
            } => device.rotator(channel, theta, phi),
            Self::PolBeamsplitter {
                channels: [a, b],
                polarization,
                theta,
            } => device.pol_beamsplitter(a, b, Polarization::from_index(polarization), theta),
            Self::PolPhaseShifter {
                channel,
                polarization,
                phi,
                emphasized,
            } => device.pol_phase_shifter(
                channel,
                Polarization::from_index(polarization),
                phi,
                emphasized,
            ),
            Self::PolFilter {
                channel,
                polarization,
            } => device.pol_filter(channel, Polarization::from_index(polarization)),
            Self::Half { channel, alpha } => device.half(channel, alpha),
            Self::Quarter { channel, alpha } => device.quarter(channel, alpha),
            Self::Delay { channel } => device.delay(channel),
            Self::Detector {
                channel,
                condition,
                polarization,
            } => {
                let condition = DetectorCondition::from_code(condition).ok_or(
                    CircuitFileError::InvalidCondition {
                        step: index,
                        code: condition,
                    },
                )?;
                device.detector(
                    channel,
                    condition,
                    polarization.map(Polarization::from_index),
                )
            }
            Self::Ignore { channel } => device.ignore(channel),
            Self::Separator => {
                device.separator();
                Ok(())
            }
            Self::Newline => {
                device.newline();
                Ok(())
            }
            Self::HardSeparator { width } => {
                device.hard_separator(width);
                Ok(())
            }
        }
    }
}

fn check_pair(step: usize, a: Channel, b: Channel) -> Result<(), CircuitFileError> {
    if a == b {
        return Err(CircuitFileError::InvalidPair { step, channel: a });
    }
    Ok(())
}

/// Rejects qubit steps the device would treat as contract violations.
fn check_qubits(
    step: usize,
    channels: usize,
    values: usize,
    qubits: usize,
    ancilla: &[u32],
    mapped: &[Channel],
) -> Result<(), CircuitFileError> {
    if values != qubits {
        return Err(CircuitFileError::InvalidQubits {
            step,
            message: format!("{values} qubit values for {qubits} mapped qubits"),
        });
    }
    let free = (0..channels).filter(|ch| !mapped.contains(ch)).count();
    if ancilla.len() < free {
        return Err(CircuitFileError::InvalidQubits {
            step,
            message: format!("{free} ancilla channels but only {} values", ancilla.len()),
        });
    }
    Ok(())
}
