//! Device-level circuit construction.
//!
//! [`Device`] names the optical components of a circuit (sources, beam
//! splitters, phase shifters, detectors...) and records the matching layout
//! events. It also tracks which channels are fed by sources and which end in
//! detectors, so a finished device can be embedded in another one as a gate.

use log::debug;

use crate::{
    DiagramBuilder, PrismError,
    circuit::{
        BellVariant, Channel, DetectorCondition, EmptyKind, EventLog, Polarization, Recorder,
    },
    config::AppConfig,
};

/// Rounds an angle or coefficient for display.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A photonic circuit under construction.
#[derive(Debug, Clone)]
pub struct Device {
    recorder: Recorder,
    inputs: Vec<Channel>,
    outputs: Vec<Channel>,
}

impl Device {
    pub fn new(channels: usize) -> Self {
        Self {
            recorder: Recorder::new(channels),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn channels(&self) -> usize {
        self.recorder.channels()
    }

    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    pub fn log(&self) -> &EventLog {
        self.recorder.log()
    }

    /// Channels fed by a source, in recording order.
    pub fn inputs(&self) -> &[Channel] {
        &self.inputs
    }

    /// Channels ending in a detector, in recording order.
    pub fn outputs(&self) -> &[Channel] {
        &self.outputs
    }

    /// Number of printed rows the explicit line breaks ask for.
    pub fn requested_rows(&self) -> usize {
        self.recorder.log().newline_count() + 1
    }

    // Sources

    pub fn add_photons(&mut self, count: u32, channel: Channel) -> Result<(), PrismError> {
        self.recorder.init_photons(channel, count)?;
        self.inputs.push(channel);
        Ok(())
    }

    /// Leaves a channel open for a later concatenation.
    pub fn open_channel(&mut self, channel: Channel) -> Result<(), PrismError> {
        self.recorder.empty_marker(channel, EmptyKind::Open)
    }

    pub fn empty_channel(&mut self, channel: Channel) -> Result<(), PrismError> {
        self.recorder.empty_marker(channel, EmptyKind::Empty)
    }

    /// Initialises path-encoded qubits.
    ///
    /// Each entry of `qmap` is the channel pair of one qubit. A qubit of value
    /// `0` puts its photon on the second channel, any other value on the first.
    /// Channels not named in `qmap` take the `ancilla` counts in ascending
    /// channel order.
    ///
    /// # Panics
    ///
    /// Panics if `values` and `qmap` differ in length or `ancilla` has fewer
    /// entries than there are free channels.
    pub fn qubits(
        &mut self,
        values: &[u32],
        ancilla: &[u32],
        qmap: &[[Channel; 2]],
    ) -> Result<(), PrismError> {
        assert_eq!(values.len(), qmap.len(), "one channel pair per qubit");
        for pair in qmap {
            self.recorder.check_all(pair)?;
        }

        let mut used = vec![false; self.channels()];
        for (&value, &[first, second]) in values.iter().zip(qmap) {
            used[first] = true;
            used[second] = true;
            let (on_first, on_second) = if value == 0 { (0, 1) } else { (1, 0) };
            self.recorder.init_photons(first, on_first)?;
            self.recorder.init_photons(second, on_second)?;
        }

        self.fill_ancillas(&used, ancilla, |count| count)
    }

    /// Initialises polarization-encoded qubits, one photon per channel in
    /// `qmap` and one per remaining (ancilla) channel.
    ///
    /// The qubit and ancilla values select polarizations, which the diagram
    /// does not show.
    ///
    /// # Panics
    ///
    /// Panics if `values` and `qmap` differ in length or `ancilla` has fewer
    /// entries than there are free channels.
    pub fn pol_qubits(
        &mut self,
        values: &[u32],
        ancilla: &[u32],
        qmap: &[Channel],
    ) -> Result<(), PrismError> {
        assert_eq!(values.len(), qmap.len(), "one channel per qubit");
        self.recorder.check_all(qmap)?;

        let mut used = vec![false; self.channels()];
        for &channel in qmap {
            used[channel] = true;
            self.recorder.init_photons(channel, 1)?;
        }

        self.fill_ancillas(&used, ancilla, |_| 1)
    }

    fn fill_ancillas(
        &mut self,
        used: &[bool],
        ancilla: &[u32],
        photons: impl Fn(u32) -> u32,
    ) -> Result<(), PrismError> {
        let free: Vec<Channel> = (0..used.len()).filter(|&ch| !used[ch]).collect();
        assert!(
            ancilla.len() >= free.len(),
            "{} ancilla channels but only {} values",
            free.len(),
            ancilla.len()
        );
        for (channel, &value) in free.into_iter().zip(ancilla) {
            self.recorder.init_photons(channel, photons(value))?;
        }
        Ok(())
    }

    /// Adds a path-encoded Bell pair.
    pub fn add_bell(&mut self, a: Channel, b: Channel) -> Result<(), PrismError> {
        self.bell(a, b, BellVariant::Path)
    }

    /// Adds a polarization-encoded Bell pair.
    pub fn add_bell_pol(&mut self, a: Channel, b: Channel) -> Result<(), PrismError> {
        self.bell(a, b, BellVariant::Polarization)
    }

    /// Adds a quantum-dot photon pair (biexciton on `a`, exciton on `b`).
    pub fn add_qd(&mut self, a: Channel, b: Channel) -> Result<(), PrismError> {
        self.bell(a, b, BellVariant::Polarization)
    }

    fn bell(&mut self, a: Channel, b: Channel, variant: BellVariant) -> Result<(), PrismError> {
        self.recorder.bell_pair(a, b, variant)?;
        self.inputs.extend([a, b]);
        Ok(())
    }

    // Gates

    pub fn beamsplitter(
        &mut self,
        a: Channel,
        b: Channel,
        theta: f64,
        phi: f64,
        emphasized: bool,
    ) -> Result<(), PrismError> {
        let label = format!("BS\nθ={}º\nφ={}º", round2(theta), round2(phi));
        self.recorder.gate(&[a, b], label, emphasized)
    }

    /// Dielectric beam splitter with transmission `t` and reflection `r`.
    pub fn dielectric(&mut self, a: Channel, b: Channel, t: f64, r: f64) -> Result<(), PrismError> {
        self.recorder
            .gate(&[a, b], format!("Di\ny={t}\nr={r}"), false)
    }

    pub fn mmi2(&mut self, a: Channel, b: Channel) -> Result<(), PrismError> {
        self.recorder.gate(&[a, b], "MMI", false)
    }

    /// Non-linear sign gate over three channels.
    pub fn nsx(&mut self, a: Channel, b: Channel, c: Channel) -> Result<(), PrismError> {
        self.recorder.gate(&[a, b, c], "NSX", false)
    }

    /// A random unitary over every channel.
    pub fn random_circuit(&mut self) -> Result<(), PrismError> {
        let channels = self.channels();
        self.recorder.element(0, channels, "RND", false)
    }

    pub fn rewire(&mut self, a: Channel, b: Channel) -> Result<(), PrismError> {
        self.recorder.rewire(a, b, false)
    }

    pub fn phase_shifter(
        &mut self,
        channel: Channel,
        phi: f64,
        emphasized: bool,
    ) -> Result<(), PrismError> {
        let label = format!("PS φ={}º", round2(phi));
        self.recorder.gate(&[channel], label, emphasized)
    }

    pub fn loss(&mut self, channel: Channel, loss: f64) -> Result<(), PrismError> {
        self.recorder
            .gate(&[channel], format!("LSS L={}", round2(loss)), false)
    }

    /// Polarization rotator.
    pub fn rotator(&mut self, channel: Channel, theta: f64, phi: f64) -> Result<(), PrismError> {
        let label = format!("ROT\nθ={}º\nφ={}º", round2(theta), round2(phi));
        self.recorder.gate(&[channel], label, false)
    }

    pub fn pol_beamsplitter(
        &mut self,
        a: Channel,
        b: Channel,
        polarization: Polarization,
        theta: f64,
    ) -> Result<(), PrismError> {
        let label = format!("POLBS({polarization})\nθ={}º", round2(theta));
        self.recorder.gate(&[a, b], label, false)
    }

    pub fn pol_phase_shifter(
        &mut self,
        channel: Channel,
        polarization: Polarization,
        phi: f64,
        emphasized: bool,
    ) -> Result<(), PrismError> {
        let label = format!("PS({polarization}) φ={}º", round2(phi));
        self.recorder.gate(&[channel], label, emphasized)
    }

    pub fn pol_filter(
        &mut self,
        channel: Channel,
        polarization: Polarization,
    ) -> Result<(), PrismError> {
        self.recorder
            .gate(&[channel], format!("FILT({polarization})"), false)
    }

    /// Half-wave plate at angle `alpha`.
    pub fn half(&mut self, channel: Channel, alpha: f64) -> Result<(), PrismError> {
        self.recorder
            .gate(&[channel], format!("Half α={}º", round2(alpha)), false)
    }

    /// Quarter-wave plate at angle `alpha`.
    pub fn quarter(&mut self, channel: Channel, alpha: f64) -> Result<(), PrismError> {
        self.recorder
            .gate(&[channel], format!("Quart α={}º", round2(alpha)), false)
    }

    pub fn delay(&mut self, channel: Channel) -> Result<(), PrismError> {
        self.recorder.delay(channel)
    }

    // Outputs

    pub fn detector(
        &mut self,
        channel: Channel,
        condition: DetectorCondition,
        polarization: Option<Polarization>,
    ) -> Result<(), PrismError> {
        self.recorder
            .final_detector(channel, condition, polarization)?;
        self.outputs.push(channel);
        Ok(())
    }

    /// Ends a channel in a detector whose reading is discarded.
    pub fn ignore(&mut self, channel: Channel) -> Result<(), PrismError> {
        self.detector(channel, DetectorCondition::Ignored, None)
    }

    // Layout controls

    pub fn separator(&mut self) {
        self.recorder.separator();
    }

    pub fn newline(&mut self) {
        self.recorder.newline();
    }

    pub fn hard_separator(&mut self, line_width: f32) {
        self.recorder.hard_separator(line_width);
    }

    // Composition

    /// Appends another device after this one.
    ///
    /// Channels the continuation leaves open are joined to the matching
    /// channels of this device. Its inputs and outputs are added to this
    /// device's lists.
    pub fn concatenate(&mut self, continuation: &Device) -> Result<(), PrismError> {
        self.recorder.concatenate(continuation.log())?;
        self.inputs.extend_from_slice(&continuation.inputs);
        self.outputs.extend_from_slice(&continuation.outputs);
        Ok(())
    }

    /// Embeds `device` as a single gate attached to `channels`.
    ///
    /// Channel `i` of `device` maps to `channels[i]`. Mapped device inputs
    /// are marked as initialised by the gate and mapped device outputs end in
    /// gate-bound detectors.
    ///
    /// # Panics
    ///
    /// Panics if `channels` is empty.
    pub fn add_gate(
        &mut self,
        channels: &[Channel],
        device: &Device,
        label: impl Into<String>,
    ) -> Result<(), PrismError> {
        let map = |inner: Channel| {
            channels
                .get(inner)
                .copied()
                .ok_or(PrismError::InvalidChannel {
                    channel: inner,
                    channels: channels.len(),
                })
        };
        let inputs = device
            .inputs
            .iter()
            .map(|&ch| map(ch))
            .collect::<Result<Vec<_>, _>>()?;
        let outputs = device
            .outputs
            .iter()
            .map(|&ch| map(ch))
            .collect::<Result<Vec<_>, _>>()?;
        assert!(!channels.is_empty(), "a gate needs at least one channel");
        self.recorder.check_all(channels)?;
        self.recorder.check(channels[0] + channels.len() - 1)?;

        debug!(
            channels:? = channels,
            inputs = inputs.len(),
            outputs = outputs.len();
            "Embedding device as gate"
        );
        for &channel in &inputs {
            self.recorder.empty_marker(channel, EmptyKind::GateBound)?;
        }
        self.recorder.gate(channels, label, false)?;
        for &channel in &outputs {
            self.recorder
                .final_detector(channel, DetectorCondition::GateBound, None)?;
        }

        self.inputs.extend(inputs);
        self.outputs.extend(outputs);
        Ok(())
    }

    /// Renders the device to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns `PrismError` for layout errors or an invalid style.
    pub fn show(&self, config: &AppConfig) -> Result<String, PrismError> {
        DiagramBuilder::new(config.clone()).render_svg(&self.recorder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::Event;

    fn labels(device: &Device) -> Vec<String> {
        device
            .log()
            .iter()
            .filter_map(|event| match event {
                Event::Element { label, .. } => Some(label.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_sources_track_inputs() {
        let mut device = Device::new(4);
        device.add_photons(1, 0).unwrap();
        device.add_bell(3, 1).unwrap();
        device.empty_channel(2).unwrap();

        assert_eq!(device.inputs(), &[0, 3, 1]);
        // Non-adjacent pair is bracketed by two rewires
        assert_eq!(device.log().len(), 5);
        assert!(matches!(
            device.log().events()[2],
            Event::BellPair {
                channel: 1,
                paired_label: 3,
                variant: BellVariant::Path
            }
        ));
    }

    #[test]
    fn test_path_qubits() {
        let mut device = Device::new(5);
        device.qubits(&[0, 1], &[2], &[[0, 1], [3, 4]]).unwrap();

        let counts: Vec<(Channel, u32)> = device
            .log()
            .iter()
            .filter_map(|event| match *event {
                Event::InitPhotons { channel, count } => Some((channel, count)),
                _ => None,
            })
            .collect();
        assert_eq!(counts, vec![(0, 0), (1, 1), (3, 1), (4, 0), (2, 2)]);
    }

    #[test]
    fn test_pol_qubits_one_photon_per_channel() {
        let mut device = Device::new(3);
        device.pol_qubits(&[0, 1], &[0], &[2, 0]).unwrap();

        let channels: Vec<Channel> = device
            .log()
            .iter()
            .filter_map(|event| match *event {
                Event::InitPhotons { channel, count: 1 } => Some(channel),
                _ => None,
            })
            .collect();
        assert_eq!(channels, vec![2, 0, 1]);
    }

    #[test]
    #[should_panic(expected = "ancilla")]
    fn test_qubits_missing_ancilla() {
        let mut device = Device::new(3);
        let _ = device.qubits(&[0], &[], &[[0, 1]]);
    }

    #[test]
    fn test_gate_labels() {
        let mut device = Device::new(3);
        device.beamsplitter(0, 1, 45.0, 0.0, true).unwrap();
        device.phase_shifter(2, 12.3456, false).unwrap();
        device
            .pol_beamsplitter(1, 2, Polarization::Vertical, 30.0)
            .unwrap();
        device.pol_filter(0, Polarization::Horizontal).unwrap();
        device.mmi2(1, 2).unwrap();

        assert_eq!(
            labels(&device),
            vec![
                "BS\nθ=45º\nφ=0º",
                "PS φ=12.35º",
                "POLBS(V)\nθ=30º",
                "FILT(H)",
                "MMI"
            ]
        );
        assert!(matches!(
            device.log().events()[0],
            Event::Element {
                emphasized: true,
                ..
            }
        ));
    }

    #[test]
    fn test_random_circuit_spans_all_channels() {
        let mut device = Device::new(4);
        device.random_circuit().unwrap();
        assert!(matches!(
            device.log().events()[0],
            Event::Element {
                start: 0,
                width: 4,
                ..
            }
        ));
    }

    #[test]
    fn test_outputs() {
        let mut device = Device::new(2);
        device
            .detector(0, DetectorCondition::Count(1), Some(Polarization::Horizontal))
            .unwrap();
        device.ignore(1).unwrap();

        assert_eq!(device.outputs(), &[0, 1]);
        assert!(matches!(
            device.log().events()[1],
            Event::FinalDetector {
                condition: DetectorCondition::Ignored,
                polarization: None,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_channel() {
        let mut device = Device::new(2);
        let err = device.beamsplitter(0, 2, 45.0, 0.0, false).unwrap_err();
        assert!(matches!(
            err,
            PrismError::InvalidChannel {
                channel: 2,
                channels: 2
            }
        ));
        assert!(device.log().is_empty());
    }

    #[test]
    fn test_add_gate() {
        let mut inner = Device::new(2);
        inner.add_photons(1, 1).unwrap();
        inner.beamsplitter(0, 1, 45.0, 0.0, false).unwrap();
        inner.detector(0, DetectorCondition::Count(0), None).unwrap();

        let mut outer = Device::new(4);
        outer.add_photons(1, 0).unwrap();
        outer.add_gate(&[0, 3], &inner, "CZ").unwrap();

        let events = outer.log().events();
        assert!(matches!(
            events[1],
            Event::EmptyMarker {
                channel: 3,
                kind: EmptyKind::GateBound
            }
        ));
        // Rewire 3 -> 1, element, rewire back
        assert!(matches!(events[2], Event::Rewire { a: 3, b: 1, .. }));
        assert!(matches!(
            events[3],
            Event::Element {
                start: 0,
                width: 2,
                ..
            }
        ));
        assert!(matches!(events[4], Event::Rewire { a: 1, b: 3, .. }));
        assert!(matches!(
            events[5],
            Event::FinalDetector {
                channel: 0,
                condition: DetectorCondition::GateBound,
                ..
            }
        ));
        assert_eq!(outer.inputs(), &[0, 3]);
        assert_eq!(outer.outputs(), &[0]);
    }

    #[test]
    fn test_add_gate_unmapped_channel() {
        let mut inner = Device::new(3);
        inner.add_photons(1, 2).unwrap();

        let mut outer = Device::new(3);
        let err = outer.add_gate(&[0, 1], &inner, "G").unwrap_err();
        assert!(matches!(err, PrismError::InvalidChannel { channel: 2, .. }));
        assert!(outer.log().is_empty());
    }

    #[test]
    fn test_concatenate_joins_open_channels() {
        let mut first = Device::new(2);
        first.add_photons(1, 0).unwrap();
        first.add_photons(1, 1).unwrap();

        let mut second = Device::new(2);
        second.open_channel(0).unwrap();
        second.open_channel(1).unwrap();
        second.mmi2(0, 1).unwrap();

        first.concatenate(&second).unwrap();
        assert_eq!(first.log().len(), 3);
        assert_eq!(labels(&first), vec!["MMI"]);
    }

    #[test]
    fn test_requested_rows() {
        let mut device = Device::new(1);
        assert_eq!(device.requested_rows(), 1);
        device.newline();
        device.newline();
        assert_eq!(device.requested_rows(), 3);
    }

    #[test]
    fn test_show() {
        let mut device = Device::new(2);
        device.add_photons(2, 0).unwrap();
        device.beamsplitter(0, 1, 45.0, 0.0, false).unwrap();
        device.detector(1, DetectorCondition::Unconditional, None).unwrap();

        let svg = device.show(&AppConfig::default()).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("BS"));
    }
}
