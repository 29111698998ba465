//! Replay properties of the layout engine over recorded circuits.

use proptest::prelude::*;

use prism::{
    circuit::{BellVariant, DetectorCondition, Event, EventLog, Recorder},
    config::LayoutConfig,
    draw::DrawCommand,
    layout::{self, LayoutEngine},
};

/// A recording call with raw indices, reduced modulo the channel count
/// when applied.
#[derive(Debug, Clone)]
enum Op {
    Photons(usize, u32),
    Gate(Vec<usize>),
    Rewire(usize, usize),
    Bell(usize, usize),
    Detector(usize),
    Delay(usize),
    Wire(usize, usize),
    Separator,
    HardSeparator,
    Newline,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..8, 0u32..3).prop_map(|(ch, n)| Op::Photons(ch, n)),
        prop::collection::vec(0usize..8, 1..4).prop_map(Op::Gate),
        (0usize..8, 0usize..8).prop_map(|(a, b)| Op::Rewire(a, b)),
        (0usize..8, 0usize..8).prop_map(|(a, b)| Op::Bell(a, b)),
        (0usize..8).prop_map(Op::Detector),
        (0usize..8).prop_map(Op::Delay),
        (0usize..8, 0usize..16).prop_map(|(ch, col)| Op::Wire(ch, col)),
        Just(Op::Separator),
        Just(Op::HardSeparator),
        Just(Op::Newline),
    ]
}

/// Records `ops` on a circuit of `channels` tracks. Calls the recorder
/// rejects are skipped.
fn record(channels: usize, ops: &[Op]) -> EventLog {
    let mut recorder = Recorder::new(channels);
    for op in ops {
        let _ = match op {
            Op::Photons(ch, n) => recorder.init_photons(ch % channels, *n),
            Op::Gate(list) => {
                let list: Vec<usize> = list.iter().map(|ch| ch % channels).collect();
                recorder.gate(&list, "G", false)
            }
            Op::Rewire(a, b) if a % channels != b % channels => {
                recorder.rewire(a % channels, b % channels, false)
            }
            Op::Rewire(..) => Ok(()),
            Op::Bell(a, b) if a % channels != b % channels => {
                recorder.bell_pair(a % channels, b % channels, BellVariant::Path)
            }
            Op::Bell(..) => Ok(()),
            Op::Detector(ch) => {
                recorder.final_detector(ch % channels, DetectorCondition::Unconditional, None)
            }
            Op::Delay(ch) => recorder.delay(ch % channels),
            Op::Wire(ch, col) => recorder.add_wire(ch % channels, *col),
            Op::Separator => {
                recorder.separator();
                Ok(())
            }
            Op::HardSeparator => {
                recorder.hard_separator(5.0);
                Ok(())
            }
            Op::Newline => {
                recorder.newline();
                Ok(())
            }
        };
    }
    recorder.into_log()
}

fn circuit() -> impl Strategy<Value = (usize, usize, EventLog)> {
    (2usize..6, 1usize..8, prop::collection::vec(op_strategy(), 0..40))
        .prop_map(|(channels, depth, ops)| (channels, depth, record(channels, &ops)))
}

proptest! {
    #[test]
    fn test_cursors_monotonic_within_row((channels, depth, log) in circuit()) {
        let config = LayoutConfig::default().with_depth(depth);
        let mut engine = LayoutEngine::new(channels, &config).unwrap();
        let mut canvas: Vec<DrawCommand> = Vec::new();

        let mut row = engine.row();
        let mut cursors = engine.cursors().to_vec();
        for event in &log {
            let placement = engine.place(event, &mut canvas);
            if engine.row() == row {
                for (channel, (before, after)) in cursors.iter().zip(engine.cursors()).enumerate() {
                    // Events that take a column move every cursor they span
                    if placement.column().is_some() && placement.channels().contains(&channel) {
                        prop_assert!(after > before, "channel {} stayed at {}", channel, before);
                    } else {
                        prop_assert!(after >= before);
                    }
                }
            } else {
                prop_assert!(engine.row() > row);
            }
            prop_assert!(engine.cursors().iter().all(|&cursor| cursor <= depth));
            row = engine.row();
            cursors = engine.cursors().to_vec();
        }
    }

    #[test]
    fn test_rows_follow_paginations((channels, depth, log) in circuit()) {
        let config = LayoutConfig::default().with_depth(depth);
        let mut canvas: Vec<DrawCommand> = Vec::new();
        let diagram = layout::render(&log, channels, &config, &mut canvas).unwrap();

        prop_assert_eq!(diagram.rows_used(), diagram.paginations() + 1);
        prop_assert!(diagram.paginations() >= log.newline_count());
        for placement in diagram.placements() {
            prop_assert!(placement.row() < diagram.rows_used());
        }
    }

    #[test]
    fn test_columns_fit_page((channels, depth, log) in circuit()) {
        let config = LayoutConfig::default().with_depth(depth);
        let mut canvas: Vec<DrawCommand> = Vec::new();
        let diagram = layout::render(&log, channels, &config, &mut canvas).unwrap();

        for (placement, event) in diagram.placements().iter().zip(&log) {
            let Some(column) = placement.column() else {
                continue;
            };
            match event {
                Event::AddWire { .. } => prop_assert!(column <= depth),
                _ => prop_assert!(column < depth),
            }
        }
    }

    #[test]
    fn test_replay_is_deterministic((channels, depth, log) in circuit()) {
        let config = LayoutConfig::default().with_depth(depth);

        let mut first: Vec<DrawCommand> = Vec::new();
        let mut second: Vec<DrawCommand> = Vec::new();
        let a = layout::render(&log, channels, &config, &mut first).unwrap();
        let b = layout::render(&log, channels, &config, &mut second).unwrap();

        prop_assert_eq!(a, b);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_single_channel_overflow(depth in 1usize..12, channels in 1usize..4) {
        let mut recorder = Recorder::new(channels);
        for _ in 0..=depth {
            recorder.element(0, 1, "X", false).unwrap();
        }
        let config = LayoutConfig::default().with_depth(depth);
        let mut engine = LayoutEngine::new(channels, &config).unwrap();
        let mut canvas: Vec<DrawCommand> = Vec::new();

        for (index, event) in recorder.log().iter().enumerate() {
            let placement = engine.place(event, &mut canvas);
            if index < depth {
                prop_assert_eq!(placement.row(), 0);
                prop_assert_eq!(placement.column(), Some(index));
            } else {
                prop_assert_eq!(placement.row(), 1);
                prop_assert_eq!(placement.column(), Some(0));
                prop_assert_eq!(engine.cursors()[0], 1);
                prop_assert!(engine.cursors()[1..].iter().all(|&cursor| cursor == 0));
            }
        }
        prop_assert_eq!(engine.paginations(), 1);
    }
}

#[test]
fn test_beamsplitter_scenario() {
    let mut recorder = Recorder::new(3);
    recorder.init_photons(0, 1).unwrap();
    recorder.init_photons(2, 1).unwrap();
    recorder.gate(&[0, 2], "BS", false).unwrap();
    recorder
        .final_detector(0, DetectorCondition::Count(1), None)
        .unwrap();
    recorder
        .final_detector(2, DetectorCondition::Count(1), None)
        .unwrap();

    let config = LayoutConfig::default().with_depth(5);
    let mut engine = LayoutEngine::new(3, &config).unwrap();
    let mut canvas: Vec<DrawCommand> = Vec::new();
    let columns: Vec<Option<usize>> = recorder
        .log()
        .iter()
        .map(|event| engine.place(event, &mut canvas).column())
        .collect();

    // Photons, rewire 2 -> 1, element, rewire back, two detectors
    assert_eq!(
        columns,
        vec![Some(0), Some(0), Some(1), Some(2), Some(3), Some(3), Some(4)]
    );
    assert_eq!(engine.cursors(), &[4, 4, 5]);
    // Channel 1 never carried content, so its wire stays hidden
    assert_eq!(engine.ended(), &[true, true, true]);

    let diagram = engine.finish();
    assert_eq!(diagram.paginations(), 0);
    assert_eq!(diagram.rows_used(), 1);
}

#[test]
fn test_invalid_depth_draws_nothing() {
    let mut recorder = Recorder::new(2);
    recorder.init_photons(0, 1).unwrap();

    let config = LayoutConfig::default().with_depth(0);
    let mut canvas: Vec<DrawCommand> = Vec::new();
    let result = layout::render(recorder.log(), 2, &config, &mut canvas);

    assert!(result.is_err());
    assert!(canvas.is_empty());
}
