//! Micro-worldtest harness for deterministic, tick-based snapshot tests.
//!
//! A micro-worldtest steps a tiny simulation for a fixed number of ticks and
//! records a snapshot, plus any events the step emitted, after each tick. The
//! report is compared against a golden JSON file (see [`crate::assert_json_snapshot`]).

use crate::snapshot::assert_json_snapshot;
use anyhow::Result;
use enchantable_core::SimTick;
use serde::Serialize;
use std::path::PathBuf;

/// Configuration for a micro-worldtest.
#[derive(Debug, Clone)]
pub struct MicroWorldtestConfig {
    /// Name written into the report.
    pub name: String,
    /// Number of ticks to step (the report also holds the tick-0 frame).
    pub ticks: u64,
    /// Path to the golden JSON file.
    pub snapshot_path: PathBuf,
}

/// Single frame captured at a given tick.
#[derive(Debug, Clone, Serialize)]
pub struct MicroWorldtestFrame<S, E> {
    /// Tick number.
    pub tick: SimTick,
    /// Events emitted while stepping into this tick.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<E>,
    /// Snapshot payload.
    pub snapshot: S,
}

/// Full timeline of a micro-worldtest.
#[derive(Debug, Clone, Serialize)]
pub struct MicroWorldtestReport<S, E> {
    /// Test name.
    pub name: String,
    /// Frames in tick order.
    pub frames: Vec<MicroWorldtestFrame<S, E>>,
}

/// Run a micro-worldtest and assert (or update) the snapshot at `config.snapshot_path`.
///
/// `step` advances the state from the given tick and returns the events it
/// produced. Returns the report so callers can make further assertions.
pub fn run_micro_worldtest<State, Snapshot, Event, StepFn, SnapFn>(
    config: MicroWorldtestConfig,
    mut state: State,
    mut step: StepFn,
    mut snapshot: SnapFn,
) -> Result<MicroWorldtestReport<Snapshot, Event>>
where
    Snapshot: Serialize,
    Event: Serialize,
    StepFn: FnMut(SimTick, &mut State) -> Vec<Event>,
    SnapFn: FnMut(SimTick, &State) -> Snapshot,
{
    let mut frames = Vec::with_capacity(config.ticks as usize + 1);

    let mut tick = SimTick::ZERO;
    frames.push(MicroWorldtestFrame {
        tick,
        events: Vec::new(),
        snapshot: snapshot(tick, &state),
    });

    for _ in 0..config.ticks {
        let events = step(tick, &mut state);
        tick = tick.advance(1);
        frames.push(MicroWorldtestFrame {
            tick,
            events,
            snapshot: snapshot(tick, &state),
        });
    }

    let report = MicroWorldtestReport {
        name: config.name,
        frames,
    };
    assert_json_snapshot(&config.snapshot_path, &report)?;
    Ok(report)
}
