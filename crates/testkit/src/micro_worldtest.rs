//! Micro-worldtest harness for tick-based snapshot tests.
//!
//! A micro-worldtest steps a tiny piece of session state for a fixed number of
//! ticks, snapshots it after every step and compares the whole report with a
//! golden JSON file.

use crate::snapshot::assert_json_snapshot;
use anyhow::Result;
use library_core::SimTick;
use serde::Serialize;
use std::path::PathBuf;

/// Configuration for a micro-worldtest.
#[derive(Debug, Clone)]
pub struct MicroWorldtestConfig {
    /// Human-readable name (written into the snapshot report).
    pub name: String,
    /// Number of ticks to step (report includes the initial snapshot at tick 0).
    pub ticks: u64,
    /// Path to the golden JSON file.
    pub snapshot_path: PathBuf,
}

/// Single snapshot frame captured at a given tick.
#[derive(Debug, Clone, Serialize)]
pub struct MicroWorldtestFrame<S> {
    /// Tick number.
    pub tick: u64,
    /// Snapshot payload.
    pub snapshot: S,
}

#[derive(Debug, Clone, Serialize)]
struct MicroWorldtestReport<S> {
    name: String,
    frames: Vec<MicroWorldtestFrame<S>>,
}

/// Run a micro-worldtest and assert (or update) the snapshot at `config.snapshot_path`.
///
/// The report holds `ticks + 1` frames: the initial state, then one per step.
pub fn run_micro_worldtest<State, Snapshot, StepFn, SnapFn>(
    config: MicroWorldtestConfig,
    mut state: State,
    mut step: StepFn,
    mut snapshot: SnapFn,
) -> Result<()>
where
    Snapshot: Serialize,
    StepFn: FnMut(SimTick, &mut State),
    SnapFn: FnMut(SimTick, &State) -> Snapshot,
{
    let frames = (0..=config.ticks)
        .map(|n| {
            let tick = SimTick(n);
            if n > 0 {
                step(SimTick(n - 1), &mut state);
            }
            MicroWorldtestFrame {
                tick: n,
                snapshot: snapshot(tick, &state),
            }
        })
        .collect();

    tracing::debug!(name = %config.name, ticks = config.ticks, "micro-worldtest finished");
    assert_json_snapshot(
        &config.snapshot_path,
        &MicroWorldtestReport {
            name: config.name,
            frames,
        },
    )
}
