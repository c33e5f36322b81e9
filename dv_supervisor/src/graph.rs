//! State accessibility graph.
//!
//! Encodes FS-Rules 2020 Figure 21 as the accessibility matrix of a
//! directed graph over the six AS states. A `true` entry at
//! `[from][to]` means the edge is permitted. The diagonal is `true`
//! throughout, but the transition engine rejects same-state requests
//! before ever consulting this table, so those entries are
//! documentation of the diagram rather than executable behaviour.

use dv_common::state::{AsState, STATE_COUNT};

/// Accessibility matrix, rows = from, columns = to.
/// Row/column order: Off, Ready, Driving, Emergency, Finished, ManualDrive.
const ACCESSIBILITY: [[bool; STATE_COUNT]; STATE_COUNT] = [
    // Off      Ready  Drive  Emerg  Finish Manual
    [true, true, false, false, false, true],   // Off
    [true, true, true, true, false, false],    // Ready
    [false, false, true, true, true, false],   // Driving
    [true, false, false, true, false, false],  // Emergency
    [true, false, false, true, true, false],   // Finished
    [true, false, false, false, false, true],  // ManualDrive
];

/// Whether `to` is directly reachable from `from`.
///
/// Pure lookup, no side effects; forbidden edges simply return `false`.
#[inline]
pub const fn is_reachable(from: AsState, to: AsState) -> bool {
    ACCESSIBILITY[from as usize][to as usize]
}

// ─── Tests ──────────────────────────────────────────────────────────
