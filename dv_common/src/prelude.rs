//! Prelude module for common re-exports.
//!
//! `use dv_common::prelude::*;` pulls in the types nearly every
//! consumer of this crate needs.

// ─── State machine ──────────────────────────────────────────────────
pub use crate::state::{
    AsState, Assi, Ebs, ReadyToDrive, STATE_COUNT, ServiceBrake, SteeringActuation,
    TractiveSystem,
};

// ─── Boundary inputs ────────────────────────────────────────────────
pub use crate::inputs::{ExternalInputs, MissionSelection};

// ─── Errors ─────────────────────────────────────────────────────────
pub use crate::error::TransitionError;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, SupervisorConfig, load_config};
