//! Transition engine.
//!
//! Owns the process-wide vehicle state bundle (current AS state, ASSI,
//! and the five subsystem records) and is its single writer. A
//! transition is all-or-nothing: validation happens before any
//! mutation, and the ASSI update is strictly the last step so that
//! observers keep seeing the previous indicator until every subsystem
//! field is settled (DV 2.4.3).

use tracing::{debug, info};

use dv_common::error::TransitionError;
use dv_common::state::{
    AsState, Assi, Ebs, ReadyToDrive, ServiceBrake, SteeringActuation, TractiveSystem,
};

use crate::graph::is_reachable;
use crate::table::{assi_for, targets_for};

/// The logical vehicle state governed by this supervisor.
///
/// Single writer (the transition engine); any number of external
/// readers. In a multi-threaded embedding this bundle must sit behind
/// one lock so readers never observe a half-applied transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehicleState {
    /// Current AS lifecycle state.
    pub state: AsState,
    /// Indicator currently shown on the ASSIs.
    pub assi: Assi,
    /// Tractive system record.
    pub tractive: TractiveSystem,
    /// Ready-to-drive record.
    pub ready_to_drive: ReadyToDrive,
    /// Steering actuation record.
    pub steering: SteeringActuation,
    /// Service brake record.
    pub service_brake: ServiceBrake,
    /// EBS record.
    pub ebs: Ebs,
}

impl VehicleState {
    /// Power-on state: AS off, ASSIs dark, everything unavailable.
    pub const fn new() -> Self {
        Self {
            state: AsState::Off,
            assi: Assi::Off,
            tractive: TractiveSystem::Off,
            ready_to_drive: ReadyToDrive::Off,
            steering: SteeringActuation::Unavailable,
            service_brake: ServiceBrake::Unavailable,
            ebs: Ebs::Unavailable,
        }
    }
}

impl Default for VehicleState {
    fn default() -> Self {
        Self::new()
    }
}

/// Validates and executes state transitions against the accessibility
/// graph and the per-state target table.
#[derive(Debug, Clone, Default)]
pub struct TransitionEngine {
    vehicle: VehicleState,
}

impl TransitionEngine {
    /// Engine with the vehicle in its power-on state.
    pub const fn new() -> Self {
        Self {
            vehicle: VehicleState::new(),
        }
    }

    /// Engine starting from an arbitrary bundle (tests, host restore).
    pub const fn with_vehicle(vehicle: VehicleState) -> Self {
        Self { vehicle }
    }

    /// Read-only view of the vehicle state bundle.
    #[inline]
    pub const fn vehicle(&self) -> &VehicleState {
        &self.vehicle
    }

    /// Current AS state.
    #[inline]
    pub const fn state(&self) -> AsState {
        self.vehicle.state
    }

    /// Attempt a transition to `desired`.
    ///
    /// Strict order: same-state rejection, accessibility check, apply
    /// subsystem targets (don't-care keeps the prior value), commit the
    /// new state, update the ASSI last. On rejection nothing changes.
    pub fn attempt_transition(&mut self, desired: AsState) -> Result<AsState, TransitionError> {
        let current = self.vehicle.state;

        if desired == current {
            debug!(state = ?current, "transition request is a no-op");
            return Err(TransitionError::NoOp(current));
        }

        // Redundant with the supervisor guards, which only ever request
        // accessible states, but the engine is the last line of defence.
        if !is_reachable(current, desired) {
            debug!(from = ?current, to = ?desired, "transition rejected by accessibility graph");
            return Err(TransitionError::Unreachable {
                from: current,
                to: desired,
            });
        }

        let targets = targets_for(desired);
        self.vehicle.tractive = targets.tractive;
        self.vehicle.ready_to_drive = targets.ready_to_drive;
        self.vehicle.steering = targets.steering.apply(self.vehicle.steering);
        self.vehicle.service_brake = targets.service_brake.apply(self.vehicle.service_brake);
        self.vehicle.ebs = targets.ebs.apply(self.vehicle.ebs);

        self.vehicle.state = desired;
        // ASSI changes only once the transition is complete (DV 2.4.3).
        self.vehicle.assi = assi_for(desired);

        info!(from = ?current, to = ?desired, assi = ?self.vehicle.assi, "AS state transition");
        Ok(desired)
    }

    /// Attempt a transition from a raw state value, as received over a
    /// host boundary. Out-of-range values are rejected without touching
    /// the bundle.
    pub fn attempt_transition_raw(&mut self, desired: u8) -> Result<AsState, TransitionError> {
        let desired =
            AsState::from_u8(desired).ok_or(TransitionError::InvalidTarget(desired))?;
        self.attempt_transition(desired)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
