//! Guard evaluation and the per-cycle tick.
//!
//! Each cycle the supervisor samples the external flag snapshot,
//! evaluates only the guards relevant to the current state, and routes
//! at most one transition request through the engine. Guards are
//! checked in declaration order and the first true guard wins; in
//! Ready that means the Off guard before the Emergency guard before
//! the Driving guard.

use tracing::debug;

use dv_common::error::TransitionError;
use dv_common::inputs::{ExternalInputs, MissionSelection};
use dv_common::state::{AsState, Ebs};

use crate::engine::{TransitionEngine, VehicleState};

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No guard was true.
    Idle,
    /// A guard fired and the transition committed.
    Transitioned(AsState),
    /// A guard fired but the engine rejected the request. The request
    /// is dropped; the guard re-evaluates from scratch next cycle.
    Rejected(TransitionError),
}

/// Pure guard table: the transition to request for this cycle, if any.
///
/// First-true-wins in declaration order. `ready_delay_s` is the
/// minimum dwell in Ready before a go signal is honoured.
pub fn plan_transition(
    state: AsState,
    inputs: &ExternalInputs,
    ready_delay_s: f64,
) -> Option<AsState> {
    match state {
        AsState::Off => {
            if inputs.mission == MissionSelection::Autonomous
                && inputs.ebs == Ebs::Armed
                && inputs.asms_on
                && inputs.tractive_on
            {
                return Some(AsState::Ready);
            }
            if inputs.mission == MissionSelection::Manual
                && inputs.ebs == Ebs::Unavailable
                && !inputs.asms_on
                && inputs.tractive_on
            {
                return Some(AsState::ManualDrive);
            }
            None
        }
        AsState::Ready => {
            if !inputs.asms_on && !inputs.brakes_pressed {
                return Some(AsState::Off);
            }
            if inputs.ebs == Ebs::Activated {
                return Some(AsState::Emergency);
            }
            if inputs.go_signal && inputs.ready_elapsed_s >= ready_delay_s {
                return Some(AsState::Driving);
            }
            None
        }
        AsState::Driving => {
            if inputs.ebs == Ebs::Activated {
                return Some(AsState::Emergency);
            }
            if inputs.mission_finished && inputs.speed == 0.0 {
                return Some(AsState::Finished);
            }
            None
        }
        AsState::Emergency => {
            if !inputs.ebs_alarm_active && !inputs.asms_on && !inputs.brakes_pressed {
                return Some(AsState::Off);
            }
            None
        }
        AsState::Finished => {
            if inputs.res_triggered {
                return Some(AsState::Emergency);
            }
            if !inputs.asms_on && !inputs.brakes_pressed {
                return Some(AsState::Off);
            }
            None
        }
        AsState::ManualDrive => {
            if !inputs.tractive_on {
                return Some(AsState::Off);
            }
            None
        }
    }
}

/// The supervisor: engine plus the guard table, driven one tick at a
/// time by an external scheduler (the cycle runner, a host event loop,
/// or a test).
#[derive(Debug, Clone)]
pub struct Supervisor {
    engine: TransitionEngine,
    ready_delay_s: f64,
}

impl Supervisor {
    /// Supervisor over a power-on vehicle.
    pub const fn new(ready_delay_s: f64) -> Self {
        Self {
            engine: TransitionEngine::new(),
            ready_delay_s,
        }
    }

    /// Current AS state.
    #[inline]
    pub const fn state(&self) -> AsState {
        self.engine.state()
    }

    /// Read-only view of the vehicle state bundle.
    #[inline]
    pub const fn vehicle(&self) -> &VehicleState {
        self.engine.vehicle()
    }

    /// Run one guard-check cycle against a sampled input snapshot.
    ///
    /// At most one transition is requested per tick. A rejection is not
    /// retried; the guards re-evaluate against fresh inputs next tick.
    pub fn tick(&mut self, inputs: &ExternalInputs) -> TickOutcome {
        let Some(desired) = plan_transition(self.engine.state(), inputs, self.ready_delay_s)
        else {
            return TickOutcome::Idle;
        };

        match self.engine.attempt_transition(desired) {
            Ok(state) => TickOutcome::Transitioned(state),
            Err(err) => {
                debug!(%err, "guarded transition request dropped");
                TickOutcome::Rejected(err)
            }
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use dv_common::config::DEFAULT_READY_DELAY_S;
    use dv_common::state::{Assi, ReadyToDrive, ServiceBrake, SteeringActuation, TractiveSystem};

    fn autonomous_startup_inputs() -> ExternalInputs {
        ExternalInputs {
            mission: MissionSelection::Autonomous,
            ebs: Ebs::Armed,
            asms_on: true,
            tractive_on: true,
            ..ExternalInputs::default()
        }
    }

    fn supervisor() -> Supervisor {
        Supervisor::new(DEFAULT_READY_DELAY_S)
    }

    /// Drive a supervisor into Driving via Off → Ready → Driving.
    fn driving_supervisor() -> Supervisor {
        let mut sup = supervisor();
        sup.tick(&autonomous_startup_inputs());
        let go = ExternalInputs {
            go_signal: true,
            ready_elapsed_s: 5.0,
            ..autonomous_startup_inputs()
        };
        sup.tick(&go);
        assert_eq!(sup.state(), AsState::Driving);
        sup
    }

    #[test]
    fn idle_when_no_guard_fires() {
        let mut sup = supervisor();
        assert_eq!(sup.tick(&ExternalInputs::default()), TickOutcome::Idle);
        assert_eq!(sup.state(), AsState::Off);
    }

    #[test]
    fn autonomous_startup_reaches_ready() {
        // Scenario: mission selected, EBS armed, ASMS on, TS live.
        let mut sup = supervisor();
        let outcome = sup.tick(&autonomous_startup_inputs());
        assert_eq!(outcome, TickOutcome::Transitioned(AsState::Ready));
        let v = sup.vehicle();
        assert_eq!(v.service_brake, ServiceBrake::Engaged);
        assert_eq!(v.assi, Assi::Yellow);
    }

    #[test]
    fn manual_mission_reaches_manual_drive() {
        let mut sup = supervisor();
        let inputs = ExternalInputs {
            mission: MissionSelection::Manual,
            ebs: Ebs::Unavailable,
            asms_on: false,
            tractive_on: true,
            ..ExternalInputs::default()
        };
        assert_eq!(sup.tick(&inputs), TickOutcome::Transitioned(AsState::ManualDrive));
        let v = sup.vehicle();
        assert_eq!(v.tractive, TractiveSystem::On);
        assert_eq!(v.ready_to_drive, ReadyToDrive::On);
        assert_eq!(v.steering, SteeringActuation::Unavailable);
        assert_eq!(v.assi, Assi::Off);
    }

    #[test]
    fn go_signal_honoured_only_after_ready_delay() {
        let mut sup = supervisor();
        sup.tick(&autonomous_startup_inputs());
        assert_eq!(sup.state(), AsState::Ready);

        let early = ExternalInputs {
            go_signal: true,
            ready_elapsed_s: 3.0,
            ..autonomous_startup_inputs()
        };
        assert_eq!(sup.tick(&early), TickOutcome::Idle);
        assert_eq!(sup.state(), AsState::Ready);

        let on_time = ExternalInputs {
            ready_elapsed_s: 5.0,
            ..early
        };
        assert_eq!(sup.tick(&on_time), TickOutcome::Transitioned(AsState::Driving));
        let v = sup.vehicle();
        assert_eq!(v.assi, Assi::YellowFlash);
        assert_eq!(v.service_brake, ServiceBrake::Available);
    }

    #[test]
    fn ebs_activation_in_driving_forces_emergency() {
        let mut sup = driving_supervisor();
        let inputs = ExternalInputs {
            ebs: Ebs::Activated,
            ..autonomous_startup_inputs()
        };
        assert_eq!(sup.tick(&inputs), TickOutcome::Transitioned(AsState::Emergency));
        let v = sup.vehicle();
        assert_eq!(v.tractive, TractiveSystem::Off);
        assert_eq!(v.ready_to_drive, ReadyToDrive::Off);
        assert_eq!(v.assi, Assi::BlueFlash);
        // Don't-care entries keep their Driving values.
        assert_eq!(v.steering, SteeringActuation::Available);
        assert_eq!(v.service_brake, ServiceBrake::Available);
    }

    #[test]
    fn mission_finished_requires_standstill() {
        let mut sup = driving_supervisor();
        let rolling = ExternalInputs {
            mission_finished: true,
            speed: 0.4,
            ..autonomous_startup_inputs()
        };
        assert_eq!(sup.tick(&rolling), TickOutcome::Idle);

        let standstill = ExternalInputs {
            speed: 0.0,
            ..rolling
        };
        assert_eq!(sup.tick(&standstill), TickOutcome::Transitioned(AsState::Finished));
        assert_eq!(sup.vehicle().assi, Assi::Blue);
    }

    #[test]
    fn res_in_finished_overrides_shutdown_guard() {
        // RES is declared before the Off guard, so it wins even when
        // the shutdown conditions also hold.
        let mut sup = driving_supervisor();
        let finish = ExternalInputs {
            mission_finished: true,
            ..autonomous_startup_inputs()
        };
        sup.tick(&finish);
        assert_eq!(sup.state(), AsState::Finished);

        let res_and_shutdown = ExternalInputs {
            res_triggered: true,
            asms_on: false,
            brakes_pressed: false,
            ..ExternalInputs::default()
        };
        assert_eq!(
            sup.tick(&res_and_shutdown),
            TickOutcome::Transitioned(AsState::Emergency)
        );
    }

    #[test]
    fn ready_guard_priority_off_before_emergency() {
        // ASMS off + brakes released + EBS activated: the Off guard is
        // declared first and wins.
        let mut sup = supervisor();
        sup.tick(&autonomous_startup_inputs());
        let inputs = ExternalInputs {
            asms_on: false,
            brakes_pressed: false,
            ebs: Ebs::Activated,
            ..ExternalInputs::default()
        };
        assert_eq!(sup.tick(&inputs), TickOutcome::Transitioned(AsState::Off));
    }

    #[test]
    fn emergency_exit_blocked_while_alarm_sounds() {
        let mut sup = driving_supervisor();
        sup.tick(&ExternalInputs {
            ebs: Ebs::Activated,
            ..autonomous_startup_inputs()
        });
        assert_eq!(sup.state(), AsState::Emergency);

        let alarm = ExternalInputs {
            ebs_alarm_active: true,
            asms_on: false,
            brakes_pressed: false,
            ..ExternalInputs::default()
        };
        assert_eq!(sup.tick(&alarm), TickOutcome::Idle);

        let quiet = ExternalInputs {
            ebs_alarm_active: false,
            ..alarm
        };
        assert_eq!(sup.tick(&quiet), TickOutcome::Transitioned(AsState::Off));
    }

    #[test]
    fn manual_drive_exits_when_tractive_drops() {
        let mut sup = supervisor();
        sup.tick(&ExternalInputs {
            mission: MissionSelection::Manual,
            tractive_on: true,
            ..ExternalInputs::default()
        });
        assert_eq!(sup.state(), AsState::ManualDrive);

        assert_eq!(
            sup.tick(&ExternalInputs {
                tractive_on: false,
                ..ExternalInputs::default()
            }),
            TickOutcome::Transitioned(AsState::Off)
        );
    }

    #[test]
    fn one_transition_per_tick() {
        // With startup and go conditions all true, the first tick only
        // reaches Ready; Driving needs a later tick.
        let mut sup = supervisor();
        let everything = ExternalInputs {
            go_signal: true,
            ready_elapsed_s: 10.0,
            ..autonomous_startup_inputs()
        };
        assert_eq!(sup.tick(&everything), TickOutcome::Transitioned(AsState::Ready));
        assert_eq!(sup.tick(&everything), TickOutcome::Transitioned(AsState::Driving));
    }
}
