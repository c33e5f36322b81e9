//! Per-state subsystem target table and ASSI mapping.
//!
//! Static data: for each AS state, the required value of every governed
//! subsystem, and the indicator colour the ASSIs must show once the
//! transition into that state has completed. Fields that the rulebook
//! leaves unspecified for a state are `Update::Keep` and retain their
//! previous value across the transition.

use dv_common::state::{
    AsState, Assi, Ebs, ReadyToDrive, ServiceBrake, SteeringActuation, TractiveSystem,
};

/// A per-field table entry: either drive the field to a concrete value
/// or keep whatever it held before the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update<T> {
    /// Overwrite the field with this value.
    Set(T),
    /// Leave the field untouched ("don't care" in the rulebook table).
    Keep,
}

impl<T: Copy> Update<T> {
    /// Resolve against the previous value.
    #[inline]
    pub fn apply(self, previous: T) -> T {
        match self {
            Update::Set(value) => value,
            Update::Keep => previous,
        }
    }
}

/// Required subsystem values for one AS state.
///
/// TS and R2D are concrete in every row of the table; SA, SB, and EBS
/// have don't-care entries for some states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTargets {
    /// Tractive system target.
    pub tractive: TractiveSystem,
    /// Ready-to-drive target.
    pub ready_to_drive: ReadyToDrive,
    /// Steering actuation target.
    pub steering: Update<SteeringActuation>,
    /// Service brake target.
    pub service_brake: Update<ServiceBrake>,
    /// EBS target.
    pub ebs: Update<Ebs>,
}

/// Subsystem targets for the given state. Pure, total lookup.
pub const fn targets_for(state: AsState) -> StateTargets {
    use Update::{Keep, Set};
    match state {
        AsState::Off => StateTargets {
            tractive: TractiveSystem::Off,
            ready_to_drive: ReadyToDrive::Off,
            steering: Set(SteeringActuation::Unavailable),
            service_brake: Set(ServiceBrake::Unavailable),
            ebs: Keep,
        },
        AsState::Ready => StateTargets {
            tractive: TractiveSystem::On,
            ready_to_drive: ReadyToDrive::Off,
            steering: Set(SteeringActuation::Available),
            service_brake: Set(ServiceBrake::Engaged),
            ebs: Set(Ebs::Armed),
        },
        AsState::Driving => StateTargets {
            tractive: TractiveSystem::On,
            ready_to_drive: ReadyToDrive::On,
            steering: Set(SteeringActuation::Available),
            service_brake: Set(ServiceBrake::Available),
            ebs: Set(Ebs::Armed),
        },
        AsState::Emergency => StateTargets {
            tractive: TractiveSystem::Off,
            ready_to_drive: ReadyToDrive::Off,
            steering: Keep,
            service_brake: Keep,
            ebs: Set(Ebs::Activated),
        },
        AsState::Finished => StateTargets {
            tractive: TractiveSystem::Off,
            ready_to_drive: ReadyToDrive::Off,
            steering: Set(SteeringActuation::Unavailable),
            service_brake: Keep,
            ebs: Set(Ebs::Activated),
        },
        AsState::ManualDrive => StateTargets {
            tractive: TractiveSystem::On,
            ready_to_drive: ReadyToDrive::On,
            steering: Set(SteeringActuation::Unavailable),
            service_brake: Set(ServiceBrake::Unavailable),
            ebs: Set(Ebs::Unavailable),
        },
    }
}

/// ASSI colour for the given state (DV 2.4.2). Pure, total lookup.
pub const fn assi_for(state: AsState) -> Assi {
    match state {
        AsState::Off => Assi::Off,
        AsState::Ready => Assi::Yellow,
        AsState::Driving => Assi::YellowFlash,
        AsState::Emergency => Assi::BlueFlash,
        AsState::Finished => Assi::Blue,
        AsState::ManualDrive => Assi::Off,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use Update::{Keep, Set};

    #[test]
    fn update_apply_resolves() {
        assert_eq!(Set(ServiceBrake::Engaged).apply(ServiceBrake::Available), ServiceBrake::Engaged);
        assert_eq!(Keep.apply(ServiceBrake::Available), ServiceBrake::Available);
    }

    #[test]
    fn tables_are_total() {
        // Both lookups are exhaustive matches; sweeping ALL proves the
        // compiler-checked totality also holds at runtime.
        for state in AsState::ALL {
            let _ = targets_for(state);
            let _ = assi_for(state);
        }
    }

    #[test]
    fn dont_care_entries_match_rulebook() {
        assert_eq!(targets_for(AsState::Off).ebs, Keep);
        assert_eq!(targets_for(AsState::Emergency).steering, Keep);
        assert_eq!(targets_for(AsState::Emergency).service_brake, Keep);
        assert_eq!(targets_for(AsState::Finished).service_brake, Keep);

        // Every other entry is concrete.
        for state in [AsState::Ready, AsState::Driving, AsState::ManualDrive] {
            let t = targets_for(state);
            assert!(!matches!(t.steering, Keep));
            assert!(!matches!(t.service_brake, Keep));
            assert!(!matches!(t.ebs, Keep));
        }
    }

    #[test]
    fn ready_row() {
        let t = targets_for(AsState::Ready);
        assert_eq!(t.tractive, TractiveSystem::On);
        assert_eq!(t.ready_to_drive, ReadyToDrive::Off);
        assert_eq!(t.steering, Set(SteeringActuation::Available));
        assert_eq!(t.service_brake, Set(ServiceBrake::Engaged));
        assert_eq!(t.ebs, Set(Ebs::Armed));
    }

    #[test]
    fn assi_mapping_is_canonical() {
        assert_eq!(assi_for(AsState::Off), Assi::Off);
        assert_eq!(assi_for(AsState::Ready), Assi::Yellow);
        assert_eq!(assi_for(AsState::Driving), Assi::YellowFlash);
        assert_eq!(assi_for(AsState::Emergency), Assi::BlueFlash);
        assert_eq!(assi_for(AsState::Finished), Assi::Blue);
        assert_eq!(assi_for(AsState::ManualDrive), Assi::Off);
    }
}
