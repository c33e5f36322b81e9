//! Autonomous System state and subsystem enums.
//!
//! All enums use `#[repr(u8)]` for compact memory layout and stable
//! discriminants at the host boundary. Covers the AS lifecycle state,
//! the ASSI indicator, and the five governed subsystems (TS, R2D, SA,
//! SB, EBS) from FSG FS-Rules 2020, Figure 21.

use serde::{Deserialize, Serialize};

// ─── AS lifecycle state ─────────────────────────────────────────────

/// Autonomous System state (FS-Rules 2020, Figure 21).
///
/// Exactly one `AsState` is current at any time. The state is mutated
/// only by the transition engine; it starts in `Off` and lives for the
/// whole process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum AsState {
    /// AS powered down, no mission selected.
    Off = 0,
    /// EBS armed, tractive system live, waiting for the go signal.
    Ready = 1,
    /// Autonomous mission in progress.
    Driving = 2,
    /// EBS activated — vehicle performing an emergency stop.
    Emergency = 3,
    /// Mission complete, vehicle at standstill.
    Finished = 4,
    /// Manual mission — AS disengaged, driver in control.
    ManualDrive = 5,
}

/// Number of AS states (adjacency matrix dimension).
pub const STATE_COUNT: usize = 6;

impl AsState {
    /// Convert from raw `u8`. Returns `None` for invalid values.
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Off),
            1 => Some(Self::Ready),
            2 => Some(Self::Driving),
            3 => Some(Self::Emergency),
            4 => Some(Self::Finished),
            5 => Some(Self::ManualDrive),
            _ => None,
        }
    }

    /// All states in discriminant order. Handy for table-totality tests
    /// and exhaustive sweeps.
    pub const ALL: [Self; STATE_COUNT] = [
        Self::Off,
        Self::Ready,
        Self::Driving,
        Self::Emergency,
        Self::Finished,
        Self::ManualDrive,
    ];
}

impl Default for AsState {
    fn default() -> Self {
        Self::Off
    }
}

// ─── ASSI indicator ─────────────────────────────────────────────────

/// Autonomous System Status Indicator colour/pattern (DV 2.4).
///
/// Derived from `AsState` via the indicator mapping; never set
/// independently. Per DV 2.4.3 the ASSIs must keep showing the initial
/// state until a transition is complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Assi {
    /// Indicators dark (AS off / manual).
    Off = 0,
    /// Flashing yellow — AS driving.
    YellowFlash = 1,
    /// Continuous yellow — AS ready.
    Yellow = 2,
    /// Flashing blue — AS emergency.
    BlueFlash = 3,
    /// Continuous blue — AS finished.
    Blue = 4,
}

impl Assi {
    /// Convert from raw `u8`. Returns `None` for invalid values.
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Off),
            1 => Some(Self::YellowFlash),
            2 => Some(Self::Yellow),
            3 => Some(Self::BlueFlash),
            4 => Some(Self::Blue),
            _ => None,
        }
    }
}

impl Default for Assi {
    fn default() -> Self {
        Self::Off
    }
}

// ─── Governed subsystems ────────────────────────────────────────────

/// Tractive System activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TractiveSystem {
    /// TS deactivated.
    Off = 0,
    /// TS active.
    On = 1,
}

impl Default for TractiveSystem {
    fn default() -> Self {
        Self::Off
    }
}

/// Ready-to-Drive signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ReadyToDrive {
    /// R2D not given.
    Off = 0,
    /// R2D given — drivetrain may produce torque.
    On = 1,
}

impl Default for ReadyToDrive {
    fn default() -> Self {
        Self::Off
    }
}

/// Steering actuation availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SteeringActuation {
    /// Steering actuator disengaged.
    Unavailable = 0,
    /// Steering actuator may steer the vehicle.
    Available = 1,
}

impl Default for SteeringActuation {
    fn default() -> Self {
        Self::Unavailable
    }
}

/// Service brake availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ServiceBrake {
    /// Service brake cannot be actuated.
    Unavailable = 0,
    /// Service brake actively holding the vehicle.
    Engaged = 1,
    /// Service brake released but actuatable.
    Available = 2,
}

impl Default for ServiceBrake {
    fn default() -> Self {
        Self::Unavailable
    }
}

/// Emergency Brake System status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Ebs {
    /// EBS check-up not passed / disarmed.
    Unavailable = 0,
    /// EBS armed and ready to trigger.
    Armed = 1,
    /// EBS triggered — vehicle braking.
    Activated = 2,
}

impl Ebs {
    /// Convert from raw `u8`. Returns `None` for invalid values.
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Unavailable),
            1 => Some(Self::Armed),
            2 => Some(Self::Activated),
            _ => None,
        }
    }
}

impl Default for Ebs {
    fn default() -> Self {
        Self::Unavailable
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_state_u8_round_trip() {
        for state in AsState::ALL {
            assert_eq!(AsState::from_u8(state as u8), Some(state));
        }
        assert_eq!(AsState::from_u8(6), None);
        assert_eq!(AsState::from_u8(255), None);
    }

    #[test]
    fn assi_u8_round_trip() {
        for raw in 0..5u8 {
            let assi = Assi::from_u8(raw).unwrap();
            assert_eq!(assi as u8, raw);
        }
        assert_eq!(Assi::from_u8(5), None);
    }

    #[test]
    fn defaults_match_power_on_values() {
        assert_eq!(AsState::default(), AsState::Off);
        assert_eq!(Assi::default(), Assi::Off);
        assert_eq!(TractiveSystem::default(), TractiveSystem::Off);
        assert_eq!(ReadyToDrive::default(), ReadyToDrive::Off);
        assert_eq!(SteeringActuation::default(), SteeringActuation::Unavailable);
        assert_eq!(ServiceBrake::default(), ServiceBrake::Unavailable);
        assert_eq!(Ebs::default(), Ebs::Unavailable);
    }

    #[test]
    fn all_covers_every_state_once() {
        for (i, state) in AsState::ALL.iter().enumerate() {
            assert_eq!(*state as usize, i);
        }
    }
}
