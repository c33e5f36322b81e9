//! External flag snapshot consumed by the supervisor.
//!
//! These flags are owned and updated by the sensing/actuation
//! collaborators (RES receiver, EBS check-up logic, mission selector,
//! brake pressure sensing). The supervisor only samples them; it never
//! writes them back.

use serde::{Deserialize, Serialize};

use crate::state::Ebs;

/// Mission selection at the mission switch.
///
/// Replaces the pair of independent autonomous/manual booleans with a
/// single three-state value so that "both selected" cannot be
/// represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MissionSelection {
    /// No mission selected.
    #[default]
    None,
    /// An autonomous mission is selected.
    Autonomous,
    /// The manual mission is selected.
    Manual,
}

/// One sampled snapshot of every boundary input, taken once per
/// supervisor cycle.
///
/// `Serialize`/`Deserialize` so an embedding host (or the file-backed
/// input source used for bench testing) can feed snapshots as TOML.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExternalInputs {
    /// Mission switch position.
    pub mission: MissionSelection,
    /// Go signal from the RES.
    pub go_signal: bool,
    /// Mission complete as reported by the autonomous mission logic.
    pub mission_finished: bool,
    /// Autonomous System Master Switch position.
    pub asms_on: bool,
    /// Hydraulic brake circuits pressurised.
    pub brakes_pressed: bool,
    /// RES emergency stop triggered.
    pub res_triggered: bool,
    /// EBS audible alarm currently sounding.
    pub ebs_alarm_active: bool,
    /// EBS status as reported by the EBS check-up/trigger hardware.
    pub ebs: Ebs,
    /// Tractive system reported active.
    pub tractive_on: bool,
    /// Seconds elapsed since the AS entered Ready.
    pub ready_elapsed_s: f64,
    /// Vehicle speed [m/s].
    pub speed: f64,
}

impl Default for ExternalInputs {
    fn default() -> Self {
        Self {
            mission: MissionSelection::None,
            go_signal: false,
            mission_finished: false,
            asms_on: false,
            // Vehicle is held on the brakes at power-on.
            brakes_pressed: true,
            res_triggered: false,
            ebs_alarm_active: false,
            ebs: Ebs::Unavailable,
            tractive_on: false,
            ready_elapsed_s: 0.0,
            speed: 0.0,
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
