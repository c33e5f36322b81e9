//! # DV Supervisor Library
//!
//! Finite-state supervisor for the Autonomous System of a driverless
//! Formula Student vehicle (FS-Rules 2020, Figure 21). Decides and
//! records the logical state of the tractive system, R2D, steering
//! actuation, service brake, EBS, and the ASSI indicators; physical
//! actuation and sensing live in external collaborators.
//!
//! ## Architecture
//!
//! 1. **[`graph`]** — static accessibility matrix over the six AS states
//! 2. **[`table`]** — per-state subsystem targets and ASSI mapping
//! 3. **[`engine`]** — validates and executes transitions, ASSI last
//! 4. **[`supervisor`]** — guard evaluation, one tick per cycle
//! 5. **[`runner`]** — pacing, input sources, stop flag, counters
//!
//! Control flow is one-directional and synchronous: sample inputs →
//! evaluate guards → request transition → validate → apply targets →
//! commit → update ASSI.

pub mod engine;
pub mod graph;
pub mod runner;
pub mod supervisor;
pub mod table;
