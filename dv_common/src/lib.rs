//! DV Common Library
//!
//! Shared types for the DV autonomous-system supervisor workspace:
//! AS state and subsystem enums, the external input snapshot, the
//! transition error taxonomy, and configuration loading.
//!
//! # Module Structure
//!
//! - [`state`] - AS/ASSI/subsystem enums
//! - [`inputs`] - boundary flag snapshot sampled each cycle
//! - [`error`] - transition rejection taxonomy
//! - [`config`] - TOML configuration loading
//! - [`prelude`] - common re-exports for convenience

pub mod config;
pub mod error;
pub mod inputs;
pub mod prelude;
pub mod state;
