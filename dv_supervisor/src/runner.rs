//! Paced supervisor loop.
//!
//! Wraps a [`Supervisor`] in a fixed-period cycle: sample the input
//! source, run one tick, sleep until the next cycle. The loop itself
//! stays out of the library core so that every guard check remains
//! testable one cycle at a time; `run` only adds pacing and the
//! process-wide stop flag.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::{info, warn};

use dv_common::config::SupervisorConfig;
use dv_common::inputs::ExternalInputs;

use crate::supervisor::{Supervisor, TickOutcome};

/// Source of external flag snapshots, owned by the embedding host.
///
/// Stands in for the sensing collaborators (RES, EBS check-up, mission
/// switch, brake pressure) that own the flags in a real vehicle.
pub trait InputSource {
    /// Sample the current snapshot. Must not block.
    fn sample(&mut self) -> ExternalInputs;
}

/// Fixed snapshot source for tests and benches.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticInputs(pub ExternalInputs);

impl InputSource for StaticInputs {
    fn sample(&mut self) -> ExternalInputs {
        self.0
    }
}

/// Re-reads a TOML snapshot file every cycle.
///
/// Bench-testing aid: lets an operator flip flags by editing a file
/// while the supervisor runs. A missing or malformed file yields the
/// last good snapshot (warning once per change of failure).
#[derive(Debug)]
pub struct FileInputSource {
    path: PathBuf,
    last_good: ExternalInputs,
    failed: bool,
}

impl FileInputSource {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            last_good: ExternalInputs::default(),
            failed: false,
        }
    }
}

impl InputSource for FileInputSource {
    fn sample(&mut self) -> ExternalInputs {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => match toml::from_str::<ExternalInputs>(&content) {
                Ok(inputs) => {
                    self.last_good = inputs;
                    self.failed = false;
                    inputs
                }
                Err(e) => {
                    if !self.failed {
                        warn!("failed to parse {}: {e}. Keeping last snapshot.", self.path.display());
                        self.failed = true;
                    }
                    self.last_good
                }
            },
            Err(e) => {
                if !self.failed {
                    warn!("failed to read {}: {e}. Keeping last snapshot.", self.path.display());
                    self.failed = true;
                }
                self.last_good
            }
        }
    }
}

// ─── Cycle statistics ───────────────────────────────────────────────

/// O(1) per-cycle counters, updated without allocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SupervisorStats {
    /// Total guard-check cycles executed.
    pub cycles: u64,
    /// Committed transitions.
    pub transitions: u64,
    /// Guarded requests rejected by the engine.
    pub rejections: u64,
}

impl SupervisorStats {
    #[inline]
    fn record(&mut self, outcome: TickOutcome) {
        self.cycles += 1;
        match outcome {
            TickOutcome::Idle => {}
            TickOutcome::Transitioned(_) => self.transitions += 1,
            TickOutcome::Rejected(_) => self.rejections += 1,
        }
    }
}

// ─── Runner ─────────────────────────────────────────────────────────

/// Drives a [`Supervisor`] at the configured cycle period until the
/// stop flag clears.
#[derive(Debug)]
pub struct SupervisorRunner {
    supervisor: Supervisor,
    cycle_time: Duration,
    stats: SupervisorStats,
}

impl SupervisorRunner {
    pub fn new(config: &SupervisorConfig) -> Self {
        Self {
            supervisor: Supervisor::new(config.ready_delay_s),
            cycle_time: Duration::from_millis(config.cycle_time_ms),
            stats: SupervisorStats::default(),
        }
    }

    /// The wrapped supervisor.
    #[inline]
    pub const fn supervisor(&self) -> &Supervisor {
        &self.supervisor
    }

    /// Counters accumulated so far.
    #[inline]
    pub const fn stats(&self) -> &SupervisorStats {
        &self.stats
    }

    /// Execute exactly one cycle: sample, tick, record.
    pub fn step(&mut self, source: &mut dyn InputSource) -> TickOutcome {
        let inputs = source.sample();
        let outcome = self.supervisor.tick(&inputs);
        self.stats.record(outcome);
        outcome
    }

    /// Run until `running` is cleared. The flag is checked once per
    /// cycle, so shutdown completes the cycle in progress first.
    pub fn run(&mut self, source: &mut dyn InputSource, running: &Arc<AtomicBool>) {
        info!(
            cycle_time_ms = self.cycle_time.as_millis() as u64,
            "supervisor loop started"
        );
        while running.load(Ordering::SeqCst) {
            self.step(source);
            std::thread::sleep(self.cycle_time);
        }
        info!(
            cycles = self.stats.cycles,
            transitions = self.stats.transitions,
            rejections = self.stats.rejections,
            final_state = ?self.supervisor.state(),
            "supervisor loop stopped"
        );
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use dv_common::inputs::MissionSelection;
    use dv_common::state::{AsState, Ebs};
    use std::fs;
    use tempfile::TempDir;

    fn config() -> SupervisorConfig {
        SupervisorConfig::default()
    }

    #[test]
    fn step_records_stats() {
        let mut runner = SupervisorRunner::new(&config());
        let mut source = StaticInputs::default();

        assert_eq!(runner.step(&mut source), TickOutcome::Idle);
        assert_eq!(runner.stats().cycles, 1);
        assert_eq!(runner.stats().transitions, 0);

        source.0 = ExternalInputs {
            mission: MissionSelection::Autonomous,
            ebs: Ebs::Armed,
            asms_on: true,
            tractive_on: true,
            ..ExternalInputs::default()
        };
        assert_eq!(
            runner.step(&mut source),
            TickOutcome::Transitioned(AsState::Ready)
        );
        assert_eq!(runner.stats().cycles, 2);
        assert_eq!(runner.stats().transitions, 1);
        assert_eq!(runner.supervisor().state(), AsState::Ready);
    }

    #[test]
    fn run_stops_when_flag_clears() {
        let mut runner = SupervisorRunner::new(&SupervisorConfig {
            cycle_time_ms: 1,
            ..config()
        });
        let mut source = StaticInputs::default();
        let running = Arc::new(AtomicBool::new(true));

        let stopper = {
            let running = running.clone();
            std::thread::spawn(move || {
                std::thread::sleep(Duration::from_millis(20));
                running.store(false, Ordering::SeqCst);
            })
        };
        runner.run(&mut source, &running);
        stopper.join().unwrap();
        assert!(runner.stats().cycles > 0);
    }

    #[test]
    fn file_source_reads_and_survives_bad_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inputs.toml");
        fs::write(&path, "tractive_on = true\nmission = \"manual\"\n").unwrap();

        let mut source = FileInputSource::new(path.clone());
        let inputs = source.sample();
        assert!(inputs.tractive_on);
        assert_eq!(inputs.mission, MissionSelection::Manual);

        // Malformed file: last good snapshot survives.
        fs::write(&path, "tractive_on = maybe").unwrap();
        let inputs = source.sample();
        assert!(inputs.tractive_on);
        assert_eq!(inputs.mission, MissionSelection::Manual);
    }

    #[test]
    fn file_source_missing_file_yields_defaults() {
        let mut source = FileInputSource::new(PathBuf::from("/nonexistent/inputs.toml"));
        let inputs = source.sample();
        assert!(!inputs.tractive_on);
        assert!(inputs.brakes_pressed);
    }
}
