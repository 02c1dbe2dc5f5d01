//! Usage bookkeeping.

use std::sync::atomic::{AtomicU64, Ordering};

/// Circuits-run and jobs-run counters of a simulator instance.
///
/// Counters only ever grow; they reset when the simulator is rebuilt.
#[derive(Debug, Default)]
pub struct UsageCounters {
    circuits_run: AtomicU64,
    jobs_run: AtomicU64,
}

impl UsageCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one job that ran `circuits` circuits.
    pub fn record_job(&self, circuits: u64) {
        self.circuits_run.fetch_add(circuits, Ordering::Relaxed);
        self.jobs_run.fetch_add(1, Ordering::Relaxed);
    }

    pub fn circuits_run(&self) -> u64 {
        self.circuits_run.load(Ordering::Relaxed)
    }

    pub fn jobs_run(&self) -> u64 {
        self.jobs_run.load(Ordering::Relaxed)
    }
}
