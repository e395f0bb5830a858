//! # CPU Scheduling
//!
//! Builds a complete execution timeline for a batch of processes under a
//! chosen scheduling discipline, plus the usual turnaround and waiting
//! statistics.
//!
//! Three disciplines are available:
//!
//! - [`SchedulingPolicy::Fcfs`]: run in arrival order, no preemption
//! - [`SchedulingPolicy::Sjf`]: shortest burst among the arrived, no
//!   preemption
//! - [`SchedulingPolicy::RoundRobin`]: time-sliced with a fixed quantum
//!
//! Time is unitless. Arrivals and bursts are whole ticks, and the resulting
//! [`ScheduleRun::timeline`] is a gap-free Gantt chart: idle stretches show
//! up as slices with no process rather than being skipped over.
//!
//! ## Example
//!
//! ```rust
//! use osmium_core::scheduling::{run, ProcessSpec, SchedulingPolicy};
//!
//! let specs = [
//!     ProcessSpec::new("P1", 0, 5),
//!     ProcessSpec::new("P2", 1, 3),
//!     ProcessSpec::new("P3", 2, 8),
//! ];
//!
//! let fcfs = run(SchedulingPolicy::Fcfs, &specs)?;
//!
//! assert_eq!(fcfs.makespan(), 16);
//! assert_eq!(fcfs.metrics[1].waiting, 4);
//! # Ok::<(), osmium_core::SimulationError>(())
//! ```

mod fcfs;
mod round_robin;
mod sjf;

use std::fmt;

use tracing::debug;

use crate::error::SimulationError;

/// One process as fed to the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec
{
    /// Display name, not required to be unique
    pub name: String,
    /// Tick at which the process becomes runnable
    pub arrival: u64,
    /// Total CPU ticks the process needs
    pub burst: u64,
}

impl ProcessSpec
{
    /// Convenience constructor.
    pub fn new(name: impl Into<String>, arrival: u64, burst: u64) -> Self
    {
        Self {
            name: name.into(),
            arrival,
            burst,
        }
    }
}

/// Scheduling discipline for [`run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchedulingPolicy
{
    /// First come, first served.
    Fcfs,
    /// Shortest job first, non-preemptive.
    Sjf,
    /// Fixed-quantum time slicing.
    RoundRobin
    {
        /// Ticks a process may run before being preempted
        quantum: u64,
    },
}

impl fmt::Display for SchedulingPolicy
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            Self::Fcfs => f.write_str("FCFS"),
            Self::Sjf => f.write_str("SJF"),
            Self::RoundRobin { quantum } => write!(f, "Round Robin (q={quantum})"),
        }
    }
}

/// One bar of the Gantt chart.
///
/// Slices tile the timeline exactly: each starts where the previous one
/// ended, and `process` is `None` for stretches where the CPU sat idle
/// waiting for the next arrival.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlice
{
    /// Name of the running process, `None` when idle
    pub process: Option<String>,
    /// First tick of the slice
    pub start: u64,
    /// One past the last tick of the slice
    pub end: u64,
}

impl TimeSlice
{
    /// Length of the slice in ticks.
    #[must_use]
    pub const fn duration(&self) -> u64
    {
        self.end - self.start
    }

    /// True for a slice where nothing ran.
    #[must_use]
    pub const fn is_idle(&self) -> bool
    {
        self.process.is_none()
    }
}

/// Final accounting for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessMetrics
{
    /// Display name copied from the spec
    pub name: String,
    /// Arrival tick copied from the spec
    pub arrival: u64,
    /// Burst ticks copied from the spec
    pub burst: u64,
    /// Tick at which the process finished
    pub completion: u64,
    /// `completion - arrival`
    pub turnaround: u64,
    /// `turnaround - burst`, time spent runnable but not running
    pub waiting: u64,
}

/// Complete result of scheduling one batch of processes.
///
/// `metrics` is in input order regardless of execution order, so rows line
/// up with the specs the caller passed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRun
{
    /// Discipline that produced this run
    pub policy: SchedulingPolicy,
    /// Gap-free Gantt chart
    pub timeline: Vec<TimeSlice>,
    /// Per-process accounting, in input order
    pub metrics: Vec<ProcessMetrics>,
}

impl ScheduleRun
{
    /// Tick at which the last process finished, zero for an empty run.
    #[must_use]
    pub fn makespan(&self) -> u64
    {
        self.timeline.last().map_or(0, |slice| slice.end)
    }

    /// Mean turnaround time, zero for an empty run.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_turnaround(&self) -> f64
    {
        if self.metrics.is_empty() {
            return 0.0;
        }
        let total: u64 = self.metrics.iter().map(|m| m.turnaround).sum();
        total as f64 / self.metrics.len() as f64
    }

    /// Mean waiting time, zero for an empty run.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_waiting(&self) -> f64
    {
        if self.metrics.is_empty() {
            return 0.0;
        }
        let total: u64 = self.metrics.iter().map(|m| m.waiting).sum();
        total as f64 / self.metrics.len() as f64
    }
}

/// Schedules `specs` under `policy`
///
/// All ties break by input order: two processes arriving on the same tick
/// run in the order they were listed, and an SJF tie on burst length goes
/// first to the earlier arrival, then to the earlier listing. Round robin
/// admits a process arriving exactly when a quantum expires **before**
/// re-queueing the preempted process.
///
/// An empty batch produces an empty run.
///
/// ## Errors
///
/// - [`SimulationError::ZeroBurst`] when any process has a zero burst time
/// - [`SimulationError::ZeroQuantum`] for round robin with a zero quantum
///
/// ## Example
///
/// ```rust
/// use osmium_core::scheduling::{run, ProcessSpec, SchedulingPolicy};
///
/// let specs = [ProcessSpec::new("P1", 0, 5), ProcessSpec::new("P2", 1, 3)];
/// let rr = run(SchedulingPolicy::RoundRobin { quantum: 2 }, &specs)?;
///
/// // P1 runs its first quantum, then alternates with P2.
/// assert_eq!(rr.timeline[0].process.as_deref(), Some("P1"));
/// assert_eq!(rr.timeline[1].process.as_deref(), Some("P2"));
/// # Ok::<(), osmium_core::SimulationError>(())
/// ```
pub fn run(policy: SchedulingPolicy, specs: &[ProcessSpec]) -> Result<ScheduleRun, SimulationError>
{
    for spec in specs {
        if spec.burst == 0 {
            return Err(SimulationError::ZeroBurst {
                name: spec.name.clone(),
            });
        }
    }
    if let SchedulingPolicy::RoundRobin { quantum: 0 } = policy {
        return Err(SimulationError::ZeroQuantum);
    }

    let result = match policy {
        SchedulingPolicy::Fcfs => fcfs::run(specs),
        SchedulingPolicy::Sjf => sjf::run(specs),
        SchedulingPolicy::RoundRobin { quantum } => round_robin::run(specs, quantum),
    };

    debug!(
        "{} over {} processes: makespan {}, {} slices",
        policy,
        specs.len(),
        result.makespan(),
        result.timeline.len()
    );

    Ok(result)
}

/// Turns a finished timeline and completion ticks into a [`ScheduleRun`].
fn finish_run(
    policy: SchedulingPolicy,
    specs: &[ProcessSpec],
    timeline: Vec<TimeSlice>,
    completion: &[u64],
) -> ScheduleRun
{
    let metrics = specs
        .iter()
        .zip(completion)
        .map(|(spec, &done)| {
            let turnaround = done - spec.arrival;
            ProcessMetrics {
                name: spec.name.clone(),
                arrival: spec.arrival,
                burst: spec.burst,
                completion: done,
                turnaround,
                waiting: turnaround - spec.burst,
            }
        })
        .collect();

    ScheduleRun {
        policy,
        timeline,
        metrics,
    }
}
