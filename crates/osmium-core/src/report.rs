//! # Demo Reports
//!
//! Self-contained result bundles handed from the engines to whichever
//! surface presents them. The TUI and the headless printer both consume
//! [`DemoReport`] and nothing else, so a report carries everything needed
//! to render: inputs worth echoing back plus the full results.

use crate::deadlock::{DetectionReport, Snapshot};
use crate::memory::AllocationPlan;
use crate::paging::ReplacementRun;
use crate::scheduling::ScheduleRun;

/// Everything there is to show about one demo run.
#[derive(Debug, Clone)]
pub enum DemoReport
{
    /// Snapshot plus detection outcome.
    Deadlock(DeadlockReport),
    /// One reference string replayed under one or more policies.
    Paging(PagingReport),
    /// One process batch scheduled under one or more disciplines.
    Scheduling(SchedulingReport),
    /// One demand batch planned under one or more strategies.
    Memory(MemoryReport),
}

impl DemoReport
{
    /// Human-readable heading for the demo.
    #[must_use]
    pub const fn title(&self) -> &'static str
    {
        match self {
            Self::Deadlock(_) => "Deadlock Detection",
            Self::Paging(_) => "Page Replacement",
            Self::Scheduling(_) => "CPU Scheduling",
            Self::Memory(_) => "Memory Allocation",
        }
    }
}

/// Deadlock demo payload.
///
/// The snapshot rides along because the detection report refers to it by
/// id; names and matrices are resolved against it at render time.
#[derive(Debug, Clone)]
pub struct DeadlockReport
{
    /// The analyzed snapshot
    pub snapshot: Snapshot,
    /// Outcome of the detection pass
    pub detection: DetectionReport,
}

/// Paging demo payload.
#[derive(Debug, Clone)]
pub struct PagingReport
{
    /// The reference string all runs replayed
    pub reference: Vec<u64>,
    /// Frame count all runs used
    pub capacity: usize,
    /// One run per simulated policy
    pub runs: Vec<ReplacementRun>,
}

/// Scheduling demo payload.
#[derive(Debug, Clone)]
pub struct SchedulingReport
{
    /// One run per simulated discipline
    pub runs: Vec<ScheduleRun>,
}

/// Memory demo payload.
#[derive(Debug, Clone)]
pub struct MemoryReport
{
    /// One plan per simulated strategy
    pub plans: Vec<AllocationPlan>,
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::deadlock::detect;

    #[test]
    fn test_titles()
    {
        let snapshot =
            Snapshot::build::<&str, &str>(&[], &[], &[], &[], &[]).unwrap();
        let detection = detect(&snapshot);
        let report = DemoReport::Deadlock(DeadlockReport {
            snapshot,
            detection,
        });

        assert_eq!(report.title(), "Deadlock Detection");

        let paging = DemoReport::Paging(PagingReport {
            reference: Vec::new(),
            capacity: 3,
            runs: Vec::new(),
        });
        assert_eq!(paging.title(), "Page Replacement");
    }
}
