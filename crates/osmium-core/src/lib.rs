//! # osmium-core
//!
//! Algorithm engines for Osmium, a sandbox for exploring classic
//! operating-systems concepts.
//!
//! This crate provides the simulation building blocks, including:
//! - Deadlock detection over allocation snapshots (the work/finish reduction)
//! - Page replacement simulation (FIFO, LRU, Optimal)
//! - CPU scheduling simulation (FCFS, SJF, Round Robin)
//! - Contiguous memory allocation planning (first fit, best fit)
//!
//! Everything here is pure computation: inputs come in as plain slices and
//! vectors, results come out as inspectable reports. Terminal rendering lives
//! in `osmium-ui`, and file/flag handling lives in the `osmium` binary.
//!
//! ## Example
//!
//! ```rust
//! use osmium_core::deadlock::{detect, Snapshot};
//!
//! // Two processes holding one unit each of a two-unit resource,
//! // each requesting one more unit: a textbook circular wait.
//! let snapshot = Snapshot::build(
//!     &["P1", "P2"],
//!     &["R1"],
//!     &[2],
//!     &[vec![1], vec![1]],
//!     &[vec![1], vec![1]],
//! )?;
//!
//! let report = detect(&snapshot);
//! assert!(report.has_deadlock());
//! assert_eq!(report.deadlocked_count(), 2);
//! # Ok::<(), osmium_core::SnapshotError>(())
//! ```

pub mod deadlock;
pub mod error;
pub mod memory;
pub mod paging;
pub mod report;
pub mod scheduling;

// Re-export commonly used types
pub use deadlock::{detect, ConsistencyWarning, DetectionReport, ProcessId, ResourceId, Snapshot};
pub use error::{SimulationError, SnapshotError};
pub use report::DemoReport;
