//! # Deadlock Detection
//!
//! Detects deadlock in a point-in-time picture of resource ownership.
//!
//! The engine works on a [`Snapshot`]: who holds how many units of each
//! resource, and who is waiting for how many more. [`detect`] then runs the
//! classic work/finish reduction (the detection variant of the banker's
//! algorithm) and splits the processes into a safe completion sequence and a
//! deadlocked remainder.
//!
//! Construction and analysis are deliberately separate steps. Building a
//! [`Snapshot`] validates all dimensions and values and is the only fallible
//! part; [`detect`] is total and can be run any number of times on the same
//! snapshot.
//!
//! ## Example
//!
//! ```rust
//! use osmium_core::deadlock::{detect, Snapshot};
//!
//! let snapshot = Snapshot::build(
//!     &["P1", "P2", "P3"],
//!     &["R1", "R2"],
//!     &[2, 2],
//!     &[vec![1, 0], vec![1, 1], vec![0, 1]],
//!     &[vec![0, 1], vec![0, 0], vec![1, 0]],
//! )?;
//!
//! let report = detect(&snapshot);
//! assert!(!report.has_deadlock());
//!
//! // Every process appears in the safe sequence.
//! assert_eq!(report.safe_sequence().len(), 3);
//! # Ok::<(), osmium_core::SnapshotError>(())
//! ```

mod detect;
mod snapshot;

pub use detect::{detect, DetectionReport};
pub use snapshot::{ConsistencyWarning, ProcessId, ResourceId, Snapshot};
