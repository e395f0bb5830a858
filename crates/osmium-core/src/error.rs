//! # Error Types
//!
//! General error handling for the simulation engines.
//!
//! We use `thiserror` to automatically generate `Error` trait implementations
//! and nice error messages.
//!
//! There are exactly two error surfaces in this crate: [`SnapshotError`] for
//! rejected deadlock snapshots and [`SimulationError`] for rejected simulator
//! parameters. Everything past input validation is total and cannot fail.

use thiserror::Error;

/// Error raised while building a deadlock [`Snapshot`](crate::deadlock::Snapshot)
///
/// Snapshot construction is the single place where the deadlock engine can
/// reject input. Once a snapshot exists, detection always succeeds, so
/// callers only handle errors at the boundary where raw data enters.
///
/// The `context` field pins the error to a location in the input using a
/// stable notation: `totals`, `allocation[1]` (a whole row), or
/// `request[0][2]` (a single cell).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError
{
    /// A vector or matrix row does not match the declared dimensions
    ///
    /// This happens when:
    /// - The totals vector is shorter or longer than the resource name list
    /// - The allocation or request matrix has the wrong number of rows
    /// - A row of either matrix has the wrong number of columns
    ///
    /// Dimensions are declared by the `processes` and `resources` name lists;
    /// every numeric input must agree with them exactly.
    #[error("{context}: expected {expected} entries, found {found}")]
    ShapeMismatch
    {
        /// Which input was malformed, e.g. `allocation[1]`
        context: String,
        /// Entry count implied by the declared names
        expected: usize,
        /// Entry count actually supplied
        found: usize,
    },

    /// A negative number where only a resource count is meaningful
    ///
    /// Totals, allocations, and requests are all counts of resource units.
    /// Input cells are accepted as signed integers so that this condition is
    /// representable, then rejected here before any arithmetic runs on them.
    #[error("{context}: negative value {value}")]
    NegativeValue
    {
        /// Which cell was negative, e.g. `request[0][2]`
        context: String,
        /// The offending value
        value: i64,
    },
}

/// Error raised when a simulator is given unusable parameters
///
/// Like [`SnapshotError`], these only occur at the call boundary. A
/// simulation that starts always runs to completion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError
{
    /// Page replacement was asked to run with zero frames
    ///
    /// With no frames every access would fault and nothing could ever be
    /// resident, so the simulation refuses to start.
    #[error("frame capacity must be at least one")]
    ZeroCapacity,

    /// A process was declared with a zero burst time
    ///
    /// A zero-length burst never occupies the CPU and would silently vanish
    /// from the timeline, which usually means the input was mistyped.
    #[error("process {name:?} has a zero burst time")]
    ZeroBurst
    {
        /// Name of the offending process
        name: String,
    },

    /// Round robin was configured with a zero time quantum
    ///
    /// A zero quantum would preempt every process before it runs a single
    /// tick and the schedule could never make progress.
    #[error("round robin needs a time quantum of at least one")]
    ZeroQuantum,
}
