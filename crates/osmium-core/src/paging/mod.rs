//! # Page Replacement
//!
//! Replays a page reference string against a fixed number of physical
//! frames and records every hit, fault, and eviction along the way.
//!
//! Three victim-selection policies are available:
//!
//! - [`ReplacementPolicy::Fifo`]: evict the page resident the longest
//! - [`ReplacementPolicy::Lru`]: evict the page unused the longest
//! - [`ReplacementPolicy::Optimal`]: evict the page whose next use is
//!   farthest away (needs the whole reference string up front, so it is a
//!   benchmark rather than something an OS could run)
//!
//! ## Example
//!
//! ```rust
//! use osmium_core::paging::{simulate, ReplacementPolicy};
//!
//! let reference = [1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5];
//! let run = simulate(ReplacementPolicy::Fifo, &reference, 3)?;
//!
//! assert_eq!(run.faults, 9);
//! assert_eq!(run.hits, 3);
//! # Ok::<(), osmium_core::SimulationError>(())
//! ```

mod fifo;
mod lru;
mod optimal;

use std::fmt;

use tracing::debug;

use crate::error::SimulationError;

/// Victim-selection policy for [`simulate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplacementPolicy
{
    /// First in, first out: evict the oldest resident page.
    Fifo,
    /// Least recently used: evict the page untouched the longest.
    Lru,
    /// Belady's optimal: evict the page needed again furthest in the future.
    Optimal,
}

impl ReplacementPolicy
{
    /// Every policy, in the order reports present them.
    pub const ALL: [Self; 3] = [Self::Fifo, Self::Lru, Self::Optimal];

    /// Conventional display name.
    #[must_use]
    pub const fn name(self) -> &'static str
    {
        match self {
            Self::Fifo => "FIFO",
            Self::Lru => "LRU",
            Self::Optimal => "Optimal",
        }
    }
}

impl fmt::Display for ReplacementPolicy
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(self.name())
    }
}

/// What happened on a single page access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessOutcome
{
    /// The page was already resident.
    Hit,
    /// The page had to be brought in, displacing `evicted` if the frames
    /// were full.
    Fault
    {
        /// Page pushed out to make room, `None` while frames were filling.
        evicted: Option<u64>,
    },
}

impl AccessOutcome
{
    /// True for either kind of fault.
    #[must_use]
    pub const fn is_fault(&self) -> bool
    {
        matches!(self, Self::Fault { .. })
    }
}

/// One row of the access timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRecord
{
    /// Page that was referenced
    pub page: u64,
    /// Hit or fault, with the eviction if any
    pub outcome: AccessOutcome,
    /// Resident pages after the access, in frame-slot order
    pub frames: Vec<u64>,
}

/// Complete result of replaying a reference string under one policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementRun
{
    /// Policy that produced this run
    pub policy: ReplacementPolicy,
    /// Number of physical frames simulated
    pub capacity: usize,
    /// Accesses that missed
    pub faults: usize,
    /// Accesses that found the page resident
    pub hits: usize,
    /// Per-access record, same length as the reference string
    pub timeline: Vec<AccessRecord>,
}

impl ReplacementRun
{
    /// Fraction of accesses that faulted, zero for an empty reference string.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fault_rate(&self) -> f64
    {
        if self.timeline.is_empty() {
            0.0
        } else {
            self.faults as f64 / self.timeline.len() as f64
        }
    }
}

/// Replays `reference` against `capacity` frames under `policy`
///
/// Frames start empty. Every access is recorded in the returned timeline,
/// so `run.faults + run.hits == reference.len()` always holds. An empty
/// reference string yields an empty run.
///
/// ## Errors
///
/// [`SimulationError::ZeroCapacity`] when `capacity` is zero.
///
/// ## Example
///
/// ```rust
/// use osmium_core::paging::{simulate, AccessOutcome, ReplacementPolicy};
///
/// let run = simulate(ReplacementPolicy::Lru, &[1, 2, 1, 3], 2)?;
///
/// // The third access finds page 1 resident, the rest fault.
/// assert_eq!(run.faults, 3);
/// assert_eq!(run.timeline[2].outcome, AccessOutcome::Hit);
///
/// // Page 2 was the least recently used when 3 arrived.
/// assert_eq!(run.timeline[3].outcome, AccessOutcome::Fault { evicted: Some(2) });
/// # Ok::<(), osmium_core::SimulationError>(())
/// ```
pub fn simulate(
    policy: ReplacementPolicy,
    reference: &[u64],
    capacity: usize,
) -> Result<ReplacementRun, SimulationError>
{
    if capacity == 0 {
        return Err(SimulationError::ZeroCapacity);
    }

    let run = match policy {
        ReplacementPolicy::Fifo => fifo::simulate(reference, capacity),
        ReplacementPolicy::Lru => lru::simulate(reference, capacity),
        ReplacementPolicy::Optimal => optimal::simulate(reference, capacity),
    };

    debug!(
        "{} over {} accesses with {} frames: {} faults, {} hits",
        policy,
        reference.len(),
        capacity,
        run.faults,
        run.hits
    );

    Ok(run)
}
