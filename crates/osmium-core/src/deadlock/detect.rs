//! The work/finish reduction pass.
//!
//! Detection asks one question per process: could it acquire everything it is
//! currently waiting for, run to completion, and hand its resources back?
//! Processes are reduced away in repeated left-to-right sweeps until no
//! further process can finish; whatever remains is deadlocked.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use super::snapshot::{ProcessId, ResourceVec, Snapshot};

/// Outcome of running [`detect`] over a [`Snapshot`]
///
/// Every process from the snapshot lands in exactly one of two places: the
/// **safe sequence** (an order in which the processes can all run to
/// completion, given what is currently free) or the **deadlocked set**
/// (processes whose requests can never be satisfied from the snapshot
/// state). An empty deadlocked set means the system is deadlock-free.
///
/// The report borrows nothing: ids index into the snapshot that was
/// analyzed, so keep that snapshot around to resolve names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionReport
{
    deadlocked: BTreeSet<ProcessId>,
    safe: Vec<ProcessId>,
    passes: usize,
}

impl DetectionReport
{
    /// True when at least one process can never finish.
    #[must_use]
    pub fn has_deadlock(&self) -> bool
    {
        !self.deadlocked.is_empty()
    }

    /// True when `id` is in the deadlocked set.
    #[must_use]
    pub fn is_deadlocked(&self, id: ProcessId) -> bool
    {
        self.deadlocked.contains(&id)
    }

    /// Number of deadlocked processes.
    #[must_use]
    pub fn deadlocked_count(&self) -> usize
    {
        self.deadlocked.len()
    }

    /// Deadlocked processes in ascending row order.
    pub fn deadlocked(&self) -> impl Iterator<Item = ProcessId> + '_
    {
        self.deadlocked.iter().copied()
    }

    /// Order in which the non-deadlocked processes were reduced away.
    ///
    /// This is a completion order, not the only one: it is the order the
    /// left-to-right sweep happens to discover. Empty when every process is
    /// deadlocked (or the snapshot had none).
    #[must_use]
    pub fn safe_sequence(&self) -> &[ProcessId]
    {
        &self.safe
    }

    /// Number of sweeps that reduced at least one process away.
    ///
    /// A single-resource chain that unravels front to back finishes in one
    /// pass; a chain that unravels back to front needs one pass per link.
    /// Zero means nothing could run at all.
    #[must_use]
    pub fn passes(&self) -> usize
    {
        self.passes
    }
}

/// Runs deadlock detection over a snapshot
///
/// Starts from the snapshot's available vector as working capital. Each
/// sweep scans processes in row order; a process whose entire request row
/// fits inside the working vector is marked finished, its allocation row is
/// released into the working vector immediately, and the sweep continues.
/// Released units are therefore visible to later processes **within the
/// same sweep**. Sweeps repeat until one completes without finishing
/// anybody; the processes still unfinished at that point are deadlocked.
///
/// Detection never fails and never modifies the snapshot. Given the same
/// snapshot it always produces the same report, including the same safe
/// sequence order.
///
/// ## Example
///
/// ```rust
/// use osmium_core::deadlock::{detect, Snapshot};
///
/// // P1 and P2 each hold one unit of what the other is waiting for.
/// // P3 only needs the free unit of R3 and escapes.
/// let snapshot = Snapshot::build(
///     &["P1", "P2", "P3"],
///     &["R1", "R2", "R3"],
///     &[1, 1, 1],
///     &[vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 0]],
///     &[vec![0, 1, 0], vec![1, 0, 0], vec![0, 0, 1]],
/// )?;
///
/// let report = detect(&snapshot);
/// let deadlocked: Vec<&str> = report
///     .deadlocked()
///     .map(|id| snapshot.process_name(id))
///     .collect();
///
/// assert_eq!(deadlocked, ["P1", "P2"]);
/// # Ok::<(), osmium_core::SnapshotError>(())
/// ```
#[must_use]
pub fn detect(snapshot: &Snapshot) -> DetectionReport
{
    let process_count = snapshot.process_count();
    let mut work: ResourceVec = snapshot.available().iter().copied().collect();
    let mut finished = vec![false; process_count];
    let mut safe = Vec::with_capacity(process_count);
    let mut passes = 0;

    loop {
        let mut progressed = false;

        for p in 0..process_count {
            if finished[p] {
                continue;
            }
            let id = ProcessId(p);
            if !fits(snapshot.request_row(id), &work) {
                continue;
            }

            // The process can finish; everything it holds comes back.
            for (free, held) in work.iter_mut().zip(snapshot.allocation_row(id)) {
                *free += held;
            }
            finished[p] = true;
            safe.push(id);
            progressed = true;
            trace!(
                "pass {}: {} can finish, work is now {:?}",
                passes + 1,
                snapshot.process_name(id),
                work
            );
        }

        if progressed {
            passes += 1;
        } else {
            break;
        }
    }

    let deadlocked: BTreeSet<ProcessId> = (0..process_count)
        .filter(|&p| !finished[p])
        .map(ProcessId)
        .collect();

    debug!(
        "detection done after {} passes: {} safe, {} deadlocked",
        passes,
        safe.len(),
        deadlocked.len()
    );

    DetectionReport {
        deadlocked,
        safe,
        passes,
    }
}

/// True when every requested count is covered by the working vector.
fn fits(request: &[u64], work: &[u64]) -> bool
{
    request.iter().zip(work).all(|(need, free)| need <= free)
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn snapshot(
        totals: &[i64],
        allocation: &[Vec<i64>],
        request: &[Vec<i64>],
    ) -> Snapshot
    {
        let processes: Vec<String> =
            (1..=allocation.len()).map(|i| format!("P{i}")).collect();
        let resources: Vec<String> = (1..=totals.len()).map(|i| format!("R{i}")).collect();
        Snapshot::build(&processes, &resources, totals, allocation, request).unwrap()
    }

    fn safe_names(snapshot: &Snapshot, report: &DetectionReport) -> Vec<String>
    {
        report
            .safe_sequence()
            .iter()
            .map(|&id| snapshot.process_name(id).to_owned())
            .collect()
    }

    #[test]
    fn test_empty_snapshot_has_empty_report()
    {
        let snap = snapshot(&[], &[], &[]);
        let report = detect(&snap);

        assert!(!report.has_deadlock());
        assert_eq!(report.deadlocked_count(), 0);
        assert!(report.safe_sequence().is_empty());
        assert_eq!(report.passes(), 0);
    }

    #[test]
    fn test_no_requests_means_no_deadlock()
    {
        let snap = snapshot(
            &[1, 1],
            &[vec![1, 0], vec![0, 1]],
            &[vec![0, 0], vec![0, 0]],
        );
        let report = detect(&snap);

        assert!(!report.has_deadlock());
        assert_eq!(safe_names(&snap, &report), ["P1", "P2"]);
        assert_eq!(report.passes(), 1);
    }

    #[test]
    fn test_two_process_circular_wait()
    {
        let snap = snapshot(
            &[1, 1],
            &[vec![1, 0], vec![0, 1]],
            &[vec![0, 1], vec![1, 0]],
        );
        let report = detect(&snap);

        assert!(report.has_deadlock());
        assert_eq!(report.deadlocked_count(), 2);
        assert!(report.safe_sequence().is_empty());
        assert_eq!(report.passes(), 0);
    }

    #[test]
    fn test_releases_are_visible_within_a_pass()
    {
        // P1 frees R1, which P2 needs; P2 frees R2, which P3 needs.
        // A scan that re-reads available per pass would need three passes,
        // the in-pass release rule needs one.
        let snap = snapshot(
            &[1, 1, 1],
            &[vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]],
            &[vec![0, 0, 0], vec![1, 0, 0], vec![0, 1, 0]],
        );
        let report = detect(&snap);

        assert!(!report.has_deadlock());
        assert_eq!(safe_names(&snap, &report), ["P1", "P2", "P3"]);
        assert_eq!(report.passes(), 1);
    }

    #[test]
    fn test_chain_unraveling_backwards_takes_a_pass_per_link()
    {
        // P3 finishes first, then P2, then P1: each pass frees exactly the
        // resource the previous scan position needed.
        let snap = snapshot(
            &[1, 1, 1],
            &[vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]],
            &[vec![0, 1, 0], vec![0, 0, 1], vec![0, 0, 0]],
        );
        let report = detect(&snap);

        assert!(!report.has_deadlock());
        assert_eq!(safe_names(&snap, &report), ["P3", "P2", "P1"]);
        assert_eq!(report.passes(), 3);
    }

    #[test]
    fn test_partial_deadlock_splits_processes()
    {
        // P1 and P2 trade R1/R2 while P3 lives off the free unit of R3.
        let snap = snapshot(
            &[1, 1, 2],
            &[vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]],
            &[vec![0, 1, 0], vec![1, 0, 0], vec![0, 0, 1]],
        );
        let report = detect(&snap);

        assert!(report.has_deadlock());
        assert_eq!(report.deadlocked_count(), 2);
        assert_eq!(safe_names(&snap, &report), ["P3"]);

        let ids: Vec<ProcessId> = snap.process_ids().collect();
        assert!(report.is_deadlocked(ids[0]));
        assert!(report.is_deadlocked(ids[1]));
        assert!(!report.is_deadlocked(ids[2]));
    }

    #[test]
    fn test_detection_is_repeatable()
    {
        let snap = snapshot(
            &[2, 2],
            &[vec![1, 1], vec![1, 0], vec![0, 1]],
            &[vec![1, 0], vec![0, 1], vec![1, 1]],
        );

        assert_eq!(detect(&snap), detect(&snap));
    }
}
