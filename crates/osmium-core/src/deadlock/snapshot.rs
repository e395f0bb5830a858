//! Snapshot construction and validation.
//!
//! A [`Snapshot`] freezes one instant of resource accounting: declared totals
//! per resource, the allocation matrix (who holds what), and the request
//! matrix (who is waiting for what). All validation happens here so that the
//! detection pass can index freely without re-checking anything.

use std::fmt;

use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::error::SnapshotError;

/// Per-resource counter vector.
///
/// Classroom snapshots rarely track more than a handful of resource types,
/// so rows stay inline and never touch the heap in the common case.
pub(crate) type ResourceVec = SmallVec<[u64; 8]>;

/// Index of a process within the snapshot that produced it.
///
/// Ids are minted by [`Snapshot::build`] and returned from snapshot and
/// report accessors; they are row positions, not PIDs. An id is only
/// meaningful for the snapshot it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcessId(pub(crate) usize);

impl ProcessId
{
    /// Row index of this process in the allocation and request matrices.
    #[must_use]
    pub const fn index(self) -> usize
    {
        self.0
    }
}

/// Index of a resource type within the snapshot that produced it.
///
/// Same contract as [`ProcessId`]: a column position minted by
/// [`Snapshot::build`], valid only for that snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(pub(crate) usize);

impl ResourceId
{
    /// Column index of this resource in the allocation and request matrices.
    #[must_use]
    pub const fn index(self) -> usize
    {
        self.0
    }
}

/// Warning recorded when the allocation matrix disagrees with a declared total
///
/// Building the snapshot still succeeds: the available count for the
/// resource floors at zero and this record is kept so callers can surface
/// the inconsistency. Detection results over such a snapshot are computed
/// from the floored value.
///
/// ## Example
///
/// ```rust
/// use osmium_core::deadlock::Snapshot;
///
/// // R1 has a declared total of 1, but 3 units are handed out.
/// let snapshot = Snapshot::build(
///     &["P1", "P2"],
///     &["R1"],
///     &[1],
///     &[vec![2], vec![1]],
///     &[vec![0], vec![0]],
/// )?;
///
/// assert_eq!(snapshot.warnings().len(), 1);
/// assert_eq!(snapshot.warnings()[0].allocated, 3);
/// assert_eq!(snapshot.available(), &[0]);
/// # Ok::<(), osmium_core::SnapshotError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsistencyWarning
{
    /// Resource whose accounting is off
    pub resource: ResourceId,
    /// Total declared for the resource
    pub declared_total: u64,
    /// Units the allocation matrix actually hands out
    pub allocated: u64,
}

impl fmt::Display for ConsistencyWarning
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(
            f,
            "resource {} allocates {} units against a declared total of {}",
            self.resource.index(),
            self.allocated,
            self.declared_total
        )
    }
}

/// A validated, immutable picture of resource ownership at one instant
///
/// A snapshot owns four pieces of data:
///
/// - the process and resource **name lists**, which also fix the matrix
///   dimensions (rows = processes, columns = resources)
/// - the **totals** vector: units of each resource that exist
/// - the **allocation** matrix: units each process currently holds
/// - the **request** matrix: further units each process is waiting for
///
/// The **available** vector is not an input. It is derived during
/// construction as `totals - column sums of allocation`, flooring at zero,
/// so it can never disagree with the matrices it sits next to.
///
/// ## Example
///
/// ```rust
/// use osmium_core::deadlock::Snapshot;
///
/// let snapshot = Snapshot::build(
///     &["reader", "writer"],
///     &["lock-a", "lock-b"],
///     &[1, 1],
///     &[vec![1, 0], vec![0, 1]],
///     &[vec![0, 1], vec![1, 0]],
/// )?;
///
/// assert_eq!(snapshot.process_count(), 2);
/// assert_eq!(snapshot.available(), &[0, 0]);
/// # Ok::<(), osmium_core::SnapshotError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot
{
    processes: Vec<String>,
    resources: Vec<String>,
    totals: ResourceVec,
    available: ResourceVec,
    allocation: Vec<ResourceVec>,
    request: Vec<ResourceVec>,
    warnings: Vec<ConsistencyWarning>,
}

impl Snapshot
{
    /// Validates raw input and builds a snapshot
    ///
    /// Dimensions are fixed by the name lists: `totals` must have one entry
    /// per resource, both matrices must have one row per process, and every
    /// row must have one column per resource. All numeric values must be
    /// non-negative. The first violation found is returned as an error;
    /// shapes are checked before values, and values are checked in the order
    /// totals, allocation, request, row-major.
    ///
    /// A column of `allocation` summing past its declared total is not an
    /// error. The derived available count floors at zero and the mismatch is
    /// recorded as a [`ConsistencyWarning`], retrievable via
    /// [`warnings`](Self::warnings).
    ///
    /// Empty inputs are fine: a snapshot with no processes or no resources
    /// is valid and trivially deadlock-free.
    ///
    /// ## Errors
    ///
    /// - [`SnapshotError::ShapeMismatch`] when any dimension disagrees with
    ///   the name lists
    /// - [`SnapshotError::NegativeValue`] when any total, allocation, or
    ///   request entry is below zero
    ///
    /// ## Example
    ///
    /// ```rust
    /// use osmium_core::{deadlock::Snapshot, SnapshotError};
    ///
    /// // Allocation row for P2 is missing a column.
    /// let err = Snapshot::build(
    ///     &["P1", "P2"],
    ///     &["R1", "R2"],
    ///     &[1, 1],
    ///     &[vec![0, 0], vec![0]],
    ///     &[vec![0, 0], vec![0, 0]],
    /// )
    /// .unwrap_err();
    ///
    /// assert!(matches!(err, SnapshotError::ShapeMismatch { .. }));
    /// assert_eq!(err.to_string(), "allocation[1]: expected 2 entries, found 1");
    /// ```
    pub fn build<P, R>(
        processes: &[P],
        resources: &[R],
        totals: &[i64],
        allocation: &[Vec<i64>],
        request: &[Vec<i64>],
    ) -> Result<Self, SnapshotError>
    where
        P: AsRef<str>,
        R: AsRef<str>,
    {
        let process_count = processes.len();
        let resource_count = resources.len();

        check_len("totals", resource_count, totals.len())?;
        check_len("allocation", process_count, allocation.len())?;
        check_len("request", process_count, request.len())?;
        for (p, row) in allocation.iter().enumerate() {
            check_len(&format!("allocation[{p}]"), resource_count, row.len())?;
        }
        for (p, row) in request.iter().enumerate() {
            check_len(&format!("request[{p}]"), resource_count, row.len())?;
        }

        let totals = convert_vector("totals", totals)?;
        let allocation = convert_matrix("allocation", allocation)?;
        let request = convert_matrix("request", request)?;

        let processes: Vec<String> = processes.iter().map(|p| p.as_ref().to_owned()).collect();
        let resources: Vec<String> = resources.iter().map(|r| r.as_ref().to_owned()).collect();

        let mut available = ResourceVec::with_capacity(resource_count);
        let mut warnings = Vec::new();
        for r in 0..resource_count {
            let allocated: u64 = allocation.iter().map(|row| row[r]).sum();
            let total = totals[r];
            if allocated > total {
                warn!(
                    "resource {} allocates {} units against a declared total of {}",
                    resources[r], allocated, total
                );
                warnings.push(ConsistencyWarning {
                    resource: ResourceId(r),
                    declared_total: total,
                    allocated,
                });
            }
            available.push(total.saturating_sub(allocated));
        }

        debug!(
            "snapshot built: {} processes, {} resources, {} warnings",
            process_count,
            resource_count,
            warnings.len()
        );

        Ok(Self {
            processes,
            resources,
            totals,
            available,
            allocation,
            request,
            warnings,
        })
    }

    /// Number of processes in the snapshot.
    #[must_use]
    pub fn process_count(&self) -> usize
    {
        self.processes.len()
    }

    /// Number of resource types in the snapshot.
    #[must_use]
    pub fn resource_count(&self) -> usize
    {
        self.resources.len()
    }

    /// Iterates over all process ids in row order.
    pub fn process_ids(&self) -> impl Iterator<Item = ProcessId>
    {
        (0..self.processes.len()).map(ProcessId)
    }

    /// Iterates over all resource ids in column order.
    pub fn resource_ids(&self) -> impl Iterator<Item = ResourceId>
    {
        (0..self.resources.len()).map(ResourceId)
    }

    /// Display name of a process.
    ///
    /// ## Panics
    ///
    /// Panics if `id` does not belong to this snapshot.
    #[must_use]
    pub fn process_name(&self, id: ProcessId) -> &str
    {
        &self.processes[id.0]
    }

    /// Display name of a resource.
    ///
    /// ## Panics
    ///
    /// Panics if `id` does not belong to this snapshot.
    #[must_use]
    pub fn resource_name(&self, id: ResourceId) -> &str
    {
        &self.resources[id.0]
    }

    /// All process names in row order.
    #[must_use]
    pub fn process_names(&self) -> &[String]
    {
        &self.processes
    }

    /// All resource names in column order.
    #[must_use]
    pub fn resource_names(&self) -> &[String]
    {
        &self.resources
    }

    /// Declared total units of a resource.
    ///
    /// ## Panics
    ///
    /// Panics if `id` does not belong to this snapshot.
    #[must_use]
    pub fn total(&self, id: ResourceId) -> u64
    {
        self.totals[id.0]
    }

    /// Derived free units per resource, in column order.
    #[must_use]
    pub fn available(&self) -> &[u64]
    {
        &self.available
    }

    /// Units of `resource` currently held by `process`.
    ///
    /// ## Panics
    ///
    /// Panics if either id does not belong to this snapshot.
    #[must_use]
    pub fn allocation(&self, process: ProcessId, resource: ResourceId) -> u64
    {
        self.allocation[process.0][resource.0]
    }

    /// Units of `resource` that `process` is waiting for.
    ///
    /// ## Panics
    ///
    /// Panics if either id does not belong to this snapshot.
    #[must_use]
    pub fn request(&self, process: ProcessId, resource: ResourceId) -> u64
    {
        self.request[process.0][resource.0]
    }

    /// Full allocation row of a process, in column order.
    ///
    /// ## Panics
    ///
    /// Panics if `id` does not belong to this snapshot.
    #[must_use]
    pub fn allocation_row(&self, id: ProcessId) -> &[u64]
    {
        &self.allocation[id.0]
    }

    /// Full request row of a process, in column order.
    ///
    /// ## Panics
    ///
    /// Panics if `id` does not belong to this snapshot.
    #[must_use]
    pub fn request_row(&self, id: ProcessId) -> &[u64]
    {
        &self.request[id.0]
    }

    /// Accounting mismatches recorded during construction.
    ///
    /// Empty for a snapshot whose allocation matrix fits inside the declared
    /// totals everywhere.
    #[must_use]
    pub fn warnings(&self) -> &[ConsistencyWarning]
    {
        &self.warnings
    }

    /// True when no [`ConsistencyWarning`] was recorded.
    #[must_use]
    pub fn is_consistent(&self) -> bool
    {
        self.warnings.is_empty()
    }
}

fn check_len(context: &str, expected: usize, found: usize) -> Result<(), SnapshotError>
{
    if expected == found {
        Ok(())
    } else {
        Err(SnapshotError::ShapeMismatch {
            context: context.to_owned(),
            expected,
            found,
        })
    }
}

fn convert_vector(context: &str, values: &[i64]) -> Result<ResourceVec, SnapshotError>
{
    let mut converted = ResourceVec::with_capacity(values.len());
    for (i, &value) in values.iter().enumerate() {
        match u64::try_from(value) {
            Ok(count) => converted.push(count),
            Err(_) => {
                return Err(SnapshotError::NegativeValue {
                    context: format!("{context}[{i}]"),
                    value,
                })
            }
        }
    }
    Ok(converted)
}

fn convert_matrix(context: &str, rows: &[Vec<i64>]) -> Result<Vec<ResourceVec>, SnapshotError>
{
    rows.iter()
        .enumerate()
        .map(|(p, row)| convert_vector(&format!("{context}[{p}]"), row))
        .collect()
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn names(prefix: &str, count: usize) -> Vec<String>
    {
        (1..=count).map(|i| format!("{prefix}{i}")).collect()
    }

    #[test]
    fn test_build_minimal_snapshot()
    {
        let snapshot = Snapshot::build(
            &names("P", 2),
            &names("R", 2),
            &[3, 2],
            &[vec![1, 0], vec![1, 1]],
            &[vec![0, 1], vec![0, 0]],
        )
        .unwrap();

        assert_eq!(snapshot.process_count(), 2);
        assert_eq!(snapshot.resource_count(), 2);
        assert_eq!(snapshot.available(), &[1, 1]);
        assert!(snapshot.is_consistent());
    }

    #[test]
    fn test_build_empty_snapshot()
    {
        let snapshot =
            Snapshot::build::<&str, &str>(&[], &[], &[], &[], &[]).unwrap();

        assert_eq!(snapshot.process_count(), 0);
        assert_eq!(snapshot.resource_count(), 0);
        assert!(snapshot.available().is_empty());
        assert!(snapshot.warnings().is_empty());
    }

    #[test]
    fn test_totals_length_checked_against_resources()
    {
        let err = Snapshot::build(
            &names("P", 1),
            &names("R", 2),
            &[1],
            &[vec![0, 0]],
            &[vec![0, 0]],
        )
        .unwrap_err();

        assert_eq!(
            err,
            SnapshotError::ShapeMismatch {
                context: "totals".to_owned(),
                expected: 2,
                found: 1,
            }
        );
    }

    #[test]
    fn test_matrix_row_count_checked_against_processes()
    {
        let err = Snapshot::build(
            &names("P", 2),
            &names("R", 1),
            &[1],
            &[vec![0]],
            &[vec![0], vec![0]],
        )
        .unwrap_err();

        assert_eq!(
            err,
            SnapshotError::ShapeMismatch {
                context: "allocation".to_owned(),
                expected: 2,
                found: 1,
            }
        );
    }

    #[test]
    fn test_ragged_request_row_rejected()
    {
        let err = Snapshot::build(
            &names("P", 2),
            &names("R", 2),
            &[1, 1],
            &[vec![0, 0], vec![0, 0]],
            &[vec![0, 0], vec![0, 0, 0]],
        )
        .unwrap_err();

        assert_eq!(err.to_string(), "request[1]: expected 2 entries, found 3");
    }

    #[test]
    fn test_negative_total_rejected()
    {
        let err = Snapshot::build(&names("P", 1), &names("R", 1), &[-2], &[vec![0]], &[vec![0]])
            .unwrap_err();

        assert_eq!(
            err,
            SnapshotError::NegativeValue {
                context: "totals[0]".to_owned(),
                value: -2,
            }
        );
    }

    #[test]
    fn test_negative_request_cell_rejected_with_position()
    {
        let err = Snapshot::build(
            &names("P", 2),
            &names("R", 2),
            &[1, 1],
            &[vec![0, 0], vec![0, 0]],
            &[vec![0, 0], vec![0, -1]],
        )
        .unwrap_err();

        assert_eq!(err.to_string(), "request[1][1]: negative value -1");
    }

    #[test]
    fn test_shape_errors_reported_before_value_errors()
    {
        // The ragged allocation row and the negative total are both present;
        // the shape problem wins.
        let err = Snapshot::build(
            &names("P", 1),
            &names("R", 2),
            &[-1, 1],
            &[vec![0]],
            &[vec![0, 0]],
        )
        .unwrap_err();

        assert!(matches!(err, SnapshotError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_available_is_totals_minus_column_sums()
    {
        let snapshot = Snapshot::build(
            &names("P", 3),
            &names("R", 3),
            &[7, 2, 6],
            &[vec![0, 1, 0], vec![2, 0, 0], vec![3, 0, 3]],
            &[vec![0, 0, 0], vec![2, 0, 2], vec![0, 0, 0]],
        )
        .unwrap();

        assert_eq!(snapshot.available(), &[2, 1, 3]);
    }

    #[test]
    fn test_overcommitted_resource_floors_at_zero_with_warning()
    {
        let snapshot = Snapshot::build(
            &names("P", 2),
            &names("R", 2),
            &[1, 5],
            &[vec![2, 1], vec![1, 1]],
            &[vec![0, 0], vec![0, 0]],
        )
        .unwrap();

        assert_eq!(snapshot.available(), &[0, 3]);
        assert!(!snapshot.is_consistent());
        assert_eq!(snapshot.warnings().len(), 1);

        let warning = snapshot.warnings()[0];
        assert_eq!(warning.resource.index(), 0);
        assert_eq!(warning.declared_total, 1);
        assert_eq!(warning.allocated, 3);
        assert_eq!(
            warning.to_string(),
            "resource 0 allocates 3 units against a declared total of 1"
        );
    }

    #[test]
    fn test_accessors_index_by_id()
    {
        let snapshot = Snapshot::build(
            &["idle", "init"],
            &["disk", "tape"],
            &[4, 2],
            &[vec![1, 2], vec![0, 0]],
            &[vec![0, 0], vec![3, 1]],
        )
        .unwrap();

        let ids: Vec<ProcessId> = snapshot.process_ids().collect();
        let rids: Vec<ResourceId> = snapshot.resource_ids().collect();

        assert_eq!(snapshot.process_name(ids[1]), "init");
        assert_eq!(snapshot.resource_name(rids[0]), "disk");
        assert_eq!(snapshot.total(rids[1]), 2);
        assert_eq!(snapshot.allocation(ids[0], rids[1]), 2);
        assert_eq!(snapshot.request(ids[1], rids[0]), 3);
        assert_eq!(snapshot.allocation_row(ids[0]), &[1, 2]);
        assert_eq!(snapshot.request_row(ids[1]), &[3, 1]);
    }

    #[test]
    fn test_duplicate_names_are_accepted()
    {
        // Names are labels; identity is positional.
        let snapshot = Snapshot::build(
            &["worker", "worker"],
            &["R1"],
            &[2],
            &[vec![1], vec![1]],
            &[vec![0], vec![0]],
        )
        .unwrap();

        assert_eq!(snapshot.process_count(), 2);
    }
}
