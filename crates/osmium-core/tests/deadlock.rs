//! Tests for the deadlock detection engine

use osmium_core::deadlock::{detect, ProcessId, Snapshot};
use osmium_core::SnapshotError;

fn safe_names(snapshot: &Snapshot, safe: &[ProcessId]) -> Vec<String>
{
    safe.iter()
        .map(|&id| snapshot.process_name(id).to_owned())
        .collect()
}

#[test]
fn test_two_holders_with_no_requests_are_safe()
{
    // Two processes split R1 between them but want nothing more.
    let snapshot = Snapshot::build(
        &["P1", "P2"],
        &["R1"],
        &[2],
        &[vec![1], vec![1]],
        &[vec![0], vec![0]],
    )
    .unwrap();
    let report = detect(&snapshot);

    assert!(!report.has_deadlock());
    assert_eq!(safe_names(&snapshot, report.safe_sequence()), ["P1", "P2"]);
}

#[test]
fn test_simple_cycle_deadlocks_both_processes()
{
    // P1 holds R1 and wants R2; P2 holds R2 and wants R1.
    let snapshot = Snapshot::build(
        &["P1", "P2"],
        &["R1", "R2"],
        &[1, 1],
        &[vec![1, 0], vec![0, 1]],
        &[vec![0, 1], vec![1, 0]],
    )
    .unwrap();
    let report = detect(&snapshot);

    assert!(report.has_deadlock());
    assert!(report.safe_sequence().is_empty());

    let deadlocked: Vec<&str> = report
        .deadlocked()
        .map(|id| snapshot.process_name(id))
        .collect();
    assert_eq!(deadlocked, ["P1", "P2"]);
}

#[test]
fn test_sequential_release_resolves_apparent_contention()
{
    // One unit of R1, two waiters. P1 finishes and releases, then P2 takes
    // and returns the unit, then P3 does the same. Nobody is deadlocked
    // even though the waiters outnumber the instances.
    let snapshot = Snapshot::build(
        &["P1", "P2", "P3"],
        &["R1"],
        &[1],
        &[vec![1], vec![0], vec![0]],
        &[vec![0], vec![1], vec![1]],
    )
    .unwrap();
    let report = detect(&snapshot);

    assert!(!report.has_deadlock());
    assert_eq!(report.deadlocked_count(), 0);
    assert_eq!(
        safe_names(&snapshot, report.safe_sequence()),
        ["P1", "P2", "P3"]
    );
    assert_eq!(report.passes(), 1);
}

#[test]
fn test_all_zero_requests_never_deadlock()
{
    // Holds may be arbitrary, even overcommitted; with nothing requested,
    // every process trivially finishes.
    let snapshot = Snapshot::build(
        &["a", "b", "c", "d"],
        &["R1", "R2", "R3"],
        &[2, 1, 4],
        &[
            vec![2, 0, 1],
            vec![1, 1, 0],
            vec![0, 0, 3],
            vec![0, 0, 0],
        ],
        &[
            vec![0, 0, 0],
            vec![0, 0, 0],
            vec![0, 0, 0],
            vec![0, 0, 0],
        ],
    )
    .unwrap();
    let report = detect(&snapshot);

    assert!(!report.has_deadlock());
    assert_eq!(report.safe_sequence().len(), 4);
}

#[test]
fn test_dominating_availability_means_no_deadlock()
{
    // Everything anyone wants is already free.
    let snapshot = Snapshot::build(
        &["P1", "P2"],
        &["R1", "R2"],
        &[6, 6],
        &[vec![1, 0], vec![0, 1]],
        &[vec![3, 3], vec![2, 4]],
    )
    .unwrap();
    let report = detect(&snapshot);

    assert!(!report.has_deadlock());
}

#[test]
fn test_detect_is_idempotent()
{
    let snapshot = Snapshot::build(
        &["P1", "P2", "P3"],
        &["R1", "R2"],
        &[2, 1],
        &[vec![1, 0], vec![1, 1], vec![0, 0]],
        &[vec![0, 1], vec![1, 0], vec![1, 1]],
    )
    .unwrap();

    let first = detect(&snapshot);
    let second = detect(&snapshot);

    assert_eq!(first, second);
}

#[test]
fn test_every_process_lands_on_exactly_one_side()
{
    let snapshot = Snapshot::build(
        &["P1", "P2", "P3", "P4"],
        &["R1", "R2"],
        &[2, 2],
        &[vec![1, 0], vec![0, 1], vec![1, 0], vec![0, 1]],
        &[vec![0, 2], vec![2, 0], vec![0, 0], vec![0, 0]],
    )
    .unwrap();
    let report = detect(&snapshot);

    for id in snapshot.process_ids() {
        let in_safe = report.safe_sequence().contains(&id);
        assert_ne!(in_safe, report.is_deadlocked(id));
    }
    assert_eq!(
        report.safe_sequence().len() + report.deadlocked_count(),
        snapshot.process_count()
    );
}

#[test]
fn test_safe_sequence_replays_under_monotonic_release()
{
    // P1 through P4 unravel in one pass; P5 and P6 hold R4/R5 against each
    // other and never appear in the sequence. Replaying the reported order
    // must find every request satisfiable at its turn.
    let snapshot = Snapshot::build(
        &["P1", "P2", "P3", "P4", "P5", "P6"],
        &["R1", "R2", "R3", "R4", "R5"],
        &[1, 1, 2, 1, 1],
        &[
            vec![1, 0, 0, 0, 0],
            vec![0, 1, 0, 0, 0],
            vec![0, 0, 1, 0, 0],
            vec![0, 0, 1, 0, 0],
            vec![0, 0, 0, 1, 0],
            vec![0, 0, 0, 0, 1],
        ],
        &[
            vec![0, 0, 0, 0, 0],
            vec![1, 0, 0, 0, 0],
            vec![0, 1, 0, 0, 0],
            vec![0, 0, 1, 0, 0],
            vec![0, 0, 0, 0, 1],
            vec![0, 0, 0, 1, 0],
        ],
    )
    .unwrap();
    let report = detect(&snapshot);

    assert_eq!(report.safe_sequence().len(), 4);
    assert_eq!(report.deadlocked_count(), 2);

    let mut work: Vec<u64> = snapshot.available().to_vec();
    for &id in report.safe_sequence() {
        assert!(!report.is_deadlocked(id));
        assert!(
            snapshot
                .request_row(id)
                .iter()
                .zip(&work)
                .all(|(need, have)| need <= have),
            "{} was marked finished while its request exceeded work",
            snapshot.process_name(id)
        );
        for (slot, held) in work.iter_mut().zip(snapshot.allocation_row(id)) {
            *slot += held;
        }
    }
}

#[test]
fn test_inconsistent_snapshot_still_detects()
{
    // R1 is overcommitted; the engine floors available at zero, warns, and
    // carries on. The hog requests nothing, finishes, and returns its three
    // recorded units, which is plenty for the waiter.
    let snapshot = Snapshot::build(
        &["hog", "waiter"],
        &["R1"],
        &[1],
        &[vec![3], vec![0]],
        &[vec![0], vec![1]],
    )
    .unwrap();

    assert!(!snapshot.is_consistent());
    assert_eq!(snapshot.available(), &[0]);

    let report = detect(&snapshot);
    assert_eq!(
        safe_names(&snapshot, report.safe_sequence()),
        ["hog", "waiter"]
    );
}

#[test]
fn test_malformed_input_yields_no_snapshot_at_all()
{
    let result = Snapshot::build(
        &["P1", "P2"],
        &["R1"],
        &[1],
        &[vec![1]],
        &[vec![0], vec![0]],
    );

    assert!(matches!(
        result,
        Err(SnapshotError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_ids_resolve_names_and_matrix_cells()
{
    let snapshot = Snapshot::build(
        &["P1", "P2"],
        &["R1", "R2"],
        &[3, 1],
        &[vec![2, 0], vec![0, 1]],
        &[vec![0, 1], vec![1, 0]],
    )
    .unwrap();
    let report = detect(&snapshot);

    // P2 blocks on R1? No: one unit of R1 remains free, so P2 finishes,
    // then P1 gets R2.
    assert!(!report.has_deadlock());
    for &id in report.safe_sequence() {
        let row = snapshot.request_row(id);
        assert_eq!(row.len(), snapshot.resource_count());
    }
}
