//! Tests comparing page replacement policies against each other

use osmium_core::paging::{simulate, AccessOutcome, ReplacementPolicy};

const TEXTBOOK: [u64; 13] = [7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2];

#[test]
fn test_optimal_is_never_beaten()
{
    let optimal = simulate(ReplacementPolicy::Optimal, &TEXTBOOK, 3).unwrap();
    let lru = simulate(ReplacementPolicy::Lru, &TEXTBOOK, 3).unwrap();
    let fifo = simulate(ReplacementPolicy::Fifo, &TEXTBOOK, 3).unwrap();

    assert!(optimal.faults <= lru.faults);
    assert!(optimal.faults <= fifo.faults);

    assert_eq!(optimal.faults, 7);
    assert_eq!(lru.faults, 9);
    assert_eq!(fifo.faults, 10);
}

#[test]
fn test_policies_agree_while_frames_are_filling()
{
    // With no evictions there is nothing to disagree about.
    let reference = [1, 2, 3, 2, 1, 3];
    for policy in ReplacementPolicy::ALL {
        let run = simulate(policy, &reference, 3).unwrap();
        assert_eq!(run.faults, 3);
        assert_eq!(run.hits, 3);
        assert_eq!(run.timeline[5].frames, [1, 2, 3]);
    }
}

#[test]
fn test_capacity_covering_distinct_pages_never_evicts()
{
    let reference = [5, 1, 4, 1, 5, 4, 4, 1, 5];
    for policy in ReplacementPolicy::ALL {
        let run = simulate(policy, &reference, 3).unwrap();
        assert_eq!(run.faults, 3);
        for record in &run.timeline {
            if let AccessOutcome::Fault { evicted } = record.outcome {
                assert_eq!(evicted, None);
            }
        }
    }
}

#[test]
fn test_fault_rate_reflects_counts()
{
    let run = simulate(ReplacementPolicy::Fifo, &TEXTBOOK, 3).unwrap();
    let expected = run.faults as f64 / TEXTBOOK.len() as f64;
    assert!((run.fault_rate() - expected).abs() < f64::EPSILON);
}
