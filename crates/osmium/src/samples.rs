//! Built-in classroom samples
//!
//! Each demo falls back to one of these when no `--scenario` file is given.
//! They are the blackboard numbers: small enough to trace by hand, chosen
//! so every demo has something worth looking at (a partial deadlock, the
//! policy gap on a textbook reference string, and so on).

use crate::scenario::{DeadlockScenario, DemandEntry, MemoryScenario, PagingScenario, ProcessEntry, SchedulingScenario};

/// Four processes on three resources, two of them stuck
///
/// P1 and P4 request nothing and finish right away. P2 holds both units of
/// R2 while waiting on R3, and P3 holds both units of R3 while waiting on
/// R2, so the two of them deadlock no matter what the others release.
pub fn deadlock() -> DeadlockScenario
{
    DeadlockScenario {
        processes: names(&["P1", "P2", "P3", "P4"]),
        resources: names(&["R1", "R2", "R3"]),
        totals: vec![2, 2, 2],
        allocation: vec![
            vec![1, 0, 0],
            vec![0, 2, 0],
            vec![0, 0, 2],
            vec![1, 0, 0],
        ],
        request: vec![
            vec![0, 0, 0],
            vec![0, 0, 1],
            vec![0, 1, 0],
            vec![0, 0, 0],
        ],
    }
}

/// The classic three-frame reference string
///
/// FIFO faults 10 times on it, LRU 9, Optimal 7, which makes the gap
/// between the policies obvious on one screen.
pub fn paging() -> PagingScenario
{
    PagingScenario {
        reference: vec![7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2],
        capacity: 3,
    }
}

/// A staggered four-process batch
///
/// Arrivals overlap so FCFS, SJF, and round robin all produce visibly
/// different Gantt charts.
pub fn scheduling() -> SchedulingScenario
{
    SchedulingScenario {
        processes: vec![
            ProcessEntry { name: "P1".to_string(), arrival: 0, burst: 7 },
            ProcessEntry { name: "P2".to_string(), arrival: 2, burst: 4 },
            ProcessEntry { name: "P3".to_string(), arrival: 4, burst: 1 },
            ProcessEntry { name: "P4".to_string(), arrival: 5, burst: 4 },
        ],
        quantum: 2,
    }
}

/// Five fixed partitions and four demands
///
/// First fit and best fit disagree on the very first demand (block 1
/// versus block 3), and one demand fits nowhere under first fit.
pub fn memory() -> MemoryScenario
{
    MemoryScenario {
        blocks: vec![100, 500, 200, 300, 600],
        demands: vec![
            DemandEntry { process: "P1".to_string(), size: 212 },
            DemandEntry { process: "P2".to_string(), size: 417 },
            DemandEntry { process: "P3".to_string(), size: 112 },
            DemandEntry { process: "P4".to_string(), size: 426 },
        ],
    }
}

fn names(raw: &[&str]) -> Vec<String>
{
    raw.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests
{
    use super::*;
    use osmium_core::deadlock::{detect, Snapshot};
    use osmium_core::memory::{plan, Demand, FitStrategy};
    use osmium_core::paging::{simulate, ReplacementPolicy};

    #[test]
    fn test_deadlock_sample_is_a_partial_deadlock()
    {
        let sample = deadlock();
        let snapshot = Snapshot::build(
            &sample.processes,
            &sample.resources,
            &sample.totals,
            &sample.allocation,
            &sample.request,
        )
        .unwrap();
        let report = detect(&snapshot);

        assert!(report.has_deadlock());
        assert_eq!(report.deadlocked_count(), 2);

        let stuck: Vec<&str> = report.deadlocked().map(|id| snapshot.process_name(id)).collect();
        assert_eq!(stuck, vec!["P2", "P3"]);
        assert_eq!(report.safe_sequence().len(), 2);
    }

    #[test]
    fn test_paging_sample_shows_the_policy_gap()
    {
        let sample = paging();
        let fifo = simulate(ReplacementPolicy::Fifo, &sample.reference, sample.capacity).unwrap();
        let lru = simulate(ReplacementPolicy::Lru, &sample.reference, sample.capacity).unwrap();
        let optimal = simulate(ReplacementPolicy::Optimal, &sample.reference, sample.capacity).unwrap();

        assert_eq!(fifo.faults, 10);
        assert_eq!(lru.faults, 9);
        assert_eq!(optimal.faults, 7);
    }

    #[test]
    fn test_memory_sample_separates_the_strategies()
    {
        let sample = memory();
        let demands: Vec<Demand> = sample
            .demands
            .iter()
            .map(|d| Demand::new(&d.process, d.size))
            .collect();

        let first = plan(FitStrategy::FirstFit, &sample.blocks, &demands);
        let best = plan(FitStrategy::BestFit, &sample.blocks, &demands);

        assert_eq!(first.unplaced(), 1);
        assert_eq!(best.unplaced(), 0);
        assert_ne!(first.placements[0].block, best.placements[0].block);
    }
}
