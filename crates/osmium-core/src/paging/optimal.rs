//! Belady's optimal replacement.
//!
//! The victim is the resident page whose next use lies farthest ahead in
//! the reference string. Pages never used again count as infinitely far,
//! and ties go to the lowest frame slot.

use super::{AccessOutcome, AccessRecord, ReplacementPolicy, ReplacementRun};

pub(super) fn simulate(reference: &[u64], capacity: usize) -> ReplacementRun
{
    let mut frames: Vec<u64> = Vec::with_capacity(capacity);
    let mut timeline = Vec::with_capacity(reference.len());
    let mut faults = 0;
    let mut hits = 0;

    for (position, &page) in reference.iter().enumerate() {
        let outcome = if frames.contains(&page) {
            hits += 1;
            AccessOutcome::Hit
        } else {
            faults += 1;
            if frames.len() < capacity {
                frames.push(page);
                AccessOutcome::Fault { evicted: None }
            } else {
                let slot = farthest_slot(&frames, &reference[position + 1..]);
                let victim = frames[slot];
                frames[slot] = page;
                AccessOutcome::Fault {
                    evicted: Some(victim),
                }
            }
        };

        timeline.push(AccessRecord {
            page,
            outcome,
            frames: frames.clone(),
        });
    }

    ReplacementRun {
        policy: ReplacementPolicy::Optimal,
        capacity,
        faults,
        hits,
        timeline,
    }
}

/// Slot of the resident page with the most distant next use.
fn farthest_slot(frames: &[u64], upcoming: &[u64]) -> usize
{
    let mut victim_slot = 0;
    let mut victim_distance = 0;

    for (slot, &resident) in frames.iter().enumerate() {
        let distance = upcoming
            .iter()
            .position(|&page| page == resident)
            .unwrap_or(usize::MAX);
        if distance > victim_distance {
            victim_slot = slot;
            victim_distance = distance;
        }
    }

    victim_slot
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_evicts_page_with_farthest_next_use()
    {
        // When 3 arrives, 1 is needed immediately but 2 never again.
        let run = simulate(&[1, 2, 3, 1], 2);

        assert_eq!(run.faults, 3);
        assert_eq!(
            run.timeline[2].outcome,
            AccessOutcome::Fault { evicted: Some(2) }
        );
        assert_eq!(run.timeline[3].outcome, AccessOutcome::Hit);
    }

    #[test]
    fn test_never_used_again_beats_distant_use()
    {
        // 1 and 3 both recur, 2 does not.
        let run = simulate(&[1, 2, 3, 4, 3, 1], 3);

        assert_eq!(
            run.timeline[3].outcome,
            AccessOutcome::Fault { evicted: Some(2) }
        );
    }

    #[test]
    fn test_tie_between_dead_pages_goes_to_lowest_slot()
    {
        // Neither 1 nor 2 is ever used again; slot 0 loses.
        let run = simulate(&[1, 2, 3], 2);

        assert_eq!(
            run.timeline[2].outcome,
            AccessOutcome::Fault { evicted: Some(1) }
        );
        assert_eq!(run.timeline[2].frames, [3, 2]);
    }

    #[test]
    fn test_textbook_reference_counts()
    {
        let run = simulate(&[7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2], 3);

        assert_eq!(run.faults, 7);
        assert_eq!(run.hits, 6);
        assert_eq!(run.timeline[12].frames, [2, 0, 3]);
    }
}
