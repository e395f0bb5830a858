//! Least-recently-used replacement.
//!
//! A recency list runs alongside the frames: front is the coldest page,
//! back is the one touched a moment ago. Hits move pages to the back,
//! faults evict the front.

use super::{AccessOutcome, AccessRecord, ReplacementPolicy, ReplacementRun};

pub(super) fn simulate(reference: &[u64], capacity: usize) -> ReplacementRun
{
    let mut frames: Vec<u64> = Vec::with_capacity(capacity);
    let mut recency: Vec<u64> = Vec::with_capacity(capacity);
    let mut timeline = Vec::with_capacity(reference.len());
    let mut faults = 0;
    let mut hits = 0;

    for &page in reference {
        let outcome = if let Some(pos) = recency.iter().position(|&resident| resident == page) {
            hits += 1;
            recency.remove(pos);
            recency.push(page);
            AccessOutcome::Hit
        } else {
            faults += 1;
            if frames.len() < capacity {
                frames.push(page);
                recency.push(page);
                AccessOutcome::Fault { evicted: None }
            } else {
                let victim = recency.remove(0);
                if let Some(slot) = frames.iter().position(|&resident| resident == victim) {
                    frames[slot] = page;
                }
                recency.push(page);
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
        policy: ReplacementPolicy::Lru,
        capacity,
        faults,
        hits,
        timeline,
    }
}
