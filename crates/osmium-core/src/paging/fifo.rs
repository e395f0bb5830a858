//! First-in-first-out replacement.
//!
//! Frames fill left to right, and once full the victim slot simply cycles:
//! because pages are loaded in slot order, the oldest resident is always at
//! the cursor.

use super::{AccessOutcome, AccessRecord, ReplacementPolicy, ReplacementRun};

pub(super) fn simulate(reference: &[u64], capacity: usize) -> ReplacementRun
{
    let mut frames: Vec<u64> = Vec::with_capacity(capacity);
    let mut cursor = 0;
    let mut timeline = Vec::with_capacity(reference.len());
    let mut faults = 0;
    let mut hits = 0;

    for &page in reference {
        let outcome = if frames.contains(&page) {
            hits += 1;
            AccessOutcome::Hit
        } else {
            faults += 1;
            if frames.len() < capacity {
                frames.push(page);
                AccessOutcome::Fault { evicted: None }
            } else {
                let victim = frames[cursor];
                frames[cursor] = page;
                cursor = (cursor + 1) % capacity;
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
        policy: ReplacementPolicy::Fifo,
        capacity,
        faults,
        hits,
        timeline,
    }
}
