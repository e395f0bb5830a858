//! Minimal deadlock detection walkthrough
//!
//! Builds the smallest snapshot that can deadlock: two processes, two
//! single-unit resources, each process holding one resource and waiting
//! on the other. Run with:
//!
//! ```sh
//! cargo run --example detect_cycle
//! ```

use osmium_core::deadlock::{detect, Snapshot};

fn main()
{
    let snapshot = Snapshot::build(
        &["P1", "P2"],
        &["R1", "R2"],
        &[1, 1],
        &[vec![1, 0], vec![0, 1]],
        &[vec![0, 1], vec![1, 0]],
    )
    .expect("snapshot shapes are consistent");

    let report = detect(&snapshot);

    println!("Processes: {}", snapshot.process_names().join(", "));
    println!("Available: {:?}", snapshot.available());
    println!();

    if report.has_deadlock() {
        println!("Deadlock detected after {} pass(es)", report.passes());
        for id in report.deadlocked() {
            println!(
                "  {} holds {:?} and waits on {:?}",
                snapshot.process_name(id),
                snapshot.allocation_row(id),
                snapshot.request_row(id)
            );
        }
    } else {
        let order: Vec<&str> = report.safe_sequence().iter().map(|&id| snapshot.process_name(id)).collect();
        println!("No deadlock, reduction order: {}", order.join(" -> "));
    }
}
