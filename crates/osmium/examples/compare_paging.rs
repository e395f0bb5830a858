//! Side-by-side page replacement comparison
//!
//! Replays one reference string under all three policies, then demonstrates
//! Belady's anomaly: giving FIFO a fourth frame on this particular string
//! makes it fault *more*, not less. Run with:
//!
//! ```sh
//! cargo run --example compare_paging
//! ```

use osmium_core::paging::{simulate, ReplacementPolicy};

fn main()
{
    let reference = [1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5];

    println!("Reference string: {reference:?}");
    println!();

    for policy in ReplacementPolicy::ALL {
        let run = simulate(policy, &reference, 3).expect("three frames is a valid capacity");
        println!(
            "  {:<8} {:>2} faults, {:>2} hits ({:.0}% fault rate)",
            run.policy.name(),
            run.faults,
            run.hits,
            run.fault_rate() * 100.0
        );
    }

    println!();
    println!("Belady's anomaly under FIFO:");
    for capacity in [3, 4] {
        let run = simulate(ReplacementPolicy::Fifo, &reference, capacity).expect("capacity is nonzero");
        println!("  {capacity} frames -> {} faults", run.faults);
    }
}
