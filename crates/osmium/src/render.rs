//! Headless rendering of demo reports
//!
//! Plain stdout tables for `--headless` runs, one section per simulated
//! policy. Everything here reads from the report only; nothing is
//! recomputed.

use osmium_core::memory::AllocationPlan;
use osmium_core::paging::{AccessOutcome, ReplacementRun};
use osmium_core::report::{DeadlockReport, MemoryReport, PagingReport, SchedulingReport};
use osmium_core::scheduling::ScheduleRun;
use osmium_core::DemoReport;

/// Print a report to stdout
pub fn print_report(report: &DemoReport)
{
    println!("\n{}:", report.title());

    match report {
        DemoReport::Deadlock(report) => print_deadlock(report),
        DemoReport::Paging(report) => print_paging(report),
        DemoReport::Scheduling(report) => print_scheduling(report),
        DemoReport::Memory(report) => print_memory(report),
    }
}

fn print_deadlock(report: &DeadlockReport)
{
    let snapshot = &report.snapshot;
    let detection = &report.detection;

    let totals: Vec<u64> = snapshot.resource_ids().map(|id| snapshot.total(id)).collect();

    println!("  Resources:  {}", snapshot.resource_names().join(" "));
    println!("  Total:      {}", join(&totals));
    println!("  Available:  {}", join(snapshot.available()));

    for warning in snapshot.warnings() {
        println!("  Warning: {warning}");
    }

    println!();
    println!("  {:<10} {:<14} {:<14} Status", "Process", "Allocation", "Request");

    for id in snapshot.process_ids() {
        let status = if detection.is_deadlocked(id) {
            "DEADLOCKED".to_string()
        } else {
            detection
                .safe_sequence()
                .iter()
                .position(|&p| p == id)
                .map_or_else(String::new, |i| format!("finished #{}", i + 1))
        };

        println!(
            "  {:<10} {:<14} {:<14} {status}",
            snapshot.process_name(id),
            join(snapshot.allocation_row(id)),
            join(snapshot.request_row(id)),
        );
    }

    println!();
    if detection.has_deadlock() {
        let stuck: Vec<&str> = detection.deadlocked().map(|id| snapshot.process_name(id)).collect();
        println!(
            "  Verdict: DEADLOCK, {} of {} processes stuck ({})",
            detection.deadlocked_count(),
            snapshot.process_count(),
            stuck.join(", ")
        );
    } else {
        println!("  Verdict: no deadlock");
    }

    let sequence: Vec<&str> = detection.safe_sequence().iter().map(|&id| snapshot.process_name(id)).collect();
    if !sequence.is_empty() {
        println!("  Reduction order: {}", sequence.join(" -> "));
    }
}

fn print_paging(report: &PagingReport)
{
    println!("  Reference: {}", join(&report.reference));
    println!("  Frames:    {}", report.capacity);

    for run in &report.runs {
        print_replacement_run(run);
    }
}

fn print_replacement_run(run: &ReplacementRun)
{
    println!();
    println!(
        "  {}: {} faults, {} hits ({:.1}% fault rate)",
        run.policy,
        run.faults,
        run.hits,
        run.fault_rate() * 100.0
    );
    println!("    {:>4}  {:>4}  {:<6}  {:<7}  Frames", "Step", "Page", "Result", "Evicted");

    for (step, record) in run.timeline.iter().enumerate() {
        let (result, evicted) = match record.outcome {
            AccessOutcome::Hit => ("hit", String::new()),
            AccessOutcome::Fault { evicted } => {
                ("fault", evicted.map_or_else(String::new, |page| page.to_string()))
            }
        };

        println!(
            "    {:>4}  {:>4}  {:<6}  {:<7}  {}",
            step + 1,
            record.page,
            result,
            evicted,
            join(&record.frames),
        );
    }
}

fn print_scheduling(report: &SchedulingReport)
{
    for run in &report.runs {
        print_schedule_run(run);
    }
}

fn print_schedule_run(run: &ScheduleRun)
{
    println!();
    println!("  {}", run.policy);

    let timeline: Vec<String> = run
        .timeline
        .iter()
        .map(|slice| {
            let name = slice.process.as_deref().unwrap_or("idle");
            format!("{name}[{}-{}]", slice.start, slice.end)
        })
        .collect();
    println!("    Timeline: {}", timeline.join(" "));

    println!(
        "    {:<10} {:>7} {:>6} {:>10} {:>10} {:>8}",
        "Process", "Arrival", "Burst", "Completion", "Turnaround", "Waiting"
    );
    for m in &run.metrics {
        println!(
            "    {:<10} {:>7} {:>6} {:>10} {:>10} {:>8}",
            m.name, m.arrival, m.burst, m.completion, m.turnaround, m.waiting
        );
    }

    println!(
        "    Average turnaround {:.2}, average waiting {:.2}, makespan {}",
        run.average_turnaround(),
        run.average_waiting(),
        run.makespan()
    );
}

fn print_memory(report: &MemoryReport)
{
    for plan in &report.plans {
        print_allocation_plan(plan);
    }
}

fn print_allocation_plan(plan: &AllocationPlan)
{
    println!();
    println!("  {}", plan.strategy);

    for (i, block) in plan.blocks.iter().enumerate() {
        let residents = if block.residents.is_empty() {
            String::new()
        } else {
            format!("  [{}]", block.residents.join(", "))
        };
        println!(
            "    B{} {:>5} units, {:>5} free{residents}",
            i + 1,
            block.capacity,
            block.free,
        );
    }

    println!();
    for placement in &plan.placements {
        let target = placement
            .block
            .map_or_else(|| "waiting".to_string(), |id| format!("B{}", id.index() + 1));
        println!("    {} ({}) -> {target}", placement.process, placement.size);
    }

    let placed = plan.placements.len() - plan.unplaced();
    println!("    Placed {placed} of {}, {} units free", plan.placements.len(), plan.total_free());
}

/// Space-separated rendering of a numeric vector
fn join(values: &[u64]) -> String
{
    values.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}
