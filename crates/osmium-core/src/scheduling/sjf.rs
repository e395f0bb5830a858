//! Shortest-job-first scheduling, non-preemptive.

use super::{finish_run, ProcessSpec, ScheduleRun, SchedulingPolicy, TimeSlice};

pub(super) fn run(specs: &[ProcessSpec]) -> ScheduleRun
{
    let count = specs.len();
    let mut done = vec![false; count];
    let mut completion = vec![0; count];
    let mut remaining = count;
    let mut clock = 0;
    let mut timeline = Vec::with_capacity(count);

    while remaining > 0 {
        let next = (0..count)
            .filter(|&i| !done[i] && specs[i].arrival <= clock)
            .min_by_key(|&i| (specs[i].burst, specs[i].arrival, i));

        if let Some(i) = next {
            let end = clock + specs[i].burst;
            timeline.push(TimeSlice {
                process: Some(specs[i].name.clone()),
                start: clock,
                end,
            });
            clock = end;
            completion[i] = end;
            done[i] = true;
            remaining -= 1;
        } else {
            // Nobody has arrived yet; idle up to the next arrival.
            let Some(next_arrival) = (0..count)
                .filter(|&i| !done[i])
                .map(|i| specs[i].arrival)
                .min()
            else {
                break;
            };
            timeline.push(TimeSlice {
                process: None,
                start: clock,
                end: next_arrival,
            });
            clock = next_arrival;
        }
    }

    finish_run(SchedulingPolicy::Sjf, specs, timeline, &completion)
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_picks_shortest_among_arrived()
    {
        let specs = [
            ProcessSpec::new("P1", 0, 7),
            ProcessSpec::new("P2", 2, 4),
            ProcessSpec::new("P3", 4, 1),
            ProcessSpec::new("P4", 5, 4),
        ];
        let result = run(&specs);

        let order: Vec<&str> = result
            .timeline
            .iter()
            .filter_map(|s| s.process.as_deref())
            .collect();
        assert_eq!(order, ["P1", "P3", "P2", "P4"]);

        assert_eq!(result.metrics[0].completion, 7);
        assert_eq!(result.metrics[1].completion, 12);
        assert_eq!(result.metrics[2].completion, 8);
        assert_eq!(result.metrics[3].completion, 16);

        assert!((result.average_turnaround() - 8.0).abs() < 1e-9);
        assert!((result.average_waiting() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_does_not_preempt_for_shorter_arrival()
    {
        // P2 is shorter but arrives while P1 already runs.
        let specs = [ProcessSpec::new("P1", 0, 10), ProcessSpec::new("P2", 1, 1)];
        let result = run(&specs);

        assert_eq!(result.timeline[0].process.as_deref(), Some("P1"));
        assert_eq!(result.timeline[0].end, 10);
        assert_eq!(result.metrics[1].completion, 11);
    }

    #[test]
    fn test_burst_tie_breaks_by_arrival_then_input_order()
    {
        let specs = [
            ProcessSpec::new("late", 1, 3),
            ProcessSpec::new("early", 0, 3),
            ProcessSpec::new("tied", 1, 3),
        ];
        let result = run(&specs);

        let order: Vec<&str> = result
            .timeline
            .iter()
            .filter_map(|s| s.process.as_deref())
            .collect();
        assert_eq!(order, ["early", "late", "tied"]);
    }

    #[test]
    fn test_idles_until_first_arrival()
    {
        let specs = [ProcessSpec::new("P1", 3, 2)];
        let result = run(&specs);

        assert!(result.timeline[0].is_idle());
        assert_eq!(result.timeline[0].end, 3);
        assert_eq!(result.metrics[0].waiting, 0);
    }
}
