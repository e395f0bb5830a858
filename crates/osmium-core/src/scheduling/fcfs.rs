//! First-come-first-served scheduling.

use super::{finish_run, ProcessSpec, ScheduleRun, SchedulingPolicy, TimeSlice};

pub(super) fn run(specs: &[ProcessSpec]) -> ScheduleRun
{
    let mut order: Vec<usize> = (0..specs.len()).collect();
    order.sort_by_key(|&i| (specs[i].arrival, i));

    let mut clock = 0;
    let mut timeline = Vec::with_capacity(specs.len());
    let mut completion = vec![0; specs.len()];

    for i in order {
        let spec = &specs[i];
        if spec.arrival > clock {
            timeline.push(TimeSlice {
                process: None,
                start: clock,
                end: spec.arrival,
            });
            clock = spec.arrival;
        }

        let end = clock + spec.burst;
        timeline.push(TimeSlice {
            process: Some(spec.name.clone()),
            start: clock,
            end,
        });
        clock = end;
        completion[i] = end;
    }

    finish_run(SchedulingPolicy::Fcfs, specs, timeline, &completion)
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_runs_in_arrival_order()
    {
        let specs = [
            ProcessSpec::new("P1", 0, 5),
            ProcessSpec::new("P2", 1, 3),
            ProcessSpec::new("P3", 2, 8),
        ];
        let result = run(&specs);

        let order: Vec<&str> = result
            .timeline
            .iter()
            .filter_map(|s| s.process.as_deref())
            .collect();
        assert_eq!(order, ["P1", "P2", "P3"]);

        assert_eq!(result.metrics[0].completion, 5);
        assert_eq!(result.metrics[1].completion, 8);
        assert_eq!(result.metrics[2].completion, 16);
        assert_eq!(result.metrics[2].waiting, 6);
    }

    #[test]
    fn test_late_arrival_leaves_idle_gap()
    {
        let specs = [ProcessSpec::new("P1", 0, 2), ProcessSpec::new("P2", 5, 1)];
        let result = run(&specs);

        assert_eq!(result.timeline.len(), 3);
        assert!(result.timeline[1].is_idle());
        assert_eq!(result.timeline[1].start, 2);
        assert_eq!(result.timeline[1].end, 5);
        assert_eq!(result.metrics[1].waiting, 0);
    }

    #[test]
    fn test_simultaneous_arrivals_keep_input_order()
    {
        let specs = [
            ProcessSpec::new("slow", 0, 9),
            ProcessSpec::new("quick", 0, 1),
        ];
        let result = run(&specs);

        assert_eq!(result.timeline[0].process.as_deref(), Some("slow"));
        assert_eq!(result.metrics[1].waiting, 9);
    }
}
