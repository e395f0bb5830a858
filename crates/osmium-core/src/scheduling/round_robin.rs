//! Round-robin scheduling with a fixed time quantum.

use std::collections::VecDeque;

use super::{finish_run, ProcessSpec, ScheduleRun, SchedulingPolicy, TimeSlice};

pub(super) fn run(specs: &[ProcessSpec], quantum: u64) -> ScheduleRun
{
    let count = specs.len();
    let mut arrival_order: Vec<usize> = (0..count).collect();
    arrival_order.sort_by_key(|&i| (specs[i].arrival, i));

    let mut remaining: Vec<u64> = specs.iter().map(|s| s.burst).collect();
    let mut completion = vec![0; count];
    let mut ready: VecDeque<usize> = VecDeque::new();
    let mut next_arrival = 0;
    let mut finished = 0;
    let mut clock = 0;
    let mut timeline = Vec::new();

    while finished < count {
        while next_arrival < count && specs[arrival_order[next_arrival]].arrival <= clock {
            ready.push_back(arrival_order[next_arrival]);
            next_arrival += 1;
        }

        let Some(i) = ready.pop_front() else {
            // Every admitted process is finished, so someone is still due.
            let wake = specs[arrival_order[next_arrival]].arrival;
            timeline.push(TimeSlice {
                process: None,
                start: clock,
                end: wake,
            });
            clock = wake;
            continue;
        };

        let slice = remaining[i].min(quantum);
        let end = clock + slice;
        timeline.push(TimeSlice {
            process: Some(specs[i].name.clone()),
            start: clock,
            end,
        });
        clock = end;
        remaining[i] -= slice;

        // Processes arriving during the slice enter the queue ahead of the
        // preempted one, including arrivals exactly on the boundary.
        while next_arrival < count && specs[arrival_order[next_arrival]].arrival <= clock {
            ready.push_back(arrival_order[next_arrival]);
            next_arrival += 1;
        }

        if remaining[i] == 0 {
            completion[i] = clock;
            finished += 1;
        } else {
            ready.push_back(i);
        }
    }

    finish_run(
        SchedulingPolicy::RoundRobin { quantum },
        specs,
        timeline,
        &completion,
    )
}
