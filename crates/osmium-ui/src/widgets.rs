//! Widget components for displaying demo results

use osmium_core::memory::AllocationPlan;
use osmium_core::paging::{AccessOutcome, ReplacementRun};
use osmium_core::report::DeadlockReport;
use osmium_core::scheduling::ScheduleRun;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table, TableState};
use ratatui::Frame;

/// Colors cycled through for process bars in the Gantt chart
const PROCESS_PALETTE: [Color; 6] = [
    Color::Blue,
    Color::Green,
    Color::Magenta,
    Color::Cyan,
    Color::LightRed,
    Color::LightYellow,
];

/// Draw the deadlock matrices page: verdict summary plus one table row
/// per process with its allocation and request vectors
pub fn draw_deadlock_matrices(frame: &mut Frame, area: Rect, report: &DeadlockReport, state: &mut TableState)
{
    let chunks = Layout::vertical([
        Constraint::Length(6), // Verdict and availability
        Constraint::Min(0),    // Process table
    ])
    .split(area);

    draw_deadlock_summary(frame, chunks[0], report);

    let snapshot = &report.snapshot;
    let detection = &report.detection;

    let rows: Vec<Row> = snapshot
        .process_ids()
        .map(|id| {
            let status = if detection.is_deadlocked(id) {
                Cell::from("Deadlocked").style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            } else {
                let position = detection
                    .safe_sequence()
                    .iter()
                    .position(|&p| p == id)
                    .map_or_else(String::new, |i| format!("Finished #{}", i + 1));
                Cell::from(position).style(Style::default().fg(Color::Green))
            };

            Row::new(vec![
                Cell::from(snapshot.process_name(id).to_string()),
                Cell::from(format_vector(snapshot.allocation_row(id))),
                Cell::from(format_vector(snapshot.request_row(id))),
                status,
            ])
        })
        .collect();

    let resource_header = snapshot.resource_names().join(" ");
    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Min(16),
            Constraint::Min(16),
            Constraint::Length(14),
        ],
    )
    .block(Block::default().borders(Borders::ALL).title("Processes"))
    .header(Row::new(vec![
        Cell::from("Process").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from(format!("Allocation ({resource_header})")).style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from(format!("Request ({resource_header})")).style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Status").style(Style::default().add_modifier(Modifier::BOLD)),
    ]))
    .row_highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    frame.render_stateful_widget(table, chunks[1], state);
}

/// Draw the verdict, availability, and any consistency warnings
fn draw_deadlock_summary(frame: &mut Frame, area: Rect, report: &DeadlockReport)
{
    let snapshot = &report.snapshot;
    let detection = &report.detection;

    let verdict = if detection.has_deadlock() {
        Span::styled(
            format!(
                "DEADLOCK ({} of {} processes stuck)",
                detection.deadlocked_count(),
                snapshot.process_count()
            ),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("no deadlock", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    };

    let sequence = detection
        .safe_sequence()
        .iter()
        .map(|&id| snapshot.process_name(id))
        .collect::<Vec<_>>()
        .join(" -> ");

    let totals: Vec<u64> = snapshot.resource_ids().map(|id| snapshot.total(id)).collect();

    let mut lines = vec![
        Line::from(vec![Span::styled("Verdict: ", Style::default().fg(Color::Yellow)), verdict]),
        Line::from(vec![
            Span::styled("Reduction order: ", Style::default().fg(Color::Yellow)),
            Span::raw(if sequence.is_empty() { "(none)".to_string() } else { sequence }),
        ]),
        Line::from(vec![
            Span::styled("Available: ", Style::default().fg(Color::Yellow)),
            Span::raw(format!(
                "{}  (totals {})",
                format_vector(snapshot.available()),
                format_vector(&totals)
            )),
        ]),
    ];

    if !snapshot.is_consistent() {
        lines.push(Line::from(Span::styled(
            format!("{} consistency warning(s): allocation exceeds declared totals", snapshot.warnings().len()),
            Style::default().fg(Color::Yellow),
        )));
    }

    let summary = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Detection"))
        .style(Style::default().fg(Color::White));

    frame.render_widget(summary, area);
}

/// Draw one page-replacement run: counters up top, the access timeline below
pub fn draw_paging_run(
    frame: &mut Frame,
    area: Rect,
    reference: &[u64],
    run: &ReplacementRun,
    state: &mut TableState,
)
{
    let chunks = Layout::vertical([
        Constraint::Length(6), // Counters
        Constraint::Min(0),    // Timeline table
    ])
    .split(area);

    let summary_lines = vec![
        Line::from(vec![
            Span::styled("Reference: ", Style::default().fg(Color::Yellow)),
            Span::raw(format_vector(reference)),
        ]),
        Line::from(vec![
            Span::styled("Frames: ", Style::default().fg(Color::Yellow)),
            Span::raw(run.capacity.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Faults: ", Style::default().fg(Color::Yellow)),
            Span::styled(run.faults.to_string(), Style::default().fg(Color::Red)),
            Span::raw("  "),
            Span::styled("Hits: ", Style::default().fg(Color::Yellow)),
            Span::styled(run.hits.to_string(), Style::default().fg(Color::Green)),
        ]),
        Line::from(vec![
            Span::styled("Fault rate: ", Style::default().fg(Color::Yellow)),
            Span::raw(format!("{:.1}%", run.fault_rate() * 100.0)),
        ]),
    ];

    let summary = Paragraph::new(summary_lines)
        .block(Block::default().borders(Borders::ALL).title(format!("{} summary", run.policy)))
        .style(Style::default().fg(Color::White));

    frame.render_widget(summary, chunks[0]);

    let rows: Vec<Row> = run
        .timeline
        .iter()
        .enumerate()
        .map(|(step, record)| {
            let (result, evicted) = match record.outcome {
                AccessOutcome::Hit => {
                    (Cell::from("Hit").style(Style::default().fg(Color::Green)), String::new())
                }
                AccessOutcome::Fault { evicted } => (
                    Cell::from("Fault").style(Style::default().fg(Color::Red)),
                    evicted.map_or_else(|| "-".to_string(), |page| page.to_string()),
                ),
            };

            Row::new(vec![
                Cell::from(format!("{}", step + 1)),
                Cell::from(record.page.to_string()),
                result,
                Cell::from(evicted),
                Cell::from(format_vector(&record.frames)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(7),
            Constraint::Length(8),
            Constraint::Min(12),
        ],
    )
    .block(Block::default().borders(Borders::ALL).title("Accesses"))
    .header(Row::new(vec![
        Cell::from("Step").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Page").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Result").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Evicted").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Frames").style(Style::default().add_modifier(Modifier::BOLD)),
    ]))
    .row_highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    frame.render_stateful_widget(table, chunks[1], state);
}

/// Draw one scheduling run: Gantt bar, per-process metrics, averages
pub fn draw_schedule_run(frame: &mut Frame, area: Rect, run: &ScheduleRun, state: &mut TableState)
{
    let chunks = Layout::vertical([
        Constraint::Length(4), // Gantt bar
        Constraint::Min(0),    // Metrics table
        Constraint::Length(4), // Averages
    ])
    .split(area);

    draw_gantt(frame, chunks[0], run);

    let rows: Vec<Row> = run
        .metrics
        .iter()
        .map(|m| {
            Row::new(vec![
                Cell::from(m.name.clone()).style(Style::default().fg(process_color(run, &m.name))),
                Cell::from(m.arrival.to_string()),
                Cell::from(m.burst.to_string()),
                Cell::from(m.completion.to_string()),
                Cell::from(m.turnaround.to_string()),
                Cell::from(m.waiting.to_string()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(9),
            Constraint::Length(7),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(9),
        ],
    )
    .block(Block::default().borders(Borders::ALL).title("Metrics"))
    .header(Row::new(vec![
        Cell::from("Process").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Arrival").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Burst").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Completion").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Turnaround").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Waiting").style(Style::default().add_modifier(Modifier::BOLD)),
    ]))
    .row_highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    frame.render_stateful_widget(table, chunks[1], state);

    let averages = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Average turnaround: ", Style::default().fg(Color::Yellow)),
            Span::raw(format!("{:.2}", run.average_turnaround())),
            Span::raw("   "),
            Span::styled("Average waiting: ", Style::default().fg(Color::Yellow)),
            Span::raw(format!("{:.2}", run.average_waiting())),
        ]),
        Line::from(vec![
            Span::styled("Makespan: ", Style::default().fg(Color::Yellow)),
            Span::raw(run.makespan().to_string()),
        ]),
    ])
    .block(Block::default().borders(Borders::ALL).title("Averages"))
    .style(Style::default().fg(Color::White));

    frame.render_widget(averages, chunks[2]);
}

/// Draw the timeline as one bar of colored cells, two columns per tick
fn draw_gantt(frame: &mut Frame, area: Rect, run: &ScheduleRun)
{
    let mut spans = Vec::new();

    for slice in &run.timeline {
        // Clamp so a pathological quantum cannot blow up the line length
        let cells = usize::try_from(slice.duration().min(60)).unwrap_or(60) * 2;

        match &slice.process {
            Some(name) => {
                let style = Style::default().bg(process_color(run, name)).fg(Color::Black);
                spans.push(Span::styled(format!("{name:^cells$}"), style));
            }
            None => {
                let style = Style::default().bg(Color::DarkGray).fg(Color::White);
                spans.push(Span::styled(format!("{:^cells$}", "idle"), style));
            }
        }
    }

    let gantt = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(format!("Timeline (0..{})", run.makespan())));

    frame.render_widget(gantt, area);
}

/// Stable color for a process, assigned by its position in the input batch
fn process_color(run: &ScheduleRun, name: &str) -> Color
{
    run.metrics
        .iter()
        .position(|m| m.name == name)
        .map_or(Color::DarkGray, |i| PROCESS_PALETTE[i % PROCESS_PALETTE.len()])
}

/// Draw one allocation plan: a gauge per block, then the placement table
pub fn draw_memory_plan(frame: &mut Frame, area: Rect, plan: &AllocationPlan, state: &mut TableState)
{
    let block_section = u16::try_from(plan.blocks.len()).unwrap_or(u16::MAX).saturating_add(2);

    let chunks = Layout::vertical([
        Constraint::Length(block_section), // One gauge per block
        Constraint::Min(0),                // Placement table
        Constraint::Length(3),             // Totals
    ])
    .split(area);

    draw_block_gauges(frame, chunks[0], plan);

    let rows: Vec<Row> = plan
        .placements
        .iter()
        .map(|placement| {
            let block = match placement.block {
                Some(id) => Cell::from(format!("B{}", id.index() + 1)).style(Style::default().fg(Color::Green)),
                None => Cell::from("waiting").style(Style::default().fg(Color::Red)),
            };

            Row::new(vec![
                Cell::from(placement.process.clone()),
                Cell::from(placement.size.to_string()),
                block,
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [Constraint::Length(12), Constraint::Length(8), Constraint::Length(10)],
    )
    .block(Block::default().borders(Borders::ALL).title("Placements"))
    .header(Row::new(vec![
        Cell::from("Process").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Size").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Block").style(Style::default().add_modifier(Modifier::BOLD)),
    ]))
    .row_highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    frame.render_stateful_widget(table, chunks[1], state);

    let placed = plan.placements.len() - plan.unplaced();
    let totals = Paragraph::new(Line::from(vec![
        Span::styled("Placed: ", Style::default().fg(Color::Yellow)),
        Span::raw(format!("{placed} of {}", plan.placements.len())),
        Span::raw("   "),
        Span::styled("Free: ", Style::default().fg(Color::Yellow)),
        Span::raw(plan.total_free().to_string()),
    ]))
    .block(Block::default().borders(Borders::ALL))
    .style(Style::default().fg(Color::White));

    frame.render_widget(totals, chunks[2]);
}

/// One gauge per memory block showing how full it is
fn draw_block_gauges(frame: &mut Frame, area: Rect, plan: &AllocationPlan)
{
    let outer = Block::default().borders(Borders::ALL).title(format!("Blocks ({})", plan.strategy));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let constraints = vec![Constraint::Length(1); plan.blocks.len()];
    let slots = Layout::vertical(constraints).split(inner);

    for (i, (block, slot)) in plan.blocks.iter().zip(slots.iter()).enumerate() {
        let used = block.capacity - block.free;
        #[allow(clippy::cast_precision_loss)]
        let ratio = if block.capacity == 0 {
            0.0
        } else {
            used as f64 / block.capacity as f64
        };

        let residents = if block.residents.is_empty() {
            String::new()
        } else {
            format!("  [{}]", block.residents.join(", "))
        };

        let gauge = Gauge::default()
            .ratio(ratio)
            .label(format!("B{} {used}/{}{residents}", i + 1, block.capacity))
            .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black));

        frame.render_widget(gauge, *slot);
    }
}

/// Space-separated rendering of a numeric vector
fn format_vector(values: &[u64]) -> String
{
    values.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}
