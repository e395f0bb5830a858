//! Resource allocation graph rendering
//!
//! Draws the snapshot as a bipartite graph on a braille canvas: processes
//! across the top row, resources across the bottom row. Assignment edges
//! (resource to process) are white, request edges (process to resource)
//! are yellow, and deadlocked processes are labeled in red.

use osmium_core::report::DeadlockReport;
use osmium_core::{ProcessId, ResourceId, Snapshot};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Vertical position of process nodes in canvas coordinates
const PROCESS_ROW: f64 = 72.0;
/// Vertical position of resource nodes in canvas coordinates
const RESOURCE_ROW: f64 = 28.0;

/// Draw the resource allocation graph page
pub fn draw_graph(frame: &mut Frame, area: Rect, report: &DeadlockReport)
{
    let chunks = Layout::vertical([
        Constraint::Min(0),    // Canvas
        Constraint::Length(5), // Verdict and legend
    ])
    .split(area);

    draw_canvas(frame, chunks[0], report);
    draw_legend(frame, chunks[1], report);
}

fn draw_canvas(frame: &mut Frame, area: Rect, report: &DeadlockReport)
{
    let snapshot = &report.snapshot;
    let detection = &report.detection;

    let process_x = spread(snapshot.process_count());
    let resource_x = spread(snapshot.resource_count());

    // Width of one terminal cell in canvas units, for centering labels
    let cell = 100.0 / f64::from(area.width.max(1));

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title("Resource Allocation Graph"))
        .x_bounds([0.0, 100.0])
        .y_bounds([0.0, 100.0])
        .paint(|ctx| {
            for (resource, process) in assignment_edges(snapshot) {
                ctx.draw(&CanvasLine {
                    x1: resource_x[resource.index()],
                    y1: RESOURCE_ROW,
                    x2: process_x[process.index()],
                    y2: PROCESS_ROW,
                    color: Color::White,
                });
            }

            for (process, resource) in request_edges(snapshot) {
                ctx.draw(&CanvasLine {
                    x1: process_x[process.index()],
                    y1: PROCESS_ROW,
                    x2: resource_x[resource.index()],
                    y2: RESOURCE_ROW,
                    color: Color::Yellow,
                });
            }

            // Labels go on after the edges so they stay readable
            for id in snapshot.process_ids() {
                let style = if detection.is_deadlocked(id) {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                };
                let label = snapshot.process_name(id).to_string();
                let x = centered(process_x[id.index()], &label, cell);
                ctx.print(x, PROCESS_ROW + 8.0, Line::styled(label, style));
            }

            for id in snapshot.resource_ids() {
                let label = format!(
                    "{} {}/{}",
                    snapshot.resource_name(id),
                    snapshot.available()[id.index()],
                    snapshot.total(id)
                );
                let x = centered(resource_x[id.index()], &label, cell);
                ctx.print(x, RESOURCE_ROW - 12.0, Line::styled(label, Style::default().fg(Color::Cyan)));
            }
        });

    frame.render_widget(canvas, area);
}

fn draw_legend(frame: &mut Frame, area: Rect, report: &DeadlockReport)
{
    let detection = &report.detection;

    let verdict = if detection.has_deadlock() {
        let stuck = detection
            .deadlocked()
            .map(|id| report.snapshot.process_name(id))
            .collect::<Vec<_>>()
            .join(", ");
        Span::styled(format!("DEADLOCK ({stuck})"), Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
    } else {
        Span::styled("no deadlock", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    };

    let legend = Paragraph::new(vec![
        Line::from(vec![Span::styled("Verdict: ", Style::default().fg(Color::Yellow)), verdict]),
        Line::from(vec![
            Span::styled("line ", Style::default().fg(Color::White)),
            Span::raw("assignment (resource holds for process)   "),
            Span::styled("line ", Style::default().fg(Color::Yellow)),
            Span::raw("request (process waits on resource)"),
        ]),
        Line::from(Span::raw("Resource labels show available/total units")),
    ])
    .block(Block::default().borders(Borders::ALL).title("Legend"))
    .style(Style::default().fg(Color::White));

    frame.render_widget(legend, area);
}

/// Horizontal centers for `count` evenly spaced nodes on the 0..100 axis
#[allow(clippy::cast_precision_loss)]
fn spread(count: usize) -> Vec<f64>
{
    (0..count).map(|i| (i as f64 + 0.5) * (100.0 / count as f64)).collect()
}

/// Shift a node position left so `label` prints centered on it
#[allow(clippy::cast_precision_loss)]
fn centered(x: f64, label: &str, cell: f64) -> f64
{
    x - label.len() as f64 / 2.0 * cell
}

/// Resource-to-process edges, one per nonzero allocation cell
fn assignment_edges(snapshot: &Snapshot) -> Vec<(ResourceId, ProcessId)>
{
    let mut edges = Vec::new();
    for process in snapshot.process_ids() {
        for resource in snapshot.resource_ids() {
            if snapshot.allocation(process, resource) > 0 {
                edges.push((resource, process));
            }
        }
    }
    edges
}

/// Process-to-resource edges, one per nonzero request cell
fn request_edges(snapshot: &Snapshot) -> Vec<(ProcessId, ResourceId)>
{
    let mut edges = Vec::new();
    for process in snapshot.process_ids() {
        for resource in snapshot.resource_ids() {
            if snapshot.request(process, resource) > 0 {
                edges.push((process, resource));
            }
        }
    }
    edges
}
