//! UI rendering logic

use osmium_core::DemoReport;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};

use crate::app::App;

/// Draw the UI
pub fn draw(frame: &mut Frame, app: &mut App)
{
    // Make the footer taller if there's an error message to display
    let footer_height = if app.error_message.is_some() { 5 } else { 3 };

    let chunks = Layout::vertical([
        Constraint::Length(3),             // Header with page tabs
        Constraint::Min(0),                // Main content
        Constraint::Length(footer_height), // Footer/status
    ])
    .split(frame.area());

    draw_header(frame, chunks[0], app);
    draw_main_content(frame, chunks[1], app);
    draw_footer(frame, chunks[2], app);
}

/// Draw the header bar with one tab per page
fn draw_header(frame: &mut Frame, area: Rect, app: &App)
{
    let titles: Vec<Line> = app.page_titles().into_iter().map(Line::from).collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(app.report.title()))
        .style(Style::default().fg(Color::Cyan))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .select(app.page);

    frame.render_widget(tabs, area);
}

/// Draw the main content area for the current page
fn draw_main_content(frame: &mut Frame, area: Rect, app: &mut App)
{
    let page = app.page;
    // Split the borrows so widgets can take the report and the table
    // selection state at the same time
    let App { report, table_state, .. } = app;

    match report {
        DemoReport::Deadlock(report) => {
            if page == 0 {
                crate::graph::draw_graph(frame, area, report);
            } else {
                crate::widgets::draw_deadlock_matrices(frame, area, report, table_state);
            }
        }
        DemoReport::Paging(report) => {
            if let Some(run) = report.runs.get(page) {
                crate::widgets::draw_paging_run(frame, area, &report.reference, run, table_state);
            } else {
                draw_empty(frame, area);
            }
        }
        DemoReport::Scheduling(report) => {
            if let Some(run) = report.runs.get(page) {
                crate::widgets::draw_schedule_run(frame, area, run, table_state);
            } else {
                draw_empty(frame, area);
            }
        }
        DemoReport::Memory(report) => {
            if let Some(plan) = report.plans.get(page) {
                crate::widgets::draw_memory_plan(frame, area, plan, table_state);
            } else {
                draw_empty(frame, area);
            }
        }
    }
}

/// Placeholder for a report that carries no runs
fn draw_empty(frame: &mut Frame, area: Rect)
{
    let empty = Paragraph::new("Nothing to show")
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(empty, area);
}

/// Draw the footer with help text
fn draw_footer(frame: &mut Frame, area: Rect, app: &App)
{
    let help_text = match (&app.report, app.page) {
        (DemoReport::Deadlock(_), 0) => "Tab/→:Matrices | q/Esc:Quit",
        (DemoReport::Deadlock(_), _) => "↑/↓:Select process | Tab/→:Graph | q/Esc:Quit",
        _ => "↑/↓:Select row | Tab/→/←:Switch page | 1-5:Jump to page | q/Esc:Quit",
    };

    let mut footer_lines = vec![Line::from(help_text)];

    if let Some(ref error) = app.error_message {
        footer_lines.push(Line::styled(format!("Error: {error}"), Style::default().fg(Color::Red)));
    }

    let footer = Paragraph::new(footer_lines)
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, area);
}
