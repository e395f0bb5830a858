//! Application state and logic for the TUI

use crossterm::event::{KeyCode, KeyEvent};
use osmium_core::DemoReport;
use ratatui::widgets::TableState;

/// Application state for the report browser
///
/// The app owns a finished [`DemoReport`] and tracks which page of it the
/// user is looking at. Reports are static; all the state here is navigation.
pub struct App
{
    /// The report being browsed
    pub report: DemoReport,
    /// Whether the application should quit
    pub should_quit: bool,
    /// Index of the page currently shown
    pub page: usize,
    /// Row selection for whichever table the current page shows
    pub table_state: TableState,
    /// Error message to display in the footer (if any)
    pub error_message: Option<String>,
}

impl App
{
    /// Create a new application around a finished report
    #[must_use]
    pub fn new(report: DemoReport) -> Self
    {
        let mut table_state = TableState::default();
        table_state.select(Some(0));

        Self {
            report,
            should_quit: false,
            page: 0,
            table_state,
            error_message: None,
        }
    }

    /// Titles of the pages this report splits into, in display order
    #[must_use]
    pub fn page_titles(&self) -> Vec<String>
    {
        match &self.report {
            DemoReport::Deadlock(_) => vec!["Graph".to_string(), "Matrices".to_string()],
            DemoReport::Paging(report) => report.runs.iter().map(|run| run.policy.name().to_string()).collect(),
            DemoReport::Scheduling(report) => report.runs.iter().map(|run| run.policy.to_string()).collect(),
            DemoReport::Memory(report) => report.plans.iter().map(|plan| plan.strategy.name().to_string()).collect(),
        }
    }

    /// Number of pages this report splits into
    #[must_use]
    pub fn page_count(&self) -> usize
    {
        match &self.report {
            DemoReport::Deadlock(_) => 2,
            DemoReport::Paging(report) => report.runs.len(),
            DemoReport::Scheduling(report) => report.runs.len(),
            DemoReport::Memory(report) => report.plans.len(),
        }
    }

    /// Number of selectable rows on the current page
    ///
    /// Must agree with what the widgets actually render, otherwise the
    /// highlight can land on a row that does not exist.
    #[must_use]
    pub fn row_count(&self) -> usize
    {
        match &self.report {
            DemoReport::Deadlock(report) => {
                if self.page == 0 {
                    0 // the graph page has no table
                } else {
                    report.snapshot.process_count()
                }
            }
            DemoReport::Paging(report) => report.runs.get(self.page).map_or(0, |run| run.timeline.len()),
            DemoReport::Scheduling(report) => report.runs.get(self.page).map_or(0, |run| run.metrics.len()),
            DemoReport::Memory(report) => report.plans.get(self.page).map_or(0, |plan| plan.placements.len()),
        }
    }

    /// Switch to a page by index, resetting the row selection
    ///
    /// Out-of-range indices are ignored so that number keys beyond the last
    /// page do nothing instead of wrapping.
    pub fn select_page(&mut self, page: usize)
    {
        if page < self.page_count() && page != self.page {
            self.page = page;
            self.table_state.select(Some(0));
        }
    }

    /// Switch to the next page, wrapping around at the end
    pub fn next_page(&mut self)
    {
        let count = self.page_count();
        if count == 0 {
            return;
        }
        self.page = (self.page + 1) % count;
        self.table_state.select(Some(0));
    }

    /// Switch to the previous page, wrapping around at the start
    pub fn previous_page(&mut self)
    {
        let count = self.page_count();
        if count == 0 {
            return;
        }
        self.page = if self.page == 0 { count - 1 } else { self.page - 1 };
        self.table_state.select(Some(0));
    }

    /// Handle a key event
    ///
    /// Returns `true` if the app should quit.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool
    {
        // Any key press dismisses a lingering error message
        self.error_message = None;

        match key.code {
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => {
                self.should_quit = true;
                return true;
            }
            KeyCode::Char('1') => self.select_page(0),
            KeyCode::Char('2') => self.select_page(1),
            KeyCode::Char('3') => self.select_page(2),
            KeyCode::Char('4') => self.select_page(3),
            KeyCode::Char('5') => self.select_page(4),
            KeyCode::Tab | KeyCode::Right => self.next_page(),
            KeyCode::BackTab | KeyCode::Left => self.previous_page(),
            KeyCode::Up => self.navigate_up(),
            KeyCode::Down => self.navigate_down(),
            _ => {}
        }

        false
    }

    /// Move the row selection up, wrapping to the bottom
    fn navigate_up(&mut self)
    {
        let rows = self.row_count();
        if rows == 0 {
            return;
        }

        let i = match self.table_state.selected() {
            Some(i) => {
                if i == 0 {
                    rows - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    /// Move the row selection down, wrapping to the top
    fn navigate_down(&mut self)
    {
        let rows = self.row_count();
        if rows == 0 {
            return;
        }

        let i = match self.table_state.selected() {
            Some(i) => {
                if i >= rows - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use osmium_core::paging::{simulate, ReplacementPolicy};
    use osmium_core::report::PagingReport;

    fn paging_app() -> App
    {
        let reference = vec![1, 2, 3, 1, 4];
        let runs = ReplacementPolicy::ALL
            .iter()
            .map(|&policy| simulate(policy, &reference, 2).unwrap())
            .collect();

        App::new(DemoReport::Paging(PagingReport {
            reference,
            capacity: 2,
            runs,
        }))
    }

    fn key(code: KeyCode) -> KeyEvent
    {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_page_titles_follow_runs()
    {
        let app = paging_app();
        assert_eq!(app.page_count(), 3);
        assert_eq!(app.page_titles(), vec!["FIFO", "LRU", "Optimal"]);
    }

    #[test]
    fn test_page_navigation_wraps()
    {
        let mut app = paging_app();
        assert_eq!(app.page, 0);

        app.next_page();
        app.next_page();
        assert_eq!(app.page, 2);
        app.next_page();
        assert_eq!(app.page, 0);

        app.previous_page();
        assert_eq!(app.page, 2);
    }

    #[test]
    fn test_number_key_beyond_last_page_is_ignored()
    {
        let mut app = paging_app();
        app.handle_key_event(key(KeyCode::Char('5')));
        assert_eq!(app.page, 0);

        app.handle_key_event(key(KeyCode::Char('2')));
        assert_eq!(app.page, 1);
    }

    #[test]
    fn test_row_selection_wraps_within_page()
    {
        let mut app = paging_app();
        let rows = app.row_count();
        assert_eq!(rows, 5);

        app.handle_key_event(key(KeyCode::Up));
        assert_eq!(app.table_state.selected(), Some(rows - 1));

        app.handle_key_event(key(KeyCode::Down));
        assert_eq!(app.table_state.selected(), Some(0));
    }

    #[test]
    fn test_quit_keys()
    {
        let mut app = paging_app();
        assert!(app.handle_key_event(key(KeyCode::Esc)));
        assert!(app.should_quit);

        let mut app = paging_app();
        assert!(app.handle_key_event(key(KeyCode::Char('q'))));
        assert!(app.should_quit);
    }
}
