//! Terminal User Interface initialization and management

use std::io::{self, Stdout, Write};
use std::panic;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use osmium_core::DemoReport;
use osmium_utils::info;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::app::App;
use crate::event::{Event, EventHandler};

/// Terminal User Interface for Osmium demos
///
/// This struct manages the terminal state and provides the interactive
/// browser over a demo report.
pub struct Tui
{
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Tui
{
    /// Create a new TUI instance
    ///
    /// This initializes the terminal in raw mode and alternate screen,
    /// and sets up panic handling to restore the terminal on panic.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization fails (raw mode, alternate screen, etc.)
    ///
    /// # Panics
    ///
    /// May panic if terminal restoration fails inside the panic hook
    pub fn new() -> io::Result<Self>
    {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        // Set up panic hook to restore terminal on panic
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            Self::restore().unwrap();
            original_hook(panic_info);
        }));

        Ok(Self { terminal })
    }

    /// Run the TUI event loop
    ///
    /// This displays the report and handles user input until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal drawing fails or terminal restoration fails
    pub async fn run(&mut self, report: DemoReport) -> io::Result<()>
    {
        info!("Osmium TUI started ({})", report.title());

        let mut app = App::new(report);
        let mut event_handler = EventHandler::new();

        loop {
            if app.should_quit {
                break;
            }

            self.terminal.draw(|frame| crate::ui::draw(frame, &mut app))?;

            // Use a timeout so a quiet event channel cannot stall the loop
            match tokio::time::timeout(Duration::from_millis(100), event_handler.next()).await {
                Ok(Some(event)) => match event {
                    Event::Key(key_event) => {
                        if app.handle_key_event(key_event) {
                            break;
                        }
                    }
                    Event::Tick => {
                        // Reports are static, a tick only triggers a redraw
                    }
                },
                Ok(None) => {
                    // Channel closed
                    break;
                }
                Err(_) => {
                    // Timeout, loop back around and redraw
                }
            }
        }

        info!("Osmium TUI closing");

        // Restore the terminal before stopping the event handler so the
        // user gets their prompt back right away
        Self::restore()?;
        event_handler.stop();

        let _ = io::stdout().flush();

        Ok(())
    }

    /// Restore the terminal to its original state
    ///
    /// This should be called when exiting the TUI to ensure the terminal
    /// is left in a usable state.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal restoration fails (disabling raw mode, leaving alternate screen, etc.)
    pub fn restore() -> io::Result<()>
    {
        disable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;
        Ok(())
    }
}

impl Drop for Tui
{
    fn drop(&mut self)
    {
        let _ = Self::restore();
    }
}
