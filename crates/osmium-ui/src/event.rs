//! Event handling for the TUI

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

/// How often a [`Event::Tick`] is emitted when no input arrives
const TICK_RATE: Duration = Duration::from_millis(250);

/// Events that can occur in the TUI
#[derive(Debug, Clone)]
pub enum Event
{
    /// Keyboard input event
    Key(KeyEvent),
    /// Tick event (for periodic redraws)
    Tick,
}

/// Event handler that reads from crossterm and produces TUI events
///
/// Crossterm's `poll`/`read` are blocking calls, so they run on a dedicated
/// blocking task and feed an async channel the render loop can await on.
pub struct EventHandler
{
    receiver: mpsc::Receiver<Event>,
    sender: mpsc::Sender<Event>,
    should_stop: Arc<AtomicBool>,
    handle: tokio::task::JoinHandle<()>,
}

impl EventHandler
{
    /// Create a new event handler and spawn its reader task
    #[must_use]
    pub fn new() -> Self
    {
        let (sender, receiver) = mpsc::channel(100);
        let should_stop = Arc::new(AtomicBool::new(false));

        let sender_clone = sender.clone();
        let should_stop_clone = should_stop.clone();
        let handle = tokio::task::spawn_blocking(move || {
            let mut last_tick = Instant::now();
            loop {
                if should_stop_clone.load(Ordering::Relaxed) {
                    break;
                }

                let timeout = TICK_RATE
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                if event::poll(timeout).unwrap_or(false) {
                    if let Ok(CrosstermEvent::Key(key)) = event::read() {
                        // Only forward presses; Windows terminals also report releases
                        if key.kind == KeyEventKind::Press
                            && sender_clone.blocking_send(Event::Key(key)).is_err()
                        {
                            // Receiver dropped, nobody is listening anymore
                            break;
                        }
                    }
                }

                if last_tick.elapsed() >= TICK_RATE {
                    if sender_clone.blocking_send(Event::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self {
            receiver,
            sender,
            should_stop,
            handle,
        }
    }

    /// Stop the event handler gracefully
    ///
    /// This sets the stop flag and drops the receiver, allowing the reader
    /// task to exit on its next iteration. `Receiver` has no `Default`, so
    /// the old one is swapped out for a dummy channel and dropped.
    pub fn stop(&mut self)
    {
        self.should_stop.store(true, Ordering::Relaxed);
        drop(std::mem::replace(&mut self.receiver, {
            let (_sender, receiver) = mpsc::channel(1);
            receiver
        }));
    }

    /// Check if the reader task is still running
    #[must_use]
    pub fn is_running(&self) -> bool
    {
        !self.handle.is_finished()
    }

    /// Get the next event (async)
    pub async fn next(&mut self) -> Option<Event>
    {
        self.receiver.recv().await
    }

    /// Get a sender that can be used to push events into the queue.
    #[must_use]
    pub fn sender(&self) -> mpsc::Sender<Event>
    {
        self.sender.clone()
    }
}

impl Default for EventHandler
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl Drop for EventHandler
{
    fn drop(&mut self)
    {
        // The handle cannot be awaited here; the task exits once it notices
        // the stop flag or the closed channel
        self.stop();
    }
}
