//! # osmium-ui
//!
//! Terminal User Interface (TUI) for the Osmium OS-concepts demos.
//!
//! This crate renders a [`DemoReport`] produced by `osmium-core` as an
//! interactive terminal interface built on top of `ratatui`. Every demo is
//! split into pages (graph and matrices for deadlock detection, one page per
//! policy for the simulators) that the user flips through with the keyboard.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use osmium_core::{detect, DemoReport, Snapshot};
//! use osmium_core::report::DeadlockReport;
//! use osmium_ui::run_tui;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let snapshot = Snapshot::build(
//!     &["P1", "P2"],
//!     &["R1"],
//!     &[2],
//!     &[vec![1], vec![1]],
//!     &[vec![0], vec![0]],
//! )?;
//! let detection = detect(&snapshot);
//!
//! run_tui(DemoReport::Deadlock(DeadlockReport { snapshot, detection })).await?;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod event;
pub mod graph;
pub mod tui;
pub mod ui;
pub mod widgets;

pub use app::App;
pub use tui::Tui;

use osmium_core::DemoReport;

/// Run the TUI over a finished demo report
///
/// This is a convenience function that creates a TUI and runs it until the
/// user quits.
///
/// # Example
///
/// ```rust,no_run
/// use osmium_core::memory::{plan, Demand, FitStrategy};
/// use osmium_core::report::MemoryReport;
/// use osmium_core::DemoReport;
/// use osmium_ui::run_tui;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let demands = [Demand::new("P1", 212), Demand::new("P2", 417)];
/// let plans = FitStrategy::ALL
///     .iter()
///     .map(|&strategy| plan(strategy, &[100, 500, 200, 300, 600], &demands))
///     .collect();
///
/// run_tui(DemoReport::Memory(MemoryReport { plans })).await?;
/// # Ok(())
/// # }
/// ```
pub async fn run_tui(report: DemoReport) -> std::io::Result<()>
{
    let mut tui = Tui::new()?;
    tui.run(report).await
}
