//! Reusable widgets for the Netpulse TUI.

pub mod sparkline;
pub mod stat_panel;

pub use sparkline::Sparkline;
pub use stat_panel::StatPanel;
