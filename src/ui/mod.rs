//! UI components for the Netpulse TUI.
//!
//! The UI is a read-only projection over the engine state: every render
//! works from snapshots taken by the application loop, never from live
//! handles into the poller's buffers.

mod dashboard;
mod optimizer_view;
pub mod help;
pub mod theme;
pub mod widgets;

pub use dashboard::DashboardView;
pub use help::HelpView;
pub use optimizer_view::OptimizerView;
pub use theme::Theme;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::state::{NetworkState, OptimizerState, PollPhase};

/// The result of updating the UI in response to user input.
pub enum UpdateKind {
    /// Quit the application
    Quit,
    /// Toggle help overlay
    ToggleHelp,
    /// Trigger an optimization run
    RunOptimizer,
    /// Other update (no action needed)
    Other,
}

/// Available views in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Live measurement charts and summary figures
    Dashboard,
    /// Latest optimization reading and suggestions
    Optimizer,
}

/// Main UI controller.
pub struct Ui {
    /// Current view state
    view: ViewState,
    /// Whether to show help overlay
    show_help: bool,
    /// UI theme
    theme: Theme,
}

impl Ui {
    /// Create a new UI controller.
    pub fn new() -> Self {
        Self {
            view: ViewState::Dashboard,
            show_help: false,
            theme: Theme::default(),
        }
    }

    /// Get the current view state.
    pub fn current_view(&self) -> ViewState {
        self.view
    }

    /// Toggle help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Handle keyboard input.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> UpdateKind {
        match key.code {
            KeyCode::F(1) | KeyCode::Char('?') => UpdateKind::ToggleHelp,
            KeyCode::Char('q') | KeyCode::Esc => UpdateKind::Quit,
            KeyCode::Char('d') => {
                self.view = ViewState::Dashboard;
                UpdateKind::Other
            }
            KeyCode::Char('o') => {
                self.view = ViewState::Optimizer;
                UpdateKind::Other
            }
            KeyCode::Char('r') => UpdateKind::RunOptimizer,
            _ => UpdateKind::Other,
        }
    }

    /// Render the UI from state snapshots.
    pub fn render(
        &self,
        frame: &mut Frame,
        net: &NetworkState,
        optimizer: &OptimizerState,
        optimizing: bool,
    ) {
        let area = frame.size();
        let view_area = Rect {
            height: area.height.saturating_sub(1),
            ..area
        };

        match self.view {
            ViewState::Dashboard => DashboardView::render(frame, view_area, net, &self.theme),
            ViewState::Optimizer => {
                OptimizerView::render(frame, view_area, optimizer, optimizing, &self.theme)
            }
        }

        // Help overlay goes on top of whichever view is active
        if self.show_help {
            HelpView::render(frame, view_area, &self.theme);
        }

        self.render_status_line(frame, area, net);
    }

    fn render_status_line(&self, frame: &mut Frame, area: Rect, net: &NetworkState) {
        let status_area = Rect::new(0, area.height.saturating_sub(1), area.width, 1);

        let (status, status_style) = match net.phase {
            PollPhase::Idle => ("IDLE", self.theme.status_stopped),
            PollPhase::Scheduled | PollPhase::Fetching => ("LIVE", self.theme.status_live),
            PollPhase::Stopped => ("STOPPED", self.theme.status_stopped),
        };

        let status_text = match &net.last_error {
            Some(error) => format!("{status} | poll error: {error} | Press ? for help"),
            None => format!("{status} | Press ? for help"),
        };

        let status_widget = Paragraph::new(status_text).style(status_style);
        frame.render_widget(status_widget, status_area);
    }
}

impl Default for Ui {
    fn default() -> Self {
        Self::new()
    }
}
