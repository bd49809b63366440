//! UI theme definition.

use ratatui::style::{Color, Modifier, Style};

use crate::state::NetworkStatus;

/// Theme for the application UI.
#[derive(Debug, Clone)]
pub struct Theme {
    // Basic styles
    pub normal_text: Style,
    pub block_style: Style,
    pub header_style: Style,
    pub label_style: Style,
    pub value_style: Style,

    // Status styles
    pub error_style: Style,
    pub help_style: Style,
    pub status_live: Style,
    pub status_stopped: Style,

    // Key styles
    pub key_style: Style,

    // Network status styles
    pub unknown_style: Style,
    pub poor_style: Style,
    pub moderate_style: Style,
    pub good_style: Style,

    // Chart styles
    pub download_chart: Style,
    pub ping_chart: Style,
}

impl Theme {
    /// Style for a classified network status.
    pub fn status_style(&self, status: NetworkStatus) -> Style {
        match status {
            NetworkStatus::Unknown => self.unknown_style,
            NetworkStatus::Poor => self.poor_style,
            NetworkStatus::Moderate => self.moderate_style,
            NetworkStatus::Good => self.good_style,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            // Basic styles
            normal_text: Style::default().fg(Color::White),
            block_style: Style::default(),
            header_style: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            label_style: Style::default().fg(Color::Gray),
            value_style: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),

            // Status styles
            error_style: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            help_style: Style::default().fg(Color::Gray),
            status_live: Style::default().fg(Color::Green),
            status_stopped: Style::default().fg(Color::Yellow),

            // Key styles
            key_style: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),

            // Network status styles
            unknown_style: Style::default().fg(Color::DarkGray),
            poor_style: Style::default().fg(Color::Red),
            moderate_style: Style::default().fg(Color::Yellow),
            good_style: Style::default().fg(Color::Green),

            // Chart styles
            download_chart: Style::default().fg(Color::Blue),
            ping_chart: Style::default().fg(Color::Green),
        }
    }
}
