//! Dashboard view for the Netpulse TUI.
//!
//! Shows the live measurement windows:
//! 1. Download-rate chart over the retained window
//! 2. Round-trip-delay chart over the retained window
//! 3. Summary figures (current download/upload/ping, max download)

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use crate::state::NetworkState;
use crate::ui::widgets::{Sparkline, StatPanel};
use crate::ui::Theme;

/// Dashboard view showing the live network measurements.
pub struct DashboardView;

impl DashboardView {
    /// Render the dashboard view.
    pub fn render(frame: &mut Frame, area: Rect, net: &NetworkState, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(35), // Download chart
                Constraint::Percentage(35), // Ping chart
                Constraint::Min(6),         // Summary figures
            ])
            .split(area);

        Self::render_download_chart(frame, chunks[0], net, theme);
        Self::render_ping_chart(frame, chunks[1], net, theme);
        Self::render_summary(frame, chunks[2], net, theme);
    }

    fn render_download_chart(frame: &mut Frame, area: Rect, net: &NetworkState, theme: &Theme) {
        let values = net.download.values();
        let chart = Sparkline::new(&values)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Real-Time Download Speed (Mbps)")
                    .style(theme.block_style),
            )
            .style(theme.download_chart);

        frame.render_widget(chart, area);
    }

    fn render_ping_chart(frame: &mut Frame, area: Rect, net: &NetworkState, theme: &Theme) {
        let values = net.ping.values();
        let chart = Sparkline::new(&values)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Real-Time Connection Delay (ms)")
                    .style(theme.block_style),
            )
            .style(theme.ping_chart);

        frame.render_widget(chart, area);
    }

    fn render_summary(frame: &mut Frame, area: Rect, net: &NetworkState, theme: &Theme) {
        let ping_text = match net.ping_current() {
            Some(ping) => format!("{ping:.2} ms"),
            None => "N/A".to_string(),
        };

        let panel = StatPanel::new()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Summary")
                    .style(theme.block_style),
            )
            .label_style(theme.label_style)
            .stat(
                "Download Speed",
                format!("{:.2} Mbps", net.download_summary.current()),
                theme.value_style,
            )
            .stat(
                "Upload Speed",
                format!("{:.2} Mbps", net.upload_current()),
                theme.value_style,
            )
            .stat("Ping", ping_text, theme.value_style)
            .stat(
                "Max Download Speed",
                format!("{:.2} Mbps", net.download_summary.running_max()),
                theme.value_style,
            );

        frame.render_widget(panel, area);
    }
}
