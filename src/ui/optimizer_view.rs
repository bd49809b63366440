//! Optimizer view for the Netpulse TUI.
//!
//! Shows the result of the latest optimization run: the classified network
//! status, the efficiency/stability/signal readings, and any suggestions.

use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::state::OptimizerState;
use crate::ui::Theme;

/// Optimizer view showing the latest recommendation set.
pub struct OptimizerView;

impl OptimizerView {
    /// Render the optimizer view.
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        optimizer: &OptimizerState,
        is_running: bool,
        theme: &Theme,
    ) {
        let reading = &optimizer.reading;
        let status = reading.status();
        let status_style = theme.status_style(status);

        let efficiency_text = match reading.efficiency {
            Some(value) => format!("{value:.0}%"),
            None => "N/A".to_string(),
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Network Status:    ", theme.label_style),
                Span::styled(status.to_string(), status_style),
            ]),
            Line::from(vec![
                Span::styled("System Efficiency: ", theme.label_style),
                Span::styled(efficiency_text, theme.value_style),
            ]),
            Line::from(vec![
                Span::styled("Ping Stability:    ", theme.label_style),
                Span::styled(
                    reading.stability.clone().unwrap_or_else(|| "N/A".to_string()),
                    theme.value_style,
                ),
            ]),
            Line::from(vec![
                Span::styled("Signal Strength:   ", theme.label_style),
                Span::styled(
                    reading.signal.clone().unwrap_or_else(|| "N/A".to_string()),
                    theme.value_style,
                ),
            ]),
        ];

        if !reading.suggestions.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Optimization Suggestions",
                theme.header_style,
            )));
            for suggestion in &reading.suggestions {
                lines.push(Line::from(format!("  - {suggestion}")));
            }
        }

        if let Some(error) = &optimizer.error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(error.clone(), theme.error_style)));
        }

        lines.push(Line::from(""));
        if is_running {
            lines.push(Line::from(Span::styled("Optimizing...", theme.moderate_style)));
        } else {
            lines.push(Line::from(vec![
                Span::raw("Press "),
                Span::styled("r", theme.key_style),
                Span::raw(" to run the network optimizer"),
            ]));
        }

        let widget = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Network Optimizer")
                    .style(theme.block_style),
            )
            .style(theme.normal_text)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false });

        frame.render_widget(widget, area);
    }
}
