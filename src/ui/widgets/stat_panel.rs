//! Statistical panel widget for displaying metric values.
//!
//! A panel of label/value rows with per-value styling, used for the summary
//! figures under the charts.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

/// A panel showing statistics with labels and values.
pub struct StatPanel<'a> {
    /// Block surrounding the panel
    block: Option<Block<'a>>,
    /// List of labels, values, and value styles
    stats: Vec<(&'a str, String, Style)>,
    /// Style for the labels
    label_style: Style,
}

impl<'a> StatPanel<'a> {
    pub fn new() -> Self {
        Self {
            block: None,
            stats: Vec::new(),
            label_style: Style::default().add_modifier(Modifier::BOLD),
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Add a statistic row to the panel.
    pub fn stat(mut self, label: &'a str, value: impl Into<String>, style: Style) -> Self {
        self.stats.push((label, value.into(), style));
        self
    }

    pub fn label_style(mut self, style: Style) -> Self {
        self.label_style = style;
        self
    }
}

impl<'a> Default for StatPanel<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Widget for StatPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 || self.stats.is_empty() {
            return;
        }

        let render_area = if let Some(block) = self.block {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        if render_area.height < 1 {
            return;
        }

        // Pad labels to the longest for column alignment.
        let max_label_len = self
            .stats
            .iter()
            .map(|(label, _, _)| label.len())
            .max()
            .unwrap_or(0);

        let mut text = Vec::with_capacity(self.stats.len());
        for (i, (label, value, style)) in self.stats.iter().enumerate() {
            if i >= render_area.height as usize {
                break;
            }

            text.push(Line::from(vec![
                Span::styled(
                    format!("{:<width$}", label, width = max_label_len),
                    self.label_style,
                ),
                Span::raw("  "),
                Span::styled(value.clone(), style.add_modifier(Modifier::BOLD)),
            ]));
        }

        Paragraph::new(text).render(render_area, buf);
    }
}
