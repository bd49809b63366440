//! Sparkline widget for time-series data visualization.
//!
//! Renders a bounded window of samples as a one-row bar chart. Rates and
//! delays are non-negative, so bars are scaled from a zero baseline up to
//! the window maximum (or an explicit ceiling), mirroring a chart with its
//! y-axis anchored at zero.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols,
    widgets::{Block, Widget},
};

/// A sparkline widget that shows a simplified bar chart of recent values.
pub struct Sparkline<'a> {
    /// Block drawn around the sparkline.
    block: Option<Block<'a>>,
    /// Style of the bars.
    style: Style,
    /// Values to display, oldest first.
    data: &'a [f64],
    /// Optional fixed ceiling; defaults to the window maximum.
    max: Option<f64>,
    /// Symbol set used for the bars.
    bar_set: symbols::bar::Set,
}

impl<'a> Sparkline<'a> {
    pub fn new(data: &'a [f64]) -> Self {
        Self {
            block: None,
            style: Style::default(),
            data,
            max: None,
            bar_set: symbols::bar::NINE_LEVELS,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }
}

impl<'a> Widget for Sparkline<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = if let Some(block) = self.block {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        if area.height < 1 || area.width < 1 || self.data.is_empty() {
            return;
        }

        let mut ceiling = self
            .max
            .unwrap_or_else(|| self.data.iter().fold(f64::MIN, |max, &v| max.max(v)));
        if ceiling <= 0.0 {
            ceiling = 1.0;
        }

        // Show the newest samples when the window is wider than the area.
        let width = area.width as usize;
        let visible = &self.data[self.data.len().saturating_sub(width)..];

        for (i, &value) in visible.iter().enumerate() {
            let ratio = (value / ceiling).clamp(0.0, 1.0);
            let level = (ratio * 8.0).round() as usize;
            let symbol = match level {
                0 => self.bar_set.empty,
                1 => self.bar_set.one_eighth,
                2 => self.bar_set.one_quarter,
                3 => self.bar_set.three_eighths,
                4 => self.bar_set.half,
                5 => self.bar_set.five_eighths,
                6 => self.bar_set.three_quarters,
                7 => self.bar_set.seven_eighths,
                _ => self.bar_set.full,
            };

            buf.get_mut(area.x + i as u16, area.y + area.height - 1)
                .set_symbol(symbol)
                .set_style(self.style);
        }
    }
}
