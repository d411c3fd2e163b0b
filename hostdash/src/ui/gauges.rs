//! Memory / swap / disk usage gauges.

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Gauge},
};

use crate::alerts::Threshold;
use crate::types::Usage;
use crate::ui::theme::{usage_color, MUTED};

pub fn draw_usage_gauge(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    title: &str,
    usage: Option<&Usage>,
    threshold: Threshold,
) {
    let block = Block::default().borders(Borders::ALL).title(title.to_string());
    let Some(u) = usage else {
        f.render_widget(
            Gauge::default().block(block).gauge_style(Style::default().fg(MUTED)).percent(0).label("n/a"),
            area,
        );
        return;
    };

    // Gauge panics above 100
    let pct = u.percent.clamp(0.0, 100.0);
    let label = if u.total.is_empty() {
        format!("{pct:.1}%")
    } else {
        format!("{} / {}  ({pct:.1}%)", u.used, u.total)
    };
    let g = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(usage_color(pct, threshold)))
        .percent(pct.round() as u16)
        .label(label);
    f.render_widget(g, area);
}
