//! Network sparklines (sent/received).

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Sparkline},
};

use crate::sink::SeriesData;
use crate::ui::util::human_rate;

pub fn draw_net_spark(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    name: &str,
    hist: &SeriesData,
    peak: f64,
    color: Color,
) {
    let now = hist.values.last().copied().unwrap_or(0.0);
    let title = format!("{name} | now: {} | peak: {}", human_rate(now), human_rate(peak));

    let max_points = area.width.saturating_sub(2) as usize;
    let start = hist.values.len().saturating_sub(max_points);
    let data: Vec<u64> = hist
        .values
        .iter()
        .skip(start)
        .map(|v| v.max(0.0).round() as u64)
        .collect();

    let spark = Sparkline::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .data(&data)
        .style(Style::default().fg(color));
    f.render_widget(spark, area);
}
