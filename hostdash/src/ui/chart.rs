//! Percentage line charts (CPU, memory) over the rolling window.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
};

use crate::sink::SeriesData;
use crate::ui::theme::MUTED;

pub fn draw_percent_chart(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    name: &str,
    data: &SeriesData,
    cap: usize,
    color: Color,
) {
    let title = match data.values.last() {
        Some(v) => format!("{name} (now: {v:>5.1}%)"),
        None => name.to_string(),
    };
    let points = data.points();
    let dataset = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&points);

    let first = data.labels.first().cloned().unwrap_or_default();
    let last = data.labels.last().cloned().unwrap_or_default();
    let axis_style = Style::default().fg(MUTED);

    let chart = Chart::new(vec![dataset])
        .block(Block::default().borders(Borders::ALL).title(title))
        .x_axis(
            Axis::default()
                .style(axis_style)
                .bounds([0.0, cap.saturating_sub(1).max(1) as f64])
                .labels(vec![Span::raw(first), Span::raw(last)]),
        )
        .y_axis(
            Axis::default()
                .style(axis_style)
                .bounds([0.0, 100.0])
                .labels(vec![Span::raw("0%"), Span::raw("50%"), Span::raw("100%")]),
        );
    f.render_widget(chart, area);
}
