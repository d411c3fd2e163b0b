//! Recent server log lines, colored by severity tier.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use crate::logs::LogLine;
use crate::ui::theme::{tier_color, MUTED};

pub fn draw_logs(f: &mut ratatui::Frame<'_>, area: Rect, logs: &[LogLine]) {
    let block = Block::default().borders(Borders::ALL).title("Logs");
    let items: Vec<ListItem> = if logs.is_empty() {
        vec![ListItem::new(Span::styled(
            "No recent error logs",
            Style::default().fg(MUTED),
        ))]
    } else {
        logs.iter()
            .map(|line| {
                let color = tier_color(line.tier());
                let spans = match line {
                    LogLine::Structured(rec) => vec![
                        Span::styled(format!("{} ", rec.timestamp), Style::default().fg(MUTED)),
                        Span::styled(
                            format!("[{}] ", rec.level),
                            Style::default().fg(color).add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(rec.message.clone(), Style::default().fg(color)),
                    ],
                    LogLine::Raw(raw) => vec![Span::styled(raw.clone(), Style::default().fg(color))],
                };
                ListItem::new(Line::from(spans))
            })
            .collect()
    };
    f.render_widget(List::new(items).block(block), area);
}
