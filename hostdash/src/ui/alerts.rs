//! Alerts admitted by the cooldown, newest first.

use std::collections::VecDeque;

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use crate::alerts::AlertEvent;
use crate::ui::theme::{level_color, MUTED};

pub fn draw_alerts(f: &mut ratatui::Frame<'_>, area: Rect, alerts: &VecDeque<(String, AlertEvent)>) {
    let items: Vec<ListItem> = alerts
        .iter()
        .rev()
        .map(|(at, a)| {
            let color = level_color(a.level);
            ListItem::new(Line::from(vec![
                Span::styled(format!("{at} "), Style::default().fg(MUTED)),
                Span::styled(
                    format!("{:<7} ", a.level.as_str()),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(a.message.clone(), Style::default().fg(color)),
            ]))
        })
        .collect();
    let title = format!("Alerts ({})", alerts.len());
    f.render_widget(List::new(items).block(Block::default().borders(Borders::ALL).title(title)), area);
}
