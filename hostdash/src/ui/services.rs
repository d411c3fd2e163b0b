//! Service status list.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use crate::types::Service;
use crate::ui::theme::status_color;
use crate::ui::util::truncate_middle;

pub fn draw_services(f: &mut ratatui::Frame<'_>, area: Rect, services: &[Service]) {
    let name_w = area.width.saturating_sub(14) as usize;
    let items: Vec<ListItem> = services
        .iter()
        .map(|s| {
            let name = truncate_middle(&s.name, name_w);
            ListItem::new(Line::from(vec![
                Span::raw(format!("{name:<name_w$} ")),
                Span::styled(
                    s.status.as_str(),
                    Style::default().fg(status_color(s.status)).add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect();
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Services"));
    f.render_widget(list, area);
}
