//! Top header with hostname, CPU topology, uptime and the wall clock.

use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders},
};

use crate::types::MetricSample;
use crate::ui::util::{uptime_days, uptime_detail};

pub fn draw_header(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    m: Option<&MetricSample>,
    clock: Option<DateTime<Local>>,
    target: &str,
) {
    let now = clock
        .map(|c| c.format("%d/%m/%Y %H:%M:%S").to_string())
        .unwrap_or_default();
    let title = if let Some(mm) = m {
        let host = mm.system.hostname.as_deref().unwrap_or(target);
        let os = mm.system.os.as_deref().map(|o| format!(" ({o})")).unwrap_or_default();
        let cpu = &mm.system.cpu;
        format!(
            "hostdash | {host}{os} | {} cores @ {:.0} MHz | up {} ({}) | {now}  (press 'q' to quit)",
            cpu.count,
            cpu.frequency,
            uptime_days(&mm.system.uptime),
            uptime_detail(&mm.system.uptime),
        )
    } else {
        format!("hostdash | connecting to {target}... | {now}  (press 'q' to quit)")
    };
    f.render_widget(Block::default().title(title).borders(Borders::BOTTOM), area);
}
