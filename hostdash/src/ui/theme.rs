//! Shared UI colors.

use ratatui::style::Color;

use crate::alerts::{AlertLevel, Threshold};
use crate::logs::Tier;
use crate::types::ServiceStatus;

pub const CPU: Color = Color::Rgb(74, 158, 255);
pub const MEMORY: Color = Color::Rgb(245, 158, 11);
pub const NET_SENT: Color = Color::Rgb(16, 185, 129);
pub const NET_RECV: Color = Color::Rgb(139, 92, 246);
pub const MUTED: Color = Color::Rgb(170, 170, 180);

pub fn usage_color(pct: f64, t: Threshold) -> Color {
    if pct >= t.critical {
        Color::Red
    } else if pct >= t.warning {
        Color::Yellow
    } else {
        Color::Green
    }
}

pub fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Info => MUTED,
        Tier::Warning => Color::Yellow,
        Tier::Error => Color::LightRed,
        Tier::Alert => Color::Red,
    }
}

pub fn level_color(level: AlertLevel) -> Color {
    match level {
        AlertLevel::Warning => Color::Yellow,
        AlertLevel::Alert => Color::Red,
    }
}

pub fn status_color(status: ServiceStatus) -> Color {
    match status {
        ServiceStatus::Running => Color::Green,
        ServiceStatus::Stopped => Color::Red,
        ServiceStatus::Unknown | ServiceStatus::Other => Color::Yellow,
    }
}
