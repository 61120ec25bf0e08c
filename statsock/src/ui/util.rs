//! Small UI helpers: gauge clamping, bars, truncation, card blocks.

use ratatui::{
    layout::Rect,
    style::Style,
    text::Span,
    widgets::{Block, Borders},
};

use super::theme::Palette;

/// Gauge widgets panic outside 0..=100.
pub fn gauge_percent(fill: f64) -> u16 {
    if fill.is_nan() {
        return 0;
    }
    fill.clamp(0.0, 100.0).round() as u16
}

/// Text progress bar of `width` cells.
pub fn bar(fill: f64, width: usize) -> String {
    let filled = (gauge_percent(fill) as usize * width + 50) / 100;
    let mut s = "█".repeat(filled);
    s.push_str(&"░".repeat(width - filled));
    s
}

pub fn truncate_middle(s: &str, max: usize) -> String {
    let len = s.chars().count();
    if len <= max {
        return s.to_string();
    }
    if max <= 3 {
        return "...".into();
    }
    let keep = max - 3;
    let left = keep / 2;
    let right = keep - left;
    let head: String = s.chars().take(left).collect();
    let tail: String = s.chars().skip(len - right).collect();
    format!("{head}...{tail}")
}

pub fn card<'a>(title: &'a str, p: &Palette) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.border))
        .title(Span::styled(title, p.title()))
}

pub fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}
