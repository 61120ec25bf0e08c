//! Title line with source, machine and capture time.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme::Palette;
use crate::view::SnapshotView;

const HINT: &str = "q quit · t theme · ↑/↓ processes";

pub fn draw_header(f: &mut ratatui::Frame<'_>, area: Rect, v: Option<&SnapshotView>, p: &Palette) {
    let subtitle = match v {
        Some(v) => format!("{} • {} • {}", v.source, v.machine, v.captured_at),
        None => "connecting...".into(),
    };
    let lines = vec![
        Line::from(vec![
            Span::styled("System Monitor", p.title()),
            Span::styled(format!("   {HINT}"), p.muted()),
        ]),
        Line::from(Span::styled(subtitle, p.muted())),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Left), area);
}
