//! Network card: instantaneous rates and cumulative totals.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme::Palette;
use super::util::{card, inner};
use crate::view::NetView;

pub fn draw_net(f: &mut ratatui::Frame<'_>, area: Rect, n: &NetView, p: &Palette) {
    f.render_widget(card("Network", p), area);
    let body = inner(area);
    let rule = "─".repeat(body.width as usize);
    let lines = vec![
        Line::from(Span::styled(n.up.clone(), Style::default().fg(p.cpu))),
        Line::from(Span::styled(n.down.clone(), Style::default().fg(p.ram))),
        Line::from(Span::styled(rule, Style::default().fg(p.border))),
        Line::from(n.sent.clone()),
        Line::from(n.recv.clone()),
    ];
    f.render_widget(Paragraph::new(lines), body);
}
