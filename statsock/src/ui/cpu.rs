//! CPU and load-average cards.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
};

use super::theme::Palette;
use super::util::{card, gauge_percent, inner};
use crate::view::{UsageCard, NOT_AVAILABLE};

/// Big percentage, a detail line, and a gauge. Shared by CPU, memory and swap.
pub fn draw_usage_card(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    title: &str,
    c: &UsageCard,
    p: &Palette,
) {
    f.render_widget(card(title, p), area);
    let body = inner(area);
    if body.height == 0 {
        return;
    }
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(body);

    let line = Line::from(vec![
        Span::styled(
            c.percent_text.clone(),
            Style::default().fg(p.fg).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(c.detail.clone(), p.muted()),
    ]);
    f.render_widget(Paragraph::new(line), rows[0]);

    let g = Gauge::default()
        .gauge_style(Style::default().fg(p.level(c.fill)).bg(p.border))
        .percent(gauge_percent(c.fill))
        .label("");
    f.render_widget(g, rows[1]);
}

pub fn draw_cpu(f: &mut ratatui::Frame<'_>, area: Rect, c: &UsageCard, p: &Palette) {
    draw_usage_card(f, area, "CPU", c, p);
}

pub fn draw_load_avg(f: &mut ratatui::Frame<'_>, area: Rect, text: &str, p: &Palette) {
    f.render_widget(card("Load Avg (1/5/15m)", p), area);
    let style = if text == NOT_AVAILABLE {
        p.muted()
    } else {
        Style::default().fg(p.fg)
    };
    f.render_widget(
        Paragraph::new(Span::styled(text.to_string(), style)),
        inner(area),
    );
}
