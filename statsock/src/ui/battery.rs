//! Battery card, with a placeholder on machines without one.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
};

use super::theme::Palette;
use super::util::{card, gauge_percent, inner};
use crate::view::{BatteryView, NO_BATTERY};

pub fn draw_battery(f: &mut ratatui::Frame<'_>, area: Rect, b: &BatteryView, p: &Palette) {
    f.render_widget(card("Battery", p), area);
    let body = inner(area);
    let BatteryView::Present {
        percent_text,
        detail,
        fill,
    } = b
    else {
        f.render_widget(Paragraph::new(Span::styled(NO_BATTERY, p.muted())), body);
        return;
    };
    if body.height == 0 {
        return;
    }
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(body);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            percent_text.clone(),
            Style::default().fg(p.fg).add_modifier(Modifier::BOLD),
        ))),
        rows[0],
    );
    f.render_widget(
        Paragraph::new(Span::styled(detail.clone(), p.muted())),
        rows[1],
    );
    // low charge is the alarming end for a battery
    let color = if *fill < 20.0 { p.crit } else { p.ok };
    f.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(color).bg(p.border))
            .percent(gauge_percent(*fill))
            .label(""),
        rows[2],
    );
}
