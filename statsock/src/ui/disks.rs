//! Disk table: mount, used, total and a usage bar per visible mount.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Row, Table},
};

use super::theme::Palette;
use super::util::{bar, card, truncate_middle};
use crate::view::DiskRow;

const COLS: [Constraint; 4] = [
    Constraint::Min(10),    // Mount
    Constraint::Length(11), // Used
    Constraint::Length(11), // Total
    Constraint::Length(18), // % Used
];

pub fn draw_disks(f: &mut ratatui::Frame<'_>, area: Rect, disks: &[DiskRow], p: &Palette) {
    let mount_w = area.width.saturating_sub(2 + 11 + 11 + 18 + 3).max(10) as usize;
    let rows = disks.iter().map(|d| {
        Row::new(vec![
            Cell::from(truncate_middle(&d.mount, mount_w)),
            Cell::from(Line::from(d.used.clone()).right_aligned()),
            Cell::from(Line::from(d.total.clone()).right_aligned()),
            Cell::from(Line::from(vec![
                Span::raw(format!("{:>6} ", d.percent_text)),
                Span::styled(bar(d.fill, 10), Style::default().fg(p.level(d.fill))),
            ])),
        ])
    });
    let header = Row::new(vec!["Mount", "Used", "Total", "% Used"])
        .style(p.muted().add_modifier(Modifier::BOLD));
    let table = Table::new(rows, COLS)
        .header(header)
        .block(card("Disks", p))
        .column_spacing(1);
    f.render_widget(table, area);
}
