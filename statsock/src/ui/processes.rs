//! Top processes table. Rows keep the producer's order; only scrolling is
//! handled client-side.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Cell, Row, Table},
};

use super::theme::Palette;
use super::util::card;
use crate::view::ProcRow;

const COLS: [Constraint; 5] = [
    Constraint::Length(8),      // PID
    Constraint::Percentage(40), // Name
    Constraint::Min(8),         // User
    Constraint::Length(7),      // % CPU
    Constraint::Length(7),      // % MEM
];

/// Visible data rows for a table drawn in `area` (borders + header).
pub fn page_size(area: Rect) -> usize {
    area.height.saturating_sub(3).max(1) as usize
}

pub fn clamp_offset(offset: usize, total: usize, page: usize) -> usize {
    offset.min(total.saturating_sub(page))
}

pub fn draw_top_processes(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    procs: &[ProcRow],
    scroll_offset: usize,
    p: &Palette,
) {
    let page = page_size(area);
    let offset = clamp_offset(scroll_offset, procs.len(), page);

    let rows = procs.iter().skip(offset).take(page).map(|r| {
        Row::new(vec![
            Cell::from(r.pid.clone()).style(p.muted()),
            Cell::from(r.name.clone()),
            Cell::from(r.user.clone()),
            Cell::from(Line::from(r.cpu.clone()).right_aligned()),
            Cell::from(Line::from(r.mem.clone()).right_aligned()),
        ])
        .style(Style::default().fg(p.fg))
    });
    let header = Row::new(vec![
        Cell::from("PID"),
        Cell::from("Name"),
        Cell::from("User"),
        Cell::from(Line::from("% CPU").right_aligned()),
        Cell::from(Line::from("% MEM").right_aligned()),
    ])
    .style(p.muted().add_modifier(Modifier::BOLD));

    let table = Table::new(rows, COLS)
        .header(header)
        .block(card("Top Processes", p))
        .column_spacing(1);
    f.render_widget(table, area);
}

/// Keyboard scrolling (Up/Down/PageUp/PageDown/Home/End).
pub fn processes_handle_key(scroll_offset: &mut usize, key: KeyEvent, page_size: usize) {
    match key.code {
        KeyCode::Up => *scroll_offset = scroll_offset.saturating_sub(1),
        KeyCode::Down => *scroll_offset = scroll_offset.saturating_add(1),
        KeyCode::PageUp => *scroll_offset = scroll_offset.saturating_sub(page_size.max(1)),
        KeyCode::PageDown => *scroll_offset = scroll_offset.saturating_add(page_size.max(1)),
        KeyCode::Home => *scroll_offset = 0,
        KeyCode::End => *scroll_offset = usize::MAX,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn scrolling_keys() {
        let mut off = 0;
        processes_handle_key(&mut off, key(KeyCode::Up), 5);
        assert_eq!(off, 0);
        processes_handle_key(&mut off, key(KeyCode::PageDown), 5);
        assert_eq!(off, 5);
        processes_handle_key(&mut off, key(KeyCode::Down), 5);
        assert_eq!(off, 6);
        processes_handle_key(&mut off, key(KeyCode::End), 5);
        assert_eq!(clamp_offset(off, 12, 5), 7);
        processes_handle_key(&mut off, key(KeyCode::Home), 5);
        assert_eq!(off, 0);
    }

    #[test]
    fn offset_clamps_when_everything_fits() {
        assert_eq!(clamp_offset(3, 2, 10), 0);
    }
}
