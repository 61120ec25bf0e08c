//! UI module root: lays out the dashboard and delegates to the panels.

pub mod battery;
pub mod cpu;
pub mod disks;
pub mod header;
pub mod mem;
pub mod net;
pub mod processes;
pub mod sensors;
pub mod theme;
pub mod trend;
pub mod util;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::Span,
    widgets::{Block, Paragraph},
};

use crate::history::HistoryBuffer;
use crate::theme::Theme;
use crate::types::Snapshot;
use crate::view::SnapshotView;
use theme::Palette;

/// Everything the dashboard reads for one frame. All borrowed, never mutated.
pub struct DashboardFrame<'a> {
    pub latest: Option<&'a Snapshot>,
    pub history: &'a HistoryBuffer,
    pub theme: Theme,
    pub procs_scroll: usize,
}

/// Vertical slots: header, cards, sensors, battery/network, trend, tables.
fn rows(area: Rect, sensors_h: u16) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(4),
            Constraint::Length(sensors_h),
            Constraint::Length(7),
            Constraint::Min(8),
            Constraint::Min(8),
        ])
        .split(area)
}

/// Area the processes table gets in a terminal of `area`, for scroll paging.
pub fn procs_area(area: Rect, latest: Option<&Snapshot>) -> Rect {
    let sensors_h = latest
        .map(|s| sensors::sensors_height(&SnapshotView::derive(s)))
        .unwrap_or(0);
    let bottom = rows(area, sensors_h)[5];
    split_halves(bottom)[1]
}

fn split_halves(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area)
}

pub fn draw_dashboard(f: &mut ratatui::Frame<'_>, frame: &DashboardFrame<'_>) {
    let area = f.area();
    let p = Palette::for_theme(frame.theme);
    f.render_widget(Block::default().style(p.base()), area);

    let Some(snapshot) = frame.latest else {
        draw_loading(f, area, p);
        return;
    };
    let v = SnapshotView::derive(snapshot);
    let rows = rows(area, sensors::sensors_height(&v));

    header::draw_header(f, rows[0], Some(&v), p);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[1]);
    cpu::draw_cpu(f, cards[0], &v.cpu, p);
    mem::draw_mem(f, cards[1], &v.mem, p);
    mem::draw_swap(f, cards[2], &v.swap, p);
    cpu::draw_load_avg(f, cards[3], &v.load_avg, p);

    sensors::draw_sensors(f, rows[2], &v, p);

    let power_net = split_halves(rows[3]);
    battery::draw_battery(f, power_net[0], &v.battery, p);
    net::draw_net(f, power_net[1], &v.net, p);

    trend::draw_trend(f, rows[4], frame.history, p);

    let tables = split_halves(rows[5]);
    disks::draw_disks(f, tables[0], &v.disks, p);
    processes::draw_top_processes(f, tables[1], &v.procs, frame.procs_scroll, p);
}

fn draw_loading(f: &mut ratatui::Frame<'_>, area: Rect, p: &Palette) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(area);
    header::draw_header(f, rows[0], None, p);
    f.render_widget(
        Paragraph::new(Span::styled("Loading…", p.muted())).alignment(Alignment::Center),
        rows[1],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistorySample;
    use crate::types::fixtures::snapshot;
    use crate::types::FanSensor;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Instant;

    fn render(latest: Option<&Snapshot>, history: &HistoryBuffer) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 60)).unwrap();
        terminal
            .draw(|f| {
                draw_dashboard(
                    f,
                    &DashboardFrame {
                        latest,
                        history,
                        theme: Theme::Dark,
                        procs_scroll: 0,
                    },
                )
            })
            .unwrap();
        let buf = terminal.backend().buffer();
        let mut out = String::new();
        for line in buf.content.chunks(buf.area.width as usize) {
            for cell in line {
                out.push_str(cell.symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn loading_until_first_snapshot() {
        let text = render(None, &HistoryBuffer::default());
        assert!(text.contains("Loading…"));
        assert!(!text.contains("Disks"));
    }

    #[test]
    fn temps_without_fans_renders_only_temperatures() {
        let s = snapshot(25.0);
        let mut h = HistoryBuffer::default();
        h.push(HistorySample::from_snapshot(&s, Instant::now()));
        let text = render(Some(&s), &h);
        assert!(text.contains("Temperatures"));
        assert!(!text.contains("Fans"));
        assert!(text.contains("Package id 0"));
        assert!(text.contains("sensor_1"));
        assert!(!text.contains("Loading"));
    }

    #[test]
    fn placeholders_for_missing_battery_and_load() {
        let mut s = snapshot(25.0);
        s.load_avg = None;
        let text = render(Some(&s), &HistoryBuffer::default());
        assert!(text.contains("No battery info"));
        assert!(text.contains("N/A"));
    }

    #[test]
    fn hidden_mounts_are_not_rendered() {
        let s = snapshot(25.0);
        let text = render(Some(&s), &HistoryBuffer::default());
        assert!(text.contains("/data"));
        assert!(!text.contains("/etc/hosts"));
    }

    #[test]
    fn both_sensor_sections_when_fans_present() {
        let mut s = snapshot(25.0);
        s.fans.insert(
            "thinkpad".into(),
            vec![FanSensor {
                label: Some("fan1".into()),
                current: 2400,
            }],
        );
        let text = render(Some(&s), &HistoryBuffer::default());
        assert!(text.contains("Temperatures"));
        assert!(text.contains("Fans"));
        assert!(text.contains("2400 RPM"));
    }

    #[test]
    fn lone_sensor_section_spans_full_width() {
        let s = snapshot(25.0);
        let full = Rect::new(0, 0, 140, 60);
        let v = SnapshotView::derive(&s);
        let slot = rows(full, sensors::sensors_height(&v))[2];
        assert_eq!(slot.width, full.width);
        assert!(v.sensors.full_width());
    }
}
