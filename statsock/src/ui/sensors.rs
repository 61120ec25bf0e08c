//! Temperature and fan cards. Only drawn when the snapshot has the data;
//! a lone card takes the full row.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme::Palette;
use super::util::{bar, card, inner, truncate_middle};
use crate::view::{FanRow, SensorGroup, SensorLayout, SnapshotView, TempRow};

const MAX_HEIGHT: u16 = 12;

/// Rows needed to show every sensor, borders included, capped.
pub fn sensors_height(v: &SnapshotView) -> u16 {
    fn lines<R>(groups: &[SensorGroup<R>]) -> usize {
        groups.iter().map(|g| 1 + g.rows.len()).sum()
    }
    let needed = match v.sensors {
        SensorLayout::Hidden => return 0,
        SensorLayout::TempsOnly => lines(&v.temps),
        SensorLayout::FansOnly => lines(&v.fans),
        SensorLayout::Split => lines(&v.temps).max(lines(&v.fans)),
    };
    u16::try_from(needed)
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .min(MAX_HEIGHT)
}

pub fn draw_sensors(f: &mut ratatui::Frame<'_>, area: Rect, v: &SnapshotView, p: &Palette) {
    match v.sensors {
        SensorLayout::Hidden => {}
        SensorLayout::TempsOnly => draw_temps(f, area, &v.temps, p),
        SensorLayout::FansOnly => draw_fans(f, area, &v.fans, p),
        SensorLayout::Split => {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(area);
            draw_temps(f, cols[0], &v.temps, p);
            draw_fans(f, cols[1], &v.fans, p);
        }
    }
}

fn draw_temps(f: &mut ratatui::Frame<'_>, area: Rect, groups: &[SensorGroup<TempRow>], p: &Palette) {
    f.render_widget(card("Temperatures", p), area);
    let body = inner(area);
    let bar_w = (body.width as usize).saturating_sub(16 + 9 + 11 + 3).clamp(4, 30);

    let mut lines: Vec<Line> = Vec::new();
    for g in groups {
        lines.push(Line::from(Span::styled(g.chip.clone(), p.muted())));
        for r in &g.rows {
            let mut spans = vec![
                Span::raw(format!("{:<16}", truncate_middle(&r.label, 16))),
                Span::raw(format!("{:>9}", r.current)),
                Span::styled(
                    format!(" {:<10}", r.high.as_deref().unwrap_or("")),
                    p.muted(),
                ),
            ];
            spans.push(Span::styled(
                bar(r.fill, bar_w),
                Style::default().fg(p.level(r.fill)),
            ));
            lines.push(Line::from(spans));
        }
    }
    f.render_widget(Paragraph::new(lines), body);
}

fn draw_fans(f: &mut ratatui::Frame<'_>, area: Rect, groups: &[SensorGroup<FanRow>], p: &Palette) {
    f.render_widget(card("Fans", p), area);
    let mut lines: Vec<Line> = Vec::new();
    for g in groups {
        lines.push(Line::from(Span::styled(g.chip.clone(), p.muted())));
        for r in &g.rows {
            lines.push(Line::from(vec![
                Span::raw(format!("{:<16}", truncate_middle(&r.label, 16))),
                Span::styled(r.rpm.clone(), Style::default().fg(p.fg)),
            ]));
        }
    }
    f.render_widget(Paragraph::new(lines), inner(area));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::snapshot;
    use crate::types::TempSensor;

    fn height_with_rows(n: usize) -> u16 {
        let mut s = snapshot(1.0);
        let row = TempSensor {
            label: None,
            current: 40.0,
            high: None,
            critical: None,
        };
        s.temps.clear();
        s.temps.insert("chip".into(), vec![row; n]);
        sensors_height(&SnapshotView::derive(&s))
    }

    #[test]
    fn height_counts_chip_header_and_borders() {
        assert_eq!(height_with_rows(3), 6);
    }

    #[test]
    fn height_stays_capped_for_huge_sensor_lists() {
        // chip header + 65535 rows is one past u16::MAX
        assert_eq!(height_with_rows(65_535), MAX_HEIGHT);
    }
}
