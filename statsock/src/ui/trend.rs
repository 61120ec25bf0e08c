//! CPU / RAM trend chart over the rolling history.

use ratatui::{
    layout::Rect,
    style::Style,
    symbols,
    text::Span,
    widgets::{Axis, Chart, Dataset, GraphType},
};

use super::theme::Palette;
use super::util::card;
use crate::history::HistoryBuffer;

/// Chart points in buffer order: x is the sample's position, not its time.
pub fn series(history: &HistoryBuffer) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    history
        .samples()
        .enumerate()
        .map(|(i, s)| ((i as f64, s.cpu), (i as f64, s.ram)))
        .unzip()
}

/// Age of the oldest sample relative to the newest, e.g. `-59s`.
fn span_label(history: &HistoryBuffer) -> String {
    let mut it = history.samples();
    match (it.next(), history.latest()) {
        (Some(first), Some(last)) => {
            format!("-{}s", last.t.saturating_duration_since(first.t).as_secs())
        }
        _ => "-0s".into(),
    }
}

pub fn draw_trend(f: &mut ratatui::Frame<'_>, area: Rect, history: &HistoryBuffer, p: &Palette) {
    let (cpu, ram) = series(history);
    let x_max = (history.capacity().saturating_sub(1)).max(1) as f64;

    let datasets = vec![
        Dataset::default()
            .name("CPU %")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(p.cpu))
            .data(&cpu),
        Dataset::default()
            .name("RAM %")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(p.ram))
            .data(&ram),
    ];

    let chart = Chart::new(datasets)
        .block(card("CPU / RAM Trend", p))
        .x_axis(
            Axis::default()
                .style(p.muted())
                .bounds([0.0, x_max])
                .labels(vec![
                    Span::raw(span_label(history)),
                    Span::raw("now"),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(p.muted())
                .bounds([0.0, 100.0])
                .labels(vec![Span::raw("0"), Span::raw("50"), Span::raw("100")]),
        );
    f.render_widget(chart, area);
}
