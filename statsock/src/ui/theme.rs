//! Colors for the light and dark themes.

use ratatui::style::{Color, Modifier, Style};

use crate::theme::Theme;

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub border: Color,
    pub accent: Color,
    pub cpu: Color,
    pub ram: Color,
    pub ok: Color,
    pub warn: Color,
    pub crit: Color,
}

pub const LIGHT: Palette = Palette {
    bg: Color::Rgb(250, 250, 250),
    fg: Color::Rgb(24, 24, 27),
    muted: Color::Rgb(113, 113, 122),
    border: Color::Rgb(212, 212, 216),
    accent: Color::Rgb(37, 99, 235),
    cpu: Color::Rgb(37, 99, 235),
    ram: Color::Rgb(147, 51, 234),
    ok: Color::Rgb(22, 163, 74),
    warn: Color::Rgb(202, 138, 4),
    crit: Color::Rgb(220, 38, 38),
};

pub const DARK: Palette = Palette {
    bg: Color::Rgb(18, 18, 24),
    fg: Color::Rgb(228, 228, 231),
    muted: Color::Rgb(161, 161, 170),
    border: Color::Rgb(63, 63, 70),
    accent: Color::Cyan,
    cpu: Color::Cyan,
    ram: Color::Magenta,
    ok: Color::Green,
    warn: Color::Yellow,
    crit: Color::Red,
};

impl Palette {
    pub fn for_theme(theme: Theme) -> &'static Palette {
        match theme {
            Theme::Light => &LIGHT,
            Theme::Dark => &DARK,
        }
    }

    pub fn base(&self) -> Style {
        Style::default().bg(self.bg).fg(self.fg)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.fg).add_modifier(Modifier::BOLD)
    }

    /// Green under 70%, yellow under 90%, red above.
    pub fn level(&self, pct: f64) -> Color {
        if pct < 70.0 {
            self.ok
        } else if pct < 90.0 {
            self.warn
        } else {
            self.crit
        }
    }
}
