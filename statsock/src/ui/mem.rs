//! Memory and swap cards.

use ratatui::layout::Rect;

use super::cpu::draw_usage_card;
use super::theme::Palette;
use crate::view::UsageCard;

pub fn draw_mem(f: &mut ratatui::Frame<'_>, area: Rect, c: &UsageCard, p: &Palette) {
    draw_usage_card(f, area, "Memory", c, p);
}

pub fn draw_swap(f: &mut ratatui::Frame<'_>, area: Rect, c: &UsageCard, p: &Palette) {
    draw_usage_card(f, area, "Swap", c, p);
}
