//! Colour swatch widget
//!
//! A block of solid colour with an optional label and an optional split
//! colour painted over its lower part. Swatches also act as drag sources and
//! drop targets for colours, addressed by slot index.

use crate::color::Color;
use crate::theme;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
    widgets::{Block, BorderType, Borders, Widget},
};

/// Swatch state; fields are reachable through accessors only
#[derive(Debug, Clone, PartialEq)]
pub struct Swatch {
    color: Color,
    text_color: Color,
    split_color: Color,
    split: bool,
    text: Option<String>,
    rounded: bool,
    h_center: bool,
    focused: bool,
}

impl Default for Swatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Swatch {
    pub fn new() -> Self {
        Self {
            color: Color::BLACK,
            text_color: Color::BLACK.contrasting(),
            split_color: Color::BLACK,
            split: false,
            text: None,
            rounded: false,
            h_center: false,
            focused: false,
        }
    }

    /// Replace the colour and label; the label colour follows the new colour
    pub fn set_color(&mut self, color: Color, text: Option<&str>) {
        self.color = color;
        self.text_color = color.contrasting();
        self.text = text.map(str::to_string);
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_split_color(&mut self, color: Color) {
        self.split_color = color;
    }

    pub fn split_color(&self) -> Color {
        self.split_color
    }

    pub fn enable_split(&mut self, enable: bool) {
        self.split = enable;
    }

    pub fn set_rounded(&mut self, rounded: bool) {
        self.rounded = rounded;
    }

    pub fn set_hcenter(&mut self, h_center: bool) {
        self.h_center = h_center;
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }
}

impl Widget for &Swatch {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_type = if self.focused {
            BorderType::Thick
        } else if self.rounded {
            BorderType::Rounded
        } else {
            BorderType::Plain
        };
        let border_color = if self.focused { theme::FG } else { theme::MUTED };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(Style::default().fg(border_color));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.is_empty() {
            return;
        }

        buf.set_style(inner, Style::default().bg(self.color.into()));

        if self.split {
            // Split edge starts at mid height and tilts down to the right
            let tilt = inner.height / 6;
            for dx in 0..inner.width {
                let drop = (u32::from(tilt) * u32::from(dx) / u32::from(inner.width.max(1))) as u16;
                let top = inner.y + inner.height / 2 + drop;
                for y in top..inner.bottom() {
                    if let Some(cell) = buf.cell_mut(Position::new(inner.x + dx, y)) {
                        cell.set_bg(self.split_color.into());
                    }
                }
            }
        }

        if let Some(text) = &self.text {
            let width = text.chars().count().min(usize::from(inner.width)) as u16;
            let x = if self.h_center {
                inner.x + (inner.width - width) / 2
            } else {
                inner.x
            };
            let y = inner.y + (inner.height.saturating_sub(1)) / 2;
            buf.set_stringn(
                x,
                y,
                text,
                usize::from(width),
                Style::default().fg(self.text_color.into()),
            );
        }
    }
}

/// Colour slots that can be dragged from and dropped onto
pub trait ColorSlots {
    /// Colour currently shown in `slot`, if the slot is visible
    fn slot_color(&self, slot: usize) -> Option<Color>;

    /// Accept a colour dropped onto `slot`
    fn drop_color(&mut self, slot: usize, color: Color);
}

/// A colour picked up from a slot and not yet dropped
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub source: usize,
    pub color: Color,
}

impl DragState {
    pub fn begin<S: ColorSlots + ?Sized>(slots: &S, source: usize) -> Option<Self> {
        slots
            .slot_color(source)
            .map(|color| DragState { source, color })
    }

    /// Drop onto `target`; returns false when nothing changed hands
    pub fn finish<S: ColorSlots + ?Sized>(self, slots: &mut S, target: usize) -> bool {
        if target == self.source || slots.slot_color(target).is_none() {
            return false;
        }
        slots.drop_color(target, self.color);
        true
    }
}

/// Index of the area containing the given terminal cell
pub fn hit_test(areas: &[Rect], column: u16, row: u16) -> Option<usize> {
    areas
        .iter()
        .position(|area| area.contains(Position::new(column, row)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(swatch: &Swatch, width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        swatch.render(area, &mut buf);
        buf
    }

    fn bg(buf: &Buffer, x: u16, y: u16) -> ratatui::style::Color {
        buf.cell(Position::new(x, y)).map(|c| c.bg).unwrap_or_default()
    }

    #[test]
    fn test_set_color_updates_text_colour() {
        let mut swatch = Swatch::new();
        swatch.set_color(Color::new(1.0, 1.0, 0.9), Some("#ffffe6"));
        assert_eq!(swatch.color(), Color::new(1.0, 1.0, 0.9));
        assert_eq!(swatch.text(), Some("#ffffe6"));
        assert_eq!(swatch.text_color, Color::BLACK);
    }

    #[test]
    fn test_render_fills_inner_area() {
        let mut swatch = Swatch::new();
        swatch.set_color(Color::from_rgb8(10, 20, 30), None);
        let buf = render(&swatch, 8, 5);
        assert_eq!(bg(&buf, 1, 1), ratatui::style::Color::Rgb(10, 20, 30));
        assert_eq!(bg(&buf, 6, 3), ratatui::style::Color::Rgb(10, 20, 30));
        // Border cells keep the default background
        assert_eq!(bg(&buf, 0, 0), ratatui::style::Color::Reset);
    }

    #[test]
    fn test_render_centers_label() {
        let mut swatch = Swatch::new();
        swatch.set_hcenter(true);
        swatch.set_color(Color::WHITE, Some("ab"));
        let buf = render(&swatch, 8, 5);
        // Inner area is x 1..7, so "ab" starts at column 3
        assert_eq!(buf.cell(Position::new(3, 2)).map(|c| c.symbol()), Some("a"));
        assert_eq!(buf.cell(Position::new(4, 2)).map(|c| c.symbol()), Some("b"));
    }

    #[test]
    fn test_render_split_paints_lower_part() {
        let mut swatch = Swatch::new();
        swatch.set_color(Color::WHITE, None);
        swatch.set_split_color(Color::BLACK);
        swatch.enable_split(true);
        let buf = render(&swatch, 10, 8);
        // Inner area is 8x6 starting at (1, 1); split starts at row 4
        assert_eq!(bg(&buf, 1, 1), ratatui::style::Color::Rgb(255, 255, 255));
        assert_eq!(bg(&buf, 1, 6), ratatui::style::Color::Rgb(0, 0, 0));
        assert_eq!(swatch.split_color(), Color::BLACK);
    }

    #[test]
    fn test_tiny_area_does_not_panic() {
        let mut swatch = Swatch::new();
        swatch.set_color(Color::WHITE, Some("a long label"));
        swatch.enable_split(true);
        render(&swatch, 2, 2);
        render(&swatch, 3, 3);
    }

    struct Slots(Vec<Color>);

    impl ColorSlots for Slots {
        fn slot_color(&self, slot: usize) -> Option<Color> {
            self.0.get(slot).copied()
        }

        fn drop_color(&mut self, slot: usize, color: Color) {
            self.0[slot] = color;
        }
    }

    #[test]
    fn test_drag_between_slots() {
        let mut slots = Slots(vec![Color::BLACK, Color::WHITE]);
        let drag = DragState::begin(&slots, 0).unwrap();
        assert!(drag.finish(&mut slots, 1));
        assert_eq!(slots.0, vec![Color::BLACK, Color::BLACK]);
    }

    #[test]
    fn test_drag_onto_self_or_missing_slot_is_ignored() {
        let mut slots = Slots(vec![Color::BLACK, Color::WHITE]);
        assert!(DragState::begin(&slots, 5).is_none());
        let drag = DragState::begin(&slots, 1).unwrap();
        assert!(!drag.finish(&mut slots, 1));
        assert!(!drag.finish(&mut slots, 9));
        assert_eq!(slots.0, vec![Color::BLACK, Color::WHITE]);
    }

    #[test]
    fn test_hit_test() {
        let areas = [Rect::new(0, 0, 5, 3), Rect::new(5, 0, 5, 3)];
        assert_eq!(hit_test(&areas, 2, 1), Some(0));
        assert_eq!(hit_test(&areas, 7, 2), Some(1));
        assert_eq!(hit_test(&areas, 7, 3), None);
    }
}
