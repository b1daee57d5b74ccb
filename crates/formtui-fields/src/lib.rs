#![forbid(unsafe_code)]

//! Validated form-field widgets.
//!
//! Every field variant is split into a stateless config struct (built with
//! builder methods each render) and an application-owned state struct, so
//! the application stays the source of truth for every value — widgets
//! never keep a hidden copy. Shared presentation (label, helper text,
//! error, success) lives in [`chrome::FieldChrome`]; the variants wrap it:
//!
//! - [`text::TextInput`] — single-line entry with synchronous validation
//!   and touched-state gating.
//! - [`select::SelectInput`] — single choice over a fixed option list.
//! - [`date::DateInput`] — ISO date entry with parse validation.
//! - [`file::FileInput`] — drag-and-drop / browse file intake with
//!   per-file constraint checks.
//!
//! Displayed error and success are derived fresh on every render from the
//! caller-supplied overrides and the locally computed outcome; a
//! caller-supplied error always wins, and error and success are never
//! shown together.

pub mod chrome;
pub mod date;
pub mod file;
pub mod select;
pub mod text;
pub mod validate;

pub use chrome::{FieldChrome, FieldSemantics, Footer};
pub use date::{DateInput, DateInputState};
pub use file::{DragPhase, FileInput, FileInputState, FileSelection, IntakeReport, format_file_size};
pub use select::{SelectInput, SelectInputState, SelectOption};
pub use text::{TextInput, TextInputState};
pub use validate::{ValidationOutcome, ValidationRules};

use formtui_core::geometry::Rect;
use formtui_render::buffer::Buffer;
use formtui_render::cell::Cell;
use formtui_style::Style;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// A `Widget` is a renderable component.
///
/// Widgets render themselves into a `Buffer` within a given `Rect`.
pub trait Widget {
    /// Render the widget into the buffer at the given area.
    fn render(&self, area: Rect, buf: &mut Buffer);
}

/// A `StatefulWidget` renders from config plus application-owned state.
pub trait StatefulWidget {
    type State;

    /// Render the widget into the buffer with mutable state.
    fn render(&self, area: Rect, buf: &mut Buffer, state: &mut Self::State);
}

/// Visual variant of a field's value area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Transparent value area with accent coloring only.
    #[default]
    Outlined,
    /// Value area drawn over the theme's filled background.
    Filled,
}

/// Which side of the value area a decorative icon occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconPosition {
    #[default]
    Left,
    Right,
}

/// Helper to apply a style overlay to a cell.
pub(crate) fn apply_style(cell: &mut Cell, style: Style) {
    if let Some(fg) = style.fg {
        cell.fg = fg;
    }
    if let Some(bg) = style.bg {
        cell.bg = bg;
    }
    if let Some(attrs) = style.attrs {
        cell.flags |= attrs;
    }
}

/// Apply a style to all cells in a rectangular area, preserving content.
pub(crate) fn set_style_area(buf: &mut Buffer, area: Rect, style: Style) {
    if style.is_empty() {
        return;
    }
    for y in area.y..area.bottom() {
        for x in area.x..area.right() {
            if let Some(cell) = buf.get_mut(x, y) {
                apply_style(cell, style);
            }
        }
    }
}

/// Draw a text span into a buffer at the given position.
///
/// Returns the x position after the last drawn character.
/// Stops at `max_x` (exclusive).
pub(crate) fn draw_text_span(
    buf: &mut Buffer,
    mut x: u16,
    y: u16,
    content: &str,
    style: Style,
    max_x: u16,
) -> u16 {
    for grapheme in content.graphemes(true) {
        if x >= max_x {
            break;
        }
        let w = UnicodeWidthStr::width(grapheme);
        if w == 0 {
            continue;
        }
        if x + w as u16 > max_x {
            break;
        }
        if let Some(c) = grapheme.chars().next() {
            let mut cell = Cell::from_char(c);
            apply_style(&mut cell, style);
            buf.set(x, y, cell);
        }
        x = x.saturating_add(w as u16);
    }
    x
}

#[cfg(test)]
pub(crate) mod test_util {
    use formtui_render::buffer::Buffer;

    /// Flatten a buffer into one string per row for assertions.
    pub fn buf_to_lines(buf: &Buffer) -> Vec<String> {
        let mut lines = Vec::new();
        for y in 0..buf.height() {
            let mut row = String::with_capacity(buf.width() as usize);
            for x in 0..buf.width() {
                row.push(buf.get(x, y).map(|c| c.ch).unwrap_or(' '));
            }
            lines.push(row);
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formtui_render::cell::Rgba;

    #[test]
    fn apply_style_sets_fg() {
        let mut cell = Cell::default();
        apply_style(&mut cell, Style::new().fg(Rgba::rgb(255, 0, 0)));
        assert_eq!(cell.fg, Rgba::rgb(255, 0, 0));
    }

    #[test]
    fn apply_style_preserves_content() {
        let mut cell = Cell::from_char('Z');
        apply_style(&mut cell, Style::new().fg(Rgba::rgb(1, 2, 3)));
        assert_eq!(cell.ch, 'Z');
    }

    #[test]
    fn set_style_area_applies_to_all_cells() {
        let mut buf = Buffer::new(3, 2);
        set_style_area(
            &mut buf,
            Rect::new(0, 0, 3, 2),
            Style::new().bg(Rgba::rgb(10, 20, 30)),
        );
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(buf.get(x, y).unwrap().bg, Rgba::rgb(10, 20, 30));
            }
        }
    }

    #[test]
    fn draw_text_span_basic() {
        let mut buf = Buffer::new(10, 1);
        let end_x = draw_text_span(&mut buf, 0, 0, "ABC", Style::default(), 10);
        assert_eq!(end_x, 3);
        assert_eq!(buf.get(0, 0).unwrap().ch, 'A');
        assert_eq!(buf.get(2, 0).unwrap().ch, 'C');
    }

    #[test]
    fn draw_text_span_clipped_at_max_x() {
        let mut buf = Buffer::new(10, 1);
        let end_x = draw_text_span(&mut buf, 0, 0, "ABCDEF", Style::default(), 3);
        assert_eq!(end_x, 3);
        assert!(buf.get(3, 0).unwrap().is_empty());
    }
}
