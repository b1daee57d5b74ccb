#![forbid(unsafe_code)]

//! The shared field theme.
//!
//! Every field variant draws its chrome (label, helper, error, success)
//! and value area from one [`FieldTheme`], so an application restyles the
//! whole form surface by swapping a single value.

use crate::style::Style;
use formtui_render::cell::Rgba;

/// Default error accent (red).
pub const ERROR_FG_DEFAULT: Rgba = Rgba::rgb(220, 60, 60);

/// Default success accent (green).
pub const SUCCESS_FG_DEFAULT: Rgba = Rgba::rgb(60, 170, 90);

/// Default helper-text accent (gray).
pub const HELPER_FG_DEFAULT: Rgba = Rgba::rgb(140, 140, 140);

/// Default placeholder accent (dim gray).
pub const PLACEHOLDER_FG_DEFAULT: Rgba = Rgba::rgb(110, 110, 110);

/// Default filled-variant background.
pub const FILLED_BG_DEFAULT: Rgba = Rgba::rgb(36, 36, 42);

/// Default drag-active accent (blue).
pub const DRAG_FG_DEFAULT: Rgba = Rgba::rgb(90, 140, 240);

/// Styles shared by all field variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTheme {
    /// Field label row.
    pub label: Style,
    /// Required-marker appended to the label.
    pub required_marker: Style,
    /// Helper text in the footer.
    pub helper: Style,
    /// Error text in the footer and error-accented value borders.
    pub error: Style,
    /// Success affirmation in the footer.
    pub success: Style,
    /// Placeholder text inside an empty value area.
    pub placeholder: Style,
    /// The value area itself.
    pub value: Style,
    /// Value area background for the filled variant.
    pub filled: Style,
    /// Disabled fields (applied over the value area).
    pub disabled: Style,
    /// Dropzone accent while a drag hovers over it.
    pub drag_active: Style,
}

impl Default for FieldTheme {
    fn default() -> Self {
        Self {
            label: Style::new().bold(),
            required_marker: Style::new().fg(ERROR_FG_DEFAULT),
            helper: Style::new().fg(HELPER_FG_DEFAULT),
            error: Style::new().fg(ERROR_FG_DEFAULT),
            success: Style::new().fg(SUCCESS_FG_DEFAULT),
            placeholder: Style::new().fg(PLACEHOLDER_FG_DEFAULT),
            value: Style::new(),
            filled: Style::new().bg(FILLED_BG_DEFAULT),
            disabled: Style::new().dim(),
            drag_active: Style::new().fg(DRAG_FG_DEFAULT).bold(),
        }
    }
}

impl FieldTheme {
    /// Create the default theme.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_accents_are_distinct() {
        let theme = FieldTheme::new();
        assert_ne!(theme.error.fg, theme.success.fg);
        assert_ne!(theme.error.fg, theme.helper.fg);
    }

    #[test]
    fn error_accent_is_red_leaning() {
        let c = ERROR_FG_DEFAULT;
        assert!(c.r() > c.g() && c.r() > c.b());
    }

    #[test]
    fn success_accent_is_green_leaning() {
        let c = SUCCESS_FG_DEFAULT;
        assert!(c.g() > c.r() && c.g() > c.b());
    }
}
