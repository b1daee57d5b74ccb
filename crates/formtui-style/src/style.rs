#![forbid(unsafe_code)]

//! The `Style` overlay type.

use formtui_render::cell::{Rgba, StyleFlags};

/// A partial style: unset components leave the target untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color override.
    pub fg: Option<Rgba>,
    /// Background color override.
    pub bg: Option<Rgba>,
    /// Attribute flag override.
    pub attrs: Option<StyleFlags>,
}

impl Style {
    /// Create an empty style (no overrides).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: None,
        }
    }

    /// Set the foreground color (builder).
    #[must_use]
    pub const fn fg(mut self, color: Rgba) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color (builder).
    #[must_use]
    pub const fn bg(mut self, color: Rgba) -> Self {
        self.bg = Some(color);
        self
    }

    /// Set attribute flags (builder), replacing any previous flags.
    #[must_use]
    pub const fn attrs(mut self, flags: StyleFlags) -> Self {
        self.attrs = Some(flags);
        self
    }

    /// Add the bold attribute (builder).
    #[must_use]
    pub fn bold(self) -> Self {
        self.with_flag(StyleFlags::BOLD)
    }

    /// Add the dim attribute (builder).
    #[must_use]
    pub fn dim(self) -> Self {
        self.with_flag(StyleFlags::DIM)
    }

    /// Add the underline attribute (builder).
    #[must_use]
    pub fn underline(self) -> Self {
        self.with_flag(StyleFlags::UNDERLINE)
    }

    /// Add the reverse-video attribute (builder).
    #[must_use]
    pub fn reverse(self) -> Self {
        self.with_flag(StyleFlags::REVERSE)
    }

    fn with_flag(mut self, flag: StyleFlags) -> Self {
        self.attrs = Some(self.attrs.unwrap_or_else(StyleFlags::empty) | flag);
        self
    }

    /// Whether no component is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attrs.is_none()
    }

    /// Overlay `self` on top of `base`: components set in `self` win,
    /// unset components fall through to `base`.
    #[must_use]
    pub fn merge(&self, base: &Style) -> Style {
        Style {
            fg: self.fg.or(base.fg),
            bg: self.bg.or(base.bg),
            attrs: match (self.attrs, base.attrs) {
                (Some(a), Some(b)) => Some(a | b),
                (a, b) => a.or(b),
            },
        }
    }
}
