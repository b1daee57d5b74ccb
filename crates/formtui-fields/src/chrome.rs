#![forbid(unsafe_code)]

//! Shared field presentation: label, required marker, and the single-slot
//! footer (error, helper text, or success affirmation).
//!
//! `FieldChrome` owns no validation logic. Field variants resolve what to
//! display (caller-supplied overrides versus locally computed outcomes)
//! and hand the result here; the chrome only enforces the presentation
//! contract: the footer shows **at most one** of error, helper text, or
//! success, with error taking priority over helper text and helper text
//! over success.
//!
//! The footer row is always reserved in the layout so a validation message
//! appearing or disappearing never reflows the wrapped control.

use formtui_core::geometry::{Rect, Sides};
use formtui_render::buffer::Buffer;
use formtui_style::{FieldTheme, Style};

use crate::{Widget, draw_text_span};

/// Marker appended to the label of a required field.
pub const REQUIRED_MARKER: &str = " *";

/// Icon prefixed to footer error messages.
pub const ERROR_ICON: &str = "⚠";

/// Footer affirmation shown when a field is in the success state.
pub const SUCCESS_AFFIRMATION: &str = "✓ Looks good";

/// Suffix of the derived helper-text id.
const HELPER_ID_SUFFIX: &str = "-helper-text";

/// What the footer slot displays. At most one variant is ever shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Footer<'a> {
    /// An error message (highest priority).
    Error(&'a str),
    /// Helper text (shown only when no error is present).
    Helper(&'a str),
    /// The success affirmation (shown only when neither of the above is).
    Success,
    /// Nothing to show.
    Empty,
}

/// Association metadata for assistive consumers.
///
/// The terminal analogue of label/description wiring: the control is
/// identified by `control_id`, described by the helper-text id when a
/// footer message is present, and flagged invalid while an error shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSemantics {
    /// The field's stable id.
    pub control_id: String,
    /// Id of the footer message describing the control, when one shows.
    pub described_by: Option<String>,
    /// True while an error is displayed.
    pub invalid: bool,
}

/// Uniform layout and state-driven styling for any field.
#[derive(Debug, Clone)]
pub struct FieldChrome {
    id: String,
    label: Option<String>,
    helper_text: Option<String>,
    error: Option<String>,
    required: bool,
    success: bool,
    disabled: bool,
    theme: FieldTheme,
}

impl FieldChrome {
    /// Create chrome for the field with the given stable id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            helper_text: None,
            error: None,
            required: false,
            success: false,
            disabled: false,
            theme: FieldTheme::default(),
        }
    }

    /// Set the label (builder).
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the helper text (builder).
    #[must_use]
    pub fn helper_text(mut self, text: impl Into<String>) -> Self {
        self.helper_text = Some(text.into());
        self
    }

    /// Set the displayed error (builder).
    #[must_use]
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    /// Set or clear the displayed error from an option (builder).
    #[must_use]
    pub fn error_opt(mut self, message: Option<String>) -> Self {
        self.error = message;
        self
    }

    /// Mark the field required (builder).
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Mark the field successful (builder).
    #[must_use]
    pub fn success(mut self, success: bool) -> Self {
        self.success = success;
        self
    }

    /// Mark the field disabled (builder).
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the theme (builder).
    #[must_use]
    pub fn theme(mut self, theme: FieldTheme) -> Self {
        self.theme = theme;
        self
    }

    /// The field's id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The derived id of the footer message, `{id}-helper-text`.
    #[must_use]
    pub fn helper_id(&self) -> String {
        format!("{}{}", self.id, HELPER_ID_SUFFIX)
    }

    /// Resolve the footer slot: error > helper text > success.
    #[must_use]
    pub fn footer(&self) -> Footer<'_> {
        if let Some(error) = &self.error {
            Footer::Error(error)
        } else if let Some(helper) = &self.helper_text {
            Footer::Helper(helper)
        } else if self.success {
            Footer::Success
        } else {
            Footer::Empty
        }
    }

    /// Association metadata for the wrapped control.
    #[must_use]
    pub fn semantics(&self) -> FieldSemantics {
        let described_by = match self.footer() {
            Footer::Error(_) | Footer::Helper(_) => Some(self.helper_id()),
            Footer::Success | Footer::Empty => None,
        };
        FieldSemantics {
            control_id: self.id.clone(),
            described_by,
            invalid: self.error.is_some(),
        }
    }

    /// The content area left for the wrapped control: the given area minus
    /// the label row (when a label is set) and the always-reserved footer
    /// row.
    #[must_use]
    pub fn inner(&self, area: Rect) -> Rect {
        area.inner(Sides {
            top: u16::from(self.label.is_some()),
            right: 0,
            bottom: 1,
            left: 0,
        })
    }

    fn dim_if_disabled(&self, style: Style) -> Style {
        if self.disabled {
            self.theme.disabled.merge(&style)
        } else {
            style
        }
    }
}

impl Widget for FieldChrome {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        // Label row.
        if let Some(label) = &self.label {
            let style = self.dim_if_disabled(self.theme.label);
            let end = draw_text_span(buf, area.x, area.y, label, style, area.right());
            if self.required {
                let marker = self.dim_if_disabled(self.theme.required_marker);
                draw_text_span(buf, end, area.y, REQUIRED_MARKER, marker, area.right());
            }
        }

        // Footer row (last row of the area).
        let footer_y = area.bottom() - 1;
        let needs_footer_row = area.height > u16::from(self.label.is_some());
        if !needs_footer_row {
            return;
        }
        match self.footer() {
            Footer::Error(message) => {
                let style = self.dim_if_disabled(self.theme.error);
                let end = draw_text_span(buf, area.x, footer_y, ERROR_ICON, style, area.right());
                let end = draw_text_span(buf, end, footer_y, " ", style, area.right());
                draw_text_span(buf, end, footer_y, message, style, area.right());
            }
            Footer::Helper(text) => {
                let style = self.dim_if_disabled(self.theme.helper);
                draw_text_span(buf, area.x, footer_y, text, style, area.right());
            }
            Footer::Success => {
                let style = self.dim_if_disabled(self.theme.success);
                draw_text_span(buf, area.x, footer_y, SUCCESS_AFFIRMATION, style, area.right());
            }
            Footer::Empty => {}
        }
    }
}
