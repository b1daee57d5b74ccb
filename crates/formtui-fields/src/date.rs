#![forbid(unsafe_code)]

//! Single date selection as an ISO `YYYY-MM-DD` value.
//!
//! The date field validates on blur only: a parseable value marks the
//! field successful, a non-empty unparseable value sets the local error
//! `"Enter a valid date"`, and an empty value sets neither. Range bounds
//! (`min_date`/`max_date`) are rendering hints passed through to the user;
//! they are not independently re-validated here — enforcing them is the
//! caller's decision, typically via the caller-supplied `error`.

use chrono::NaiveDate;
use formtui_core::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use formtui_core::geometry::Rect;
use formtui_render::buffer::Buffer;
use formtui_render::cell::{Cell, StyleFlags};
use formtui_style::FieldTheme;

use crate::chrome::FieldChrome;
use crate::validate::ValidationOutcome;
use crate::{StatefulWidget, Widget, apply_style, draw_text_span};

/// The wire format of the value.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Error shown when a non-empty value fails to parse on blur.
pub const PARSE_ERROR: &str = "Enter a valid date";

/// Placeholder shown while the value is empty.
const DATE_PLACEHOLDER: &str = "YYYY-MM-DD";

/// Indicator drawn at the right edge of the value row in the success state.
const SUCCESS_INDICATOR: char = '✓';

/// An ISO date value is at most ten characters.
const MAX_VALUE_LEN: usize = 10;

/// Configuration for a date field.
#[derive(Debug, Clone)]
pub struct DateInput {
    id: String,
    label: Option<String>,
    helper_text: Option<String>,
    error: Option<String>,
    required: bool,
    disabled: bool,
    focused: bool,
    min_date: Option<NaiveDate>,
    max_date: Option<NaiveDate>,
    theme: FieldTheme,
}

impl DateInput {
    /// Create a date field config with the given stable id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            helper_text: None,
            error: None,
            required: false,
            disabled: false,
            focused: false,
            min_date: None,
            max_date: None,
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

    /// Force an error from the caller, overriding local validation (builder).
    #[must_use]
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    /// Set or clear the caller-forced error from an option (builder).
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

    /// Mark the field disabled: all events are ignored (builder).
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set whether the field has keyboard focus (builder).
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Inclusive lower bound hint (builder).
    #[must_use]
    pub fn min_date(mut self, date: NaiveDate) -> Self {
        self.min_date = Some(date);
        self
    }

    /// Inclusive upper bound hint (builder).
    #[must_use]
    pub fn max_date(mut self, date: NaiveDate) -> Self {
        self.max_date = Some(date);
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

    /// The error to display: the caller-forced error wins.
    #[must_use]
    pub fn resolved_error<'a>(&'a self, state: &'a DateInputState) -> Option<&'a str> {
        self.error.as_deref().or(state.outcome.error.as_deref())
    }

    /// Whether to display the success state.
    #[must_use]
    pub fn resolved_success(&self, state: &DateInputState) -> bool {
        state.outcome.valid && self.resolved_error(state).is_none()
    }

    fn chrome(&self, state: &DateInputState) -> FieldChrome {
        let mut chrome = FieldChrome::new(self.id.clone())
            .error_opt(self.resolved_error(state).map(str::to_string))
            .success(self.resolved_success(state))
            .required(self.required)
            .disabled(self.disabled)
            .theme(self.theme.clone());
        if let Some(label) = &self.label {
            chrome = chrome.label(label.clone());
        }
        if let Some(helper) = &self.helper_text {
            chrome = chrome.helper_text(helper.clone());
        }
        chrome
    }

    /// Association metadata for assistive consumers.
    #[must_use]
    pub fn semantics(&self, state: &DateInputState) -> crate::FieldSemantics {
        self.chrome(state).semantics()
    }

    /// Handle a terminal event. Returns `true` if the state changed.
    pub fn handle_event(&self, event: &Event, state: &mut DateInputState) -> bool {
        if self.disabled {
            return false;
        }
        match event {
            Event::Key(key)
                if key.kind == KeyEventKind::Press || key.kind == KeyEventKind::Repeat =>
            {
                handle_key(key, state)
            }
            Event::Focus(false) => {
                self.blur(state);
                true
            }
            _ => false,
        }
    }

    /// Mark the field touched and run the parse validation.
    pub fn blur(&self, state: &mut DateInputState) {
        state.touched = true;
        state.outcome = if state.value.is_empty() {
            ValidationOutcome::unset()
        } else if state.parsed().is_some() {
            ValidationOutcome::pass()
        } else {
            ValidationOutcome::fail(PARSE_ERROR)
        };
    }

    fn bounds_hint(&self) -> Option<String> {
        match (self.min_date, self.max_date) {
            (Some(min), Some(max)) => Some(format!("{min}..{max}")),
            (Some(min), None) => Some(format!("from {min}")),
            (None, Some(max)) => Some(format!("until {max}")),
            (None, None) => None,
        }
    }
}

fn handle_key(key: &KeyEvent, state: &mut DateInputState) -> bool {
    match key.code {
        // Dates are digits and dashes; everything else is dropped.
        KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
            if state.value.len() >= MAX_VALUE_LEN {
                return false;
            }
            state.value.insert(state.cursor, c);
            state.cursor += 1;
            true
        }
        KeyCode::Backspace => {
            if state.cursor == 0 {
                return false;
            }
            state.cursor -= 1;
            state.value.remove(state.cursor);
            true
        }
        KeyCode::Delete => {
            if state.cursor >= state.value.len() {
                return false;
            }
            state.value.remove(state.cursor);
            true
        }
        KeyCode::Left => {
            if state.cursor > 0 {
                state.cursor -= 1;
            }
            true
        }
        KeyCode::Right => {
            if state.cursor < state.value.len() {
                state.cursor += 1;
            }
            true
        }
        KeyCode::Home => {
            state.cursor = 0;
            true
        }
        KeyCode::End => {
            state.cursor = state.value.len();
            true
        }
        _ => false,
    }
}

/// Application-owned state for a [`DateInput`].
#[derive(Debug, Clone, Default)]
pub struct DateInputState {
    /// The raw ISO value. Always ASCII (digits and dashes).
    value: String,
    /// Cursor position (byte index, which equals the character index).
    cursor: usize,
    /// Whether the field has been blurred at least once.
    touched: bool,
    /// The most recent parse outcome.
    outcome: ValidationOutcome,
}

impl DateInputState {
    /// Create empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state with an initial ISO value, cursor at the end.
    #[must_use]
    pub fn with_value(value: impl Into<String>) -> Self {
        let value: String = value.into();
        let cursor = value.len();
        Self {
            value,
            cursor,
            ..Self::default()
        }
    }

    /// Get the raw value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value, clamping the cursor. Does not validate.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.cursor.min(self.value.len());
    }

    /// Whether the field has been blurred at least once.
    #[must_use]
    pub fn touched(&self) -> bool {
        self.touched
    }

    /// The most recent parse outcome.
    #[must_use]
    pub fn outcome(&self) -> &ValidationOutcome {
        &self.outcome
    }

    /// Parse the current value, if it is a well-formed date.
    #[must_use]
    pub fn parsed(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.value, DATE_FORMAT).ok()
    }
}

impl StatefulWidget for DateInput {
    type State = DateInputState;

    fn render(&self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.is_empty() {
            return;
        }

        let chrome = self.chrome(state);
        chrome.render(area, buf);

        let inner = chrome.inner(area);
        if inner.is_empty() {
            return;
        }
        let mut row = inner.rows(0, 1);

        let accent = if self.resolved_error(state).is_some() {
            Some(self.theme.error)
        } else if self.resolved_success(state) {
            Some(self.theme.success)
        } else {
            None
        };

        if self.resolved_success(state) && row.width >= 2 {
            let mut cell = Cell::from_char(SUCCESS_INDICATOR);
            apply_style(&mut cell, self.theme.success);
            buf.set(row.right() - 1, row.y, cell);
            row.width -= 2;
        }

        let value_style = if self.disabled {
            self.theme.disabled.merge(&self.theme.value)
        } else {
            accent.unwrap_or_default().merge(&self.theme.value)
        };

        if state.value.is_empty() {
            draw_text_span(
                buf,
                row.x,
                row.y,
                DATE_PLACEHOLDER,
                self.theme.placeholder,
                row.right(),
            );
            // Right-aligned bounds hint, only when it fits beside the
            // placeholder.
            if let Some(hint) = self.bounds_hint() {
                let needed = hint.len() as u16;
                let after_placeholder = row.x + DATE_PLACEHOLDER.len() as u16 + 1;
                if row.width > needed && row.right() - needed >= after_placeholder {
                    draw_text_span(
                        buf,
                        row.right() - needed,
                        row.y,
                        &hint,
                        self.theme.placeholder,
                        row.right(),
                    );
                }
            }
        } else {
            draw_text_span(buf, row.x, row.y, &state.value, value_style, row.right());
        }

        if self.focused && !self.disabled && row.width > 0 {
            let cursor_x = row.x + (state.cursor as u16).min(row.width - 1);
            if let Some(cell) = buf.get_mut(cursor_x, row.y) {
                cell.flags ^= StyleFlags::REVERSE;
            }
        }
    }
}
