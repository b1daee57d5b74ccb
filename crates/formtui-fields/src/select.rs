#![forbid(unsafe_code)]

//! Single-choice dropdown over a fixed option list.
//!
//! Unlike the text field, the select never synthesizes its own "required"
//! error: whether an empty value is acceptable depends on option semantics
//! the widget cannot infer, so it defers entirely to a caller-supplied
//! error. That asymmetry is deliberate.
//!
//! Option values are expected to be unique within the list; this is a
//! caller precondition and is not enforced.

use formtui_core::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use formtui_core::geometry::Rect;
use formtui_render::buffer::Buffer;
use formtui_style::{FieldTheme, Style};

use crate::chrome::FieldChrome;
use crate::{StatefulWidget, Variant, Widget, draw_text_span, set_style_area};

/// Indicator drawn at the right edge of the closed value row.
const DROPDOWN_INDICATOR: char = '▾';

/// One entry in a select's option list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// The value reported on selection.
    pub value: String,
    /// The label shown to the user.
    pub label: String,
    /// Disabled options are highlightable but cannot be selected.
    pub disabled: bool,
}

impl SelectOption {
    /// Create an enabled option.
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }

    /// Mark the option disabled (builder).
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Configuration for a single-choice dropdown.
#[derive(Debug, Clone)]
pub struct SelectInput {
    id: String,
    label: Option<String>,
    helper_text: Option<String>,
    error: Option<String>,
    required: bool,
    disabled: bool,
    focused: bool,
    placeholder: Option<String>,
    options: Vec<SelectOption>,
    variant: Variant,
    theme: FieldTheme,
}

impl SelectInput {
    /// Create a select config with the given stable id and options.
    #[must_use]
    pub fn new(id: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self {
            id: id.into(),
            label: None,
            helper_text: None,
            error: None,
            required: false,
            disabled: false,
            focused: false,
            placeholder: None,
            options,
            variant: Variant::Outlined,
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

    /// Set the caller-supplied error (builder).
    #[must_use]
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    /// Set or clear the caller-supplied error from an option (builder).
    #[must_use]
    pub fn error_opt(mut self, message: Option<String>) -> Self {
        self.error = message;
        self
    }

    /// Mark the field required. The placeholder sentinel then becomes
    /// non-selectable (builder).
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

    /// Set the placeholder shown while nothing is selected (builder).
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Set the visual variant (builder).
    #[must_use]
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
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

    /// The option list.
    #[must_use]
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// The error to display. The select has no local validation, so this
    /// is the caller-supplied error or nothing.
    #[must_use]
    pub fn resolved_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn chrome(&self) -> FieldChrome {
        let mut chrome = FieldChrome::new(self.id.clone())
            .error_opt(self.error.clone())
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
    pub fn semantics(&self) -> crate::FieldSemantics {
        self.chrome().semantics()
    }

    /// The label displayed in the closed value row for the current state.
    #[must_use]
    pub fn selected_label<'a>(&'a self, state: &SelectInputState) -> Option<&'a str> {
        let value = state.value.as_deref()?;
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
    }

    /// Rows of the option popup, placeholder sentinel first.
    ///
    /// The sentinel is selectable (clears the value) unless the field is
    /// required, in which case it is a disabled row.
    fn popup_rows(&self) -> Vec<PopupRow<'_>> {
        let mut rows = Vec::with_capacity(self.options.len() + 1);
        if let Some(placeholder) = &self.placeholder {
            rows.push(PopupRow {
                label: placeholder,
                value: None,
                disabled: self.required,
            });
        }
        for option in &self.options {
            rows.push(PopupRow {
                label: &option.label,
                value: Some(&option.value),
                disabled: option.disabled,
            });
        }
        rows
    }

    // --- Event handling ---

    /// Handle a terminal event. Returns `true` if the state changed.
    pub fn handle_event(&self, event: &Event, state: &mut SelectInputState) -> bool {
        if self.disabled {
            return false;
        }
        match event {
            Event::Key(key)
                if key.kind == KeyEventKind::Press || key.kind == KeyEventKind::Repeat =>
            {
                self.handle_key(key, state)
            }
            Event::Focus(false) => {
                self.blur(state);
                true
            }
            _ => false,
        }
    }

    /// Close the popup. The select does not validate on blur; a required
    /// field with an empty value is the caller's to report via `error`.
    pub fn blur(&self, state: &mut SelectInputState) {
        state.open = false;
    }

    fn handle_key(&self, key: &KeyEvent, state: &mut SelectInputState) -> bool {
        let rows = self.popup_rows();
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') if !state.open => {
                state.open = true;
                state.highlight = self.highlight_for_current(state, &rows);
                true
            }
            KeyCode::Enter if state.open => {
                if let Some(row) = rows.get(state.highlight)
                    && !row.disabled
                {
                    state.value = row.value.map(str::to_string);
                    state.last_change = Some(state.value.clone().unwrap_or_default());
                    state.open = false;
                    return true;
                }
                false
            }
            KeyCode::Escape if state.open => {
                state.open = false;
                true
            }
            KeyCode::Up if state.open => {
                if state.highlight > 0 {
                    state.highlight -= 1;
                    true
                } else {
                    false
                }
            }
            KeyCode::Down if state.open => {
                if !rows.is_empty() && state.highlight < rows.len() - 1 {
                    state.highlight += 1;
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    fn highlight_for_current(&self, state: &SelectInputState, rows: &[PopupRow<'_>]) -> usize {
        let current = state.value.as_deref();
        rows.iter()
            .position(|row| row.value == current)
            .unwrap_or(0)
    }
}

struct PopupRow<'a> {
    label: &'a str,
    value: Option<&'a str>,
    disabled: bool,
}

/// Application-owned state for a [`SelectInput`].
#[derive(Debug, Clone, Default)]
pub struct SelectInputState {
    /// The selected option value, if any.
    value: Option<String>,
    /// Whether the option popup is open.
    open: bool,
    /// Highlighted popup row.
    highlight: usize,
    /// Pending change emission, drained by the application.
    last_change: Option<String>,
}

impl SelectInputState {
    /// Create empty state (nothing selected).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state with an initial selection.
    #[must_use]
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// The selected option value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Replace the selection without emitting a change.
    pub fn set_value(&mut self, value: Option<String>) {
        self.value = value;
    }

    /// Whether the option popup is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Drain the pending change emission: the newly selected value
    /// (empty string when the placeholder sentinel cleared the value).
    pub fn take_change(&mut self) -> Option<String> {
        self.last_change.take()
    }
}

impl StatefulWidget for SelectInput {
    type State = SelectInputState;

    fn render(&self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.is_empty() {
            return;
        }

        let chrome = self.chrome();
        chrome.render(area, buf);

        let inner = chrome.inner(area);
        if inner.is_empty() {
            return;
        }
        let row = inner.rows(0, 1);

        if self.variant == Variant::Filled {
            set_style_area(buf, row, self.theme.filled);
        }

        // Closed value row: selected label, or dim placeholder.
        let accent = if self.error.is_some() {
            self.theme.error
        } else {
            Style::new()
        };
        let value_style = if self.disabled {
            self.theme.disabled.merge(&self.theme.value)
        } else {
            accent.merge(&self.theme.value)
        };

        let max_x = row.right().saturating_sub(2);
        match self.selected_label(state) {
            Some(label) => {
                draw_text_span(buf, row.x, row.y, label, value_style, max_x);
            }
            None => {
                if let Some(placeholder) = &self.placeholder {
                    draw_text_span(buf, row.x, row.y, placeholder, self.theme.placeholder, max_x);
                }
            }
        }
        if row.width >= 1 {
            let mut cell = formtui_render::cell::Cell::from_char(DROPDOWN_INDICATOR);
            crate::apply_style(&mut cell, value_style);
            buf.set(row.right() - 1, row.y, cell);
        }

        // Open popup: one option per remaining inner row.
        if state.open {
            let rows = self.popup_rows();
            let visible = (inner.height - 1) as usize;
            // Keep the highlight visible within the popup window.
            let offset = state.highlight.saturating_sub(visible.saturating_sub(1));
            for (i, popup_row) in rows.iter().skip(offset).take(visible).enumerate() {
                let y = row.y + 1 + i as u16;
                let actual_idx = offset + i;
                let is_highlight = actual_idx == state.highlight;

                let style = if popup_row.disabled {
                    self.theme.placeholder
                } else if is_highlight {
                    Style::new().reverse().merge(&self.theme.value)
                } else {
                    self.theme.value
                };

                let mut x = row.x;
                if is_highlight {
                    x = draw_text_span(buf, x, y, "> ", style, inner.right());
                } else {
                    x = x.saturating_add(2);
                }
                draw_text_span(buf, x, y, popup_row.label, style, inner.right());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::buf_to_lines;

    fn departments() -> Vec<SelectOption> {
        vec![
            SelectOption::new("eng", "Engineering"),
            SelectOption::new("mkt", "Marketing"),
            SelectOption::new("fin", "Finance").disabled(),
            SelectOption::new("ops", "Operations"),
        ]
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code))
    }

    #[test]
    fn enter_opens_then_selects() {
        let select = SelectInput::new("dept", departments());
        let mut state = SelectInputState::new();

        assert!(select.handle_event(&key(KeyCode::Enter), &mut state));
        assert!(state.is_open());

        select.handle_event(&key(KeyCode::Down), &mut state);
        assert!(select.handle_event(&key(KeyCode::Enter), &mut state));
        assert!(!state.is_open());
        assert_eq!(state.value(), Some("mkt"));
        assert_eq!(state.take_change().as_deref(), Some("mkt"));
    }

    #[test]
    fn space_opens_popup() {
        let select = SelectInput::new("dept", departments());
        let mut state = SelectInputState::new();
        assert!(select.handle_event(&key(KeyCode::Char(' ')), &mut state));
        assert!(state.is_open());
    }

    #[test]
    fn escape_closes_without_selecting() {
        let select = SelectInput::new("dept", departments());
        let mut state = SelectInputState::new();
        select.handle_event(&key(KeyCode::Enter), &mut state);
        select.handle_event(&key(KeyCode::Down), &mut state);
        assert!(select.handle_event(&key(KeyCode::Escape), &mut state));
        assert_eq!(state.value(), None);
        assert!(state.take_change().is_none());
    }

    #[test]
    fn disabled_option_cannot_be_selected() {
        let select = SelectInput::new("dept", departments());
        let mut state = SelectInputState::new();
        select.handle_event(&key(KeyCode::Enter), &mut state);
        // Highlight "Finance" (disabled): rows are options only (no
        // placeholder configured), index 2.
        select.handle_event(&key(KeyCode::Down), &mut state);
        select.handle_event(&key(KeyCode::Down), &mut state);
        assert!(!select.handle_event(&key(KeyCode::Enter), &mut state));
        assert!(state.is_open());
        assert_eq!(state.value(), None);
    }

    #[test]
    fn highlight_clamps_at_ends() {
        let select = SelectInput::new("dept", departments());
        let mut state = SelectInputState::new();
        select.handle_event(&key(KeyCode::Enter), &mut state);
        assert!(!select.handle_event(&key(KeyCode::Up), &mut state));
        for _ in 0..10 {
            select.handle_event(&key(KeyCode::Down), &mut state);
        }
        select.handle_event(&key(KeyCode::Enter), &mut state);
        assert_eq!(state.value(), Some("ops"));
    }

    #[test]
    fn reopen_highlights_current_selection() {
        let select = SelectInput::new("dept", departments());
        let mut state = SelectInputState::with_value("mkt");
        select.handle_event(&key(KeyCode::Enter), &mut state);
        // Highlight starts on the current selection; Enter keeps it.
        assert!(select.handle_event(&key(KeyCode::Enter), &mut state));
        assert_eq!(state.value(), Some("mkt"));
    }

    #[test]
    fn placeholder_sentinel_clears_when_not_required() {
        let select = SelectInput::new("dept", departments()).placeholder("Choose…");
        let mut state = SelectInputState::with_value("eng");
        select.handle_event(&key(KeyCode::Enter), &mut state);
        // Move to the sentinel (row 0).
        while state.highlight > 0 {
            select.handle_event(&key(KeyCode::Up), &mut state);
        }
        assert!(select.handle_event(&key(KeyCode::Enter), &mut state));
        assert_eq!(state.value(), None);
        assert_eq!(state.take_change().as_deref(), Some(""));
    }

    #[test]
    fn placeholder_sentinel_disabled_when_required() {
        let select = SelectInput::new("dept", departments())
            .placeholder("Choose…")
            .required(true);
        let mut state = SelectInputState::new();
        select.handle_event(&key(KeyCode::Enter), &mut state);
        // Highlight starts at the sentinel (nothing selected) but it is
        // not selectable.
        assert!(!select.handle_event(&key(KeyCode::Enter), &mut state));
        assert!(state.is_open());
        assert_eq!(state.value(), None);
    }

    #[test]
    fn blur_closes_popup_and_synthesizes_nothing() {
        let select = SelectInput::new("dept", departments()).required(true);
        let mut state = SelectInputState::new();
        select.handle_event(&key(KeyCode::Enter), &mut state);
        select.handle_event(&Event::Focus(false), &mut state);
        assert!(!state.is_open());
        // Required with empty value: no local error — entirely deferred
        // to the caller.
        assert_eq!(select.resolved_error(), None);
    }

    #[test]
    fn caller_error_is_the_only_error() {
        let select = SelectInput::new("dept", departments()).error("Pick a department");
        assert_eq!(select.resolved_error(), Some("Pick a department"));
    }

    #[test]
    fn disabled_field_ignores_events() {
        let select = SelectInput::new("dept", departments()).disabled(true);
        let mut state = SelectInputState::new();
        assert!(!select.handle_event(&key(KeyCode::Enter), &mut state));
        assert!(!state.is_open());
    }

    // ── Rendering ─────────────────────────────────────────────────────

    fn render_lines(
        select: &SelectInput,
        state: &mut SelectInputState,
        w: u16,
        h: u16,
    ) -> Vec<String> {
        let mut buf = Buffer::new(w, h);
        select.render(Rect::from_size(w, h), &mut buf, state);
        buf_to_lines(&buf)
    }

    #[test]
    fn closed_row_shows_selected_label_and_indicator() {
        let select = SelectInput::new("dept", departments());
        let mut state = SelectInputState::with_value("eng");
        let lines = render_lines(&select, &mut state, 20, 2);
        assert!(lines[0].contains("Engineering"));
        assert_eq!(lines[0].chars().nth(19), Some(DROPDOWN_INDICATOR));
    }

    #[test]
    fn closed_row_shows_placeholder_when_empty() {
        let select = SelectInput::new("dept", departments()).placeholder("Choose a department");
        let mut state = SelectInputState::new();
        let lines = render_lines(&select, &mut state, 30, 2);
        assert!(lines[0].contains("Choose a department"));
    }

    #[test]
    fn open_popup_lists_options_with_highlight() {
        let select = SelectInput::new("dept", departments());
        let mut state = SelectInputState::new();
        select.handle_event(&key(KeyCode::Enter), &mut state);
        let lines = render_lines(&select, &mut state, 20, 7);
        assert!(lines[1].starts_with("> Engineering"));
        assert!(lines[2].contains("Marketing"));
        assert!(lines[4].contains("Operations"));
    }

    #[test]
    fn error_renders_in_footer() {
        let select = SelectInput::new("dept", departments())
            .label("Department")
            .error("Department is required");
        let mut state = SelectInputState::new();
        let lines = render_lines(&select, &mut state, 30, 3);
        assert!(lines[2].contains("Department is required"));
    }
}
