#![forbid(unsafe_code)]

//! Single-line text entry with synchronous validation.
//!
//! Split into [`TextInput`] (stateless config, rebuilt each render) and
//! [`TextInputState`] (application-owned value, cursor, and validation
//! state). Grapheme-cluster aware for correct Unicode handling.
//!
//! # Validation timing
//!
//! The state machine is `Untouched → (blur) → Touched`. While untouched,
//! edits update the value but never validate; after the first blur every
//! edit re-validates synchronously, and blur itself always validates.
//! A caller-supplied `error` on the config always wins over the locally
//! computed one; local validation only supplies a fallback.

use formtui_core::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use formtui_core::geometry::Rect;
use formtui_render::buffer::Buffer;
use formtui_render::cell::{Cell, StyleFlags};
use formtui_style::{FieldTheme, Style};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::chrome::FieldChrome;
use crate::validate::{ValidationOutcome, ValidationRules};
use crate::{IconPosition, StatefulWidget, Variant, Widget, apply_style, draw_text_span, set_style_area};

/// Indicator drawn at the right edge of the value row in the success state.
const SUCCESS_INDICATOR: char = '✓';

/// Configuration for a single-line text field.
#[derive(Debug, Clone)]
pub struct TextInput {
    id: String,
    label: Option<String>,
    helper_text: Option<String>,
    error: Option<String>,
    success: bool,
    required: bool,
    disabled: bool,
    focused: bool,
    placeholder: String,
    mask_char: Option<char>,
    max_length: Option<usize>,
    validation: ValidationRules,
    icon: Option<char>,
    icon_position: IconPosition,
    variant: Variant,
    theme: FieldTheme,
}

impl TextInput {
    /// Create a text field config with the given stable id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            helper_text: None,
            error: None,
            success: false,
            required: false,
            disabled: false,
            focused: false,
            placeholder: String::new(),
            mask_char: None,
            max_length: None,
            validation: ValidationRules::new(),
            icon: None,
            icon_position: IconPosition::Left,
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

    /// Force the success state from the caller (builder).
    #[must_use]
    pub fn success(mut self, success: bool) -> Self {
        self.success = success;
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

    /// Set whether the field has keyboard focus (controls cursor display).
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set the placeholder shown while the value is empty (builder).
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Enable password mode with the given mask character (builder).
    #[must_use]
    pub fn mask(mut self, mask: char) -> Self {
        self.mask_char = Some(mask);
        self
    }

    /// Clamp the value to at most `max` graphemes at input time (builder).
    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Attach validation rules (builder).
    #[must_use]
    pub fn validation(mut self, rules: ValidationRules) -> Self {
        self.validation = rules;
        self
    }

    /// Set a decorative icon glyph (builder).
    #[must_use]
    pub fn icon(mut self, icon: char, position: IconPosition) -> Self {
        self.icon = Some(icon);
        self.icon_position = position;
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

    // --- Derived display state ---

    /// The error to display: the caller-forced error wins, the locally
    /// computed one is the fallback.
    #[must_use]
    pub fn resolved_error<'a>(&'a self, state: &'a TextInputState) -> Option<&'a str> {
        self.error.as_deref().or(state.outcome.error.as_deref())
    }

    /// Whether to display the success state. Never true while an error is
    /// displayed.
    #[must_use]
    pub fn resolved_success(&self, state: &TextInputState) -> bool {
        (self.success || state.outcome.valid) && self.resolved_error(state).is_none()
    }

    fn chrome(&self, state: &TextInputState) -> FieldChrome {
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
    pub fn semantics(&self, state: &TextInputState) -> crate::FieldSemantics {
        self.chrome(state).semantics()
    }

    // --- Event handling ---

    /// Handle a terminal event. Returns `true` if the state changed.
    ///
    /// Disabled fields ignore every event. A focus-lost event counts as a
    /// blur; focus managers that track focus themselves can call
    /// [`TextInput::blur`] directly instead.
    pub fn handle_event(&self, event: &Event, state: &mut TextInputState) -> bool {
        if self.disabled {
            return false;
        }
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press || key.kind == KeyEventKind::Repeat => {
                self.handle_key(key, state)
            }
            Event::Paste(paste) if !paste.text.is_empty() => {
                let mut changed = false;
                for c in paste.text.chars() {
                    changed |= state.insert_char(c, self.max_length);
                }
                if changed {
                    self.after_change(state);
                }
                changed
            }
            Event::Focus(false) => {
                self.blur(state);
                true
            }
            _ => false,
        }
    }

    /// Mark the field touched and validate. Always validates, regardless
    /// of touched state.
    pub fn blur(&self, state: &mut TextInputState) {
        state.touched = true;
        self.run_validation(state);
    }

    fn after_change(&self, state: &mut TextInputState) {
        // Live re-validation only once the field has been touched.
        if state.touched {
            self.run_validation(state);
        }
    }

    fn run_validation(&self, state: &mut TextInputState) {
        if self.validation.is_empty() {
            return;
        }
        state.outcome = self.validation.run(&state.value);
        state.last_validation = Some(state.outcome.valid);
    }

    fn handle_key(&self, key: &KeyEvent, state: &mut TextInputState) -> bool {
        let ctrl = key.ctrl();
        match key.code {
            KeyCode::Char(c) if !ctrl => {
                let changed = state.insert_char(c, self.max_length);
                if changed {
                    self.after_change(state);
                }
                changed
            }
            KeyCode::Backspace => {
                let changed = if ctrl {
                    state.delete_word_back()
                } else {
                    state.delete_char_back()
                };
                if changed {
                    self.after_change(state);
                }
                changed
            }
            KeyCode::Delete => {
                let changed = if ctrl {
                    state.delete_word_forward()
                } else {
                    state.delete_char_forward()
                };
                if changed {
                    self.after_change(state);
                }
                changed
            }
            KeyCode::Left => {
                if ctrl {
                    state.move_cursor_word_left();
                } else {
                    state.move_cursor_left();
                }
                true
            }
            KeyCode::Right => {
                if ctrl {
                    state.move_cursor_word_right();
                } else {
                    state.move_cursor_right();
                }
                true
            }
            KeyCode::Home => {
                state.cursor = 0;
                state.scroll_cells = 0;
                true
            }
            KeyCode::End => {
                state.cursor = state.grapheme_count();
                true
            }
            _ => false,
        }
    }
}

/// Application-owned state for a [`TextInput`].
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    /// Text value.
    value: String,
    /// Cursor position (grapheme index).
    cursor: usize,
    /// Scroll offset (visual cells) for horizontal scrolling.
    scroll_cells: usize,
    /// Whether the field has been blurred at least once.
    touched: bool,
    /// The most recent local validation outcome.
    outcome: ValidationOutcome,
    /// Pending validation emission, drained by the application.
    last_validation: Option<bool>,
}

impl TextInputState {
    /// Create empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state with an initial value, cursor at the end.
    #[must_use]
    pub fn with_value(value: impl Into<String>) -> Self {
        let value: String = value.into();
        let cursor = value.graphemes(true).count();
        Self {
            value,
            cursor,
            ..Self::default()
        }
    }

    /// Get the current value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value, clamping the cursor. Does not validate — an
    /// external set is not a user edit.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.cursor.min(self.grapheme_count());
    }

    /// Clear all text and reset cursor and scroll.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
        self.scroll_cells = 0;
    }

    /// Get the cursor position (grapheme index).
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the field has been blurred at least once.
    #[must_use]
    pub fn touched(&self) -> bool {
        self.touched
    }

    /// The most recent local validation outcome.
    #[must_use]
    pub fn outcome(&self) -> &ValidationOutcome {
        &self.outcome
    }

    /// Drain the pending validation emission, if any.
    ///
    /// `Some(true)` means the last validation passed, `Some(false)` that
    /// it failed; `None` means no validation has run since the last drain.
    pub fn take_validation(&mut self) -> Option<bool> {
        self.last_validation.take()
    }

    // --- Editing operations ---

    fn insert_char(&mut self, c: char, max_length: Option<usize>) -> bool {
        if c.is_control() {
            return false;
        }
        if let Some(max) = max_length
            && self.grapheme_count() >= max
        {
            return false;
        }
        let byte_offset = self.grapheme_byte_offset(self.cursor);
        self.value.insert(byte_offset, c);
        self.cursor += 1;
        true
    }

    fn delete_char_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let byte_start = self.grapheme_byte_offset(self.cursor - 1);
        let byte_end = self.grapheme_byte_offset(self.cursor);
        self.value.drain(byte_start..byte_end);
        self.cursor -= 1;
        true
    }

    fn delete_char_forward(&mut self) -> bool {
        if self.cursor >= self.grapheme_count() {
            return false;
        }
        let byte_start = self.grapheme_byte_offset(self.cursor);
        let byte_end = self.grapheme_byte_offset(self.cursor + 1);
        self.value.drain(byte_start..byte_end);
        true
    }

    fn delete_word_back(&mut self) -> bool {
        let old_cursor = self.cursor;
        self.move_cursor_word_left();
        let new_cursor = self.cursor;
        if new_cursor < old_cursor {
            let byte_start = self.grapheme_byte_offset(new_cursor);
            let byte_end = self.grapheme_byte_offset(old_cursor);
            self.value.drain(byte_start..byte_end);
            true
        } else {
            false
        }
    }

    fn delete_word_forward(&mut self) -> bool {
        let old_cursor = self.cursor;
        self.move_cursor_word_right();
        let new_cursor = self.cursor;
        self.cursor = old_cursor;
        if new_cursor > old_cursor {
            let byte_start = self.grapheme_byte_offset(old_cursor);
            let byte_end = self.grapheme_byte_offset(new_cursor);
            self.value.drain(byte_start..byte_end);
            true
        } else {
            false
        }
    }

    // --- Cursor movement ---

    fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    fn move_cursor_right(&mut self) {
        if self.cursor < self.grapheme_count() {
            self.cursor += 1;
        }
    }

    fn move_cursor_word_left(&mut self) {
        let graphemes: Vec<&str> = self.value.graphemes(true).collect();
        let mut pos = self.cursor;
        if pos == 0 {
            return;
        }
        let target_class = char_class(graphemes[pos - 1]);
        while pos > 0 && char_class(graphemes[pos - 1]) == target_class {
            pos -= 1;
        }
        self.cursor = pos;
    }

    fn move_cursor_word_right(&mut self) {
        let graphemes: Vec<&str> = self.value.graphemes(true).collect();
        let max = graphemes.len();
        let mut pos = self.cursor;
        if pos >= max {
            return;
        }
        let target_class = char_class(graphemes[pos]);
        while pos < max && char_class(graphemes[pos]) == target_class {
            pos += 1;
        }
        self.cursor = pos;
    }

    // --- Internal helpers ---

    fn grapheme_count(&self) -> usize {
        self.value.graphemes(true).count()
    }

    fn grapheme_byte_offset(&self, grapheme_idx: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(grapheme_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn cursor_visual_pos(&self, masked: bool) -> usize {
        self.value
            .graphemes(true)
            .take(self.cursor)
            .map(|g| grapheme_width(g, masked))
            .sum()
    }

    fn effective_scroll(&self, viewport_width: usize, masked: bool) -> usize {
        let cursor_visual = self.cursor_visual_pos(masked);
        let mut scroll = self.scroll_cells;
        if cursor_visual < scroll {
            scroll = cursor_visual;
        }
        if viewport_width > 0 && cursor_visual >= scroll + viewport_width {
            scroll = cursor_visual - viewport_width + 1;
        }
        scroll
    }
}

/// Character class for word movement: 0 = space, 1 = alphanumeric,
/// 2 = punctuation.
fn char_class(g: &str) -> u8 {
    if g.chars().all(char::is_whitespace) {
        0
    } else if g.chars().any(char::is_alphanumeric) {
        1
    } else {
        2
    }
}

fn grapheme_width(g: &str, masked: bool) -> usize {
    if masked {
        1
    } else {
        UnicodeWidthStr::width(g)
    }
}

impl StatefulWidget for TextInput {
    type State = TextInputState;

    fn render(&self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("field_render", field = "TextInput", id = %self.id).entered();

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

        // Variant background spans the whole value row.
        if self.variant == Variant::Filled {
            set_style_area(buf, row, self.theme.filled);
        }

        // Accent: error wins, then success; neither shows together.
        let accent = if self.resolved_error(state).is_some() {
            Some(self.theme.error)
        } else if self.resolved_success(state) {
            Some(self.theme.success)
        } else {
            None
        };

        // Success indicator at the far right of the value row.
        if self.resolved_success(state) && row.width >= 2 {
            let mut cell = Cell::from_char(SUCCESS_INDICATOR);
            apply_style(&mut cell, self.theme.success);
            buf.set(row.right() - 1, row.y, cell);
            row.width -= 2;
        }

        // Decorative icon slot.
        if let Some(icon) = self.icon
            && row.width >= 2
        {
            let icon_style = accent.unwrap_or(self.theme.value);
            match self.icon_position {
                IconPosition::Left => {
                    let mut cell = Cell::from_char(icon);
                    apply_style(&mut cell, icon_style);
                    buf.set(row.x, row.y, cell);
                    row.x += 2;
                    row.width -= 2;
                }
                IconPosition::Right => {
                    let mut cell = Cell::from_char(icon);
                    apply_style(&mut cell, icon_style);
                    buf.set(row.right() - 1, row.y, cell);
                    row.width -= 2;
                }
            }
        }

        if row.width == 0 {
            return;
        }

        let viewport_width = row.width as usize;
        let masked = self.mask_char.is_some();
        let scroll = state.effective_scroll(viewport_width, masked);
        state.scroll_cells = scroll;

        let base_style = if self.disabled {
            self.theme.disabled.merge(&self.theme.value)
        } else {
            accent.unwrap_or(Style::new()).merge(&self.theme.value)
        };

        let show_placeholder = state.value.is_empty() && !self.placeholder.is_empty();
        if show_placeholder {
            draw_text_span(
                buf,
                row.x,
                row.y,
                &self.placeholder,
                self.theme.placeholder,
                row.right(),
            );
        } else {
            let mut visual_x: usize = 0;
            for g in state.value.graphemes(true) {
                let w = grapheme_width(g, masked);
                if visual_x + w <= scroll {
                    visual_x += w;
                    continue;
                }
                let rel_x = visual_x.saturating_sub(scroll);
                if rel_x >= viewport_width {
                    break;
                }
                let ch = match self.mask_char {
                    Some(mask) => mask,
                    None => g.chars().next().unwrap_or(' '),
                };
                let mut cell = Cell::from_char(ch);
                apply_style(&mut cell, base_style);
                buf.set(row.x + rel_x as u16, row.y, cell);
                visual_x += w;
            }
        }

        // Cursor: reverse video at the cursor cell when focused.
        if self.focused && !self.disabled {
            let cursor_rel = state.cursor_visual_pos(masked).saturating_sub(scroll);
            if cursor_rel < viewport_width
                && let Some(cell) = buf.get_mut(row.x + cursor_rel as u16, row.y)
            {
                cell.flags ^= StyleFlags::REVERSE;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::buf_to_lines;
    use formtui_core::event::Modifiers;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code))
    }

    fn ctrl_key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code).with_modifiers(Modifiers::CTRL))
    }

    fn type_str(input: &TextInput, state: &mut TextInputState, s: &str) {
        for c in s.chars() {
            input.handle_event(&key(KeyCode::Char(c)), state);
        }
    }

    #[test]
    fn typing_builds_value() {
        let input = TextInput::new("t");
        let mut state = TextInputState::new();
        type_str(&input, &mut state, "abc");
        assert_eq!(state.value(), "abc");
        assert_eq!(state.cursor(), 3);
    }

    #[test]
    fn insert_mid_value() {
        let input = TextInput::new("t");
        let mut state = TextInputState::with_value("ac");
        input.handle_event(&key(KeyCode::Left), &mut state);
        input.handle_event(&key(KeyCode::Char('b')), &mut state);
        assert_eq!(state.value(), "abc");
    }

    #[test]
    fn backspace_and_delete() {
        let input = TextInput::new("t");
        let mut state = TextInputState::with_value("hello");
        input.handle_event(&key(KeyCode::Backspace), &mut state);
        assert_eq!(state.value(), "hell");

        input.handle_event(&key(KeyCode::Home), &mut state);
        input.handle_event(&key(KeyCode::Delete), &mut state);
        assert_eq!(state.value(), "ell");
    }

    #[test]
    fn word_operations() {
        let input = TextInput::new("t");
        let mut state = TextInputState::with_value("hello world");
        input.handle_event(&ctrl_key(KeyCode::Backspace), &mut state);
        assert_eq!(state.value(), "hello ");

        let mut state = TextInputState::with_value("hello world");
        input.handle_event(&key(KeyCode::Home), &mut state);
        input.handle_event(&ctrl_key(KeyCode::Right), &mut state);
        assert_eq!(state.cursor(), 5);
    }

    #[test]
    fn max_length_clamps_input() {
        let input = TextInput::new("t").max_length(3);
        let mut state = TextInputState::new();
        type_str(&input, &mut state, "abcdef");
        assert_eq!(state.value(), "abc");
    }

    #[test]
    fn unicode_grapheme_editing() {
        let input = TextInput::new("t");
        let mut state = TextInputState::with_value("café");
        input.handle_event(&key(KeyCode::Backspace), &mut state);
        assert_eq!(state.value(), "caf");
    }

    #[test]
    fn paste_inserts_text() {
        let input = TextInput::new("t").max_length(6);
        let mut state = TextInputState::new();
        let changed = input.handle_event(
            &Event::Paste(formtui_core::event::PasteEvent::bracketed("hello world")),
            &mut state,
        );
        assert!(changed);
        assert_eq!(state.value(), "hello ");
    }

    #[test]
    fn disabled_ignores_events() {
        let input = TextInput::new("t").disabled(true);
        let mut state = TextInputState::new();
        assert!(!input.handle_event(&key(KeyCode::Char('x')), &mut state));
        assert_eq!(state.value(), "");
        assert!(!input.handle_event(&Event::Focus(false), &mut state));
        assert!(!state.touched());
    }

    // ── Touched gating ────────────────────────────────────────────────

    #[test]
    fn change_before_blur_never_validates() {
        let input = TextInput::new("t").validation(ValidationRules::new().min_length(5));
        let mut state = TextInputState::new();
        type_str(&input, &mut state, "ab");
        assert_eq!(input.resolved_error(&state), None);
        assert!(state.take_validation().is_none());
    }

    #[test]
    fn blur_always_validates() {
        let input = TextInput::new("t").validation(ValidationRules::new().min_length(5));
        let mut state = TextInputState::new();
        type_str(&input, &mut state, "ab");
        input.blur(&mut state);
        assert_eq!(
            input.resolved_error(&state),
            Some("Minimum 5 characters required")
        );
        assert_eq!(state.take_validation(), Some(false));
    }

    #[test]
    fn change_after_blur_revalidates_live() {
        let input = TextInput::new("t").validation(ValidationRules::new().min_length(5));
        let mut state = TextInputState::new();
        type_str(&input, &mut state, "ab");
        input.blur(&mut state);
        assert!(input.resolved_error(&state).is_some());

        type_str(&input, &mut state, "cde");
        assert_eq!(input.resolved_error(&state), None);
        assert!(input.resolved_success(&state));
        assert_eq!(state.take_validation(), Some(true));
    }

    #[test]
    fn focus_lost_event_counts_as_blur() {
        let input = TextInput::new("t").validation(ValidationRules::new().min_length(1));
        let mut state = TextInputState::new();
        input.handle_event(&Event::Focus(false), &mut state);
        assert!(state.touched());
        assert_eq!(
            input.resolved_error(&state),
            Some("Minimum 1 characters required")
        );
    }

    #[test]
    fn no_rules_means_no_validation_emission() {
        let input = TextInput::new("t");
        let mut state = TextInputState::new();
        input.blur(&mut state);
        assert!(state.take_validation().is_none());
        assert!(!input.resolved_success(&state));
    }

    // ── Error precedence ──────────────────────────────────────────────

    #[test]
    fn caller_error_overrides_local_validation() {
        let input = TextInput::new("t")
            .validation(ValidationRules::new().min_length(5))
            .error("Job title is required");
        let mut state = TextInputState::new();
        type_str(&input, &mut state, "ab");
        input.blur(&mut state);
        // Local validation computed its own message, but the caller's wins.
        assert_eq!(input.resolved_error(&state), Some("Job title is required"));
    }

    #[test]
    fn caller_error_suppresses_success() {
        let input = TextInput::new("t")
            .validation(ValidationRules::new().min_length(1))
            .error("nope");
        let mut state = TextInputState::with_value("valid");
        input.blur(&mut state);
        assert!(state.outcome().valid);
        assert!(!input.resolved_success(&state));
    }

    #[test]
    fn caller_success_displays_without_rules() {
        let input = TextInput::new("t").success(true);
        let state = TextInputState::new();
        assert!(input.resolved_success(&state));
    }

    // ── Rendering ─────────────────────────────────────────────────────

    fn render_lines(input: &TextInput, state: &mut TextInputState, w: u16, h: u16) -> Vec<String> {
        let mut buf = Buffer::new(w, h);
        input.render(Rect::from_size(w, h), &mut buf, state);
        buf_to_lines(&buf)
    }

    #[test]
    fn renders_label_value_and_footer() {
        let input = TextInput::new("title")
            .label("Job title")
            .required(true)
            .helper_text("Shown to candidates");
        let mut state = TextInputState::with_value("Engineer");
        let lines = render_lines(&input, &mut state, 30, 3);
        assert!(lines[0].starts_with("Job title *"));
        assert!(lines[1].contains("Engineer"));
        assert!(lines[2].contains("Shown to candidates"));
    }

    #[test]
    fn error_and_success_never_render_together() {
        let input = TextInput::new("t").validation(ValidationRules::new().min_length(5));
        let mut state = TextInputState::with_value("ok");
        input.blur(&mut state);
        let lines = render_lines(&input, &mut state, 40, 2);
        let text = lines.join("\n");
        assert!(text.contains("Minimum 5 characters required"));
        assert!(!text.contains(SUCCESS_INDICATOR));
    }

    #[test]
    fn success_indicator_renders_at_right_edge() {
        let input = TextInput::new("t").validation(ValidationRules::new().min_length(1));
        let mut state = TextInputState::with_value("fine");
        input.blur(&mut state);
        let lines = render_lines(&input, &mut state, 20, 2);
        assert!(lines[0].contains(SUCCESS_INDICATOR));
        assert!(lines[1].contains("Looks good"));
    }

    #[test]
    fn placeholder_renders_when_empty() {
        let input = TextInput::new("t").placeholder("Search jobs");
        let mut state = TextInputState::new();
        let lines = render_lines(&input, &mut state, 20, 2);
        assert!(lines[0].contains("Search jobs"));
    }

    #[test]
    fn mask_hides_value() {
        let input = TextInput::new("t").mask('*');
        let mut state = TextInputState::with_value("secret");
        let lines = render_lines(&input, &mut state, 20, 2);
        assert!(lines[0].contains("******"));
        assert!(!lines[0].contains("secret"));
    }

    #[test]
    fn left_icon_shifts_text() {
        let input = TextInput::new("t").icon('$', IconPosition::Left);
        let mut state = TextInputState::with_value("100");
        let lines = render_lines(&input, &mut state, 20, 2);
        assert!(lines[0].starts_with("$ 100"));
    }

    #[test]
    fn right_icon_renders_at_edge() {
        let input = TextInput::new("t").icon('%', IconPosition::Right);
        let mut state = TextInputState::with_value("50");
        let lines = render_lines(&input, &mut state, 10, 2);
        assert_eq!(lines[0].chars().nth(9), Some('%'));
    }

    #[test]
    fn cursor_reverses_cell_when_focused() {
        let input = TextInput::new("t").focused(true);
        let mut state = TextInputState::with_value("ab");
        let mut buf = Buffer::new(10, 2);
        input.render(Rect::from_size(10, 2), &mut buf, &mut state);
        let cell = buf.get(2, 0).unwrap();
        assert!(cell.flags.contains(StyleFlags::REVERSE));
    }

    #[test]
    fn long_value_scrolls_to_keep_cursor_visible() {
        let input = TextInput::new("t").focused(true);
        let mut state = TextInputState::with_value("abcdefghijklmnop");
        let lines = render_lines(&input, &mut state, 8, 2);
        // Cursor is at the end; the visible window must contain the tail.
        assert!(lines[0].contains('p'));
        assert!(!lines[0].contains('a'));
    }

    #[test]
    fn semantics_flag_invalid_on_error() {
        let input = TextInput::new("email").error("Required");
        let state = TextInputState::new();
        let sem = input.semantics(&state);
        assert!(sem.invalid);
        assert_eq!(sem.described_by.as_deref(), Some("email-helper-text"));
    }
}
