#![forbid(unsafe_code)]

//! File intake via drag-and-drop or browse, with per-file constraint
//! enforcement and a removable file list.
//!
//! # Architecture
//!
//! - [`FileInput`] — stateless configuration (accept patterns, size and
//!   count limits) and rendering
//! - [`FileInputState`] — mutable state: drag phase, accepted files,
//!   list cursor, pending emissions
//! - [`IntakeReport`] — the outcome of one intake batch
//!
//! # Drag lifecycle
//!
//! `Idle --enter/over--> Active --leave--> Idle`, and
//! `Active --drop--> Idle` which also runs the intake pipeline exactly
//! once. Disabled fields ignore every drag event and perform no intake.
//!
//! # Intake pipeline
//!
//! 1. In single mode the batch is truncated to its first file.
//! 2. In multiple mode a batch that would exceed `max_files` is truncated
//!    to the remaining capacity and a max-files rejection is reported.
//! 3. Each remaining candidate is checked against `accept` (extension,
//!    wildcard MIME, or exact MIME — permissive, first match wins) and
//!    then against `max_file_size`. Failing files are reported and
//!    skipped; processing continues with the rest.
//! 4. Survivors replace the list (single mode) or append to it.
//!
//! Rejections are advisory: they never block the interaction, and the
//! field stays usable after every one of them.

use formtui_core::dropped::DroppedFile;
use formtui_core::event::{Event, FileDragEvent, KeyCode, KeyEvent, KeyEventKind};
use formtui_core::geometry::Rect;
use formtui_render::buffer::Buffer;
use formtui_style::{FieldTheme, Style};
use unicode_width::UnicodeWidthStr;

use crate::chrome::FieldChrome;
use crate::{StatefulWidget, Widget, draw_text_span};

/// Prompt shown in the dropzone row.
const DROPZONE_PROMPT: &str = "Drop files here or press Enter to browse";

/// Prompt shown while a drag hovers over the dropzone.
const DROPZONE_ACTIVE_PROMPT: &str = "Release to add files";

/// Units for [`format_file_size`], binary (1024-based) scale.
const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Format a byte count on the binary scale with up to two decimals.
///
/// Trailing zeros are trimmed: `1536` formats as `"1.5 KB"`, `1048576`
/// as `"1 MB"`. Zero is special-cased as `"0 Bytes"`.
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let exp = ((bytes as f64).ln() / 1024_f64.ln()).floor() as usize;
    let exp = exp.min(SIZE_UNITS.len() - 1);
    let value = bytes as f64 / 1024_f64.powi(exp as i32);
    let mut rendered = format!("{value:.2}");
    if rendered.contains('.') {
        rendered = rendered
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string();
    }
    format!("{rendered} {}", SIZE_UNITS[exp])
}

/// Whether `file` matches one entry of a comma-separated accept list.
///
/// Each entry is either an extension (`.pdf`, case-insensitive suffix
/// match on the file name), a wildcard MIME pattern (`image/*`, `*`,
/// `*/*`), or an exact MIME type. Matching is deliberately permissive:
/// entries are trimmed, empty entries (trailing commas) never match, and
/// malformed patterns are not rejected — they simply fail to match.
fn accept_matches(accept: &str, file: &DroppedFile) -> bool {
    let name = file.name.to_ascii_lowercase();
    accept.split(',').map(str::trim).any(|pattern| {
        if pattern.is_empty() {
            return false;
        }
        if pattern.starts_with('.') {
            return name.ends_with(&pattern.to_ascii_lowercase());
        }
        if pattern == "*" || pattern == "*/*" {
            return true;
        }
        if let Some(prefix) = pattern.strip_suffix("/*") {
            return file.mime.starts_with(prefix)
                && file.mime.as_bytes().get(prefix.len()) == Some(&b'/');
        }
        file.mime == pattern
    })
}

/// The drag phase of the dropzone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    /// No drag in progress over the dropzone.
    #[default]
    Idle,
    /// A drag is hovering over the dropzone.
    Active,
}

/// The outcome of one intake batch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IntakeReport {
    /// Number of files added to the list by this batch.
    pub accepted: usize,
    /// Advisory rejection messages, in pipeline order.
    pub rejections: Vec<String>,
}

/// The current selection, as reported through change emissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSelection {
    /// No file selected (single mode after the last file was removed).
    None,
    /// The selected file (single mode).
    Single(DroppedFile),
    /// The full ordered selection (multiple mode).
    Many(Vec<DroppedFile>),
}

/// Configuration for a file intake field.
#[derive(Debug, Clone)]
pub struct FileInput {
    id: String,
    label: Option<String>,
    helper_text: Option<String>,
    error: Option<String>,
    required: bool,
    disabled: bool,
    focused: bool,
    multiple: bool,
    accept: Option<String>,
    max_file_size: Option<u64>,
    max_files: Option<usize>,
    theme: FieldTheme,
}

impl FileInput {
    /// Create a file field config with the given stable id.
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
            multiple: false,
            accept: None,
            max_file_size: None,
            max_files: None,
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

    /// Mark the field required (builder).
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Mark the field disabled: drag, drop, and key events are all
    /// ignored (builder).
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

    /// Allow more than one file. Without this, a new intake replaces the
    /// previous selection (builder).
    #[must_use]
    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    /// Restrict accepted files to a comma-separated pattern list, e.g.
    /// `".pdf,.docx"` or `"image/*"` (builder).
    #[must_use]
    pub fn accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    /// Reject files larger than `bytes` (builder).
    #[must_use]
    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = Some(bytes);
        self
    }

    /// Cap the total number of files in multiple mode (builder).
    #[must_use]
    pub fn max_files(mut self, count: usize) -> Self {
        self.max_files = Some(count);
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

    /// The error to display. Intake rejections are advisory and do not
    /// show here; only the caller-supplied error does.
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

    /// The current selection in emission shape: single mode reports one
    /// file or none, multiple mode the full ordered list.
    #[must_use]
    pub fn selection(&self, state: &FileInputState) -> FileSelection {
        if self.multiple {
            FileSelection::Many(state.files.clone())
        } else {
            match state.files.first() {
                Some(file) => FileSelection::Single(file.clone()),
                None => FileSelection::None,
            }
        }
    }

    /// Drain the pending change emission, if any.
    #[must_use]
    pub fn take_change(&self, state: &mut FileInputState) -> Option<FileSelection> {
        if state.changed {
            state.changed = false;
            Some(self.selection(state))
        } else {
            None
        }
    }

    // --- Event handling ---

    /// Handle a terminal event. Returns `true` if the state changed.
    ///
    /// Enter or Space on a focused field requests a browse dialog (drain
    /// with [`FileInputState::take_browse_request`]); the application runs
    /// its picker and feeds the result back through [`FileInput::intake`].
    pub fn handle_event(&self, event: &Event, state: &mut FileInputState) -> bool {
        if self.disabled {
            return false;
        }
        match event {
            Event::FileDrag(drag) => self.handle_drag(drag, state),
            Event::Key(key)
                if key.kind == KeyEventKind::Press || key.kind == KeyEventKind::Repeat =>
            {
                self.handle_key(key, state)
            }
            _ => false,
        }
    }

    fn handle_drag(&self, drag: &FileDragEvent, state: &mut FileInputState) -> bool {
        match drag {
            FileDragEvent::Enter | FileDragEvent::Over => {
                let was = state.drag;
                state.drag = DragPhase::Active;
                was != state.drag
            }
            FileDragEvent::Leave => {
                let was = state.drag;
                state.drag = DragPhase::Idle;
                was != state.drag
            }
            FileDragEvent::Drop(files) => {
                state.drag = DragPhase::Idle;
                self.intake(files.clone(), state);
                true
            }
        }
    }

    fn handle_key(&self, key: &KeyEvent, state: &mut FileInputState) -> bool {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                state.browse_requested = true;
                true
            }
            KeyCode::Up => {
                if state.cursor > 0 {
                    state.cursor -= 1;
                    true
                } else {
                    false
                }
            }
            KeyCode::Down => {
                if !state.files.is_empty() && state.cursor < state.files.len() - 1 {
                    state.cursor += 1;
                    true
                } else {
                    false
                }
            }
            KeyCode::Delete | KeyCode::Backspace => self.remove(state.cursor, state),
            _ => false,
        }
    }

    // --- Intake pipeline ---

    /// Run one batch of candidates through the intake pipeline.
    ///
    /// Shared by drop handling and application-driven browse results.
    pub fn intake(&self, candidates: Vec<DroppedFile>, state: &mut FileInputState) -> IntakeReport {
        let mut report = IntakeReport::default();
        let mut batch = candidates;

        if !self.multiple {
            // Later files in the same batch are silently dropped.
            batch.truncate(1);
        } else if let Some(max) = self.max_files {
            let remaining = max.saturating_sub(state.files.len());
            if batch.len() > remaining {
                batch.truncate(remaining);
                report
                    .rejections
                    .push(format!("You can upload a maximum of {max} files"));
            }
        }

        let mut survivors = Vec::with_capacity(batch.len());
        for file in batch {
            if let Some(accept) = &self.accept
                && !accept_matches(accept, &file)
            {
                report
                    .rejections
                    .push(format!("File type not accepted: {}", file.name));
                continue;
            }
            if let Some(max_size) = self.max_file_size
                && file.len > max_size
            {
                report.rejections.push(format!(
                    "File too large: {} ({})",
                    file.name,
                    format_file_size(file.len)
                ));
                continue;
            }
            survivors.push(file);
        }

        report.accepted = survivors.len();
        if !survivors.is_empty() {
            if self.multiple {
                state.files.extend(survivors);
            } else {
                state.files = survivors;
            }
            state.changed = true;
            state.clamp_cursor();
        }
        state.rejections.extend(report.rejections.iter().cloned());
        report
    }

    /// Remove the file at `index`. Out-of-bounds indices are a no-op, so
    /// repeated removal at a stale index is harmless.
    pub fn remove(&self, index: usize, state: &mut FileInputState) -> bool {
        if index >= state.files.len() {
            return false;
        }
        state.files.remove(index);
        state.changed = true;
        state.clamp_cursor();
        true
    }
}

/// Application-owned state for a [`FileInput`].
#[derive(Debug, Clone, Default)]
pub struct FileInputState {
    /// Current drag phase of the dropzone.
    drag: DragPhase,
    /// Accepted files, in insertion order. Duplicate names are allowed.
    files: Vec<DroppedFile>,
    /// Highlighted row in the file list.
    cursor: usize,
    /// Pending change flag, drained via [`FileInput::take_change`].
    changed: bool,
    /// Pending advisory rejections, drained by the application.
    rejections: Vec<String>,
    /// Pending browse request, drained by the application.
    browse_requested: bool,
}

impl FileInputState {
    /// Create empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The accepted files, in insertion order.
    #[must_use]
    pub fn files(&self) -> &[DroppedFile] {
        &self.files
    }

    /// The current drag phase.
    #[must_use]
    pub fn drag(&self) -> DragPhase {
        self.drag
    }

    /// The highlighted row in the file list.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Drain the pending advisory rejection messages.
    pub fn take_rejections(&mut self) -> Vec<String> {
        std::mem::take(&mut self.rejections)
    }

    /// Drain the pending browse request.
    pub fn take_browse_request(&mut self) -> bool {
        std::mem::take(&mut self.browse_requested)
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.files.len().saturating_sub(1));
    }
}

impl StatefulWidget for FileInput {
    type State = FileInputState;

    fn render(&self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("field_render", field = "FileInput", id = %self.id).entered();

        if area.is_empty() {
            return;
        }

        let chrome = self.chrome();
        chrome.render(area, buf);

        let inner = chrome.inner(area);
        if inner.is_empty() {
            return;
        }

        // Dropzone row.
        let zone = inner.rows(0, 1);
        let (prompt, zone_style) = match state.drag {
            DragPhase::Active if !self.disabled => {
                (DROPZONE_ACTIVE_PROMPT, self.theme.drag_active)
            }
            _ if self.disabled => (DROPZONE_PROMPT, self.theme.disabled),
            _ => (DROPZONE_PROMPT, self.theme.helper),
        };
        draw_text_span(buf, zone.x, zone.y, prompt, zone_style, zone.right());

        // One row per accepted file: "name (size)", highlighted at the
        // cursor when focused.
        let list = inner.inner(formtui_core::geometry::Sides {
            top: 1,
            right: 0,
            bottom: 0,
            left: 0,
        });
        for (i, file) in state.files.iter().enumerate() {
            if i as u16 >= list.height {
                break;
            }
            let y = list.y + i as u16;
            let is_cursor = self.focused && i == state.cursor;
            let style = if is_cursor {
                Style::new().reverse().merge(&self.theme.value)
            } else {
                self.theme.value
            };

            let mut x = list.x;
            if is_cursor {
                x = draw_text_span(buf, x, y, "> ", style, list.right());
            } else {
                x = x.saturating_add(2);
            }
            x = draw_text_span(buf, x, y, &file.name, style, list.right());
            let size = format!(" ({})", format_file_size(file.len));
            if (x as usize + UnicodeWidthStr::width(size.as_str())) <= list.right() as usize {
                draw_text_span(buf, x, y, &size, self.theme.helper, list.right());
            }
        }
    }
}
