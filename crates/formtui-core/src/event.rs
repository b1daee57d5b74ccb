#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! All field widgets consume the [`Event`] enum defined here. Events derive
//! `Clone` and `PartialEq` so tests can fabricate and compare them.
//!
//! # Design Notes
//!
//! - Mouse coordinates are 0-indexed (terminal is 1-indexed internally).
//! - `KeyEventKind` defaults to `Press` when the terminal cannot report it.
//! - `Modifiers` use bitflags for easy combination.
//! - File drags are a four-phase lifecycle: exactly one `Enter`, zero or
//!   more `Over`, ending in either `Leave` or `Drop`. Backends that cannot
//!   observe hover phases may emit a bare `Drop`.

use bitflags::bitflags;
#[cfg(not(target_arch = "wasm32"))]
use crossterm::event as cte;

use crate::dropped::DroppedFile;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A mouse event.
    Mouse(MouseEvent),

    /// Terminal was resized.
    Resize {
        /// New terminal width in columns.
        width: u16,
        /// New terminal height in rows.
        height: u16,
    },

    /// Paste event (from bracketed paste mode).
    Paste(PasteEvent),

    /// Focus gained or lost.
    ///
    /// `true` = focus gained, `false` = focus lost.
    Focus(bool),

    /// A phase of a file drag-and-drop interaction over the application.
    FileDrag(FileDragEvent),
}

impl Event {
    /// Convert a Crossterm event into a formtui [`Event`].
    #[must_use]
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_crossterm(event: cte::Event) -> Option<Self> {
        map_crossterm_event(event)
    }
}

/// A phase of a file drag-and-drop interaction.
///
/// Terminals report dropped files as paths; the backend assembles them
/// into [`DroppedFile`] metadata before delivery.
#[derive(Debug, Clone, PartialEq)]
pub enum FileDragEvent {
    /// A drag moved into the application surface.
    Enter,
    /// A drag is hovering over the application surface.
    Over,
    /// A drag left without dropping.
    Leave,
    /// Files were released over the application surface.
    Drop(Vec<DroppedFile>),
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,
    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Check if Shift modifier is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Escape key.
    Escape,
    /// Backspace key.
    Backspace,
    /// Tab key.
    Tab,
    /// Shift+Tab (back-tab).
    BackTab,
    /// Delete key.
    Delete,
    /// Insert key.
    Insert,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up key.
    PageUp,
    /// Page Down key.
    PageDown,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Function key (F1-F24).
    F(u8),
    /// Null character (Ctrl+Space or Ctrl+@).
    Null,
}

/// Whether a key event is a press, repeat, or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyEventKind {
    /// Key was pressed.
    #[default]
    Press,
    /// Key is repeating (held down).
    Repeat,
    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys held during an input event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE = 0;
        /// Shift key.
        const SHIFT = 1 << 0;
        /// Alt/Option key.
        const ALT = 1 << 1;
        /// Control key.
        const CTRL = 1 << 2;
        /// Super/Meta/Cmd key.
        const SUPER = 1 << 3;
    }
}

/// A mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// What happened.
    pub kind: MouseEventKind,
    /// Column (0-indexed).
    pub x: u16,
    /// Row (0-indexed).
    pub y: u16,
    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

/// The kind of mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    /// Button pressed.
    Down(MouseButton),
    /// Button released.
    Up(MouseButton),
    /// Moved with a button held.
    Drag(MouseButton),
    /// Moved with no button held.
    Moved,
    /// Scrolled up.
    ScrollUp,
    /// Scrolled down.
    ScrollDown,
}

/// A mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// A paste event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteEvent {
    /// The pasted text content.
    pub text: String,
    /// True if this came from bracketed paste mode.
    ///
    /// When true, the text was received atomically and should be treated
    /// as a single paste rather than individual key presses.
    pub bracketed: bool,
}

impl PasteEvent {
    /// Create a new paste event.
    #[must_use]
    pub fn new(text: impl Into<String>, bracketed: bool) -> Self {
        Self {
            text: text.into(),
            bracketed,
        }
    }

    /// Create a bracketed paste event (the common case).
    #[must_use]
    pub fn bracketed(text: impl Into<String>) -> Self {
        Self::new(text, true)
    }
}

// ---------------------------------------------------------------------------
// Crossterm mapping
// ---------------------------------------------------------------------------

#[cfg(not(target_arch = "wasm32"))]
fn map_crossterm_event(event: cte::Event) -> Option<Event> {
    match event {
        cte::Event::Key(key) => map_key_event(key).map(Event::Key),
        cte::Event::Mouse(mouse) => Some(Event::Mouse(map_mouse_event(mouse))),
        cte::Event::Resize(width, height) => Some(Event::Resize { width, height }),
        cte::Event::Paste(text) => Some(Event::Paste(PasteEvent::bracketed(text))),
        cte::Event::FocusGained => Some(Event::Focus(true)),
        cte::Event::FocusLost => Some(Event::Focus(false)),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn map_key_event(event: cte::KeyEvent) -> Option<KeyEvent> {
    Some(KeyEvent {
        code: map_key_code(event.code)?,
        modifiers: map_modifiers(event.modifiers),
        kind: map_key_kind(event.kind),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn map_key_kind(kind: cte::KeyEventKind) -> KeyEventKind {
    match kind {
        cte::KeyEventKind::Press => KeyEventKind::Press,
        cte::KeyEventKind::Repeat => KeyEventKind::Repeat,
        cte::KeyEventKind::Release => KeyEventKind::Release,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn map_key_code(code: cte::KeyCode) -> Option<KeyCode> {
    match code {
        cte::KeyCode::Backspace => Some(KeyCode::Backspace),
        cte::KeyCode::Enter => Some(KeyCode::Enter),
        cte::KeyCode::Left => Some(KeyCode::Left),
        cte::KeyCode::Right => Some(KeyCode::Right),
        cte::KeyCode::Up => Some(KeyCode::Up),
        cte::KeyCode::Down => Some(KeyCode::Down),
        cte::KeyCode::Home => Some(KeyCode::Home),
        cte::KeyCode::End => Some(KeyCode::End),
        cte::KeyCode::PageUp => Some(KeyCode::PageUp),
        cte::KeyCode::PageDown => Some(KeyCode::PageDown),
        cte::KeyCode::Tab => Some(KeyCode::Tab),
        cte::KeyCode::BackTab => Some(KeyCode::BackTab),
        cte::KeyCode::Delete => Some(KeyCode::Delete),
        cte::KeyCode::Insert => Some(KeyCode::Insert),
        cte::KeyCode::F(n) => Some(KeyCode::F(n)),
        cte::KeyCode::Char(c) => Some(KeyCode::Char(c)),
        cte::KeyCode::Null => Some(KeyCode::Null),
        cte::KeyCode::Esc => Some(KeyCode::Escape),
        _ => None,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn map_modifiers(modifiers: cte::KeyModifiers) -> Modifiers {
    let mut out = Modifiers::NONE;
    if modifiers.contains(cte::KeyModifiers::SHIFT) {
        out |= Modifiers::SHIFT;
    }
    if modifiers.contains(cte::KeyModifiers::ALT) {
        out |= Modifiers::ALT;
    }
    if modifiers.contains(cte::KeyModifiers::CONTROL) {
        out |= Modifiers::CTRL;
    }
    if modifiers.contains(cte::KeyModifiers::SUPER)
        || modifiers.contains(cte::KeyModifiers::HYPER)
        || modifiers.contains(cte::KeyModifiers::META)
    {
        out |= Modifiers::SUPER;
    }
    out
}

#[cfg(not(target_arch = "wasm32"))]
fn map_mouse_event(event: cte::MouseEvent) -> MouseEvent {
    let kind = match event.kind {
        cte::MouseEventKind::Down(button) => MouseEventKind::Down(map_mouse_button(button)),
        cte::MouseEventKind::Up(button) => MouseEventKind::Up(map_mouse_button(button)),
        cte::MouseEventKind::Drag(button) => MouseEventKind::Drag(map_mouse_button(button)),
        cte::MouseEventKind::Moved => MouseEventKind::Moved,
        cte::MouseEventKind::ScrollUp | cte::MouseEventKind::ScrollLeft => MouseEventKind::ScrollUp,
        cte::MouseEventKind::ScrollDown | cte::MouseEventKind::ScrollRight => {
            MouseEventKind::ScrollDown
        }
    };
    MouseEvent {
        kind,
        x: event.column,
        y: event.row,
        modifiers: map_modifiers(event.modifiers),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn map_mouse_button(button: cte::MouseButton) -> MouseButton {
    match button {
        cte::MouseButton::Left => MouseButton::Left,
        cte::MouseButton::Right => MouseButton::Right,
        cte::MouseButton::Middle => MouseButton::Middle,
    }
}
