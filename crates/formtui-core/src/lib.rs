#![forbid(unsafe_code)]

//! Core primitives for formtui: canonical input events, dropped-file
//! metadata, and terminal geometry.
//!
//! This crate sits at the bottom of the workspace. It knows nothing about
//! rendering, styling, or any particular field widget; it only defines the
//! vocabulary those layers share.

pub mod dropped;
pub mod event;
pub mod geometry;

pub use dropped::DroppedFile;
pub use event::{
    Event, FileDragEvent, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent,
    MouseEventKind, PasteEvent,
};
pub use geometry::{Rect, Sides};
