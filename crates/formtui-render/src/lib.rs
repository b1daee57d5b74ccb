#![forbid(unsafe_code)]

//! Render kernel for formtui: packed colors, style flags, cells, and the
//! bounds-checked cell buffer widgets draw into.
//!
//! The kernel deliberately stays small: one `char` per cell, no grapheme
//! interning, no damage tracking. Widgets own all layout and text policy;
//! the buffer only guarantees that out-of-bounds writes are ignored and
//! in-bounds reads are total.

pub mod buffer;
pub mod cell;

pub use buffer::Buffer;
pub use cell::{Cell, Rgba, StyleFlags};
