#![forbid(unsafe_code)]

//! Styling for formtui: the `Style` overlay type and the field theme.
//!
//! Styles are partial overlays — every component is optional, and `merge`
//! lets a more specific style fill in only what it sets. The theme groups
//! the accents every field variant shares (label, helper, error, success,
//! placeholder) so applications restyle all fields in one place.

pub mod style;
pub mod theme;

pub use style::Style;
pub use theme::FieldTheme;
