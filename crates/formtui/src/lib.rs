#![forbid(unsafe_code)]

//! formtui public facade.
//!
//! Re-exports the workspace crates under one roof and provides a prelude
//! for applications that want the whole field vocabulary in scope:
//!
//! ```
//! use formtui::prelude::*;
//!
//! let field = TextInput::new("email")
//!     .label("Email")
//!     .required(true)
//!     .validation(ValidationRules::new().min_length(3));
//! let mut state = TextInputState::new();
//! field.blur(&mut state);
//! assert!(field.resolved_error(&state).is_some());
//! ```

pub use formtui_core as core;
pub use formtui_fields as fields;
pub use formtui_render as render;
pub use formtui_style as style;

/// Everything an application typically needs.
pub mod prelude {
    pub use formtui_core::dropped::{DroppedFile, mime_for_extension};
    pub use formtui_core::event::{
        Event, FileDragEvent, KeyCode, KeyEvent, KeyEventKind, Modifiers, PasteEvent,
    };
    pub use formtui_core::geometry::{Rect, Sides};
    pub use formtui_fields::chrome::{FieldChrome, FieldSemantics, Footer};
    pub use formtui_fields::date::{DateInput, DateInputState};
    pub use formtui_fields::file::{
        DragPhase, FileInput, FileInputState, FileSelection, IntakeReport, format_file_size,
    };
    pub use formtui_fields::select::{SelectInput, SelectInputState, SelectOption};
    pub use formtui_fields::text::{TextInput, TextInputState};
    pub use formtui_fields::validate::{ValidationOutcome, ValidationRules};
    pub use formtui_fields::{IconPosition, StatefulWidget, Variant, Widget};
    pub use formtui_render::buffer::Buffer;
    pub use formtui_render::cell::{Cell, Rgba, StyleFlags};
    pub use formtui_style::{FieldTheme, Style};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn prelude_covers_a_full_form_round_trip() {
        let title = TextInput::new("title")
            .label("Job title")
            .required(true)
            .validation(ValidationRules::new().min_length(3));
        let mut title_state = TextInputState::with_value("VP");
        title.blur(&mut title_state);
        assert_eq!(
            title.resolved_error(&title_state),
            Some("Minimum 3 characters required")
        );

        let dept = SelectInput::new(
            "dept",
            vec![
                SelectOption::new("eng", "Engineering"),
                SelectOption::new("ops", "Operations"),
            ],
        );
        let dept_state = SelectInputState::with_value("eng");
        assert_eq!(dept.selected_label(&dept_state), Some("Engineering"));

        let files = FileInput::new("cv").accept(".pdf").max_file_size(1 << 20);
        let mut files_state = FileInputState::new();
        let report = files.intake(
            vec![DroppedFile::new("resume.pdf", 2048, "application/pdf")],
            &mut files_state,
        );
        assert_eq!(report.accepted, 1);

        let mut buf = Buffer::new(40, 3);
        title.render(Rect::from_size(40, 3), &mut buf, &mut title_state);
        assert_eq!(buf.get(0, 0).map(|c| c.ch), Some('J'));
    }
}
