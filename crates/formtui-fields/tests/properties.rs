//! Property tests for the intake pipeline and size formatting.

use formtui_core::dropped::DroppedFile;
use formtui_fields::{FileInput, FileInputState, TextInput, TextInputState, ValidationRules};
use formtui_fields::format_file_size;
use proptest::prelude::*;

fn arb_file() -> impl Strategy<Value = DroppedFile> {
    ("[a-z]{1,8}", prop_oneof!["pdf", "png", "txt"], 0u64..10_000_000).prop_map(
        |(stem, ext, len)| {
            let mime = formtui_core::dropped::mime_for_extension(&ext);
            DroppedFile::new(format!("{stem}.{ext}"), len, mime)
        },
    )
}

proptest! {
    #[test]
    fn intake_never_exceeds_max_files(
        batches in prop::collection::vec(prop::collection::vec(arb_file(), 0..6), 0..5),
        max_files in 1usize..5,
    ) {
        let input = FileInput::new("f").multiple(true).max_files(max_files);
        let mut state = FileInputState::new();
        for batch in batches {
            input.intake(batch, &mut state);
            prop_assert!(state.files().len() <= max_files);
        }
    }

    #[test]
    fn intake_preserves_insertion_order(
        batch in prop::collection::vec(arb_file(), 0..8),
    ) {
        let input = FileInput::new("f").multiple(true);
        let mut state = FileInputState::new();
        let names: Vec<String> = batch.iter().map(|f| f.name.clone()).collect();
        input.intake(batch, &mut state);
        let stored: Vec<String> = state.files().iter().map(|f| f.name.clone()).collect();
        prop_assert_eq!(stored, names);
    }

    #[test]
    fn size_rejected_files_never_land_in_the_list(
        batch in prop::collection::vec(arb_file(), 0..8),
        cap in 1u64..5_000_000,
    ) {
        let input = FileInput::new("f").multiple(true).max_file_size(cap);
        let mut state = FileInputState::new();
        input.intake(batch, &mut state);
        prop_assert!(state.files().iter().all(|f| f.len <= cap));
    }

    #[test]
    fn format_file_size_is_well_formed(bytes in 0u64..u64::MAX / 2) {
        let rendered = format_file_size(bytes);
        let (number, unit) = rendered.split_once(' ').expect("number and unit");
        prop_assert!(["Bytes", "KB", "MB", "GB"].contains(&unit));
        let parsed: f64 = number.parse().expect("numeric prefix");
        prop_assert!(parsed >= 0.0);
        // Values below the GB cap stay within the next unit boundary
        // (two-decimal rounding can land exactly on 1024).
        if unit != "GB" {
            prop_assert!(parsed <= 1024.0);
        }
        prop_assert!(!number.ends_with('.'));
        prop_assert!(number == "0" || !number.ends_with('0') || !number.contains('.'));
    }

    #[test]
    fn error_and_success_are_mutually_exclusive(
        value in "[a-z]{0,12}",
        min in 0usize..8,
        blurred in any::<bool>(),
    ) {
        let input = TextInput::new("t").validation(ValidationRules::new().min_length(min));
        let mut state = TextInputState::with_value(value);
        if blurred {
            input.blur(&mut state);
        }
        let error = input.resolved_error(&state).is_some();
        let success = input.resolved_success(&state);
        prop_assert!(!(error && success));
    }
}
