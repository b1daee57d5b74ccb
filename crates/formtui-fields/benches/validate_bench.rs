use criterion::{Criterion, black_box, criterion_group, criterion_main};
use formtui_core::dropped::DroppedFile;
use formtui_fields::{FileInput, FileInputState, ValidationRules, format_file_size};
use regex::Regex;

fn bench_validation(c: &mut Criterion) {
    let rules = ValidationRules::new()
        .min_length(3)
        .max_length(64)
        .pattern(Regex::new(r"^[\w.+-]+@[\w-]+\.[\w.]+$").unwrap());

    c.bench_function("rules_check_pass", |b| {
        b.iter(|| rules.check(black_box("candidate@example.com")))
    });

    c.bench_function("rules_check_fail_fast", |b| {
        b.iter(|| rules.check(black_box("ab")))
    });
}

fn bench_intake(c: &mut Criterion) {
    let input = FileInput::new("bench")
        .multiple(true)
        .accept(".pdf,image/*")
        .max_file_size(1 << 20)
        .max_files(64);

    let batch: Vec<DroppedFile> = (0..32u64)
        .map(|i| DroppedFile::new(format!("file{i}.pdf"), 1024 * i, "application/pdf"))
        .collect();

    c.bench_function("intake_batch_32", |b| {
        b.iter(|| {
            let mut state = FileInputState::new();
            input.intake(black_box(batch.clone()), &mut state)
        })
    });

    c.bench_function("format_file_size", |b| {
        b.iter(|| format_file_size(black_box(1_536_000)))
    });
}

criterion_group!(benches, bench_validation, bench_intake);
criterion_main!(benches);
