//! Renders a populated job-posting form to stdout, one field per block.
//!
//! This is a static showcase: it drives the fields with synthetic events
//! (typing, blur, a file drop) and prints the resulting frame, so the
//! whole widget stack can be exercised without a terminal runtime.

use chrono::NaiveDate;
use formtui::prelude::*;

const WIDTH: u16 = 56;

fn print_buffer(buf: &Buffer) {
    for y in 0..buf.height() {
        let line: String = (0..buf.width())
            .map(|x| buf.get(x, y).map(|c| c.ch).unwrap_or(' '))
            .collect();
        println!("{}", line.trim_end());
    }
}

fn main() {
    let mut buf = Buffer::new(WIDTH, 3);

    // A text field that fails its minimum length on blur.
    let title = TextInput::new("title")
        .label("Job title")
        .required(true)
        .placeholder("e.g. Senior Backend Engineer")
        .validation(ValidationRules::new().min_length(5));
    let mut title_state = TextInputState::new();
    for c in "VP".chars() {
        title.handle_event(&Event::Key(KeyEvent::new(KeyCode::Char(c))), &mut title_state);
    }
    title.blur(&mut title_state);
    title.render(Rect::from_size(WIDTH, 3), &mut buf, &mut title_state);
    print_buffer(&buf);
    println!();

    // A select with a chosen department.
    buf.clear();
    let dept = SelectInput::new(
        "dept",
        vec![
            SelectOption::new("eng", "Engineering"),
            SelectOption::new("mkt", "Marketing"),
            SelectOption::new("ops", "Operations"),
        ],
    )
    .label("Department")
    .placeholder("Choose a department");
    let mut dept_state = SelectInputState::with_value("eng");
    dept.render(Rect::from_size(WIDTH, 3), &mut buf, &mut dept_state);
    print_buffer(&buf);
    println!();

    // A date that parses successfully on blur.
    buf.clear();
    let start = DateInput::new("start")
        .label("Start date")
        .min_date(NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid date"))
        .max_date(NaiveDate::from_ymd_opt(2026, 12, 31).expect("valid date"));
    let mut start_state = DateInputState::with_value("2026-09-01");
    start.blur(&mut start_state);
    start.render(Rect::from_size(WIDTH, 3), &mut buf, &mut start_state);
    print_buffer(&buf);
    println!();

    // A file field after a drop with one rejection.
    let mut tall = Buffer::new(WIDTH, 6);
    let attachments = FileInput::new("attachments")
        .label("Attachments")
        .multiple(true)
        .accept(".pdf,.docx")
        .max_file_size(5 << 20)
        .max_files(3);
    let mut attachments_state = FileInputState::new();
    attachments.handle_event(&Event::FileDrag(FileDragEvent::Enter), &mut attachments_state);
    attachments.handle_event(
        &Event::FileDrag(FileDragEvent::Drop(vec![
            DroppedFile::new("job-description.pdf", 184_320, "application/pdf"),
            DroppedFile::new("team-photo.png", 2_097_152, "image/png"),
        ])),
        &mut attachments_state,
    );
    attachments.render(Rect::from_size(WIDTH, 6), &mut tall, &mut attachments_state);
    print_buffer(&tall);

    for rejection in attachments_state.take_rejections() {
        println!("note: {rejection}");
    }
    if let Some(FileSelection::Many(files)) = attachments.take_change(&mut attachments_state) {
        println!("selected: {} file(s)", files.len());
    }
}
