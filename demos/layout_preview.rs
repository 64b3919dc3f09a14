// Lays out a sample day and prints the resulting slot assignment

use chrono::{NaiveDate, NaiveDateTime};
use daygrid::models::entry::{Entry, EntryKind};
use daygrid::models::settings::Settings;
use daygrid::services::layout::{compute_y_offset, layout};

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 3)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn main() {
    env_logger::init();
    let settings = Settings::default();

    let mut session = Entry::new(1, EntryKind::Block, "Morning session", at(9, 0), 150).unwrap();
    session.session_id = Some(1);
    session.children = vec![
        Entry::new(10, EntryKind::Contribution, "Opening talk", at(9, 0), 45).unwrap(),
        Entry::new(11, EntryKind::Contribution, "Survey talk", at(9, 45), 45).unwrap(),
        Entry::new(12, EntryKind::Break, "Coffee", at(10, 30), 30).unwrap(),
    ];

    let entries = vec![
        session,
        Entry::new(2, EntryKind::Contribution, "Tutorial", at(9, 30), 120).unwrap(),
        Entry::new(3, EntryKind::Break, "Lunch", at(12, 0), 60).unwrap(),
        Entry::new(4, EntryKind::Contribution, "Afternoon keynote", at(13, 0), 60).unwrap(),
        Entry::new(5, EntryKind::Contribution, "Panel", at(13, 30), 90).unwrap(),
    ];

    let laid = compute_y_offset(
        &layout(&entries),
        settings.min_hour,
        settings.pixels_per_minute,
    );

    println!("{:<22} {:>7} {:>5} {:>8} {:>8} {:>7}", "title", "start", "col", "width", "x", "y");
    for entry in &laid {
        print_entry(entry, 0);
        for child in &entry.children {
            print_entry(child, 1);
        }
    }
}

fn print_entry(entry: &Entry, indent: usize) {
    println!(
        "{:indent$}{:<22} {:>7} {:>5} {:>7.1}% {:>7.1}% {:>6}px",
        "",
        entry.title,
        entry.start.format("%H:%M").to_string(),
        entry.column,
        entry.width,
        entry.x,
        entry.y,
        indent = indent * 2,
    );
}
