// Simulates a full drag session against a sample day: pointer down, move,
// release, drop resolution and the committed snapshot

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{NaiveDate, NaiveDateTime};
use daygrid::models::entry::{Entry, EntryKind};
use daygrid::models::schedule::Timetable;
use daygrid::models::settings::Settings;
use daygrid::services::drag::{DragEngine, DropEvent, Point, Rect};
use daygrid::services::layout::{compute_y_offset, layout};
use daygrid::services::operations::{resolve_drop, SURFACE_ID};

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 3)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn main() {
    env_logger::init();
    let settings = Settings::default();
    let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();

    let mut timetable = Timetable::new();
    let day = compute_y_offset(
        &layout(&[
            Entry::new(1, EntryKind::Contribution, "Keynote", at(10, 0), 60).unwrap(),
            Entry::new(2, EntryKind::Contribution, "Tutorial", at(13, 0), 60).unwrap(),
        ]),
        settings.min_hour,
        settings.pixels_per_minute,
    );
    timetable.commit_day(date, day).expect("sample day is valid");

    let drops: Rc<RefCell<Vec<DropEvent>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&drops);
    let mut engine = DragEngine::new(move |event| sink.borrow_mut().push(event));
    engine.set_scroll_config((&settings).into());
    engine.register_droppable(
        SURFACE_ID,
        Box::new(|| Some(Rect::new(0.0, 0.0, 1000.0, 2880.0))),
    );
    engine.register_draggable(
        "1",
        false,
        Box::new(|| Some(Rect::new(0.0, 240.0, 1000.0, 120.0))),
    );

    // drag the keynote three hours down, pointer ending on the left half
    engine.pointer_down("1", Point::new(500.0, 300.0), Point::default());
    engine.pointer_move(Point::new(120.0, 660.0));
    engine.pointer_up(Point::new(120.0, 660.0));

    let event = drops.borrow().first().cloned().expect("drop was emitted");
    println!(
        "dropped {} with delta ({}, {}) over {:?}",
        event.dragged_id,
        event.delta.x,
        event.delta.y,
        event.over.iter().map(|o| o.id.as_str()).collect::<Vec<_>>()
    );

    match resolve_drop(timetable.day(date), &event, &settings) {
        Ok(new_layout) => {
            timetable.commit_day(date, new_layout).expect("committed day is valid");
            println!("committed new snapshot:");
            for entry in timetable.day(date) {
                println!(
                    "  {:<10} {} column {} of {} ({}% wide)",
                    entry.title,
                    entry.start.format("%H:%M"),
                    entry.column,
                    entry.max_column + 1,
                    entry.width,
                );
            }
        }
        Err(rejection) => println!("move rejected: {rejection}"),
    }
}
