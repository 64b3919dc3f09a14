// Data models for the timetable engine

pub mod entry;
pub mod schedule;
pub mod settings;
