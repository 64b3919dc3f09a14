// Services for the timetable engine

pub mod drag;
pub mod layout;
pub mod operations;
pub mod settings;
