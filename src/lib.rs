// Daygrid Library
// Timetable layout and drag-and-drop engine, exported for reuse and testing

pub mod models;
pub mod services;
pub mod utils;
