//! A terminal calendar date picker: a 6×7 month-grid widget
//! ([`surface::CalendarSurface`]) and its hosting confirm/cancel dialog
//! ([`dialog::PickerDialog`]), driven by keyboard or mouse.

pub mod app;
pub mod config;
pub mod dialog;
pub mod grid;
pub mod surface;
pub mod theme;
