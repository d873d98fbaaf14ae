#![allow(dead_code)]

use chrono::{NaiveDate, Weekday};
use ratatui::layout::Rect;

use dpick::config::Metrics;
use dpick::dialog::{DialogResponse, PickerDialog};

/// Fixed "today" so tests don't depend on the wall clock.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
}

pub fn metrics() -> Metrics {
    Metrics { cell_width: 4, cell_height: 1, week_height: 1, margin_top: 1 }
}

pub fn host_area() -> Rect {
    Rect::new(0, 0, 80, 24)
}

pub fn dialog_at(year: i32, month: u32, day: u32) -> PickerDialog {
    dialog_with_today(year, month, day, today())
}

pub fn dialog_with_today(year: i32, month: u32, day: u32, today: NaiveDate) -> PickerDialog {
    let mut dialog =
        PickerDialog::new(year, month, day, None, Weekday::Sun, today, metrics(), None)
            .expect("valid initial date");
    dialog.layout(host_area());
    dialog
}

/// Click the middle of a grid cell.
pub fn touch_cell(dialog: &mut PickerDialog, row: usize, col: usize) -> DialogResponse {
    let b = dialog.surface().cells()[row][col].bounds;
    dialog.handle_touch(b.x + b.width / 2, b.y)
}

pub fn selected_day(dialog: &PickerDialog) -> Option<u32> {
    let (r, c) = dialog.surface().selected_cell()?;
    Some(dialog.surface().cells()[r][c].day)
}
