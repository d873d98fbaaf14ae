use chrono::{Datelike, NaiveDate, Weekday};
use thiserror::Error;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Rejected date input. These are programmer errors with no recovery path;
/// callers are expected to hand in valid values.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DateError {
    #[error("month {0} out of range 1..=12")]
    InvalidMonth(u32),
    #[error("day {0} does not exist in the given month")]
    InvalidDay(u32),
    #[error("year {0} is not representable")]
    InvalidYear(i32),
}

/// Maps (year, month, first day of week) onto a fixed 6-row × 7-column
/// display grid. Slots before the 1st and after the last day carry the
/// adjacent month's real day numbers, so every slot holds a valid day.
#[derive(Debug, Clone)]
pub struct MonthGrid {
    year:   i32,
    month:  u32,
    first_day_of_week: Weekday,
    /// Column of the 1st of the month in row 0.
    offset: u32,
    days:   u32,
}

impl MonthGrid {
    pub fn new(year: i32, month: u32, first_day_of_week: Weekday) -> Result<Self, DateError> {
        if !(1..=12).contains(&month) {
            return Err(DateError::InvalidMonth(month));
        }
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(DateError::InvalidYear(year))?;
        Ok(Self::for_date(first, first_day_of_week))
    }

    /// Grid for the month containing `date`. Infallible: a `NaiveDate` is
    /// valid by construction.
    pub fn for_date(date: NaiveDate, first_day_of_week: Weekday) -> Self {
        let mut grid = Self {
            year: date.year(),
            month: date.month(),
            first_day_of_week,
            offset: 0,
            days: 0,
        };
        grid.recompute();
        grid
    }

    pub fn year(&self)  -> i32 { self.year }
    pub fn month(&self) -> u32 { self.month }
    pub fn first_day_of_week(&self) -> Weekday { self.first_day_of_week }
    pub fn days_in_month(&self) -> u32 { self.days }

    /// Day numbers for one display row. Out-of-month slots hold the
    /// previous/next month's real day number.
    pub fn digits_for_row(&self, row: usize) -> [u32; COLS] {
        let (py, pm) = previous_of(self.year, self.month);
        let prev_days = days_in_month(py, pm) as i32;

        let mut digits = [0u32; COLS];
        for (col, d) in digits.iter_mut().enumerate() {
            let raw = self.raw_day(row, col);
            *d = if raw < 1 {
                (prev_days + raw) as u32
            } else if raw > self.days as i32 {
                (raw - self.days as i32) as u32
            } else {
                raw as u32
            };
        }
        digits
    }

    pub fn is_within_current_month(&self, row: usize, col: usize) -> bool {
        let raw = self.raw_day(row, col);
        raw >= 1 && raw <= self.days as i32
    }

    pub fn next_month(&mut self) {
        if self.month == 12 { self.month = 1;  self.year += 1; }
        else                { self.month += 1; }
        self.recompute();
    }

    pub fn previous_month(&mut self) {
        if self.month == 1 { self.month = 12; self.year -= 1; }
        else               { self.month -= 1; }
        self.recompute();
    }

    fn raw_day(&self, row: usize, col: usize) -> i32 {
        (row * COLS + col) as i32 - self.offset as i32 + 1
    }

    fn recompute(&mut self) {
        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap();
        self.offset = (first.weekday().num_days_from_sunday() + 7
            - self.first_day_of_week.num_days_from_sunday())
            % 7;
        self.days = days_in_month(self.year, self.month);
    }
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
    (next.unwrap() - first).num_days() as u32
}

fn previous_of(year: i32, month: u32) -> (i32, u32) {
    if month == 1 { (year - 1, 12) } else { (year, month - 1) }
}
