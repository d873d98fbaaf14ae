use chrono::{Datelike, NaiveDate, Weekday};
use ratatui::{
    layout::{Alignment, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use serde::{Deserialize, Serialize};

use crate::config::Metrics;
use crate::grid::{DateError, MonthGrid, COLS, ROWS};
use crate::theme::ThemeConfig;

// ─── Cells ────────────────────────────────────────────────────────────────────

/// Visual class of a day slot. One render path consumes the tag; weekend and
/// out-of-month days differ only in color.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    #[default]
    Normal,
    Weekend,
    OutOfMonth,
}

/// One day slot of the 6×7 grid.
#[derive(Debug, Default, Clone, Copy)]
pub struct Cell {
    pub day:      u32,
    pub bounds:   Rect,
    pub style:    CellStyle,
    pub selected: bool,
}

impl Cell {
    pub fn hit_test(&self, x: u16, y: u16) -> bool {
        self.bounds.contains(Position::new(x, y))
    }
}

// ─── Selection ────────────────────────────────────────────────────────────────

/// The date currently selected on the surface; what the dialog reads on
/// confirmation. Also the persisted instance state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedDate {
    pub year:  i32,
    pub month: u32,
    pub day:   u32,
}

impl SelectedDate {
    pub fn as_naive(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

/// Notifications the surface hands back to its host, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// Selection or displayed month changed.
    DateChanged { year: i32, month: u32, day: u32 },
    /// Raw cell under a touch. Reported for every hit, selected or not,
    /// in-month or not.
    CellTouched { row: usize, col: usize },
}

// ─── Surface ──────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct CalendarSurface {
    grid:     MonthGrid,
    cells:    [[Cell; COLS]; ROWS],
    metrics:  Metrics,
    area:     Rect,
    today:    NaiveDate,
    /// Tracked selection day. Kept raw across month paging, so it may exceed
    /// the displayed month's length; no cell is selected in that case.
    sel_day:  u32,
    selected: Option<(usize, usize)>,
    today_at: Option<(usize, usize)>,
}

impl CalendarSurface {
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        first_day_of_week: Weekday,
        today: NaiveDate,
        metrics: Metrics,
    ) -> Result<Self, DateError> {
        let grid = MonthGrid::new(year, month, first_day_of_week)?;
        if day < 1 || day > grid.days_in_month() {
            return Err(DateError::InvalidDay(day));
        }
        let mut surface = Self {
            grid,
            cells: [[Cell::default(); COLS]; ROWS],
            metrics,
            area: Rect::default(),
            today,
            sel_day: day,
            selected: None,
            today_at: None,
        };
        surface.rebuild_cells();
        Ok(surface)
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn year(&self)  -> i32 { self.grid.year() }
    pub fn month(&self) -> u32 { self.grid.month() }

    /// Tracked day clamped into the displayed month.
    pub fn day(&self) -> u32 {
        self.sel_day.min(self.grid.days_in_month())
    }

    pub fn selected_date(&self) -> SelectedDate {
        SelectedDate { year: self.year(), month: self.month(), day: self.day() }
    }

    pub fn grid(&self)  -> &MonthGrid { &self.grid }
    pub fn cells(&self) -> &[[Cell; COLS]; ROWS] { &self.cells }
    pub fn selected_cell(&self) -> Option<(usize, usize)> { self.selected }
    pub fn today_cell(&self)    -> Option<(usize, usize)> { self.today_at }

    /// Minimum widget size: title margin, weekday strip, six cell rows.
    pub fn desired_size(&self) -> (u16, u16) {
        let m = self.metrics;
        (
            m.cell_width * COLS as u16,
            m.margin_top + m.week_height + m.cell_height * ROWS as u16,
        )
    }

    // ── Host callbacks ────────────────────────────────────────────────────────

    pub fn layout(&mut self, area: Rect) {
        if area != self.area {
            self.area = area;
            self.rebuild_cells();
        }
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        if today != self.today {
            self.today = today;
            self.rebuild_cells();
        }
    }

    /// Reprogram the displayed selection. Rejects dates that do not exist.
    pub fn set_date(&mut self, year: i32, month: u32, day: u32) -> Result<SurfaceEvent, DateError> {
        let grid = MonthGrid::new(year, month, self.grid.first_day_of_week())?;
        if day < 1 || day > grid.days_in_month() {
            return Err(DateError::InvalidDay(day));
        }
        self.grid = grid;
        self.sel_day = day;
        self.rebuild_cells();
        Ok(self.date_changed())
    }

    /// Jump to and select the current date; afterwards the today-marker and
    /// the selection coincide.
    pub fn go_today(&mut self) -> SurfaceEvent {
        let today = self.today;
        self.grid = MonthGrid::for_date(today, self.grid.first_day_of_week());
        self.sel_day = today.day();
        self.rebuild_cells();
        self.date_changed()
    }

    pub fn next_month(&mut self) -> SurfaceEvent {
        self.grid.next_month();
        self.rebuild_cells();
        self.date_changed()
    }

    pub fn previous_month(&mut self) -> SurfaceEvent {
        self.grid.previous_month();
        self.rebuild_cells();
        self.date_changed()
    }

    // ── Touch resolution ──────────────────────────────────────────────────────

    /// Resolve a touch to the cell under it and update the selection. Bounds
    /// are non-overlapping by construction; should a misconfigured layout ever
    /// overlap them, the first match in row-major scan order wins.
    pub fn handle_touch(&mut self, x: u16, y: u16) -> Vec<SurfaceEvent> {
        let mut events = Vec::new();
        let Some((row, col)) = self.cell_at(x, y) else {
            return events;
        };

        if self.selected != Some((row, col)) {
            if let Some((r, c)) = self.selected {
                self.cells[r][c].selected = false;
            }
            self.cells[row][col].selected = true;
            self.selected = Some((row, col));
            self.sel_day  = self.cells[row][col].day;
            events.push(self.date_changed());
        }

        events.push(SurfaceEvent::CellTouched { row, col });
        events
    }

    pub fn cell_at(&self, x: u16, y: u16) -> Option<(usize, usize)> {
        for row in 0..ROWS {
            for col in 0..COLS {
                if self.cells[row][col].hit_test(x, y) {
                    return Some((row, col));
                }
            }
        }
        None
    }

    /// Out-of-month cell in the first displayed row: a leading day of the
    /// previous month. Out-of-month cells mid-grid cannot occur.
    pub fn belongs_to_previous_month(&self, row: usize, col: usize) -> bool {
        row == 0 && self.cells[row][col].style == CellStyle::OutOfMonth
    }

    /// Out-of-month cell in any row after the first: a trailing day of the
    /// next month.
    pub fn belongs_to_next_month(&self, row: usize, col: usize) -> bool {
        row > 0 && self.cells[row][col].style == CellStyle::OutOfMonth
    }

    // ── Grid (re)construction ────────────────────────────────────────────────

    fn rebuild_cells(&mut self) {
        let (x0, y0) = self.grid_origin();
        let m = self.metrics;

        self.selected = None;
        self.today_at = None;
        let viewing_today_month =
            self.grid.year() == self.today.year() && self.grid.month() == self.today.month();

        for row in 0..ROWS {
            let digits = self.grid.digits_for_row(row);
            for col in 0..COLS {
                let in_month = self.grid.is_within_current_month(row, col);
                let style = if !in_month {
                    CellStyle::OutOfMonth
                } else if is_weekend(self.grid.first_day_of_week(), col) {
                    CellStyle::Weekend
                } else {
                    CellStyle::Normal
                };
                let bounds = Rect::new(
                    x0 + col as u16 * m.cell_width,
                    y0 + row as u16 * m.cell_height,
                    m.cell_width,
                    m.cell_height,
                );
                let selected = in_month && digits[col] == self.sel_day;
                self.cells[row][col] = Cell { day: digits[col], bounds, style, selected };

                if selected {
                    self.selected = Some((row, col));
                }
                if viewing_today_month && in_month && digits[col] == self.today.day() {
                    self.today_at = Some((row, col));
                }
            }
        }
    }

    fn grid_origin(&self) -> (u16, u16) {
        let grid_w = self.metrics.cell_width * COLS as u16;
        (
            self.area.x + self.area.width.saturating_sub(grid_w) / 2,
            self.area.y + self.metrics.margin_top + self.metrics.week_height,
        )
    }

    fn date_changed(&self) -> SurfaceEvent {
        SurfaceEvent::DateChanged { year: self.year(), month: self.month(), day: self.day() }
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    pub fn render(&self, f: &mut Frame, theme: &ThemeConfig) {
        let clip = f.area();
        let m = self.metrics;
        let (x0, _) = self.grid_origin();
        let grid_w = m.cell_width * COLS as u16;

        // Month-year header in the top margin
        if m.margin_top > 0 {
            let header = Rect::new(self.area.x, self.area.y, self.area.width, 1).intersection(clip);
            if header.width > 0 && header.height > 0 {
                let label = format!("{} {}", month_name(self.month()), self.year());
                f.render_widget(
                    Paragraph::new(Line::from(Span::styled(
                        label,
                        Style::default().fg(theme.accent()).add_modifier(Modifier::BOLD),
                    )))
                    .alignment(Alignment::Center),
                    header,
                );
            }
        }

        // Weekday title strip
        let strip = Rect::new(x0, self.area.y + m.margin_top, grid_w, m.week_height)
            .intersection(clip);
        if strip.width > 0 && strip.height > 0 {
            let spans: Vec<Span> = (0..COLS)
                .map(|col| {
                    let weekend = is_weekend(self.grid.first_day_of_week(), col);
                    let style = if weekend {
                        Style::default().fg(theme.weekend_color()).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(theme.fg_dim()).add_modifier(Modifier::BOLD)
                    };
                    let title = weekday_title(self.grid.first_day_of_week(), col);
                    Span::styled(center_in(title, m.cell_width as usize), style)
                })
                .collect();
            f.render_widget(Paragraph::new(Line::from(spans)), strip);
        }

        // Cells
        for row in 0..ROWS {
            for col in 0..COLS {
                let cell = &self.cells[row][col];
                let rect = cell.bounds.intersection(clip);
                if rect.width == 0 || rect.height == 0 {
                    continue;
                }

                let is_today = self.today_at == Some((row, col));
                let mut style = if cell.selected {
                    let (bg, fg) = theme.selected_highlight();
                    Style::default().bg(bg).fg(fg).add_modifier(Modifier::BOLD)
                } else if is_today {
                    let (bg, fg) = theme.today_highlight();
                    Style::default().bg(bg).fg(fg).add_modifier(Modifier::BOLD)
                } else {
                    match cell.style {
                        CellStyle::Normal     => Style::default().fg(theme.fg()),
                        CellStyle::Weekend    => Style::default().fg(theme.weekend_color()),
                        CellStyle::OutOfMonth => Style::default().fg(theme.out_month()),
                    }
                };
                // Today keeps its decoration even while selected
                if is_today {
                    style = style.add_modifier(Modifier::UNDERLINED);
                }

                f.render_widget(
                    Paragraph::new(Line::from(Span::raw(center_in(
                        &cell.day.to_string(),
                        m.cell_width as usize,
                    ))))
                    .style(style),
                    rect,
                );
            }
        }
    }
}

// ─── Utilities ────────────────────────────────────────────────────────────────

const WEEK_TITLES: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

fn weekday_of_col(first: Weekday, col: usize) -> Weekday {
    let mut w = first;
    for _ in 0..col {
        w = w.succ();
    }
    w
}

fn is_weekend(first: Weekday, col: usize) -> bool {
    matches!(weekday_of_col(first, col), Weekday::Sat | Weekday::Sun)
}

fn weekday_title(first: Weekday, col: usize) -> &'static str {
    WEEK_TITLES[weekday_of_col(first, col).num_days_from_sunday() as usize]
}

fn center_in(s: &str, width: usize) -> String {
    format!("{s:^width$}")
}

pub fn month_name(m: u32) -> &'static str {
    match m {
        1 => "January",   2 => "February", 3 => "March",     4 => "April",
        5 => "May",       6 => "June",     7 => "July",      8 => "August",
        9 => "September", 10 => "October", 11 => "November", 12 => "December",
        _ => "???",
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
