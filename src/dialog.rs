use chrono::{Datelike, Duration, NaiveDate, Weekday};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{block::Title, Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::config::Metrics;
use crate::grid::DateError;
use crate::surface::{month_name, CalendarSurface, SelectedDate, SurfaceEvent};
use crate::theme::ThemeConfig;

/// Callback fired once when the user confirms a date.
pub type OnDateSet = Box<dyn FnMut(&CalendarSurface, i32, u32, u32)>;

/// Persisted dialog state: enough to reproduce the selection exactly.
pub type SavedState = SelectedDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    Open,
    DateHighlighted,
    Confirmed,
    Cancelled,
}

/// What the host should do after feeding the dialog an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResponse {
    None,
    /// The month was paged by touching an adjacent-month day; show the notice
    /// briefly.
    Paged { notice: String },
    Confirmed,
    Cancelled,
}

const SET_LABEL:    &str = "[ Set ]";
const CANCEL_LABEL: &str = "[ Cancel ]";

pub struct PickerDialog {
    surface:    CalendarSurface,
    title:      String,
    hint:       Option<String>,
    state:      DialogState,
    callback:   Option<OnDateSet>,
    popup:      Rect,
    set_btn:    Rect,
    cancel_btn: Rect,
}

impl std::fmt::Debug for PickerDialog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PickerDialog")
            .field("surface", &self.surface)
            .field("title", &self.title)
            .field("hint", &self.hint)
            .field("state", &self.state)
            .field("callback", &self.callback.as_ref().map(|_| "<callback>"))
            .field("popup", &self.popup)
            .field("set_btn", &self.set_btn)
            .field("cancel_btn", &self.cancel_btn)
            .finish()
    }
}

impl PickerDialog {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hint: Option<String>,
        first_day_of_week: Weekday,
        today: NaiveDate,
        metrics: Metrics,
        on_date_set: Option<OnDateSet>,
    ) -> Result<Self, DateError> {
        let surface = CalendarSurface::new(year, month, day, first_day_of_week, today, metrics)?;
        let mut dialog = Self {
            surface,
            title: String::new(),
            hint,
            state: DialogState::Open,
            callback: on_date_set,
            popup: Rect::default(),
            set_btn: Rect::default(),
            cancel_btn: Rect::default(),
        };
        dialog.refresh_title();
        Ok(dialog)
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn year(&self)  -> i32 { self.surface.year() }
    pub fn month(&self) -> u32 { self.surface.month() }
    pub fn day(&self)   -> u32 { self.surface.day() }

    pub fn title(&self) -> &str { &self.title }
    pub fn state(&self) -> DialogState { self.state }
    pub fn surface(&self) -> &CalendarSurface { &self.surface }

    pub fn set_button(&self)    -> Rect { self.set_btn }
    pub fn cancel_button(&self) -> Rect { self.cancel_btn }

    // ── Lifecycle ─────────────────────────────────────────────────────────────

    /// Confirm the highlighted date. The registered callback fires exactly
    /// once; confirming a closed dialog is a no-op.
    pub fn confirm(&mut self) -> DialogResponse {
        if self.is_closed() {
            return DialogResponse::None;
        }
        self.state = DialogState::Confirmed;
        if let Some(cb) = self.callback.as_mut() {
            let d = self.surface.selected_date();
            cb(&self.surface, d.year, d.month, d.day);
        }
        DialogResponse::Confirmed
    }

    /// Dismiss without selecting; the callback is never invoked.
    pub fn cancel(&mut self) -> DialogResponse {
        if self.is_closed() {
            return DialogResponse::None;
        }
        self.state = DialogState::Cancelled;
        DialogResponse::Cancelled
    }

    fn is_closed(&self) -> bool {
        matches!(self.state, DialogState::Confirmed | DialogState::Cancelled)
    }

    // ── Date programming ──────────────────────────────────────────────────────

    pub fn update_date(&mut self, year: i32, month: u32, day: u32) -> Result<(), DateError> {
        self.surface.set_date(year, month, day)?;
        self.on_date_changed();
        Ok(())
    }

    pub fn go_today(&mut self) {
        self.surface.go_today();
        self.on_date_changed();
    }

    pub fn next_month(&mut self) {
        self.surface.next_month();
        self.on_date_changed();
    }

    pub fn previous_month(&mut self) {
        self.surface.previous_month();
        self.on_date_changed();
    }

    /// Move the selection by whole days; crossing a month boundary pages the
    /// displayed month along.
    pub fn shift_selection(&mut self, days: i64) {
        let Some(current) = self.surface.selected_date().as_naive() else {
            return;
        };
        if let Some(next) = current.checked_add_signed(Duration::days(days)) {
            if self.surface.set_date(next.year(), next.month(), next.day()).is_ok() {
                self.on_date_changed();
            }
        }
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        self.surface.set_today(today);
    }

    // ── Instance state ────────────────────────────────────────────────────────

    pub fn save_state(&self) -> SavedState {
        self.surface.selected_date()
    }

    pub fn restore_state(&mut self, state: SavedState) -> Result<(), DateError> {
        self.update_date(state.year, state.month, state.day)
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    /// Route a touch to the buttons or the calendar surface. Touching an
    /// adjacent-month day pages the displayed month, as in the classic
    /// mobile pickers this mirrors.
    pub fn handle_touch(&mut self, x: u16, y: u16) -> DialogResponse {
        if self.is_closed() {
            return DialogResponse::None;
        }
        let p = Position::new(x, y);
        if self.set_btn.contains(p) {
            return self.confirm();
        }
        if self.cancel_btn.contains(p) {
            return self.cancel();
        }

        let mut response = DialogResponse::None;
        for event in self.surface.handle_touch(x, y) {
            match event {
                SurfaceEvent::DateChanged { .. } => self.on_date_changed(),
                SurfaceEvent::CellTouched { row, col } => {
                    let paged = if self.surface.belongs_to_previous_month(row, col) {
                        self.surface.previous_month();
                        true
                    } else if self.surface.belongs_to_next_month(row, col) {
                        self.surface.next_month();
                        true
                    } else {
                        false
                    };
                    if paged {
                        self.on_date_changed();
                        response = DialogResponse::Paged {
                            notice: format!(
                                "{} {}",
                                month_name(self.surface.month()),
                                self.surface.year()
                            ),
                        };
                    }
                }
            }
        }
        response
    }

    fn on_date_changed(&mut self) {
        if !self.is_closed() {
            self.state = DialogState::DateHighlighted;
        }
        self.refresh_title();
    }

    fn refresh_title(&mut self) {
        let d = self.surface.selected_date();
        self.title = match d.as_naive() {
            Some(date) => date.format("%A, %B %-d, %Y").to_string(),
            None => format!("{} {}", month_name(d.month), d.year),
        };
    }

    // ── Layout & drawing ──────────────────────────────────────────────────────

    /// Compute the popup and button geometry for the given host area and hand
    /// the surface its slice. Call once per tick, before drawing or routing
    /// touches.
    pub fn layout(&mut self, area: Rect) {
        let (grid_w, surface_h) = self.surface.desired_size();
        let hint_h = if self.hint.is_some() { 1 } else { 0 };
        // borders + hint + grid + spacer + buttons
        let w = (grid_w + 4).min(area.width);
        let h = (surface_h + hint_h + 4).min(area.height);

        self.popup = Rect::new(
            area.x + area.width.saturating_sub(w) / 2,
            area.y + area.height.saturating_sub(h) / 2,
            w,
            h,
        );

        let inner = Rect::new(
            self.popup.x + 1,
            self.popup.y + 1,
            self.popup.width.saturating_sub(2),
            self.popup.height.saturating_sub(2),
        );
        self.surface.layout(Rect::new(
            inner.x,
            inner.y + hint_h,
            inner.width,
            surface_h.min(inner.height.saturating_sub(hint_h)),
        ));

        let btn_y = inner.y + inner.height.saturating_sub(1);
        let set_w = SET_LABEL.len() as u16;
        let cancel_w = CANCEL_LABEL.len() as u16;
        let set_x = inner.x + inner.width.saturating_sub(set_w + 1);
        self.set_btn = Rect::new(set_x, btn_y, set_w, 1);
        self.cancel_btn = Rect::new(set_x.saturating_sub(cancel_w + 2), btn_y, cancel_w, 1);
    }

    pub fn render(&self, f: &mut Frame, theme: &ThemeConfig) {
        let popup = self.popup.intersection(f.area());
        if popup.width == 0 || popup.height == 0 {
            return;
        }
        f.render_widget(Clear, popup);

        let block = Block::default()
            .title(Title::from(Line::from(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(theme.accent()).add_modifier(Modifier::BOLD),
            ))))
            .borders(Borders::ALL)
            .border_type(theme.border_type())
            .border_style(Style::default().fg(theme.border_active()))
            .style(Style::default().bg(theme.popup_bg()));
        let inner = block.inner(popup);
        f.render_widget(block, popup);

        if let Some(hint) = &self.hint {
            let line = Rect::new(inner.x, inner.y, inner.width, 1).intersection(f.area());
            if line.width > 0 && line.height > 0 {
                f.render_widget(
                    Paragraph::new(Line::from(Span::styled(
                        hint.clone(),
                        Style::default().fg(theme.fg_dim()).add_modifier(Modifier::ITALIC),
                    ))),
                    line,
                );
            }
        }

        self.surface.render(f, theme);

        for (rect, label, style) in [
            (
                self.set_btn,
                SET_LABEL,
                Style::default().fg(theme.accent()).add_modifier(Modifier::BOLD),
            ),
            (self.cancel_btn, CANCEL_LABEL, Style::default().fg(theme.fg_dim())),
        ] {
            let rect = rect.intersection(f.area());
            if rect.width > 0 && rect.height > 0 {
                f.render_widget(Paragraph::new(Line::from(Span::styled(label, style))), rect);
            }
        }
    }
}
