use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, MouseButton,
            MouseEvent, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{block::Title, Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

use crate::dialog::{DialogResponse, PickerDialog};
use crate::theme::ThemeConfig;

/// How long a month-paging notice stays on the status bar.
const NOTICE_TTL: Duration = Duration::from_millis(2500);

// ─── App state ────────────────────────────────────────────────────────────────

pub struct App {
    pub dialog:    PickerDialog,
    pub theme:     ThemeConfig,
    pub theme_idx: usize,
    pub status:    Option<(String, Instant)>,
    pub show_help: bool,
    pub running:   bool,
}

impl App {
    pub fn new(dialog: PickerDialog, theme: ThemeConfig) -> Self {
        let all = ThemeConfig::all_themes();
        let idx = all.iter().position(|t| t.name == theme.name).unwrap_or(0);
        Self {
            dialog,
            theme,
            theme_idx: idx,
            status: None,
            show_help: false,
            running: true,
        }
    }

    // ── TUI loop ──────────────────────────────────────────────────────────────

    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend  = CrosstermBackend::new(stdout);
        let mut term = Terminal::new(backend)?;

        let result = self.event_loop(&mut term);

        disable_raw_mode()?;
        execute!(term.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        term.show_cursor()?;
        result
    }

    fn event_loop(&mut self, term: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        let tick = Duration::from_millis(50);
        while self.running {
            if let Some((_, expires)) = &self.status {
                if Instant::now() >= *expires {
                    self.status = None;
                }
            }
            self.dialog.set_today(Local::now().date_naive());

            term.draw(|f| {
                let root = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(1)])
                    .split(f.area());
                self.dialog.layout(root[0]);
                self.draw(f, root[0], root[1]);
            })?;

            if event::poll(tick)? {
                match event::read()? {
                    Event::Key(key) => self.on_key(key),
                    Event::Mouse(m) => self.on_mouse(m),
                    _ => {}
                }
            }
        }
        Ok(())
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    fn on_key(&mut self, key: crossterm::event::KeyEvent) {
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                let r = self.dialog.cancel();
                self.on_response(r);
            }
            KeyCode::Enter => {
                let r = self.dialog.confirm();
                self.on_response(r);
            }
            KeyCode::Right | KeyCode::Char('l') => self.dialog.shift_selection(1),
            KeyCode::Left  | KeyCode::Char('h') => self.dialog.shift_selection(-1),
            KeyCode::Down  | KeyCode::Char('j') => self.dialog.shift_selection(7),
            KeyCode::Up    | KeyCode::Char('k') => self.dialog.shift_selection(-7),
            KeyCode::Char(']') => self.dialog.next_month(),
            KeyCode::Char('[') => self.dialog.previous_month(),
            KeyCode::Char('t') => self.dialog.go_today(),
            // T (Shift+T) — cycle through themes
            KeyCode::Char('T') => {
                let themes = ThemeConfig::all_themes();
                self.theme_idx = (self.theme_idx + 1) % themes.len();
                self.theme     = themes[self.theme_idx].clone();
                let _ = self.theme.save();
            }
            KeyCode::Char('?') => self.show_help = true,
            _ => {}
        }
    }

    fn on_mouse(&mut self, m: MouseEvent) {
        if m.kind == MouseEventKind::Down(MouseButton::Left) {
            if self.show_help {
                self.show_help = false;
                return;
            }
            let r = self.dialog.handle_touch(m.column, m.row);
            self.on_response(r);
        }
    }

    fn on_response(&mut self, response: DialogResponse) {
        match response {
            DialogResponse::Paged { notice } => {
                tracing::debug!("paged to {notice}");
                self.status = Some((notice, Instant::now() + NOTICE_TTL));
            }
            DialogResponse::Confirmed => {
                tracing::info!("date set: {:?}", self.dialog.save_state());
                self.running = false;
            }
            DialogResponse::Cancelled => {
                tracing::debug!("picker cancelled");
                self.running = false;
            }
            DialogResponse::None => {}
        }
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&self, f: &mut Frame, content: Rect, status: Rect) {
        f.render_widget(
            Block::default().style(Style::default().bg(self.theme.bg()).fg(self.theme.fg())),
            f.area(),
        );

        self.dialog.render(f, &self.theme);
        self.draw_statusbar(f, status);

        if self.show_help {
            self.draw_help(f, content);
        }
    }

    fn draw_statusbar(&self, f: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }
        let t = &self.theme;
        let notice = self.status.as_ref().map(|(s, _)| s.as_str()).unwrap_or("");
        let bar = Paragraph::new(Line::from(vec![
            Span::styled(
                " PICK ",
                Style::default().bg(t.accent()).fg(t.bg()).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "  hjkl:move  [:prev  ]:next  t:today  Enter:set  Esc:cancel  T:theme  ?:help",
                Style::default().fg(t.fg_dim()),
            ),
            Span::styled(
                format!("  {notice}"),
                Style::default().fg(t.accent()).add_modifier(Modifier::ITALIC),
            ),
        ]))
        .style(Style::default().bg(t.bg2()));
        f.render_widget(bar, area);
    }

    fn draw_help(&self, f: &mut Frame, area: Rect) {
        let t    = &self.theme;
        let rect = centered(60, 70, area);
        f.render_widget(Clear, rect);

        let title = Line::from(Span::styled(
            " Keyboard Shortcuts ",
            Style::default().fg(t.accent()).add_modifier(Modifier::BOLD),
        ));
        let block = Block::default()
            .title(Title::from(title))
            .borders(Borders::ALL)
            .border_type(t.border_type())
            .border_style(Style::default().fg(t.border_active()))
            .style(Style::default().bg(t.popup_bg()));

        let accent = Style::default().fg(t.accent()).add_modifier(Modifier::BOLD);
        let dim    = Style::default().fg(t.fg_dim());
        let lines  = vec![
            Line::from(""),
            Line::from(Span::styled("  Navigation", accent)),
            Line::from(Span::styled("  h/j/k/l  ←↓↑→     Move by day / week", dim)),
            Line::from(Span::styled("  [ / ]              Prev / Next month", dim)),
            Line::from(Span::styled("  t                  Jump to today", dim)),
            Line::from(Span::styled("  Click a day        Select it (gray days page the month)", dim)),
            Line::from(""),
            Line::from(Span::styled("  Picking", accent)),
            Line::from(Span::styled("  Enter / [ Set ]    Confirm the highlighted date", dim)),
            Line::from(Span::styled("  Esc / [ Cancel ]   Leave without picking", dim)),
            Line::from(""),
            Line::from(Span::styled("  General", accent)),
            Line::from(Span::styled("  T                  Cycle themes", dim)),
            Line::from(Span::styled("  ?                  Toggle help", dim)),
        ];

        f.render_widget(
            Paragraph::new(lines).block(block).style(Style::default().fg(t.fg())),
            rect,
        );
    }
}

// ─── Utilities ────────────────────────────────────────────────────────────────

fn centered(pct_x: u16, pct_y: u16, r: Rect) -> Rect {
    let vert = Layout::default().direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - pct_y) / 2),
            Constraint::Percentage(pct_y),
            Constraint::Percentage((100 - pct_y) / 2),
        ]).split(r);
    Layout::default().direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - pct_x) / 2),
            Constraint::Percentage(pct_x),
            Constraint::Percentage((100 - pct_x) / 2),
        ]).split(vert[1])[1]
}
