use anyhow::{anyhow, Result};
use chrono::{Datelike, Local, NaiveDate};
use std::cell::RefCell;
use std::rc::Rc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dpick::app::App;
use dpick::config::{self, AppConfig};
use dpick::dialog::PickerDialog;
use dpick::surface::SelectedDate;
use dpick::theme::ThemeConfig;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let mut initial: Option<NaiveDate> = None;
    let mut hint:    Option<String>    = None;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--hint" => {
                i += 1;
                hint = Some(
                    args.get(i).cloned().ok_or_else(|| anyhow!("--hint needs a value"))?,
                );
            }
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            s => {
                initial = Some(
                    NaiveDate::parse_from_str(s, "%Y-%m-%d")
                        .map_err(|_| anyhow!("expected a date like 2024-03-15, got {s:?}"))?,
                );
            }
        }
        i += 1;
    }

    // Logging to a rolling file so it doesn't interfere with the terminal
    let log_dir = config::data_dir();
    std::fs::create_dir_all(&log_dir)?;
    let file_appender = tracing_appender::rolling::daily(&log_dir, "dpick.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    tracing::info!("Starting dpick");

    let cfg   = AppConfig::load().unwrap_or_default();
    let theme = ThemeConfig::load()?;
    let today = Local::now().date_naive();

    // An explicit date wins; otherwise pick up where the last session left off.
    let start = initial.or_else(restore_state).unwrap_or(today);

    let picked: Rc<RefCell<Option<SelectedDate>>> = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&picked);

    let dialog = PickerDialog::new(
        start.year(),
        start.month(),
        start.day(),
        hint,
        cfg.first_day_of_week(),
        today,
        cfg.metrics(),
        Some(Box::new(move |_, year, month, day| {
            *sink.borrow_mut() = Some(SelectedDate { year, month, day });
        })),
    )?;

    let mut app = App::new(dialog, theme);
    app.run()?;

    save_state(app.dialog.save_state());

    if let Some(d) = *picked.borrow() {
        println!("{:04}-{:02}-{:02}", d.year, d.month, d.day);
    }
    Ok(())
}

fn restore_state() -> Option<NaiveDate> {
    let text = std::fs::read_to_string(config::data_dir().join("state.json")).ok()?;
    let state: SelectedDate = serde_json::from_str(&text).ok()?;
    let date = state.as_naive();
    if date.is_none() {
        tracing::warn!("saved state holds an impossible date, ignoring: {state:?}");
    }
    date
}

fn save_state(state: SelectedDate) {
    let path = config::data_dir().join("state.json");
    match serde_json::to_string(&state) {
        Ok(text) => {
            if let Err(e) = std::fs::write(&path, text) {
                tracing::warn!("could not save state: {e}");
            }
        }
        Err(e) => tracing::warn!("could not serialize state: {e}"),
    }
}

fn print_usage() {
    println!("dpick: pick a date in the terminal\n");
    println!("USAGE:");
    println!("  dpick [YYYY-MM-DD] [--hint <text>]\n");
    println!("The confirmed date is printed to stdout; cancelling prints nothing.");
}
