mod common;

use std::cell::RefCell;
use std::rc::Rc;

use chrono::Weekday;
use ratatui::layout::Position;

use dpick::dialog::{DialogResponse, DialogState, PickerDialog, SavedState};

fn counting_dialog() -> (PickerDialog, Rc<RefCell<Vec<(i32, u32, u32)>>>) {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    let mut dialog = PickerDialog::new(
        2024,
        3,
        15,
        None,
        Weekday::Sun,
        common::today(),
        common::metrics(),
        Some(Box::new(move |_, y, m, d| sink.borrow_mut().push((y, m, d)))),
    )
    .unwrap();
    dialog.layout(common::host_area());
    (dialog, calls)
}

#[test]
fn opens_with_the_initial_date_and_a_long_form_title() {
    let dialog = common::dialog_at(2024, 3, 15);
    assert_eq!(dialog.state(), DialogState::Open);
    assert_eq!((dialog.year(), dialog.month(), dialog.day()), (2024, 3, 15));
    assert_eq!(dialog.title(), "Friday, March 15, 2024");
}

#[test]
fn construction_rejects_impossible_dates() {
    let err = PickerDialog::new(
        2024,
        2,
        30,
        None,
        Weekday::Sun,
        common::today(),
        common::metrics(),
        None,
    )
    .unwrap_err();
    assert_eq!(err, dpick::grid::DateError::InvalidDay(30));
}

#[test]
fn confirm_fires_the_callback_exactly_once() {
    let (mut dialog, calls) = counting_dialog();

    assert_eq!(dialog.confirm(), DialogResponse::Confirmed);
    assert_eq!(dialog.state(), DialogState::Confirmed);
    assert_eq!(*calls.borrow(), vec![(2024, 3, 15)]);

    // A closed dialog ignores further input
    assert_eq!(dialog.confirm(), DialogResponse::None);
    assert_eq!(dialog.cancel(), DialogResponse::None);
    assert_eq!(dialog.handle_touch(0, 0), DialogResponse::None);
    assert_eq!(calls.borrow().len(), 1);
}

#[test]
fn cancel_never_calls_back() {
    let (mut dialog, calls) = counting_dialog();
    assert_eq!(dialog.cancel(), DialogResponse::Cancelled);
    assert_eq!(dialog.state(), DialogState::Cancelled);
    assert!(calls.borrow().is_empty());

    assert_eq!(dialog.confirm(), DialogResponse::None);
    assert!(calls.borrow().is_empty());
}

#[test]
fn clicking_the_buttons_confirms_or_cancels() {
    let (mut dialog, calls) = counting_dialog();
    let set = dialog.set_button();
    assert_eq!(
        dialog.handle_touch(set.x, set.y),
        DialogResponse::Confirmed
    );
    assert_eq!(*calls.borrow(), vec![(2024, 3, 15)]);

    let (mut dialog, calls) = counting_dialog();
    let cancel = dialog.cancel_button();
    assert_eq!(
        dialog.handle_touch(cancel.x, cancel.y),
        DialogResponse::Cancelled
    );
    assert!(calls.borrow().is_empty());
}

#[test]
fn buttons_do_not_overlap_the_grid() {
    let dialog = common::dialog_at(2024, 3, 15);
    let set = dialog.set_button();
    let cancel = dialog.cancel_button();
    assert!(set.width > 0 && cancel.width > 0);
    for row in dialog.surface().cells() {
        for cell in row {
            assert!(!cell.bounds.contains(Position::new(set.x, set.y)));
            assert!(!cell.bounds.contains(Position::new(cancel.x, cancel.y)));
        }
    }
}

#[test]
fn confirm_reports_the_currently_highlighted_date() {
    let (mut dialog, calls) = counting_dialog();
    dialog.update_date(2025, 12, 24).unwrap();
    assert_eq!(dialog.state(), DialogState::DateHighlighted);
    assert_eq!(dialog.title(), "Wednesday, December 24, 2025");

    dialog.confirm();
    assert_eq!(*calls.borrow(), vec![(2025, 12, 24)]);
}

#[test]
fn update_date_rejects_impossible_dates() {
    let mut dialog = common::dialog_at(2024, 3, 15);
    assert!(dialog.update_date(2024, 4, 31).is_err());
    assert!(dialog.update_date(2024, 0, 1).is_err());
    // Unchanged on failure
    assert_eq!((dialog.year(), dialog.month(), dialog.day()), (2024, 3, 15));
    assert_eq!(dialog.title(), "Friday, March 15, 2024");
}

#[test]
fn save_and_restore_reproduce_the_selection() {
    let mut first = common::dialog_at(2024, 3, 15);
    first.update_date(2024, 5, 20).unwrap();
    let state = first.save_state();
    assert_eq!(state, SavedState { year: 2024, month: 5, day: 20 });

    let mut second = common::dialog_at(2026, 1, 1);
    second.restore_state(state).unwrap();
    assert_eq!(second.save_state(), state);
    assert_eq!(second.title(), first.title());
    assert_eq!(common::selected_day(&second), Some(20));
}

#[test]
fn restore_rejects_a_corrupt_state() {
    let mut dialog = common::dialog_at(2024, 3, 15);
    assert!(dialog
        .restore_state(SavedState { year: 2024, month: 2, day: 30 })
        .is_err());
    assert_eq!((dialog.year(), dialog.month(), dialog.day()), (2024, 3, 15));
}
