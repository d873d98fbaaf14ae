mod common;

use chrono::NaiveDate;

use dpick::dialog::DialogResponse;
use dpick::surface::CellStyle;

#[test]
fn clicking_a_day_selects_it() {
    // March 2024, Sunday-first: row 2 col 3 shows March 13.
    let mut dialog = common::dialog_at(2024, 3, 15);
    let response = common::touch_cell(&mut dialog, 2, 3);
    assert_eq!(response, DialogResponse::None);
    assert_eq!((dialog.year(), dialog.month(), dialog.day()), (2024, 3, 13));
    assert_eq!(common::selected_day(&dialog), Some(13));
    assert_eq!(dialog.title(), "Wednesday, March 13, 2024");
}

#[test]
fn clicking_a_leading_gray_day_pages_to_the_previous_month() {
    let mut dialog = common::dialog_at(2024, 3, 15);
    // Row 0 col 2 shows February 27, out of month.
    assert_eq!(dialog.surface().cells()[0][2].day, 27);
    assert_eq!(dialog.surface().cells()[0][2].style, CellStyle::OutOfMonth);

    let response = common::touch_cell(&mut dialog, 0, 2);
    assert_eq!(
        response,
        DialogResponse::Paged { notice: "February 2024".into() }
    );
    assert_eq!((dialog.year(), dialog.month(), dialog.day()), (2024, 2, 27));
    // The clicked day number is selected in the newly displayed month
    assert_eq!(common::selected_day(&dialog), Some(27));
}

#[test]
fn clicking_a_trailing_gray_day_pages_to_the_next_month() {
    let mut dialog = common::dialog_at(2024, 3, 15);
    // Row 5 col 3 shows April 3, out of month.
    assert_eq!(dialog.surface().cells()[5][3].day, 3);
    assert_eq!(dialog.surface().cells()[5][3].style, CellStyle::OutOfMonth);

    let response = common::touch_cell(&mut dialog, 5, 3);
    assert_eq!(
        response,
        DialogResponse::Paged { notice: "April 2024".into() }
    );
    assert_eq!((dialog.year(), dialog.month(), dialog.day()), (2024, 4, 3));
    assert_eq!(common::selected_day(&dialog), Some(3));
}

#[test]
fn paging_keeps_an_oversized_day_in_reserve() {
    let mut dialog = common::dialog_at(2024, 3, 31);
    dialog.next_month(); // April: 30 days
    assert_eq!((dialog.month(), dialog.day()), (4, 30));
    assert_eq!(common::selected_day(&dialog), None);

    dialog.next_month(); // May: 31 days, the raw day resurfaces
    assert_eq!((dialog.month(), dialog.day()), (5, 31));
    assert_eq!(common::selected_day(&dialog), Some(31));

    dialog.previous_month();
    dialog.previous_month();
    assert_eq!((dialog.month(), dialog.day()), (3, 31));
}

#[test]
fn month_paging_rolls_the_year() {
    let mut dialog = common::dialog_at(2024, 12, 15);
    dialog.next_month();
    assert_eq!((dialog.year(), dialog.month()), (2025, 1));
    dialog.previous_month();
    dialog.previous_month();
    assert_eq!((dialog.year(), dialog.month()), (2024, 11));
}

#[test]
fn shift_selection_crosses_month_boundaries() {
    let mut dialog = common::dialog_at(2024, 3, 31);
    dialog.shift_selection(1);
    assert_eq!((dialog.year(), dialog.month(), dialog.day()), (2024, 4, 1));

    dialog.shift_selection(-1);
    assert_eq!((dialog.year(), dialog.month(), dialog.day()), (2024, 3, 31));

    dialog.shift_selection(-7);
    assert_eq!(dialog.day(), 24);
}

#[test]
fn go_today_aligns_selection_and_today_marker() {
    let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let mut dialog = common::dialog_with_today(2024, 3, 15, today);
    assert_eq!(dialog.surface().today_cell(), None);

    dialog.go_today();
    assert_eq!((dialog.year(), dialog.month(), dialog.day()), (2024, 6, 1));
    assert_eq!(
        dialog.surface().today_cell(),
        dialog.surface().selected_cell()
    );
    assert_eq!(dialog.title(), "Saturday, June 1, 2024");
}

#[test]
fn clicking_an_in_month_day_never_pages() {
    let mut dialog = common::dialog_at(2024, 3, 15);
    for (row, col) in [(0, 5), (5, 0)] {
        // First in-month cell of row 0 and last of row 5
        assert_ne!(dialog.surface().cells()[row][col].style, CellStyle::OutOfMonth);
        let response = common::touch_cell(&mut dialog, row, col);
        assert_eq!(response, DialogResponse::None);
        assert_eq!(dialog.month(), 3);
    }
}
