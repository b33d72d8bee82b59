use chrono::NaiveDate;
use keeper_core::{AddressBook, BookError, ContactError};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn names_are_unique_and_case_sensitive() {
    let mut book = AddressBook::new();
    book.add_record("Bob").unwrap();
    book.add_record("bob").unwrap();

    let err = book.add_record("Bob").unwrap_err();
    assert_eq!(err, BookError::DuplicateName("Bob".to_string()));
    assert_eq!(book.len(), 2);
}

#[test]
fn duplicate_phone_is_rejected_and_list_is_unchanged() {
    let mut book = AddressBook::new();
    let record = book.add_record("Bob").unwrap();
    record.add_phone("0671234567").unwrap();

    let err = record.add_phone("0671234567").unwrap_err();
    assert_eq!(err, ContactError::DuplicatePhone("0671234567".to_string()));
    assert_eq!(record.phones().len(), 1);
}

#[test]
fn phone_edit_and_remove_fail_cleanly_on_missing_numbers() {
    let mut book = AddressBook::new();
    let record = book.add_record("Bob").unwrap();
    record.add_phone("0671234567").unwrap();

    let err = record.edit_phone("0000000000", "0979876543").unwrap_err();
    assert_eq!(err, ContactError::PhoneNotFound("0000000000".to_string()));
    let err = record.remove_phone("0000000000").unwrap_err();
    assert_eq!(err, ContactError::PhoneNotFound("0000000000".to_string()));
    assert_eq!(record.phones().len(), 1);
    assert_eq!(record.phones()[0].as_str(), "0671234567");

    record.edit_phone("0671234567", "0979876543").unwrap();
    assert_eq!(record.phones()[0].as_str(), "0979876543");
    record.remove_phone("0979876543").unwrap();
    assert!(record.phones().is_empty());
}

#[test]
fn editing_a_phone_to_another_stored_number_is_rejected() {
    let mut book = AddressBook::new();
    let record = book.add_record("Bob").unwrap();
    record.add_phone("0671234567").unwrap();
    record.add_phone("0979876543").unwrap();

    let err = record.edit_phone("0671234567", "0979876543").unwrap_err();
    assert_eq!(err, ContactError::DuplicatePhone("0979876543".to_string()));
    let phones: Vec<&str> = record.phones().iter().map(|p| p.as_str()).collect();
    assert_eq!(phones, vec!["0671234567", "0979876543"]);

    // Replacing a phone with itself stays a no-op.
    record.edit_phone("0671234567", "0671234567").unwrap();
    assert_eq!(record.phones().len(), 2);
}

#[test]
fn setters_overwrite_and_clearers_report_absence() {
    let mut book = AddressBook::new();
    let record = book.add_record("Bob").unwrap();

    record.set_email("bob@example.com").unwrap();
    record.set_email("bob@example.com").unwrap();
    assert_eq!(record.email().unwrap().as_str(), "bob@example.com");

    assert!(record.clear_email());
    assert!(!record.clear_email());
    assert!(!record.clear_address());
}

#[test]
fn lookups_miss_with_not_found_and_leave_the_book_intact() {
    let mut book = AddressBook::new();
    book.add_record("Bob").unwrap();

    assert_eq!(
        book.find("Ann").unwrap_err(),
        BookError::NotFound("Ann".to_string())
    );
    assert_eq!(
        book.delete_record("Ann").unwrap_err(),
        BookError::NotFound("Ann".to_string())
    );
    assert_eq!(book.len(), 1);

    let removed = book.delete_record("Bob").unwrap();
    assert_eq!(removed.name(), "Bob");
    assert!(book.is_empty());
}

#[test]
fn search_is_substring_and_case_insensitive_in_insertion_order() {
    let mut book = AddressBook::new();
    book.add_record("Roberta").unwrap();
    book.add_record("Ann").unwrap();
    book.add_record("bob").unwrap();

    let names: Vec<&str> = book.search("OB").iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["Roberta", "bob"]);
    assert!(book.search("zzz").is_empty());
}

#[test]
fn days_to_birthday_wraps_across_the_year_boundary() {
    let mut book = AddressBook::new();
    let record = book.add_record("Bob").unwrap();
    record.set_birthday("05.01.1990").unwrap();

    assert_eq!(record.days_to_birthday(date(2024, 1, 5)).unwrap(), 0);
    assert_eq!(record.days_to_birthday(date(2024, 1, 1)).unwrap(), 4);
    // Already passed this year: wrap to 2025-01-05.
    assert_eq!(record.days_to_birthday(date(2024, 12, 31)).unwrap(), 5);

    let bare = book.add_record("Ann").unwrap();
    assert_eq!(
        bare.days_to_birthday(date(2024, 1, 1)).unwrap_err(),
        ContactError::NoBirthday
    );
}

#[test]
fn upcoming_birthdays_window_and_weekend_shift() {
    // 2024-03-01 is a Friday; 2024-03-03 a Sunday.
    let today = date(2024, 3, 1);
    let mut book = AddressBook::new();

    book.add_record("Far").unwrap().set_birthday("15.03.1990").unwrap();
    book.add_record("Sunday").unwrap().set_birthday("03.03.1985").unwrap();
    book.add_record("Today").unwrap().set_birthday("01.03.2000").unwrap();
    book.add_record("NoBirthday").unwrap();

    let upcoming = book.upcoming_birthdays(today, 7);
    let summary: Vec<(&str, NaiveDate)> = upcoming
        .iter()
        .map(|hit| (hit.name.as_str(), hit.celebrated_on))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Today", date(2024, 3, 1)),
            ("Sunday", date(2024, 3, 4)),
        ]
    );
    assert_eq!(upcoming[1].birthday, date(1985, 3, 3));
}

#[test]
fn upcoming_birthdays_breaks_date_ties_by_name() {
    let today = date(2024, 3, 1);
    let mut book = AddressBook::new();
    // Saturday 02.03 and Sunday 03.03 both celebrate on Monday 04.03.
    book.add_record("Zed").unwrap().set_birthday("02.03.1970").unwrap();
    book.add_record("Amy").unwrap().set_birthday("03.03.1980").unwrap();

    let upcoming = book.upcoming_birthdays(today, 7);
    let names: Vec<&str> = upcoming.iter().map(|hit| hit.name.as_str()).collect();
    assert_eq!(names, vec!["Amy", "Zed"]);
}
