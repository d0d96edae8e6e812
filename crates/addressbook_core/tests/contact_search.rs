use addressbook_core::db::open_db_in_memory;
use addressbook_core::{ContactInput, ContactRepository, SqliteContactRepository};
use chrono::NaiveDate;
use rusqlite::Connection;

fn seed(conn: &Connection) {
    let repo = SqliteContactRepository::new(conn);
    for (first, last, email, phone, birthday) in [
        ("Ann", "Lee", "ann@x.com", 5_551_234, "1990-05-01"),
        ("Anne", "Leeds", "anne@x.com", 5_551_235, "1988-05-06"),
        ("ann", "Lee", "ann.lower@x.com", 5_551_236, "1979-05-10"),
        ("Bob", "Ray", "bob@x.com", 5_551_237, "2000-12-31"),
        ("Cid", "Moe", "cid@x.com", 5_551_238, "2004-01-02"),
    ] {
        let fields = ContactInput::new(first, last, email, phone, birthday)
            .validate()
            .unwrap();
        repo.create_contact(&fields).unwrap();
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn first_names(contacts: &[addressbook_core::Contact]) -> Vec<&str> {
    contacts
        .iter()
        .map(|c| c.fields.first_name.as_str())
        .collect()
}

#[test]
fn first_name_search_is_exact_and_case_sensitive() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);
    let repo = SqliteContactRepository::new(&conn);

    let hits = repo.find_by_first_name("Ann").unwrap();
    assert_eq!(first_names(&hits), vec!["Ann"]);

    assert!(repo.find_by_first_name("An").unwrap().is_empty());
    assert!(repo.find_by_first_name("ANN").unwrap().is_empty());
}

#[test]
fn last_name_search_returns_every_exact_match() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);
    let repo = SqliteContactRepository::new(&conn);

    let hits = repo.find_by_last_name("Lee").unwrap();
    assert_eq!(first_names(&hits), vec!["Ann", "ann"]);
    assert!(repo.find_by_last_name("Le").unwrap().is_empty());
}

#[test]
fn email_search_does_not_match_substrings() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);
    let repo = SqliteContactRepository::new(&conn);

    let hits = repo.find_by_email("ann@x.com").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].fields.email, "ann@x.com");
    assert!(repo.find_by_email("x.com").unwrap().is_empty());
    assert!(repo.find_by_email("ann").unwrap().is_empty());
}

#[test]
fn search_treats_sql_wildcards_literally() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);
    let repo = SqliteContactRepository::new(&conn);

    assert!(repo.find_by_first_name("%").unwrap().is_empty());
    assert!(repo.find_by_first_name("A_n").unwrap().is_empty());
}

#[test]
fn upcoming_birthdays_use_an_inclusive_seven_day_window() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);
    let repo = SqliteContactRepository::new(&conn);

    let hits = repo.find_upcoming_birthdays(date(2026, 5, 1), 7).unwrap();
    assert_eq!(first_names(&hits), vec!["Ann", "Anne"]);

    let hits = repo.find_upcoming_birthdays(date(2026, 5, 3), 7).unwrap();
    assert_eq!(first_names(&hits), vec!["Anne", "ann"]);
}

#[test]
fn upcoming_birthdays_skip_dates_already_passed_this_year() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);
    let repo = SqliteContactRepository::new(&conn);

    let hits = repo.find_upcoming_birthdays(date(2026, 5, 11), 7).unwrap();
    assert!(hits.is_empty());
}

#[test]
fn upcoming_birthdays_wrap_around_new_year_sorted_by_proximity() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);
    let repo = SqliteContactRepository::new(&conn);

    let hits = repo.find_upcoming_birthdays(date(2026, 12, 29), 7).unwrap();
    assert_eq!(first_names(&hits), vec!["Bob", "Cid"]);
}
