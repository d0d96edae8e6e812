use addressbook_core::db::open_db_in_memory;
use addressbook_core::{
    ContactField, ContactFields, ContactInput, ContactRepository, RepoError,
    SqliteContactRepository,
};
use chrono::NaiveDate;

fn fields(first: &str, last: &str, email: &str, phone: i64, birthday: &str) -> ContactFields {
    ContactInput::new(first, last, email, phone, birthday)
        .validate()
        .unwrap()
}

fn ann() -> ContactFields {
    fields("Ann", "Lee", "ann@x.com", 5_551_234, "1990-05-01")
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    let created = repo.create_contact(&ann()).unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.fields, ann());

    let loaded = repo.get_contact(created.id).unwrap();
    assert_eq!(loaded, created);
    assert_eq!(
        loaded.fields.birthday,
        NaiveDate::from_ymd_opt(1990, 5, 1).unwrap()
    );
}

#[test]
fn ids_are_unique_and_not_reused_after_delete() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    let first = repo.create_contact(&ann()).unwrap();
    let second = repo
        .create_contact(&fields("Bob", "Ray", "bob@x.com", 5_550_001, "1985-01-15"))
        .unwrap();
    assert_ne!(first.id, second.id);

    repo.delete_contact(second.id).unwrap();
    let third = repo
        .create_contact(&fields("Cid", "Moe", "cid@x.com", 5_550_002, "1979-11-30"))
        .unwrap();
    assert!(third.id > second.id);
}

#[test]
fn list_returns_all_contacts_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);
    assert!(repo.list_contacts().unwrap().is_empty());

    let a = repo.create_contact(&ann()).unwrap();
    let b = repo
        .create_contact(&fields("Bob", "Ray", "bob@x.com", 5_550_001, "1985-01-15"))
        .unwrap();

    let ids: Vec<_> = repo.list_contacts().unwrap().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![a.id, b.id]);
}

#[test]
fn update_replaces_all_five_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);
    let created = repo.create_contact(&ann()).unwrap();

    let replacement = fields("Anna", "Lind", "anna@y.org", 7_770_000, "1991-06-02");
    let updated = repo.update_contact(created.id, &replacement).unwrap();
    assert_eq!(updated.id, created.id);

    let loaded = repo.get_contact(created.id).unwrap();
    assert_eq!(loaded.fields, replacement);
    assert_ne!(loaded.fields.first_name, created.fields.first_name);
    assert_ne!(loaded.fields.last_name, created.fields.last_name);
    assert_ne!(loaded.fields.email, created.fields.email);
    assert_ne!(loaded.fields.phone, created.fields.phone);
    assert_ne!(loaded.fields.birthday, created.fields.birthday);
}

#[test]
fn update_may_keep_own_unique_values() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);
    let created = repo.create_contact(&ann()).unwrap();

    let mut same_keys = ann();
    same_keys.first_name = "Annie".to_string();
    let updated = repo.update_contact(created.id, &same_keys).unwrap();
    assert_eq!(updated.fields.first_name, "Annie");
}

#[test]
fn unknown_or_deleted_ids_are_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    assert!(matches!(repo.get_contact(42), Err(RepoError::NotFound(42))));
    assert!(matches!(
        repo.update_contact(42, &ann()),
        Err(RepoError::NotFound(42))
    ));
    assert!(matches!(repo.delete_contact(42), Err(RepoError::NotFound(42))));

    let created = repo.create_contact(&ann()).unwrap();
    repo.delete_contact(created.id).unwrap();
    assert!(matches!(
        repo.get_contact(created.id),
        Err(RepoError::NotFound(id)) if id == created.id
    ));
    assert!(matches!(
        repo.delete_contact(created.id),
        Err(RepoError::NotFound(_))
    ));
}

#[test]
fn delete_leaves_other_contacts_untouched() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);
    let a = repo.create_contact(&ann()).unwrap();
    let b = repo
        .create_contact(&fields("Bob", "Ray", "bob@x.com", 5_550_001, "1985-01-15"))
        .unwrap();

    repo.delete_contact(a.id).unwrap();
    assert_eq!(repo.get_contact(b.id).unwrap(), b);
    assert_eq!(repo.list_contacts().unwrap().len(), 1);
}

#[test]
fn duplicate_email_is_a_conflict_and_keeps_one_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    repo.create_contact(&fields("Ann", "Lee", "dup@x.com", 5_551_234, "1990-05-01"))
        .unwrap();
    let err = repo
        .create_contact(&fields("Bob", "Ray", "dup@x.com", 5_550_001, "1985-01-15"))
        .unwrap_err();
    assert!(matches!(err, RepoError::Conflict(ContactField::Email)));

    assert_eq!(repo.find_by_email("dup@x.com").unwrap().len(), 1);
    assert_eq!(repo.list_contacts().unwrap().len(), 1);
}

#[test]
fn duplicate_phone_is_a_conflict() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    repo.create_contact(&ann()).unwrap();
    let err = repo
        .create_contact(&fields("Bob", "Ray", "bob@x.com", 5_551_234, "1985-01-15"))
        .unwrap_err();
    assert!(matches!(err, RepoError::Conflict(ContactField::Phone)));
}

#[test]
fn update_colliding_with_another_contact_is_a_conflict() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);
    let a = repo.create_contact(&ann()).unwrap();
    let b = repo
        .create_contact(&fields("Bob", "Ray", "bob@x.com", 5_550_001, "1985-01-15"))
        .unwrap();

    let stolen_email = fields("Bob", "Ray", "ann@x.com", 5_550_001, "1985-01-15");
    let err = repo.update_contact(b.id, &stolen_email).unwrap_err();
    assert!(matches!(err, RepoError::Conflict(ContactField::Email)));

    assert_eq!(repo.get_contact(b.id).unwrap(), b);
    assert_eq!(repo.get_contact(a.id).unwrap(), a);
}

#[test]
fn writes_reject_fields_that_fail_validation() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    let mut bad = ann();
    bad.phone = 50;
    let err = repo.create_contact(&bad).unwrap_err();
    assert!(matches!(err, RepoError::Validation(ref e) if e.has_field(ContactField::Phone)));
    assert!(repo.list_contacts().unwrap().is_empty());
}

#[test]
fn reads_reject_corrupted_birthday() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);
    let created = repo.create_contact(&ann()).unwrap();

    conn.execute(
        "UPDATE contacts SET birthday = 'not-a-date' WHERE id = ?1;",
        [created.id],
    )
    .unwrap();

    let err = repo.get_contact(created.id).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(ref message) if message.contains("birthday")));
}

#[test]
fn ping_succeeds_on_open_connection() {
    let conn = open_db_in_memory().unwrap();
    SqliteContactRepository::new(&conn).ping().unwrap();
}
