//! Contact repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and exact-match lookups over the `contacts` table.
//! - Keep SQL details inside the core persistence boundary.
//! - Translate unique-index failures into semantic conflicts.
//!
//! # Invariants
//! - Write paths must call `ContactFields::validate()` before SQL mutations.
//! - Every mutation is a single SQL statement; nothing is left half-written.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::birthday::days_until_birthday;
use crate::model::contact::{Contact, ContactFields, ContactId};
use crate::model::validation::{ContactField, ContactValidationError};
use chrono::NaiveDate;
use rusqlite::{ffi, params, Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CONTACT_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    email,
    phone,
    birthday
FROM contacts";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for contact persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ContactValidationError),
    Db(DbError),
    NotFound(ContactId),
    /// Another contact already holds this unique value.
    Conflict(ContactField),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "contact not found: {id}"),
            Self::Conflict(field) => {
                write!(f, "a contact with this {field} already exists")
            }
            Self::InvalidData(message) => {
                write!(f, "invalid persisted contact data: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::Conflict(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<ContactValidationError> for RepoError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        match unique_violation_field(&value) {
            Some(field) => Self::Conflict(field),
            None => Self::Db(DbError::Sqlite(value)),
        }
    }
}

/// Repository interface for contact operations.
pub trait ContactRepository {
    fn create_contact(&self, fields: &ContactFields) -> RepoResult<Contact>;
    fn get_contact(&self, id: ContactId) -> RepoResult<Contact>;
    fn list_contacts(&self) -> RepoResult<Vec<Contact>>;
    /// Replaces all five fields of an existing contact.
    fn update_contact(&self, id: ContactId, fields: &ContactFields) -> RepoResult<Contact>;
    fn delete_contact(&self, id: ContactId) -> RepoResult<()>;
    fn find_by_first_name(&self, first_name: &str) -> RepoResult<Vec<Contact>>;
    fn find_by_last_name(&self, last_name: &str) -> RepoResult<Vec<Contact>>;
    fn find_by_email(&self, email: &str) -> RepoResult<Vec<Contact>>;
    /// Contacts whose next birthday is at most `window_days` after `today`,
    /// soonest first.
    fn find_upcoming_birthdays(
        &self,
        today: NaiveDate,
        window_days: u32,
    ) -> RepoResult<Vec<Contact>>;
    /// Round-trips a trivial statement to prove the store is reachable.
    fn ping(&self) -> RepoResult<()>;
}

/// SQLite-backed contact repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_contacts(&self, sql: &str, params: impl rusqlite::Params) -> RepoResult<Vec<Contact>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut contacts = Vec::new();

        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }

        Ok(contacts)
    }

    fn find_by_column(&self, column: ContactField, value: &str) -> RepoResult<Vec<Contact>> {
        let sql = format!(
            "{CONTACT_SELECT_SQL} WHERE {} = ?1 ORDER BY id ASC;",
            column.as_str()
        );
        self.query_contacts(&sql, [value])
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn create_contact(&self, fields: &ContactFields) -> RepoResult<Contact> {
        fields.validate()?;

        let id = self.conn.query_row(
            "INSERT INTO contacts (
                first_name,
                last_name,
                email,
                phone,
                birthday
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id;",
            params![
                fields.first_name.as_str(),
                fields.last_name.as_str(),
                fields.email.as_str(),
                fields.phone,
                fields.birthday,
            ],
            |row| row.get::<_, ContactId>(0),
        )?;

        Ok(Contact::new(id, fields.clone()))
    }

    fn get_contact(&self, id: ContactId) -> RepoResult<Contact> {
        self.query_contacts(&format!("{CONTACT_SELECT_SQL} WHERE id = ?1;"), [id])?
            .into_iter()
            .next()
            .ok_or(RepoError::NotFound(id))
    }

    fn list_contacts(&self) -> RepoResult<Vec<Contact>> {
        self.query_contacts(&format!("{CONTACT_SELECT_SQL} ORDER BY id ASC;"), [])
    }

    fn update_contact(&self, id: ContactId, fields: &ContactFields) -> RepoResult<Contact> {
        fields.validate()?;

        let changed = self.conn.execute(
            "UPDATE contacts
             SET
                first_name = ?1,
                last_name = ?2,
                email = ?3,
                phone = ?4,
                birthday = ?5
             WHERE id = ?6;",
            params![
                fields.first_name.as_str(),
                fields.last_name.as_str(),
                fields.email.as_str(),
                fields.phone,
                fields.birthday,
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(Contact::new(id, fields.clone()))
    }

    fn delete_contact(&self, id: ContactId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM contacts WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn find_by_first_name(&self, first_name: &str) -> RepoResult<Vec<Contact>> {
        self.find_by_column(ContactField::FirstName, first_name)
    }

    fn find_by_last_name(&self, last_name: &str) -> RepoResult<Vec<Contact>> {
        self.find_by_column(ContactField::LastName, last_name)
    }

    fn find_by_email(&self, email: &str) -> RepoResult<Vec<Contact>> {
        self.find_by_column(ContactField::Email, email)
    }

    fn find_upcoming_birthdays(
        &self,
        today: NaiveDate,
        window_days: u32,
    ) -> RepoResult<Vec<Contact>> {
        let mut upcoming: Vec<(i64, Contact)> = self
            .list_contacts()?
            .into_iter()
            .filter_map(|contact| {
                days_until_birthday(contact.fields.birthday, today)
                    .filter(|days| *days <= i64::from(window_days))
                    .map(|days| (days, contact))
            })
            .collect();

        upcoming.sort_by_key(|(days, contact)| (*days, contact.id));
        Ok(upcoming.into_iter().map(|(_, contact)| contact).collect())
    }

    fn ping(&self) -> RepoResult<()> {
        let one: i64 = self.conn.query_row("SELECT 1;", [], |row| row.get(0))?;
        if one != 1 {
            return Err(RepoError::InvalidData(format!(
                "health probe returned `{one}` instead of 1"
            )));
        }
        Ok(())
    }
}

fn parse_contact_row(row: &Row<'_>) -> RepoResult<Contact> {
    let id: ContactId = row.get("id")?;

    let birthday_text: String = row.get("birthday")?;
    let birthday = NaiveDate::parse_from_str(&birthday_text, "%Y-%m-%d").map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid date `{birthday_text}` in contacts.birthday (id {id})"
        ))
    })?;

    let fields = ContactFields {
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        birthday,
    };
    fields.validate().map_err(|err| {
        RepoError::InvalidData(format!("contact {id} violates field constraints: {err}"))
    })?;

    Ok(Contact::new(id, fields))
}

/// Maps `UNIQUE constraint failed: contacts.<column>` to the offending field.
fn unique_violation_field(err: &rusqlite::Error) -> Option<ContactField> {
    let rusqlite::Error::SqliteFailure(failure, message) = err else {
        return None;
    };
    if failure.code != ErrorCode::ConstraintViolation
        || failure.extended_code != ffi::SQLITE_CONSTRAINT_UNIQUE
    {
        return None;
    }

    let message = message.as_deref().unwrap_or_default();
    if message.contains("contacts.email") {
        Some(ContactField::Email)
    } else if message.contains("contacts.phone") {
        Some(ContactField::Phone)
    } else {
        None
    }
}
