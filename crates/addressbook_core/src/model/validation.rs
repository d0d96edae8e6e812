//! Validation Layer for contact payloads, ids and search queries.
//!
//! # Responsibility
//! - Check every field constraint before any storage mutation.
//! - Normalize accepted input (email domain casing, birthday parsing).
//! - Report all offending fields at once.
//!
//! # Invariants
//! - Validation is pure: it never touches storage.
//! - Lengths are counted in Unicode scalar values, not bytes.

use crate::model::contact::{ContactFields, ContactId, ContactInput};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const FIRST_NAME_MAX_CHARS: usize = 25;
pub const LAST_NAME_MAX_CHARS: usize = 40;
pub const EMAIL_MAX_CHARS: usize = 50;
/// Phone numbers must be strictly greater than this value.
pub const PHONE_MIN_EXCLUSIVE: i64 = 100;
pub const PHONE_MAX_INCLUSIVE: i64 = 999_999_999;

const BIRTHDAY_FORMAT: &str = "%Y-%m-%d";

static EMAIL_LOCAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*$"#)
        .expect("valid email local-part regex")
});
static DOMAIN_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$")
        .expect("valid domain label regex")
});

/// Field a violation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Id,
    FirstName,
    LastName,
    Email,
    Phone,
    Birthday,
    /// Search inquiry path parameter.
    Query,
}

impl ContactField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Birthday => "birthday",
            Self::Query => "query",
        }
    }
}

impl Display for ContactField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What is wrong with a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    Length { min: usize, max: usize, actual: usize },
    InvalidEmail,
    OutOfRange {
        min_exclusive: i64,
        max_inclusive: i64,
        actual: i64,
    },
    InvalidDate(String),
    Empty,
    NonPositiveId(i64),
}

impl Display for ViolationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Length { min, max, actual } => write!(
                f,
                "length must be between {min} and {max} characters, got {actual}"
            ),
            Self::InvalidEmail => write!(f, "value is not a valid email address"),
            Self::OutOfRange {
                min_exclusive,
                max_inclusive,
                actual,
            } => write!(
                f,
                "value must be greater than {min_exclusive} and at most {max_inclusive}, got {actual}"
            ),
            Self::InvalidDate(value) => {
                write!(f, "`{value}` is not a valid date (expected YYYY-MM-DD)")
            }
            Self::Empty => write!(f, "value must not be empty"),
            Self::NonPositiveId(id) => write!(f, "id must be >= 1, got {id}"),
        }
    }
}

/// One offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: ContactField,
    pub kind: ViolationKind,
}

impl Display for FieldViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.kind)
    }
}

/// Rejected input; carries every violation found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactValidationError {
    violations: Vec<FieldViolation>,
}

impl ContactValidationError {
    pub fn single(field: ContactField, kind: ViolationKind) -> Self {
        Self {
            violations: vec![FieldViolation { field, kind }],
        }
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Returns whether `field` is among the offending fields.
    pub fn has_field(&self, field: ContactField) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid contact input: ")?;
        for (index, violation) in self.violations.iter().enumerate() {
            if index > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl Error for ContactValidationError {}

#[derive(Default)]
struct Violations(Vec<FieldViolation>);

impl Violations {
    fn push(&mut self, field: ContactField, kind: ViolationKind) {
        self.0.push(FieldViolation { field, kind });
    }

    fn into_result<T>(self, value: T) -> Result<T, ContactValidationError> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(ContactValidationError { violations: self.0 })
        }
    }
}

impl ContactInput {
    /// Validates and normalizes this payload into storable fields.
    ///
    /// # Errors
    /// Returns every violated constraint, not only the first one.
    pub fn validate(&self) -> Result<ContactFields, ContactValidationError> {
        let mut violations = Violations::default();

        let birthday = match NaiveDate::parse_from_str(self.birthday.trim(), BIRTHDAY_FORMAT) {
            Ok(date) => Some(date),
            Err(_) => {
                violations.push(
                    ContactField::Birthday,
                    ViolationKind::InvalidDate(self.birthday.clone()),
                );
                None
            }
        };

        let email = normalize_email(&self.email);
        check_fields(
            &mut violations,
            &self.first_name,
            &self.last_name,
            &email,
            self.phone,
        );

        match birthday {
            Some(birthday) => violations.into_result(ContactFields {
                first_name: self.first_name.clone(),
                last_name: self.last_name.clone(),
                email,
                phone: self.phone,
                birthday,
            }),
            None => Err(ContactValidationError {
                violations: violations.0,
            }),
        }
    }
}

impl ContactFields {
    /// Re-checks constraints on already typed fields.
    ///
    /// Used by write paths and when reading rows back from storage.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        let mut violations = Violations::default();
        check_fields(
            &mut violations,
            &self.first_name,
            &self.last_name,
            &self.email,
            self.phone,
        );
        violations.into_result(())
    }
}

/// Accepts ids usable as a primary key lookup.
pub fn validate_contact_id(id: ContactId) -> Result<ContactId, ContactValidationError> {
    if id < 1 {
        return Err(ContactValidationError::single(
            ContactField::Id,
            ViolationKind::NonPositiveId(id),
        ));
    }
    Ok(id)
}

/// Accepts non-empty search inquiries. The value is not trimmed.
pub fn validate_search_query(query: &str) -> Result<&str, ContactValidationError> {
    if query.is_empty() {
        return Err(ContactValidationError::single(
            ContactField::Query,
            ViolationKind::Empty,
        ));
    }
    Ok(query)
}

/// Lowercases the domain part; the local part is case-sensitive and kept.
pub fn normalize_email(email: &str) -> String {
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{local}@{}", domain.to_ascii_lowercase()),
        None => email.to_string(),
    }
}

/// Syntax check for a single email address.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if domain.contains('@') || !EMAIL_LOCAL_RE.is_match(local) {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| DOMAIN_LABEL_RE.is_match(label))
}

fn check_fields(
    violations: &mut Violations,
    first_name: &str,
    last_name: &str,
    email: &str,
    phone: i64,
) {
    check_length(violations, ContactField::FirstName, first_name, 1, FIRST_NAME_MAX_CHARS);
    check_length(violations, ContactField::LastName, last_name, 1, LAST_NAME_MAX_CHARS);

    let email_chars = email.chars().count();
    if email_chars > EMAIL_MAX_CHARS {
        violations.push(
            ContactField::Email,
            ViolationKind::Length {
                min: 1,
                max: EMAIL_MAX_CHARS,
                actual: email_chars,
            },
        );
    } else if !is_valid_email(email) {
        violations.push(ContactField::Email, ViolationKind::InvalidEmail);
    }

    if phone <= PHONE_MIN_EXCLUSIVE || phone > PHONE_MAX_INCLUSIVE {
        violations.push(
            ContactField::Phone,
            ViolationKind::OutOfRange {
                min_exclusive: PHONE_MIN_EXCLUSIVE,
                max_inclusive: PHONE_MAX_INCLUSIVE,
                actual: phone,
            },
        );
    }
}

fn check_length(
    violations: &mut Violations,
    field: ContactField,
    value: &str,
    min: usize,
    max: usize,
) {
    let actual = value.chars().count();
    if actual < min || actual > max {
        violations.push(field, ViolationKind::Length { min, max, actual });
    }
}
