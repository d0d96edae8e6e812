//! Contact records.
//!
//! # Responsibility
//! - Define the untrusted input payload and the validated field set.
//! - Define the persisted record returned to callers.
//!
//! # Invariants
//! - `id` is assigned by storage once and never changes.
//! - All five non-id fields are mandatory.
//! - `ContactFields` values built by `ContactInput::validate()` satisfy every
//!   field constraint; repositories re-check them before writing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Store-assigned primary key.
pub type ContactId = i64;

/// Candidate contact payload as received from a caller.
///
/// `birthday` stays textual here so that date parsing is reported as a field
/// violation instead of a transport error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: i64,
    /// ISO calendar date, `YYYY-MM-DD`.
    pub birthday: String,
}

impl ContactInput {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        phone: i64,
        birthday: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone,
            birthday: birthday.into(),
        }
    }
}

/// The five user-controlled contact fields, typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: i64,
    pub birthday: NaiveDate,
}

/// Persisted contact.
///
/// Serialized flat as `{id, first_name, last_name, email, phone, birthday}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    #[serde(flatten)]
    pub fields: ContactFields,
}

impl Contact {
    pub fn new(id: ContactId, fields: ContactFields) -> Self {
        Self { id, fields }
    }
}
