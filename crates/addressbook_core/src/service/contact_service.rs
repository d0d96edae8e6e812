//! Contact use-case service.
//!
//! # Responsibility
//! - Provide the use-case entry points behind every HTTP handler.
//! - Run the Validation Layer before delegating to the repository.
//! - Turn empty search results into an explicit `NoMatches` outcome.
//!
//! # Invariants
//! - Validation always precedes the repository call; a rejected request
//!   never reaches storage.
//! - At most one repository mutation per use case.
//! - Service layer remains storage-agnostic.

use crate::model::birthday::DEFAULT_BIRTHDAY_WINDOW_DAYS;
use crate::model::contact::{Contact, ContactId, ContactInput};
use crate::model::validation::{
    validate_contact_id, validate_search_query, ContactField, ContactValidationError,
};
use crate::repo::contact_repo::{ContactRepository, RepoError};
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for contact use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Input rejected before touching storage.
    Validation(ContactValidationError),
    /// No contact with this id.
    NotFound(ContactId),
    /// A search or birthday query matched nothing.
    NoMatches,
    /// Email or phone already belongs to another contact.
    Conflict(ContactField),
    /// Health probe could not reach storage.
    StoreUnavailable(RepoError),
    /// Any other persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "contact not found: {id}"),
            Self::NoMatches => write!(f, "no matching contacts"),
            Self::Conflict(field) => write!(f, "a contact with this {field} already exists"),
            Self::StoreUnavailable(err) => write!(f, "store unavailable: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::StoreUnavailable(err) | Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ContactValidationError> for ServiceError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::Conflict(field) => Self::Conflict(field),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Contact service facade over repository implementations.
pub struct ContactService<R: ContactRepository> {
    repo: R,
}

impl<R: ContactRepository> ContactService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates the payload and stores it as a new contact.
    pub fn create_contact(&self, input: &ContactInput) -> ServiceResult<Contact> {
        let fields = input.validate()?;
        let contact = self.repo.create_contact(&fields)?;
        info!(
            "event=contact_create module=service status=ok contact_id={}",
            contact.id
        );
        Ok(contact)
    }

    pub fn get_contact(&self, id: ContactId) -> ServiceResult<Contact> {
        let id = validate_contact_id(id)?;
        Ok(self.repo.get_contact(id)?)
    }

    pub fn list_contacts(&self) -> ServiceResult<Vec<Contact>> {
        Ok(self.repo.list_contacts()?)
    }

    /// Replaces every field of contact `id` with the validated payload.
    pub fn update_contact(&self, id: ContactId, input: &ContactInput) -> ServiceResult<Contact> {
        let id = validate_contact_id(id)?;
        let fields = input.validate()?;
        let contact = self.repo.update_contact(id, &fields)?;
        info!("event=contact_update module=service status=ok contact_id={id}");
        Ok(contact)
    }

    pub fn delete_contact(&self, id: ContactId) -> ServiceResult<()> {
        let id = validate_contact_id(id)?;
        self.repo.delete_contact(id)?;
        info!("event=contact_delete module=service status=ok contact_id={id}");
        Ok(())
    }

    pub fn search_first_name(&self, query: &str) -> ServiceResult<Vec<Contact>> {
        let query = validate_search_query(query)?;
        non_empty(self.repo.find_by_first_name(query)?)
    }

    pub fn search_last_name(&self, query: &str) -> ServiceResult<Vec<Contact>> {
        let query = validate_search_query(query)?;
        non_empty(self.repo.find_by_last_name(query)?)
    }

    pub fn search_email(&self, query: &str) -> ServiceResult<Vec<Contact>> {
        let query = validate_search_query(query)?;
        non_empty(self.repo.find_by_email(query)?)
    }

    /// Contacts with a birthday in the next seven days, today included.
    pub fn upcoming_birthdays(&self, today: NaiveDate) -> ServiceResult<Vec<Contact>> {
        let contacts = self
            .repo
            .find_upcoming_birthdays(today, DEFAULT_BIRTHDAY_WINDOW_DAYS)?;
        debug!(
            "event=contact_birthdays module=service today={today} window_days={} matches={}",
            DEFAULT_BIRTHDAY_WINDOW_DAYS,
            contacts.len()
        );
        non_empty(contacts)
    }

    /// Verifies that the backing store answers queries.
    pub fn health_check(&self) -> ServiceResult<()> {
        self.repo.ping().map_err(|err| {
            warn!("event=health_check module=service status=error error={err}");
            ServiceError::StoreUnavailable(err)
        })
    }
}

fn non_empty(contacts: Vec<Contact>) -> ServiceResult<Vec<Contact>> {
    if contacts.is_empty() {
        return Err(ServiceError::NoMatches);
    }
    Ok(contacts)
}
