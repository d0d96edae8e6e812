//! Core domain logic for the address book.
//! This crate is the single source of truth for contact invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::birthday::DEFAULT_BIRTHDAY_WINDOW_DAYS;
pub use model::contact::{Contact, ContactFields, ContactId, ContactInput};
pub use model::validation::{
    ContactField, ContactValidationError, FieldViolation, ViolationKind,
};
pub use repo::contact_repo::{ContactRepository, RepoError, RepoResult, SqliteContactRepository};
pub use service::contact_service::{ContactService, ServiceError, ServiceResult};

