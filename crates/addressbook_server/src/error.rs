//! HTTP error mapping.
//!
//! # Responsibility
//! - Translate service outcomes into status codes and `{"detail": ...}` bodies.
//! - Log every failed request once, at the boundary.
//!
//! # Invariants
//! - Client errors never expose storage internals.
//! - A failing request never takes the process down.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use addressbook_core::{ContactField, FieldViolation, ServiceError};
use log::{error, warn};
use serde::Serialize;
use std::fmt;

/// The address book API was unable to service a request.
#[derive(Debug)]
pub enum ApiError {
    /// One or more fields failed validation (422).
    Validation(Vec<FieldViolation>),
    /// The request body or path could not be decoded (422).
    Malformed(String),
    /// Nothing matched the request (404).
    NotFound,
    /// Email or phone already taken by another contact (409).
    Conflict(ContactField),
    /// The store could not be reached (500).
    StoreUnavailable(String),
    /// Something else went wrong on our end (500).
    Internal(String),
}

#[derive(Serialize)]
struct Detail<T: Serialize> {
    detail: T,
}

#[derive(Serialize)]
struct ViolationBody {
    field: ContactField,
    message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ApiError::*;

        match self {
            Validation(violations) => {
                write!(f, "Validation failed:")?;
                for violation in violations {
                    write!(f, " [{violation}]")?;
                }
                Ok(())
            }
            Malformed(s) => write!(f, "Malformed request: {s}"),
            NotFound => write!(f, "Not found"),
            Conflict(field) => write!(f, "Contact with this {field} already exists"),
            StoreUnavailable(s) => write!(f, "Store unavailable: {s}"),
            Internal(s) => write!(f, "Internal Server Error: {s}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Malformed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::StoreUnavailable(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("event=request_failed module=http status={} error={}", status.as_u16(), self);
        } else {
            warn!("event=request_rejected module=http status={} error={}", status.as_u16(), self);
        }

        let mut response = HttpResponse::build(status);
        match self {
            ApiError::Validation(violations) => response.json(Detail {
                detail: violations
                    .iter()
                    .map(|v| ViolationBody {
                        field: v.field,
                        message: v.kind.to_string(),
                    })
                    .collect::<Vec<_>>(),
            }),
            ApiError::Malformed(s) => response.json(Detail { detail: s }),
            ApiError::NotFound => response.json(Detail { detail: "Not found" }),
            ApiError::Conflict(field) => response.json(Detail {
                detail: format!("Contact with this {field} already exists"),
            }),
            ApiError::StoreUnavailable(_) => response.json(Detail {
                detail: "Error connecting to the database",
            }),
            ApiError::Internal(_) => response.json(Detail {
                detail: "Internal Server Error. Try again later.",
            }),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> ApiError {
        match e {
            ServiceError::Validation(err) => ApiError::Validation(err.violations().to_vec()),
            ServiceError::NotFound(_) | ServiceError::NoMatches => ApiError::NotFound,
            ServiceError::Conflict(field) => ApiError::Conflict(field),
            ServiceError::StoreUnavailable(err) => ApiError::StoreUnavailable(err.to_string()),
            ServiceError::Repo(err) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<actix_web::error::BlockingError> for ApiError {
    fn from(e: actix_web::error::BlockingError) -> ApiError {
        ApiError::Internal(format!("blocking task failed: {e}"))
    }
}
