//! HTTP handlers for the address book API.
//!
//! Every handler runs exactly one use case through [`AppState::with_service`]
//! and maps its outcome to a response; failures become [`ApiError`]s.

use crate::error::ApiError;
use crate::state::AppState;
use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use addressbook_core::{ContactId, ContactInput};
use chrono::Local;
use log::*;
use serde::Serialize;

#[derive(Serialize)]
struct Message {
    message: &'static str,
}

/// Registers every route plus the extractor configs that turn malformed
/// bodies and paths into 422 responses.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        ApiError::Malformed(err.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req: &HttpRequest| {
        ApiError::Malformed(err.to_string()).into()
    }))
    .service(healthchecker)
    .service(info)
    .service(create_contact)
    .service(list_contacts)
    .service(get_contact)
    .service(update_contact)
    .service(delete_contact)
    .service(search_first_name)
    .service(search_last_name)
    .service(search_email)
    .service(upcoming_birthdays);
}

/// Reports liveness and whether the store answers queries.
#[get("/api/healthchecker")]
pub async fn healthchecker(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    debug!("servicing healthchecker request");

    state.with_service(|service| service.health_check()).await?;

    Ok(HttpResponse::Ok().json(Message {
        message: "Address Book API is up and the database is reachable",
    }))
}

#[get("/")]
pub async fn info() -> HttpResponse {
    HttpResponse::Ok().json(Message {
        message: "Welcome to Address Book",
    })
}

#[post("/contacts/create")]
pub async fn create_contact(
    state: web::Data<AppState>,
    body: web::Json<ContactInput>,
) -> Result<HttpResponse, ApiError> {
    debug!("servicing create_contact request");

    let input = body.into_inner();
    let contact = state
        .with_service(move |service| service.create_contact(&input))
        .await?;

    Ok(HttpResponse::Created().json(contact))
}

#[get("/contacts")]
pub async fn list_contacts(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    debug!("servicing list_contacts request");

    let contacts = state.with_service(|service| service.list_contacts()).await?;
    trace!("listing {} contacts", contacts.len());

    Ok(HttpResponse::Ok().json(contacts))
}

#[get("/contacts/{contact_id}")]
pub async fn get_contact(
    state: web::Data<AppState>,
    path: web::Path<ContactId>,
) -> Result<HttpResponse, ApiError> {
    debug!("servicing get_contact request");

    let id = path.into_inner();
    let contact = state
        .with_service(move |service| service.get_contact(id))
        .await?;

    Ok(HttpResponse::Ok().json(contact))
}

/// Full replacement: all five fields are overwritten.
#[put("/contacts/update/{contact_id}")]
pub async fn update_contact(
    state: web::Data<AppState>,
    path: web::Path<ContactId>,
    body: web::Json<ContactInput>,
) -> Result<HttpResponse, ApiError> {
    debug!("servicing update_contact request");

    let id = path.into_inner();
    let input = body.into_inner();
    let contact = state
        .with_service(move |service| service.update_contact(id, &input))
        .await?;

    Ok(HttpResponse::Ok().json(contact))
}

#[delete("/contacts/delete/{contact_id}")]
pub async fn delete_contact(
    state: web::Data<AppState>,
    path: web::Path<ContactId>,
) -> Result<HttpResponse, ApiError> {
    debug!("servicing delete_contact request");

    let id = path.into_inner();
    state
        .with_service(move |service| service.delete_contact(id))
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

#[get("/contacts/search_first_name/{inquiry}")]
pub async fn search_first_name(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    debug!("servicing search_first_name request");

    let inquiry = path.into_inner();
    let contacts = state
        .with_service(move |service| service.search_first_name(&inquiry))
        .await?;

    Ok(HttpResponse::Ok().json(contacts))
}

#[get("/contacts/search_last_name/{inquiry}")]
pub async fn search_last_name(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    debug!("servicing search_last_name request");

    let inquiry = path.into_inner();
    let contacts = state
        .with_service(move |service| service.search_last_name(&inquiry))
        .await?;

    Ok(HttpResponse::Ok().json(contacts))
}

#[get("/contacts/search_mail/{inquiry}")]
pub async fn search_email(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    debug!("servicing search_email request");

    let inquiry = path.into_inner();
    let contacts = state
        .with_service(move |service| service.search_email(&inquiry))
        .await?;

    Ok(HttpResponse::Ok().json(contacts))
}

/// Contacts whose birthday falls within the next seven days, today included.
#[get("/bdays")]
pub async fn upcoming_birthdays(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    debug!("servicing upcoming_birthdays request");

    let today = Local::now().date_naive();
    let contacts = state
        .with_service(move |service| service.upcoming_birthdays(today))
        .await?;

    Ok(HttpResponse::Ok().json(contacts))
}
