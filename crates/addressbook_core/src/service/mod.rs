//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation and repository calls into use-case level APIs.
//! - Keep the HTTP layer decoupled from storage details.

pub mod contact_service;
