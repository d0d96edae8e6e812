//! HTTP transport for the address book.
//!
//! Routing, request decoding and status mapping live here; every contact
//! rule lives in `addressbook_core`.

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use state::AppState;
