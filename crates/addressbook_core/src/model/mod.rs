//! Contact domain model.
//!
//! # Responsibility
//! - Define the canonical contact record and its candidate input shape.
//! - Own field constraints (Validation Layer) and birthday arithmetic.
//!
//! # Invariants
//! - Every stored contact is identified by a store-assigned `ContactId`.
//! - Deletion is permanent; there are no tombstones.

pub mod birthday;
pub mod contact;
pub mod validation;
