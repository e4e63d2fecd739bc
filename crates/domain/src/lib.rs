//! Domain layer for the ManPaSik orchestration core
//!
//! Contains the request-scoped value objects exchanged between services
//! (measurements, analyses, orders, consents, health records) and the pure
//! business rules that only make sense once those services are composed:
//! tier discounts, consent usability and risk escalation.
//! This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::{DomainError, feature_label};
pub use value_objects::*;
