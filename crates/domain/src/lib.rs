//! contentflow domain crate
//!
//! This crate contains the core scheduling logic following hexagonal architecture:
//! - `model`: Posts and their value objects
//! - `policy`: Scheduling validation rules
//! - `ports`: Trait definitions for external dependencies (adapters)
//! - `store`: The in-memory post store
//! - `usecases`: Scheduling intents, calendar projection, recurrence, optimal times

pub mod model;
pub mod policy;
pub mod ports;
pub mod store;
pub mod usecases;

pub use model::*;
pub use policy::{
    ContentTooLongWarning, SchedulingValidator, Validation, ValidationError, ValidationIssue,
};
pub use ports::*;
pub use store::{PostStore, Saved, StoreError};
