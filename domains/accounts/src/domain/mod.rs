//! Accounts domain layer: entities and registration rules

pub mod entities;
pub mod validation;
