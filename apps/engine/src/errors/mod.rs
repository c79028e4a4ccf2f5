//! Error handling for the race engine.

pub mod domain;

pub use domain::DomainError;
