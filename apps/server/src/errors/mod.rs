//! Error handling for the Hokm server.

pub mod domain;

pub use domain::DomainError;
