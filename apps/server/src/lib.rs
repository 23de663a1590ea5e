#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod services;
pub mod session;

// Re-exports for public API
pub use config::ServerConfig;
pub use error::AppError;
pub use errors::DomainError;
pub use services::game_flow::GameFlow;
