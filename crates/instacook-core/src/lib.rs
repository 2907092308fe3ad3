//! Shared configuration, error and value types for the InstaCook service.

pub mod config;
pub mod error;
pub mod types;
pub mod validation;
