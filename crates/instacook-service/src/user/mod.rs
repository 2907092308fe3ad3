//! Account registration, lookup and activation.

pub mod input;
pub mod service;
