//! Recipe access rules, listing and mutations.

pub mod input;
pub mod listing;
pub mod service;
pub mod visibility;
