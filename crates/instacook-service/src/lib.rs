pub mod auth;
pub mod error;
pub mod recipe;
pub mod user;
