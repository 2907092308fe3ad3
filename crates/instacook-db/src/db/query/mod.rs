pub mod recipe;
pub mod token_blacklist;
pub mod user;
