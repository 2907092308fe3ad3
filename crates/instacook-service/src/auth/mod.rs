//! Authentication flow.
//!
//! ## Module Organization
//!
//! - `activation`: Signed account activation tokens
//! - `authenticate`: Bearer token extraction and revocation checks
//! - `depot`: Request identity stored in the Salvo depot
//! - `password`: Password hashing and verification with Argon2
//! - `session`: Login, refresh and logout
//! - `token`: JWT access/refresh token issuance and decoding

pub mod activation;
pub mod authenticate;
pub mod depot;
pub mod password;
pub mod session;
pub mod token;

pub use depot::{
    DepotIdentity, optional_access, require_access, require_fresh_access, require_refresh,
};
pub use token::{Claims, TokenPair, TokenType};
