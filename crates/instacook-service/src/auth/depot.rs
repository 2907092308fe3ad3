//! Depot helpers for the identity attached to a request.

use crate::auth::token::{Claims, TokenType};
use crate::error::{ServiceError, ServiceResult};

pub mod depot_keys {
    pub const IDENTITY: &str = "__identity";
}

/// Outcome of authenticating a request, stored in the depot by the auth
/// middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepotIdentity {
    /// A valid, unrevoked token of either type.
    Token(Claims),
    /// No `Authorization` header was sent.
    Anonymous,
    /// A token was sent but is unusable; carries the reason.
    Rejected(String),
}

static ANONYMOUS: DepotIdentity = DepotIdentity::Anonymous;

fn identity(depot: &salvo::Depot) -> &DepotIdentity {
    depot
        .get::<DepotIdentity>(depot_keys::IDENTITY)
        .unwrap_or(&ANONYMOUS)
}

fn token_of_type(depot: &salvo::Depot, wanted: TokenType) -> ServiceResult<&Claims> {
    match identity(depot) {
        DepotIdentity::Token(claims) if claims.token_type == wanted => Ok(claims),
        DepotIdentity::Token(_) => Err(ServiceError::InvalidToken(match wanted {
            TokenType::Access => "Only non-refresh tokens are allowed".to_string(),
            TokenType::Refresh => "Only refresh tokens are allowed".to_string(),
        })),
        DepotIdentity::Anonymous => Err(ServiceError::NotAuthenticated),
        DepotIdentity::Rejected(reason) => Err(ServiceError::InvalidToken(reason.clone())),
    }
}

/// Get the claims of the access token presented with the request.
///
/// ## Errors
/// Returns `NotAuthenticated` without a token, and `InvalidToken` for a
/// rejected or refresh token.
pub fn require_access(depot: &salvo::Depot) -> ServiceResult<&Claims> {
    token_of_type(depot, TokenType::Access)
}

/// Get the claims of a fresh access token.
///
/// ## Errors
/// As [`require_access`], plus `FreshTokenRequired` for non-fresh tokens.
pub fn require_fresh_access(depot: &salvo::Depot) -> ServiceResult<&Claims> {
    let claims = require_access(depot)?;
    if claims.fresh {
        Ok(claims)
    } else {
        Err(ServiceError::FreshTokenRequired)
    }
}

/// Get the claims of the refresh token presented with the request.
///
/// ## Errors
/// Returns `NotAuthenticated` without a token, and `InvalidToken` for a
/// rejected or access token.
pub fn require_refresh(depot: &salvo::Depot) -> ServiceResult<&Claims> {
    token_of_type(depot, TokenType::Refresh)
}

/// Get the access token claims if the request carried a token at all.
///
/// ## Errors
/// A token that was sent but is unusable is still an error.
pub fn optional_access(depot: &salvo::Depot) -> ServiceResult<Option<&Claims>> {
    match identity(depot) {
        DepotIdentity::Anonymous => Ok(None),
        _ => require_access(depot).map(Some),
    }
}

/// ID of the calling user for endpoints where authentication is optional.
///
/// ## Errors
/// See [`optional_access`].
pub fn optional_user_id(depot: &salvo::Depot) -> ServiceResult<Option<uuid::Uuid>> {
    Ok(optional_access(depot)?.map(|claims| claims.sub))
}
