use instacook_core::config::AuthConfig;
use instacook_db::db::{DbProvider, query::token_blacklist};

use crate::auth::depot::DepotIdentity;
use crate::auth::token::{Claims, decode_token};
use crate::error::{ServiceError, ServiceResult};

/// ## Summary
/// Extracts the token from an `Authorization: Bearer <token>` header.
///
/// Returns `None` when the header is absent. A header with another scheme
/// yields `Some("")`, which fails decoding like any other bad token.
#[must_use]
pub fn bearer_token(req: &salvo::Request) -> Option<&str> {
    let value = req.headers().get(salvo::http::header::AUTHORIZATION)?;
    let value = value.to_str().unwrap_or_default().trim();

    Some(match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => token.trim(),
        _ => "",
    })
}

/// ## Summary
/// Decodes `token` and checks it against the revocation list.
///
/// ## Errors
/// Returns `InvalidToken` if the token is invalid or revoked, or a database
/// error if the revocation lookup fails.
#[tracing::instrument(skip(db, config, token))]
pub async fn verify_token(
    db: &dyn DbProvider,
    config: &AuthConfig,
    token: &str,
) -> ServiceResult<Claims> {
    let claims = decode_token(config, token)?;

    let mut conn = db.get_connection().await?;
    if token_blacklist::contains(&mut conn, &claims.jti).await? {
        tracing::debug!(user_id = %claims.sub, jti = %claims.jti, "Rejected revoked token");
        return Err(ServiceError::InvalidToken("Token has been revoked".to_string()));
    }

    Ok(claims)
}

/// ## Summary
/// Resolves the identity of a request from its bearer token.
///
/// Token problems are recorded as [`DepotIdentity::Rejected`] rather than
/// returned, so that handlers decide whether authentication was required.
///
/// ## Errors
/// Returns an error only if the revocation lookup itself fails.
#[tracing::instrument(skip(req, db, config))]
pub async fn authenticate(
    req: &salvo::Request,
    db: &dyn DbProvider,
    config: &AuthConfig,
) -> ServiceResult<DepotIdentity> {
    let Some(token) = bearer_token(req) else {
        tracing::trace!("No authorization header; request is anonymous");
        return Ok(DepotIdentity::Anonymous);
    };

    match verify_token(db, config, token).await {
        Ok(claims) => {
            tracing::debug!(
                user_id = %claims.sub,
                token_type = ?claims.token_type,
                "Authenticated request"
            );
            Ok(DepotIdentity::Token(claims))
        }
        Err(ServiceError::InvalidToken(reason)) => Ok(DepotIdentity::Rejected(reason)),
        Err(e) => Err(e),
    }
}
