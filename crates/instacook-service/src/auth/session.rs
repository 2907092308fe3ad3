//! Login, token refresh and logout.

use instacook_core::config::AuthConfig;
use instacook_db::db::connection::DbConnection;
use instacook_db::db::query::{token_blacklist, user};
use serde::Deserialize;

use crate::auth::password::verify_password;
use crate::auth::token::{Claims, TokenPair, issue_access_token, issue_pair};
use crate::error::{ServiceError, ServiceResult};

/// Body of a login request.
#[derive(Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// ## Summary
/// Exchanges an email and password for a fresh token pair.
///
/// ## Errors
/// Returns `InvalidCredentials` for an unknown email or wrong password, and
/// `InactiveAccount` if the password is right but the account is not
/// activated.
#[tracing::instrument(skip(conn, config, password))]
pub async fn login(
    conn: &mut DbConnection<'_>,
    config: &AuthConfig,
    email: &str,
    password: &str,
) -> ServiceResult<TokenPair> {
    let Some(account) = user::find_by_email(conn, email).await? else {
        tracing::debug!("Login for unknown email");
        return Err(ServiceError::InvalidCredentials);
    };

    verify_password(password, &account.password)?;

    if !account.is_active {
        tracing::debug!(user_id = %account.id, "Login for inactive account");
        return Err(ServiceError::InactiveAccount);
    }

    let pair = issue_pair(config, account.id, true)?;
    tracing::info!(user_id = %account.id, "User logged in");

    Ok(pair)
}

/// ## Summary
/// Issues a new, non-fresh access token from refresh token claims.
///
/// ## Errors
/// Returns an error if signing fails.
pub fn refresh(config: &AuthConfig, refresh_claims: &Claims) -> ServiceResult<String> {
    tracing::debug!(user_id = %refresh_claims.sub, "Refreshing access token");
    issue_access_token(config, refresh_claims.sub, false)
}

/// ## Summary
/// Revokes the token described by `claims`. Revoking twice is harmless.
///
/// ## Errors
/// Returns an error if the blacklist insert fails.
#[tracing::instrument(skip(conn, claims), fields(user_id = %claims.sub))]
pub async fn revoke(conn: &mut DbConnection<'_>, claims: &Claims) -> ServiceResult<()> {
    token_blacklist::insert(conn, &claims.jti).await?;
    tracing::info!("Token revoked");
    Ok(())
}
