//! JWT access and refresh tokens.

use chrono::{DateTime, Duration, Utc};
use instacook_core::config::AuthConfig;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{ServiceError, ServiceResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Claims carried by every access and refresh token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: uuid::Uuid,
    /// Unique token ID, the key used for revocation
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    /// Set only on access tokens minted directly from a password login
    pub fresh: bool,
}

impl Claims {
    /// ## Summary
    /// Builds claims for `user_id` issued at `issued_at` and valid for `ttl`.
    #[must_use]
    pub fn new(
        user_id: uuid::Uuid,
        token_type: TokenType,
        fresh: bool,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            sub: user_id,
            jti: uuid::Uuid::new_v4().to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
            token_type,
            fresh,
        }
    }

    #[must_use]
    pub fn is_access(&self) -> bool {
        self.token_type == TokenType::Access
    }
}

/// Tokens handed out by a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// ## Summary
/// Signs `claims` with the configured secret using HS256.
///
/// ## Errors
/// Returns an error if encoding fails.
pub fn encode_claims(config: &AuthConfig, claims: &Claims) -> ServiceResult<String> {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| ServiceError::InvalidConfiguration(format!("Failed to sign token: {e}")))
}

/// ## Summary
/// Issues an access token for `user_id`.
///
/// ## Errors
/// Returns an error if signing fails.
pub fn issue_access_token(
    config: &AuthConfig,
    user_id: uuid::Uuid,
    fresh: bool,
) -> ServiceResult<String> {
    let claims = Claims::new(
        user_id,
        TokenType::Access,
        fresh,
        Utc::now(),
        Duration::minutes(config.access_token_minutes),
    );
    encode_claims(config, &claims)
}

/// ## Summary
/// Issues a refresh token for `user_id`.
///
/// ## Errors
/// Returns an error if signing fails.
pub fn issue_refresh_token(config: &AuthConfig, user_id: uuid::Uuid) -> ServiceResult<String> {
    let claims = Claims::new(
        user_id,
        TokenType::Refresh,
        false,
        Utc::now(),
        Duration::days(config.refresh_token_days),
    );
    encode_claims(config, &claims)
}

/// ## Summary
/// Issues an access and refresh token pair for `user_id`.
///
/// ## Errors
/// Returns an error if signing fails.
pub fn issue_pair(
    config: &AuthConfig,
    user_id: uuid::Uuid,
    fresh: bool,
) -> ServiceResult<TokenPair> {
    Ok(TokenPair {
        access_token: issue_access_token(config, user_id, fresh)?,
        refresh_token: issue_refresh_token(config, user_id)?,
    })
}

/// ## Summary
/// Verifies the signature and expiry of `token` and returns its claims.
///
/// Revocation is not checked here; see [`crate::auth::authenticate`].
///
/// ## Errors
/// Returns `InvalidToken` if the token is malformed, forged or expired.
pub fn decode_token(config: &AuthConfig, token: &str) -> ServiceResult<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            ServiceError::InvalidToken("Token has expired".to_string())
        }
        _ => ServiceError::InvalidToken("Invalid token".to_string()),
    })
}
