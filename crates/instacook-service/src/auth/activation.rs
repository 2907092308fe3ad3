//! Signed account activation tokens.
//!
//! Activation tokens are JWTs keyed with the JWT secret plus a salt, so they
//! never verify as access tokens and access tokens never verify here.

use chrono::{Duration, Utc};
use instacook_core::config::AuthConfig;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{ServiceError, ServiceResult};

const PURPOSE: &str = "activate";

#[derive(Debug, Serialize, Deserialize)]
struct ActivationClaims {
    /// Account email
    sub: String,
    purpose: String,
    iat: i64,
    exp: i64,
}

fn signing_key(config: &AuthConfig) -> Vec<u8> {
    format!("{}{}", config.jwt_secret, config.activation_salt).into_bytes()
}

/// ## Summary
/// Creates an activation token for the account registered with `email`.
///
/// ## Errors
/// Returns an error if signing fails.
pub fn generate_activation_token(config: &AuthConfig, email: &str) -> ServiceResult<String> {
    let now = Utc::now();
    let claims = ActivationClaims {
        sub: email.to_string(),
        purpose: PURPOSE.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(config.activation_hours)).timestamp(),
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(&signing_key(config)),
    )
    .map_err(|e| {
        ServiceError::InvalidConfiguration(format!("Failed to sign activation token: {e}"))
    })
}

/// ## Summary
/// Verifies an activation token and returns the email it was issued for.
///
/// ## Errors
/// Returns `BadRequest` if the token is malformed, forged, expired or not an
/// activation token.
pub fn verify_activation_token(config: &AuthConfig, token: &str) -> ServiceResult<String> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let claims = jsonwebtoken::decode::<ActivationClaims>(
        token,
        &DecodingKey::from_secret(&signing_key(config)),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!("Activation token rejected: {e}");
        invalid()
    })?
    .claims;

    if claims.purpose != PURPOSE {
        return Err(invalid());
    }

    Ok(claims.sub)
}

fn invalid() -> ServiceError {
    ServiceError::BadRequest("Invalid or expired activation token".to_string())
}

/// ## Summary
/// Builds the activation link served under the public origin.
#[must_use]
pub fn activation_link(origin: &str, token: &str) -> String {
    format!("{origin}/users/activate/{token}")
}
