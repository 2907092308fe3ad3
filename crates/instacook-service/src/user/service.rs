//! User account operations.

use instacook_core::config::AuthConfig;
use instacook_db::db::connection::DbConnection;
use instacook_db::db::query::user as user_query;
use instacook_db::model::user::{NewUser, User};

use crate::auth::activation::{generate_activation_token, verify_activation_token};
use crate::auth::password::hash_password;
use crate::error::{ServiceError, ServiceResult};
use crate::user::input::RegisterInput;

/// A freshly registered, not yet active account.
#[derive(Debug, Clone)]
pub struct Registration {
    pub user: User,
    pub activation_token: String,
}

fn user_not_found() -> ServiceError {
    ServiceError::NotFound("User not found".to_string())
}

/// ## Summary
/// Registers an inactive account and creates its activation token.
///
/// Username and email uniqueness are checked before anything is written.
///
/// ## Errors
/// Returns field errors for invalid input, `BadRequest` for a username or
/// email already in use, or a database error.
#[tracing::instrument(skip(conn, config, input))]
pub async fn register_user(
    conn: &mut DbConnection<'_>,
    config: &AuthConfig,
    input: &RegisterInput,
) -> ServiceResult<Registration> {
    input.validate()?;

    let username = input.username.as_deref().unwrap_or_default();
    let email = input.email.as_deref().unwrap_or_default();
    let password = input.password.as_deref().unwrap_or_default();

    if user_query::username_taken(conn, username).await? {
        return Err(ServiceError::BadRequest("username already used".to_string()));
    }
    if user_query::email_taken(conn, email).await? {
        return Err(ServiceError::BadRequest("email already used".to_string()));
    }

    let password_hash = hash_password(password)?;
    let new_user = NewUser {
        id: uuid::Uuid::now_v7(),
        username,
        email,
        password: &password_hash,
        is_active: false,
    };

    let user = user_query::insert(conn, &new_user).await.map_err(|e| {
        if e.is_unique_violation() {
            ServiceError::BadRequest("username or email already used".to_string())
        } else {
            ServiceError::from(e)
        }
    })?;

    let activation_token = generate_activation_token(config, &user.email)?;
    tracing::info!(user_id = %user.id, username = %user.username, "User registered");

    Ok(Registration {
        user,
        activation_token,
    })
}

/// ## Summary
/// Activates the account named by an activation token.
///
/// ## Errors
/// Returns `BadRequest` for an invalid token or an already active account,
/// `NotFound` if no live account has the token's email.
#[tracing::instrument(skip(conn, config, token))]
pub async fn activate_user(
    conn: &mut DbConnection<'_>,
    config: &AuthConfig,
    token: &str,
) -> ServiceResult<User> {
    let email = verify_activation_token(config, token)?;

    let user = user_query::find_by_email(conn, &email)
        .await?
        .ok_or_else(user_not_found)?;

    if user.is_active {
        return Err(ServiceError::BadRequest(
            "The user account is already activated".to_string(),
        ));
    }

    let user = user_query::activate(conn, user.id).await?;
    tracing::info!(user_id = %user.id, "User activated");

    Ok(user)
}

/// ## Summary
/// Loads a live user by username.
///
/// ## Errors
/// Returns `NotFound` if there is none.
pub async fn find_by_username(conn: &mut DbConnection<'_>, username: &str) -> ServiceResult<User> {
    user_query::find_by_username(conn, username)
        .await?
        .ok_or_else(user_not_found)
}

/// ## Summary
/// Loads a live user by ID.
///
/// ## Errors
/// Returns `NotFound` if there is none.
pub async fn find_by_id(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> ServiceResult<User> {
    user_query::find_by_id(conn, id)
        .await?
        .ok_or_else(user_not_found)
}
