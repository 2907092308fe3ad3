//! Query builders and statements for user accounts.

use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::user;
use crate::error::DbResult;
use crate::model::user::{NewUser, User};

type BoxedUserQuery<'a> = user::BoxedQuery<'a, Pg>;

/// ## Summary
/// Returns a query to select all users that have not been deleted.
#[must_use]
pub fn live() -> BoxedUserQuery<'static> {
    user::table.filter(user::is_deleted.eq(false)).into_boxed()
}

/// ## Summary
/// Returns a query to find a live user by ID.
#[must_use]
pub fn by_id(id: uuid::Uuid) -> BoxedUserQuery<'static> {
    live().filter(user::id.eq(id))
}

/// ## Summary
/// Returns a query to find a live user by username.
#[must_use]
pub fn by_username(username: &str) -> BoxedUserQuery<'_> {
    live().filter(user::username.eq(username))
}

/// ## Summary
/// Returns a query to find a live user by email.
#[must_use]
pub fn by_email(email: &str) -> BoxedUserQuery<'_> {
    live().filter(user::email.eq(email))
}

/// ## Summary
/// Loads a live user by ID.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn find_by_id(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> DbResult<Option<User>> {
    Ok(by_id(id)
        .select(User::as_select())
        .first::<User>(conn)
        .await
        .optional()?)
}

/// ## Summary
/// Loads a live user by username.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn find_by_username(
    conn: &mut DbConnection<'_>,
    username: &str,
) -> DbResult<Option<User>> {
    Ok(by_username(username)
        .select(User::as_select())
        .first::<User>(conn)
        .await
        .optional()?)
}

/// ## Summary
/// Loads a live user by email.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn find_by_email(conn: &mut DbConnection<'_>, email: &str) -> DbResult<Option<User>> {
    Ok(by_email(email)
        .select(User::as_select())
        .first::<User>(conn)
        .await
        .optional()?)
}

/// ## Summary
/// Whether a live user already holds `username`.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn username_taken(conn: &mut DbConnection<'_>, username: &str) -> DbResult<bool> {
    Ok(diesel::select(diesel::dsl::exists(
        user::table
            .filter(user::is_deleted.eq(false))
            .filter(user::username.eq(username)),
    ))
    .get_result::<bool>(conn)
    .await?)
}

/// ## Summary
/// Whether a live user already holds `email`.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn email_taken(conn: &mut DbConnection<'_>, email: &str) -> DbResult<bool> {
    Ok(diesel::select(diesel::dsl::exists(
        user::table
            .filter(user::is_deleted.eq(false))
            .filter(user::email.eq(email)),
    ))
    .get_result::<bool>(conn)
    .await?)
}

/// ## Summary
/// Inserts a user and returns the stored row.
///
/// ## Errors
/// Returns an error if the insert fails, including unique index violations.
pub async fn insert(conn: &mut DbConnection<'_>, new_user: &NewUser<'_>) -> DbResult<User> {
    Ok(diesel::insert_into(user::table)
        .values(new_user)
        .returning(User::as_select())
        .get_result::<User>(conn)
        .await?)
}

/// ## Summary
/// Marks a live user as active and returns the updated row.
///
/// ## Errors
/// Returns an error if the update fails.
pub async fn activate(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> DbResult<User> {
    Ok(diesel::update(user::table)
        .filter(user::id.eq(id))
        .filter(user::is_deleted.eq(false))
        .set((
            user::is_active.eq(true),
            user::updated_at.eq(chrono::Utc::now()),
        ))
        .returning(User::as_select())
        .get_result::<User>(conn)
        .await?)
}
