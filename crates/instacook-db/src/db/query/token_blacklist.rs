//! Revoked token bookkeeping.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::token_blacklist;
use crate::error::DbResult;
use crate::model::token::NewBlacklistedToken;

/// ## Summary
/// Records `jti` as revoked. Revoking an already revoked token is a no-op.
///
/// ## Errors
/// Returns an error if the insert fails.
pub async fn insert(conn: &mut DbConnection<'_>, jti: &str) -> DbResult<()> {
    let _inserted = diesel::insert_into(token_blacklist::table)
        .values(&NewBlacklistedToken { jti })
        .on_conflict(token_blacklist::jti)
        .do_nothing()
        .execute(conn)
        .await?;

    Ok(())
}

/// ## Summary
/// Whether `jti` has been revoked.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn contains(conn: &mut DbConnection<'_>, jti: &str) -> DbResult<bool> {
    Ok(diesel::select(diesel::dsl::exists(
        token_blacklist::table.filter(token_blacklist::jti.eq(jti)),
    ))
    .get_result::<bool>(conn)
    .await?)
}
