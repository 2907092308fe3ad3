use diesel::{pg::Pg, prelude::*};

use crate::db::schema;

/// Revoked token identifier
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::token_blacklist)]
#[diesel(check_for_backend(Pg))]
pub struct BlacklistedToken {
    pub id: i64,
    pub jti: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::token_blacklist)]
pub struct NewBlacklistedToken<'a> {
    pub jti: &'a str,
}
