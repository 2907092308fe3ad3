use diesel::{pg::Pg, prelude::*};

use crate::db::schema;
use crate::model::user::User;

/// Recipe record.
///
/// `is_deleted` marks a soft delete; rows are never removed. `user_id` is
/// written once on insert and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = schema::recipe)]
#[diesel(belongs_to(User))]
#[diesel(check_for_backend(Pg))]
pub struct Recipe {
    pub id: uuid::Uuid,
    pub name: String,
    pub description: String,
    pub num_of_servings: Option<i32>,
    pub cook_time: Option<i32>,
    pub directions: String,
    pub is_publish: bool,
    pub is_deleted: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub user_id: Option<uuid::Uuid>,
}

impl Recipe {
    #[must_use]
    pub fn is_owned_by(&self, user_id: uuid::Uuid) -> bool {
        self.user_id == Some(user_id)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::recipe)]
pub struct NewRecipe<'a> {
    pub id: uuid::Uuid,
    pub name: &'a str,
    pub description: &'a str,
    pub num_of_servings: Option<i32>,
    pub cook_time: Option<i32>,
    pub directions: &'a str,
    pub user_id: uuid::Uuid,
}

/// Full replacement of the editable fields. Missing optionals become NULL.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::recipe)]
#[diesel(treat_none_as_null = true)]
pub struct RecipeReplacement<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub num_of_servings: Option<i32>,
    pub cook_time: Option<i32>,
    pub directions: &'a str,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Partial update; `None` leaves a column untouched.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = schema::recipe)]
pub struct RecipePatch<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub num_of_servings: Option<Option<i32>>,
    pub cook_time: Option<Option<i32>>,
    pub directions: Option<&'a str>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}
