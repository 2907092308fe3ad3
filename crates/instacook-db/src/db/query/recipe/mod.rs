//! Query builders and statements for recipes.
//!
//! Every listing goes through [`filtered`], which turns a [`RecipeFilter`]
//! into a boxed query. Visibility is applied in SQL here and mirrored in
//! memory by [`Visibility::admits`].

use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use instacook_core::types::{SortField, SortOrder, Visibility};

use crate::db::connection::DbConnection;
use crate::db::schema::recipe;
use crate::error::DbResult;
use crate::model::recipe::{NewRecipe, Recipe, RecipePatch, RecipeReplacement};

type BoxedRecipeQuery = recipe::BoxedQuery<'static, Pg>;

/// Listing criteria for recipes.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    /// Restrict to one owner. `None` lists across all owners.
    pub owner: Option<uuid::Uuid>,
    pub visibility: Visibility,
    /// Case-insensitive substring matched against name and description.
    pub search: Option<String>,
    pub sort: SortField,
    pub order: SortOrder,
}

/// ## Summary
/// Returns a query to select all recipes, deleted ones included.
#[must_use]
pub fn all() -> BoxedRecipeQuery {
    recipe::table.into_boxed()
}

/// ## Summary
/// Returns a query to find a recipe by ID regardless of its flags.
#[must_use]
pub fn by_id(id: uuid::Uuid) -> BoxedRecipeQuery {
    all().filter(recipe::id.eq(id))
}

/// ## Summary
/// Returns a query to find a recipe by ID that has not been deleted.
#[must_use]
pub fn live_by_id(id: uuid::Uuid) -> BoxedRecipeQuery {
    by_id(id).filter(recipe::is_deleted.eq(false))
}

/// ## Summary
/// Returns a query to find a soft-deleted recipe by ID.
#[must_use]
pub fn deleted_by_id(id: uuid::Uuid) -> BoxedRecipeQuery {
    by_id(id).filter(recipe::is_deleted.eq(true))
}

/// ## Summary
/// Restricts `query` to the rows admitted by `visibility`.
#[must_use]
pub fn with_visibility(query: BoxedRecipeQuery, visibility: Visibility) -> BoxedRecipeQuery {
    match visibility {
        Visibility::Public => query
            .filter(recipe::is_publish.eq(true))
            .filter(recipe::is_deleted.eq(false)),
        Visibility::Private => query
            .filter(recipe::is_publish.eq(false))
            .filter(recipe::is_deleted.eq(false)),
        Visibility::All => query.filter(recipe::is_deleted.eq(false)),
        Visibility::Deleted => query.filter(recipe::is_deleted.eq(true)),
    }
}

/// ## Summary
/// Restricts `query` to recipes owned by `user_id`.
#[must_use]
pub fn owned_by(query: BoxedRecipeQuery, user_id: uuid::Uuid) -> BoxedRecipeQuery {
    query.filter(recipe::user_id.eq(user_id))
}

/// ## Summary
/// Restricts `query` to recipes whose name or description contains `term`,
/// ignoring case. LIKE wildcards in `term` match literally.
#[must_use]
pub fn matching(query: BoxedRecipeQuery, term: &str) -> BoxedRecipeQuery {
    let pattern = format!("%{}%", escape_like(term));
    query.filter(
        recipe::name
            .ilike(pattern.clone())
            .or(recipe::description.ilike(pattern)),
    )
}

/// ## Summary
/// Orders `query` by `field` in `order`, breaking ties by ID so that
/// pagination windows never overlap.
#[must_use]
pub fn ordered(query: BoxedRecipeQuery, field: SortField, order: SortOrder) -> BoxedRecipeQuery {
    match (field, order) {
        (SortField::CreatedAt, SortOrder::Asc) => query
            .order_by(recipe::created_at.asc())
            .then_order_by(recipe::id.asc()),
        (SortField::CreatedAt, SortOrder::Desc) => query
            .order_by(recipe::created_at.desc())
            .then_order_by(recipe::id.desc()),
        (SortField::CookTime, SortOrder::Asc) => query
            .order_by(recipe::cook_time.asc().nulls_last())
            .then_order_by(recipe::id.asc()),
        (SortField::CookTime, SortOrder::Desc) => query
            .order_by(recipe::cook_time.desc().nulls_last())
            .then_order_by(recipe::id.desc()),
        (SortField::Name, SortOrder::Asc) => query
            .order_by(recipe::name.asc())
            .then_order_by(recipe::id.asc()),
        (SortField::Name, SortOrder::Desc) => query
            .order_by(recipe::name.desc())
            .then_order_by(recipe::id.desc()),
    }
}

/// ## Summary
/// Builds the unordered, unpaginated query selected by `filter`.
#[must_use]
pub fn filtered(filter: &RecipeFilter) -> BoxedRecipeQuery {
    let mut query = with_visibility(all(), filter.visibility);

    if let Some(owner) = filter.owner {
        query = owned_by(query, owner);
    }

    if let Some(term) = filter.search.as_deref().filter(|t| !t.is_empty()) {
        query = matching(query, term);
    }

    query
}

/// ## Summary
/// Escapes `%`, `_` and the escape character itself for use in a LIKE pattern.
#[must_use]
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// ## Summary
/// Loads one page of recipes matching `filter` along with the total match count.
///
/// `page` is 1-based. A page past the end yields an empty vector.
///
/// ## Errors
/// Returns an error if either query fails.
#[tracing::instrument(skip(conn))]
pub async fn load_page(
    conn: &mut DbConnection<'_>,
    filter: &RecipeFilter,
    page: i64,
    per_page: i64,
) -> DbResult<(Vec<Recipe>, i64)> {
    let total = filtered(filter).count().get_result::<i64>(conn).await?;

    let offset = (page - 1).saturating_mul(per_page);
    if total == 0 || offset >= total {
        return Ok((Vec::new(), total));
    }

    let items = ordered(filtered(filter), filter.sort, filter.order)
        .limit(per_page)
        .offset(offset)
        .select(Recipe::as_select())
        .load::<Recipe>(conn)
        .await?;

    tracing::trace!(total, returned = items.len(), "Loaded recipe page");

    Ok((items, total))
}

/// ## Summary
/// Inserts a recipe and returns the stored row.
///
/// ## Errors
/// Returns an error if the insert fails.
pub async fn insert(conn: &mut DbConnection<'_>, new_recipe: &NewRecipe<'_>) -> DbResult<Recipe> {
    Ok(diesel::insert_into(recipe::table)
        .values(new_recipe)
        .returning(Recipe::as_select())
        .get_result::<Recipe>(conn)
        .await?)
}

/// ## Summary
/// Replaces the editable fields of a live recipe.
///
/// ## Errors
/// Returns an error if the update fails or the recipe no longer exists.
pub async fn replace(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    replacement: &RecipeReplacement<'_>,
) -> DbResult<Recipe> {
    Ok(diesel::update(recipe::table)
        .filter(recipe::id.eq(id))
        .filter(recipe::is_deleted.eq(false))
        .set(replacement)
        .returning(Recipe::as_select())
        .get_result::<Recipe>(conn)
        .await?)
}

/// ## Summary
/// Applies a partial update to a live recipe.
///
/// ## Errors
/// Returns an error if the update fails or the recipe no longer exists.
pub async fn patch(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    changes: &RecipePatch<'_>,
) -> DbResult<Recipe> {
    Ok(diesel::update(recipe::table)
        .filter(recipe::id.eq(id))
        .filter(recipe::is_deleted.eq(false))
        .set(changes)
        .returning(Recipe::as_select())
        .get_result::<Recipe>(conn)
        .await?)
}

/// ## Summary
/// Sets the soft-delete flag of a recipe.
///
/// ## Errors
/// Returns an error if the update fails.
pub async fn set_deleted(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    is_deleted: bool,
) -> DbResult<usize> {
    Ok(diesel::update(recipe::table)
        .filter(recipe::id.eq(id))
        .set((
            recipe::is_deleted.eq(is_deleted),
            recipe::updated_at.eq(chrono::Utc::now()),
        ))
        .execute(conn)
        .await?)
}

/// ## Summary
/// Sets the publish flag of a live recipe.
///
/// ## Errors
/// Returns an error if the update fails.
pub async fn set_published(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    is_publish: bool,
) -> DbResult<usize> {
    Ok(diesel::update(recipe::table)
        .filter(recipe::id.eq(id))
        .filter(recipe::is_deleted.eq(false))
        .set((
            recipe::is_publish.eq(is_publish),
            recipe::updated_at.eq(chrono::Utc::now()),
        ))
        .execute(conn)
        .await?)
}
