//! Recipe operations.
//!
//! Every mutation loads the target first, so that a missing or deleted
//! recipe is reported as not found before ownership is checked.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use instacook_core::types::Visibility;
use instacook_db::db::connection::DbConnection;
use instacook_db::db::query::recipe::{self as recipe_query, RecipeFilter};
use instacook_db::model::recipe::Recipe;

use crate::error::{ServiceError, ServiceResult};
use crate::recipe::input::{RecipeInput, ValidationMode};
use crate::recipe::listing::ListingParams;
use crate::recipe::visibility::{ensure_owner, ensure_viewable, not_found};

/// ## Summary
/// Parses a recipe ID from a path segment. Malformed IDs name no recipe.
///
/// ## Errors
/// Returns `NotFound` if `raw` is not a UUID.
pub fn parse_recipe_id(raw: &str) -> ServiceResult<uuid::Uuid> {
    uuid::Uuid::parse_str(raw).map_err(|_e| not_found())
}

async fn find_any(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> ServiceResult<Recipe> {
    recipe_query::by_id(id)
        .select(Recipe::as_select())
        .first::<Recipe>(conn)
        .await
        .optional()?
        .ok_or_else(not_found)
}

async fn find_live_owned(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    caller: uuid::Uuid,
) -> ServiceResult<Recipe> {
    let recipe = recipe_query::live_by_id(id)
        .select(Recipe::as_select())
        .first::<Recipe>(conn)
        .await
        .optional()?
        .ok_or_else(not_found)?;

    ensure_owner(&recipe, caller)?;
    Ok(recipe)
}

/// ## Summary
/// Creates a recipe owned by `owner`.
///
/// ## Errors
/// Returns field errors for invalid input, or a database error.
#[tracing::instrument(skip(conn, input))]
pub async fn create_recipe(
    conn: &mut DbConnection<'_>,
    owner: uuid::Uuid,
    input: &RecipeInput,
) -> ServiceResult<Recipe> {
    input.validate(ValidationMode::Full)?;

    let new_recipe = input.to_new_recipe(uuid::Uuid::now_v7(), owner);
    let recipe = recipe_query::insert(conn, &new_recipe).await?;
    tracing::info!(recipe_id = %recipe.id, "Recipe created");

    Ok(recipe)
}

/// ## Summary
/// Loads a recipe for display to `caller`.
///
/// ## Errors
/// Returns `NotFound` for missing or deleted recipes and `Forbidden` for
/// someone else's unpublished recipe.
#[tracing::instrument(skip(conn))]
pub async fn get_recipe(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    caller: Option<uuid::Uuid>,
) -> ServiceResult<Recipe> {
    let recipe = find_any(conn, id).await?;
    ensure_viewable(&recipe, caller)?;
    Ok(recipe)
}

/// ## Summary
/// Replaces every editable field of a recipe.
///
/// ## Errors
/// Returns `NotFound`, `Forbidden`, field errors, or a database error.
#[tracing::instrument(skip(conn, input))]
pub async fn replace_recipe(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    caller: uuid::Uuid,
    input: &RecipeInput,
) -> ServiceResult<Recipe> {
    find_live_owned(conn, id, caller).await?;
    input.validate(ValidationMode::Full)?;

    let recipe = recipe_query::replace(conn, id, &input.to_replacement(chrono::Utc::now())).await?;
    tracing::info!("Recipe replaced");

    Ok(recipe)
}

/// ## Summary
/// Updates the fields present in `input`.
///
/// ## Errors
/// Returns `NotFound`, `Forbidden`, field errors, or a database error.
#[tracing::instrument(skip(conn, input))]
pub async fn patch_recipe(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    caller: uuid::Uuid,
    input: &RecipeInput,
) -> ServiceResult<Recipe> {
    find_live_owned(conn, id, caller).await?;
    input.validate(ValidationMode::Partial)?;

    let recipe = recipe_query::patch(conn, id, &input.to_patch(chrono::Utc::now())).await?;
    tracing::info!("Recipe updated");

    Ok(recipe)
}

/// ## Summary
/// Soft-deletes a recipe.
///
/// ## Errors
/// Returns `NotFound`, `Forbidden`, or a database error.
#[tracing::instrument(skip(conn))]
pub async fn delete_recipe(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    caller: uuid::Uuid,
) -> ServiceResult<()> {
    find_live_owned(conn, id, caller).await?;
    recipe_query::set_deleted(conn, id, true).await?;
    tracing::info!("Recipe deleted");
    Ok(())
}

/// ## Summary
/// Brings a soft-deleted recipe back.
///
/// ## Errors
/// Returns `NotFound` if the recipe is missing or not deleted, `Forbidden`
/// for non-owners, or a database error.
#[tracing::instrument(skip(conn))]
pub async fn restore_recipe(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    caller: uuid::Uuid,
) -> ServiceResult<()> {
    let recipe = recipe_query::deleted_by_id(id)
        .select(Recipe::as_select())
        .first::<Recipe>(conn)
        .await
        .optional()?
        .ok_or_else(not_found)?;
    ensure_owner(&recipe, caller)?;

    recipe_query::set_deleted(conn, id, false).await?;
    tracing::info!("Recipe restored");
    Ok(())
}

/// ## Summary
/// Publishes or unpublishes a recipe.
///
/// ## Errors
/// Returns `NotFound`, `Forbidden`, or a database error.
#[tracing::instrument(skip(conn))]
pub async fn set_publish(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    caller: uuid::Uuid,
    is_publish: bool,
) -> ServiceResult<()> {
    find_live_owned(conn, id, caller).await?;
    recipe_query::set_published(conn, id, is_publish).await?;
    tracing::info!("Recipe publish flag changed");
    Ok(())
}

/// ## Summary
/// Loads one page of published recipes across all users.
///
/// ## Errors
/// Returns a database error.
pub async fn list_public(
    conn: &mut DbConnection<'_>,
    params: &ListingParams,
) -> ServiceResult<(Vec<Recipe>, i64)> {
    list(conn, None, Visibility::Public, params).await
}

/// ## Summary
/// Loads one page of `owner`'s recipes of class `visibility`.
///
/// Access to the class must already have been checked with
/// [`crate::recipe::visibility::authorize_listing`].
///
/// ## Errors
/// Returns a database error.
pub async fn list_for_owner(
    conn: &mut DbConnection<'_>,
    owner: uuid::Uuid,
    visibility: Visibility,
    params: &ListingParams,
) -> ServiceResult<(Vec<Recipe>, i64)> {
    list(conn, Some(owner), visibility, params).await
}

#[tracing::instrument(skip(conn))]
async fn list(
    conn: &mut DbConnection<'_>,
    owner: Option<uuid::Uuid>,
    visibility: Visibility,
    params: &ListingParams,
) -> ServiceResult<(Vec<Recipe>, i64)> {
    let filter = RecipeFilter {
        owner,
        visibility,
        search: params.search.clone(),
        sort: params.sort,
        order: params.order,
    };

    recipe_query::load_page(conn, &filter, params.page, params.per_page)
        .await
        .map_err(ServiceError::from)
}
