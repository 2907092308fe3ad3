//! `/recipes` endpoints.

use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};

use instacook_service::auth::depot::{optional_user_id, require_access, require_fresh_access};
use instacook_service::recipe::input::RecipeInput;
use instacook_service::recipe::listing::Page;
use instacook_service::recipe::service::{self as recipe_service, parse_recipe_id};

use crate::app::api::params::{json_body, listing_query, page_base, path_param, query_pairs};
use crate::app::api::responses::RecipeResponse;
use crate::config::get_config_from_depot;
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

fn recipe_id(req: &Request) -> AppResult<uuid::Uuid> {
    Ok(parse_recipe_id(&path_param(req, "id")?)?)
}

/// ## Summary
/// GET /recipes - Search published recipes, one page at a time.
///
/// ## Errors
/// Returns HTTP 400 for invalid paging parameters.
#[handler]
async fn list_recipes(
    req: &mut Request,
    depot: &mut Depot,
) -> AppResult<Json<Page<RecipeResponse>>> {
    let config = get_config_from_depot(depot)?;
    let pairs = query_pairs(req);
    let params = listing_query(&pairs).resolve(&config.pagination)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    let (recipes, total) = recipe_service::list_public(&mut conn, &params).await?;

    let page = Page::new(recipes, &params, total, &page_base(&config, req), &pairs)?;
    Ok(Json(page.map(RecipeResponse::from)))
}

/// ## Summary
/// POST /recipes - Create a recipe owned by the caller.
///
/// ## Errors
/// Returns HTTP 401 without an access token and 400 for invalid input.
#[handler]
async fn create_recipe(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<Json<RecipeResponse>> {
    let caller = require_access(depot)?.sub;
    let input: RecipeInput = json_body(req).await?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    let recipe = recipe_service::create_recipe(&mut conn, caller, &input).await?;

    res.status_code(StatusCode::CREATED);
    Ok(Json(recipe.into()))
}

/// ## Summary
/// GET /recipes/{id} - Show one recipe.
///
/// ## Errors
/// Returns HTTP 404 for missing or deleted recipes and 403 for someone
/// else's unpublished recipe.
#[handler]
async fn get_recipe(req: &mut Request, depot: &mut Depot) -> AppResult<Json<RecipeResponse>> {
    let id = recipe_id(req)?;
    let caller = optional_user_id(depot)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    let recipe = recipe_service::get_recipe(&mut conn, id, caller).await?;

    Ok(Json(recipe.into()))
}

/// ## Summary
/// PUT /recipes/{id} - Replace a recipe. Needs a fresh access token.
///
/// ## Errors
/// Returns HTTP 401 without a fresh token, 403 for non-owners, 404 for
/// missing recipes and 400 for invalid input.
#[handler]
async fn replace_recipe(req: &mut Request, depot: &mut Depot) -> AppResult<Json<RecipeResponse>> {
    let caller = require_fresh_access(depot)?.sub;
    let id = recipe_id(req)?;
    let input: RecipeInput = json_body(req).await?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    let recipe = recipe_service::replace_recipe(&mut conn, id, caller, &input).await?;

    Ok(Json(recipe.into()))
}

/// ## Summary
/// PATCH /recipes/{id} - Change some fields of a recipe.
///
/// ## Errors
/// Returns HTTP 401, 403, 404 or 400 like PUT, but any access token will do.
#[handler]
async fn patch_recipe(req: &mut Request, depot: &mut Depot) -> AppResult<Json<RecipeResponse>> {
    let caller = require_access(depot)?.sub;
    let id = recipe_id(req)?;
    let input: RecipeInput = json_body(req).await?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    let recipe = recipe_service::patch_recipe(&mut conn, id, caller, &input).await?;

    Ok(Json(recipe.into()))
}

/// ## Summary
/// DELETE /recipes/{id} - Soft-delete a recipe.
#[handler]
async fn delete_recipe(req: &mut Request, depot: &mut Depot) -> AppResult<StatusCode> {
    let caller = require_access(depot)?.sub;
    let id = recipe_id(req)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    recipe_service::delete_recipe(&mut conn, id, caller).await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn change_publish(req: &Request, depot: &Depot, is_publish: bool) -> AppResult<StatusCode> {
    let caller = require_access(depot)?.sub;
    let id = recipe_id(req)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    recipe_service::set_publish(&mut conn, id, caller, is_publish).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// ## Summary
/// PUT /recipes/{id}/publish - Make a recipe public.
#[handler]
async fn publish_recipe(req: &mut Request, depot: &mut Depot) -> AppResult<StatusCode> {
    change_publish(req, depot, true).await
}

/// ## Summary
/// DELETE /recipes/{id}/publish - Make a recipe private again.
#[handler]
async fn unpublish_recipe(req: &mut Request, depot: &mut Depot) -> AppResult<StatusCode> {
    change_publish(req, depot, false).await
}

/// ## Summary
/// PUT /recipes/{id}/restore - Undo a soft delete.
///
/// ## Errors
/// Returns HTTP 404 if the recipe is not deleted.
#[handler]
async fn restore_recipe(req: &mut Request, depot: &mut Depot) -> AppResult<StatusCode> {
    let caller = require_access(depot)?.sub;
    let id = recipe_id(req)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    recipe_service::restore_recipe(&mut conn, id, caller).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("recipes")
        .get(list_recipes)
        .post(create_recipe)
        .push(
            Router::with_path("{id}")
                .get(get_recipe)
                .put(replace_recipe)
                .patch(patch_recipe)
                .delete(delete_recipe)
                .push(
                    Router::with_path("publish")
                        .put(publish_recipe)
                        .delete(unpublish_recipe),
                )
                .push(Router::with_path("restore").put(restore_recipe)),
        )
}
