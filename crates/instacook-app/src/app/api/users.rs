//! `/users` endpoints.

use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};

use instacook_service::auth::activation::activation_link;
use instacook_service::auth::depot::optional_user_id;
use instacook_service::recipe::listing::Page;
use instacook_service::recipe::service as recipe_service;
use instacook_service::recipe::visibility::{authorize_listing, parse_visibility};
use instacook_service::user::input::RegisterInput;
use instacook_service::user::service as user_service;

use crate::app::api::params::{
    first, json_body, listing_query, page_base, path_param, query_pairs,
};
use crate::app::api::responses::{PrivateUserResponse, RecipeResponse, UserResponse};
use crate::config::get_config_from_depot;
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

/// ## Summary
/// POST /users - Register an account.
///
/// ## Side Effects
/// - Creates an inactive user row
/// - Logs the activation link
///
/// ## Errors
/// Returns HTTP 400 for invalid input or a username/email already in use.
#[handler]
async fn register(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<Json<PrivateUserResponse>> {
    let input: RegisterInput = json_body(req).await?;
    let config = get_config_from_depot(depot)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    let registration = user_service::register_user(&mut conn, &config.auth, &input).await?;

    tracing::info!(
        user_id = %registration.user.id,
        link = %activation_link(&config.server.origin(), &registration.activation_token),
        "Activation link issued"
    );

    res.status_code(StatusCode::CREATED);
    Ok(Json(registration.user.into()))
}

/// ## Summary
/// GET /users/activate/{token} - Activate an account.
///
/// ## Errors
/// Returns HTTP 400 for a bad token or an already active account, 404 if
/// the account is gone.
#[handler]
async fn activate(req: &mut Request, depot: &mut Depot) -> AppResult<StatusCode> {
    let token = path_param(req, "token")?;
    let config = get_config_from_depot(depot)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    user_service::activate_user(&mut conn, &config.auth, &token).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// ## Summary
/// GET /users/{username} - Show a user; the account holder sees more.
#[handler]
async fn get_user(req: &mut Request, depot: &mut Depot) -> AppResult<Json<UserResponse>> {
    let username = path_param(req, "username")?;
    let caller = optional_user_id(depot)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    let user = user_service::find_by_username(&mut conn, &username).await?;

    Ok(Json(if caller == Some(user.id) {
        UserResponse::Private(user.into())
    } else {
        UserResponse::Public(user.into())
    }))
}

/// ## Summary
/// GET /users/{username}/recipes - List a user's recipes.
///
/// Anybody may list public recipes; the other visibility classes are
/// reserved to the owner.
///
/// ## Errors
/// Returns HTTP 400 for bad parameters, 404 for unknown users and 403 when
/// a non-owner asks for non-public recipes.
#[handler]
async fn list_user_recipes(
    req: &mut Request,
    depot: &mut Depot,
) -> AppResult<Json<Page<RecipeResponse>>> {
    let username = path_param(req, "username")?;
    let config = get_config_from_depot(depot)?;
    let pairs = query_pairs(req);
    let visibility = parse_visibility(first(&pairs, "visibility"))?;
    let params = listing_query(&pairs).resolve(&config.pagination)?;
    let caller = optional_user_id(depot)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    let owner = user_service::find_by_username(&mut conn, &username).await?;
    authorize_listing(visibility, caller, owner.id)?;

    let (recipes, total) =
        recipe_service::list_for_owner(&mut conn, owner.id, visibility, &params).await?;

    let page = Page::new(recipes, &params, total, &page_base(&config, req), &pairs)?;
    Ok(Json(page.map(RecipeResponse::from)))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("users")
        .post(register)
        .push(Router::with_path("activate/{token}").get(activate))
        .push(
            Router::with_path("{username}")
                .get(get_user)
                .push(Router::with_path("recipes").get(list_user_recipes)),
        )
}
