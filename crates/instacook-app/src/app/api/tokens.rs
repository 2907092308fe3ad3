//! Login, refresh and logout.

use salvo::writing::Json;
use salvo::{Depot, Request, Router, handler};

use instacook_service::auth::depot::{require_access, require_refresh};
use instacook_service::auth::session::{self, Credentials};
use instacook_service::auth::token::TokenPair;

use crate::app::api::params::json_body;
use crate::app::api::responses::{AccessTokenResponse, MessageResponse};
use crate::config::get_config_from_depot;
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

/// ## Summary
/// POST /token - Log in with email and password.
///
/// ## Errors
/// Returns HTTP 401 for wrong credentials and 403 for inactive accounts.
#[handler]
async fn login(req: &mut Request, depot: &mut Depot) -> AppResult<Json<TokenPair>> {
    let credentials: Credentials = json_body(req).await?;
    let config = get_config_from_depot(depot)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    let pair = session::login(
        &mut conn,
        &config.auth,
        &credentials.email,
        &credentials.password,
    )
    .await?;

    Ok(Json(pair))
}

/// ## Summary
/// POST /refresh - Trade a refresh token for a new, non-fresh access token.
///
/// ## Errors
/// Returns HTTP 401 unless a valid refresh token is presented.
#[handler]
async fn refresh(depot: &mut Depot) -> AppResult<Json<AccessTokenResponse>> {
    let claims = require_refresh(depot)?.clone();
    let config = get_config_from_depot(depot)?;

    let access_token = session::refresh(&config.auth, &claims)?;

    Ok(Json(AccessTokenResponse { access_token }))
}

/// ## Summary
/// POST /revoke - Log out by revoking the presented access token.
///
/// ## Errors
/// Returns HTTP 401 unless a valid access token is presented.
#[handler]
async fn revoke(depot: &mut Depot) -> AppResult<Json<MessageResponse>> {
    let claims = require_access(depot)?.clone();

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    session::revoke(&mut conn, &claims).await?;

    Ok(Json(MessageResponse::new("Successfully logged out")))
}

#[must_use]
pub fn routes() -> Router {
    Router::new()
        .push(Router::with_path("token").post(login))
        .push(Router::with_path("refresh").post(refresh))
        .push(Router::with_path("revoke").post(revoke))
}
