use salvo::writing::Json;
use salvo::{Depot, Router, handler};

use instacook_service::auth::depot::require_access;
use instacook_service::user::service as user_service;

use crate::app::api::responses::PrivateUserResponse;
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

/// ## Summary
/// GET /me - The caller's own account.
///
/// ## Errors
/// Returns HTTP 401 without an access token and 404 if the account has
/// since been deleted.
#[handler]
async fn me(depot: &mut Depot) -> AppResult<Json<PrivateUserResponse>> {
    let user_id = require_access(depot)?.sub;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    let user = user_service::find_by_id(&mut conn, user_id).await?;

    Ok(Json(user.into()))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("me").get(me)
}
