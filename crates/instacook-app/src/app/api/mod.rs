mod healthcheck;
mod me;
pub mod params;
mod recipes;
pub mod responses;
mod tokens;
mod users;

use salvo::Router;

use crate::middleware::auth::AuthMiddleware;

/// ## Summary
/// Constructs the API router.
///
/// Every route sits behind [`AuthMiddleware`]; handlers decide for
/// themselves whether the resolved identity is required.
#[must_use]
pub fn routes() -> Router {
    Router::new()
        .hoop(AuthMiddleware)
        .push(healthcheck::routes())
        .push(recipes::routes())
        .push(users::routes())
        .push(me::routes())
        .push(tokens::routes())
}
