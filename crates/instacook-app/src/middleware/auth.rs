use instacook_service::auth::authenticate::{authenticate, bearer_token};
use instacook_service::auth::depot::{DepotIdentity, depot_keys};
use salvo::Depot;

use crate::config::get_config_from_depot;
use crate::db_handler::get_db_from_depot;
use crate::error::AppError;

/// ## Summary
/// Middleware handler for authentication.
///
/// Resolves the bearer token of every request into a [`DepotIdentity`] so
/// that handlers can decide whether they need one.
pub struct AuthMiddleware;

/// ## Summary
/// Authenticates the request and stores the resulting identity in the depot.
///
/// ## Side Effects
/// Inserts a [`DepotIdentity`] under [`depot_keys::IDENTITY`]. A missing,
/// malformed, expired or revoked token does not stop the request here.
///
/// ## Errors
/// Renders an error response and stops the chain only if the server itself
/// fails, e.g. the revocation lookup cannot reach the database.
#[salvo::async_trait]
impl salvo::Handler for AuthMiddleware {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        if bearer_token(req).is_none() {
            tracing::trace!("No bearer token, request is anonymous");
            depot.insert(depot_keys::IDENTITY, DepotIdentity::Anonymous);
            return;
        }

        let (config, provider) = match (get_config_from_depot(depot), get_db_from_depot(depot)) {
            (Ok(config), Ok(provider)) => (config, provider),
            (Err(e), _) | (_, Err(e)) => {
                res.render(e);
                ctrl.skip_rest();
                return;
            }
        };

        match authenticate(req, &*provider, &config.auth).await {
            Ok(identity) => {
                depot.insert(depot_keys::IDENTITY, identity);
            }
            Err(e) => {
                res.render(AppError::from(e));
                ctrl.skip_rest();
            }
        }
    }
}
