use std::sync::Arc;

use salvo::async_trait;

use crate::error::AppResult;
use instacook_core::error::CoreError;
use instacook_db::db::DbProvider;

/// Shared handle to whatever hands out database connections.
pub type SharedDbProvider = Arc<dyn DbProvider + Send + Sync>;

/// Hoop that shares one [`DbProvider`] with every request.
pub struct DbProviderHandler {
    provider: SharedDbProvider,
}

impl DbProviderHandler {
    #[must_use]
    pub fn new(provider: impl DbProvider + 'static) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }
}

#[async_trait]
impl salvo::Handler for DbProviderHandler {
    #[tracing::instrument(skip_all)]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.provider));
    }
}

/// ## Summary
/// Retrieves the database provider from the depot.
///
/// ## Errors
/// Returns an error if no [`DbProviderHandler`] ran for this request.
pub fn get_db_from_depot(depot: &salvo::Depot) -> AppResult<SharedDbProvider> {
    depot.obtain::<SharedDbProvider>().cloned().map_err(|_err| {
        CoreError::InvariantViolation("Database provider not found in depot").into()
    })
}
