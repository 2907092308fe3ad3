use std::sync::Arc;

pub use instacook_core::config::*;
use salvo::async_trait;

use crate::error::{AppError, AppResult};

/// Hoop that shares the loaded [`Settings`] with every request.
pub struct ConfigHandler {
    settings: Arc<Settings>,
}

impl ConfigHandler {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }
}

#[async_trait]
impl salvo::Handler for ConfigHandler {
    #[tracing::instrument(skip_all)]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.settings));
    }
}

/// ## Summary
/// Retrieves the application configuration from the depot.
///
/// ## Errors
/// Returns an error if no [`ConfigHandler`] ran for this request.
pub fn get_config_from_depot(depot: &salvo::Depot) -> AppResult<Arc<Settings>> {
    depot.obtain::<Arc<Settings>>().cloned().map_err(|_err| {
        AppError::CoreError(instacook_core::error::CoreError::InvariantViolation(
            "Configuration not found in depot",
        ))
    })
}
