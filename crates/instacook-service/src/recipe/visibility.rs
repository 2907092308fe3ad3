//! Who may see which recipes.
//!
//! Pure decisions over plain records; the SQL side lives in
//! `instacook_db::db::query::recipe::with_visibility`.

use instacook_core::types::Visibility;
use instacook_db::model::recipe::Recipe;

use crate::error::{ServiceError, ServiceResult};

/// ## Summary
/// Parses the `visibility` query parameter, defaulting to public.
///
/// ## Errors
/// Returns `BadRequest` for values outside `public|private|all|deleted`.
pub fn parse_visibility(raw: Option<&str>) -> ServiceResult<Visibility> {
    raw.map_or(Ok(Visibility::Public), |value| {
        value
            .parse::<Visibility>()
            .map_err(|e| ServiceError::BadRequest(e.to_string()))
    })
}

/// ## Summary
/// Checks that `caller` may list `owner`'s recipes of class `visibility`.
///
/// ## Errors
/// Returns `Forbidden` when a non-owner, anonymous callers included, asks for
/// anything but public recipes.
pub fn authorize_listing(
    visibility: Visibility,
    caller: Option<uuid::Uuid>,
    owner: uuid::Uuid,
) -> ServiceResult<()> {
    if visibility.owner_only() && caller != Some(owner) {
        return Err(ServiceError::Forbidden(
            "Access is not allowed".to_string(),
        ));
    }
    Ok(())
}

/// ## Summary
/// Checks that `caller` owns `recipe`.
///
/// ## Errors
/// Returns `Forbidden` otherwise.
pub fn ensure_owner(recipe: &Recipe, caller: uuid::Uuid) -> ServiceResult<()> {
    if recipe.is_owned_by(caller) {
        Ok(())
    } else {
        Err(ServiceError::Forbidden("Access is not allowed".to_string()))
    }
}

/// ## Summary
/// Checks that `caller` may read `recipe` through the single-recipe endpoint.
///
/// ## Errors
/// Returns `NotFound` for deleted recipes and `Forbidden` for unpublished
/// recipes of someone else.
pub fn ensure_viewable(recipe: &Recipe, caller: Option<uuid::Uuid>) -> ServiceResult<()> {
    if recipe.is_deleted {
        return Err(not_found());
    }
    if !recipe.is_publish && !caller.is_some_and(|id| recipe.is_owned_by(id)) {
        return Err(ServiceError::Forbidden("Access is not allowed".to_string()));
    }
    Ok(())
}

pub(crate) fn not_found() -> ServiceError {
    ServiceError::NotFound("Recipe not found".to_string())
}
