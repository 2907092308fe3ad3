//! Request parsing shared by the handlers.

use instacook_core::config::Settings;
use instacook_service::error::ServiceError;
use instacook_service::recipe::listing::ListingQuery;
use salvo::Request;
use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};

/// Query string pairs in the order they were sent.
#[must_use]
pub fn query_pairs(req: &Request) -> Vec<(String, String)> {
    req.uri()
        .query()
        .map(|query| {
            url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect()
        })
        .unwrap_or_default()
}

/// First value of `key` among `pairs`.
#[must_use]
pub fn first<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

#[must_use]
pub fn listing_query(pairs: &[(String, String)]) -> ListingQuery<'_> {
    ListingQuery {
        q: first(pairs, "q"),
        page: first(pairs, "page"),
        per_page: first(pairs, "per_page"),
        sort: first(pairs, "sort"),
        order: first(pairs, "order"),
    }
}

/// Absolute URL of the current path under the public origin.
#[must_use]
pub fn page_base(settings: &Settings, req: &Request) -> String {
    format!("{}{}", settings.server.origin(), req.uri().path())
}

/// ## Summary
/// Reads a path parameter. A missing one means the route named nothing.
///
/// ## Errors
/// Returns `NotFound` if the parameter is absent.
pub fn path_param(req: &Request, name: &str) -> AppResult<String> {
    req.param::<String>(name)
        .ok_or_else(|| ServiceError::NotFound(format!("Missing path parameter '{name}'")).into())
}

/// ## Summary
/// Parses the JSON request body.
///
/// ## Errors
/// Returns `InvalidBody` if the body is missing, not JSON, or of the wrong shape.
pub async fn json_body<T: DeserializeOwned>(req: &mut Request) -> AppResult<T> {
    req.parse_json::<T>()
        .await
        .map_err(|e| AppError::InvalidBody(e.to_string()))
}
