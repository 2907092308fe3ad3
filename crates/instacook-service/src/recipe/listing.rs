//! Pagination and search parameters for recipe listings.

use instacook_core::config::PaginationConfig;
use instacook_core::types::{SortField, SortOrder};
use instacook_core::validation::FieldErrors;
use serde::Serialize;

use crate::error::{ServiceError, ServiceResult};

/// Raw listing parameters as they arrived in the query string.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListingQuery<'a> {
    pub q: Option<&'a str>,
    pub page: Option<&'a str>,
    pub per_page: Option<&'a str>,
    pub sort: Option<&'a str>,
    pub order: Option<&'a str>,
}

/// Validated listing parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingParams {
    pub search: Option<String>,
    pub page: i64,
    pub per_page: i64,
    pub sort: SortField,
    pub order: SortOrder,
}

impl ListingQuery<'_> {
    /// ## Summary
    /// Validates the raw parameters against the pagination settings.
    ///
    /// Unknown `sort`/`order` values fall back to the defaults, and
    /// `per_page` is capped at the configured maximum.
    ///
    /// ## Errors
    /// Returns field errors for a `page` or `per_page` that is not an integer
    /// of at least 1.
    pub fn resolve(&self, config: &PaginationConfig) -> ServiceResult<ListingParams> {
        let mut errors = FieldErrors::new();

        let page = positive_int(&mut errors, "page", self.page, 1);
        let per_page = positive_int(
            &mut errors,
            "per_page",
            self.per_page,
            config.default_per_page,
        );

        errors.into_result().map_err(ServiceError::ValidationError)?;

        Ok(ListingParams {
            search: self
                .q
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .map(str::to_string),
            page,
            per_page: per_page.min(config.max_per_page),
            sort: SortField::from_param(self.sort),
            order: SortOrder::from_param(self.order),
        })
    }
}

fn positive_int(errors: &mut FieldErrors, field: &str, raw: Option<&str>, default: i64) -> i64 {
    let Some(raw) = raw else {
        return default;
    };

    match raw.trim().parse::<i64>() {
        Ok(value) if value >= 1 => value,
        Ok(_) => {
            errors.add(field, "Must be greater than or equal to 1.");
            default
        }
        Err(_) => {
            errors.add(field, "Not a valid integer.");
            default
        }
    }
}

/// Navigation links of a page, as absolute URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLinks {
    pub first: String,
    pub last: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    #[serde(rename = "data")]
    pub items: Vec<T>,
    pub page: i64,
    pub pages: i64,
    pub per_page: i64,
    pub total: i64,
    pub links: PageLinks,
}

impl<T> Page<T> {
    /// ## Summary
    /// Assembles a page, building links from `base` (origin plus path) and
    /// the original query string pairs.
    ///
    /// ## Errors
    /// Returns an error if `base` is not a valid absolute URL.
    pub fn new(
        items: Vec<T>,
        params: &ListingParams,
        total: i64,
        base: &str,
        query_pairs: &[(String, String)],
    ) -> ServiceResult<Self> {
        let pages = page_count(total, params.per_page);
        let link = |page| page_url(base, query_pairs, page);

        let links = PageLinks {
            first: link(1)?,
            last: link(pages.max(1))?,
            prev: (params.page > 1)
                .then(|| link(params.page - 1))
                .transpose()?,
            next: (params.page < pages)
                .then(|| link(params.page + 1))
                .transpose()?,
        };

        Ok(Self {
            items,
            page: params.page,
            pages,
            per_page: params.per_page,
            total,
            links,
        })
    }

    /// Converts the items, keeping the pagination metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            pages: self.pages,
            per_page: self.per_page,
            total: self.total,
            links: self.links,
        }
    }
}

/// Number of pages needed for `total` items; zero when there are none.
#[must_use]
pub const fn page_count(total: i64, per_page: i64) -> i64 {
    if total <= 0 || per_page <= 0 {
        0
    } else {
        (total + per_page - 1) / per_page
    }
}

/// ## Summary
/// Rebuilds the request URL with `page` substituted, keeping every other
/// query parameter in its original order.
///
/// ## Errors
/// Returns `InvalidConfiguration` if `base` does not parse as a URL.
pub fn page_url(base: &str, query_pairs: &[(String, String)], page: i64) -> ServiceResult<String> {
    let mut url = url::Url::parse(base)
        .map_err(|e| ServiceError::InvalidConfiguration(format!("Invalid origin '{base}': {e}")))?;

    let page = page.to_string();
    {
        let mut serializer = url.query_pairs_mut();
        serializer.clear();

        let mut replaced = false;
        for (key, value) in query_pairs {
            if key == "page" {
                if !replaced {
                    serializer.append_pair(key, &page);
                    replaced = true;
                }
            } else {
                serializer.append_pair(key, value);
            }
        }
        if !replaced {
            serializer.append_pair("page", &page);
        }
    }

    Ok(url.into())
}
