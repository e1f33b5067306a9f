//! Shared DTO types used across multiple endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::persistence::ListQuery;

/// Largest page size a client may request.
pub const MAX_PER_PAGE: u32 = 100;

/// Pagination query parameters for list endpoints.
///
/// Both fields are optional; without them the full listing is returned.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number (1-indexed). Defaults to 1 when `per_page` is given.
    #[serde(default)]
    pub page: Option<u32>,
    /// Items per page (max 100). Defaults to 20 when `page` is given.
    #[serde(default)]
    pub per_page: Option<u32>,
}

/// Pagination metadata echoed in list responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginationMeta {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
}

impl PaginationParams {
    /// Returns the clamped page window, or `None` for an unpaged request.
    #[must_use]
    pub fn clamped(&self) -> Option<PaginationMeta> {
        if self.page.is_none() && self.per_page.is_none() {
            return None;
        }
        Some(PaginationMeta {
            page: self.page.unwrap_or(1).max(1),
            per_page: self.per_page.unwrap_or(20).clamp(1, MAX_PER_PAGE),
        })
    }

    /// Translates the request into a store query.
    #[must_use]
    pub fn to_list_query(&self) -> ListQuery {
        match self.clamped() {
            None => ListQuery::all(),
            Some(meta) => {
                let per_page = meta.per_page as usize;
                let offset = (meta.page as usize).saturating_sub(1).saturating_mul(per_page);
                ListQuery::page(offset, per_page)
            }
        }
    }
}
