//! Page/size request parameters and the metadata returned alongside a page.
//!
//! Page metadata is sent to clients in the `Pagination` response header as a
//! camelCase JSON object; the body carries only the items.

use actix_web::HttpResponseBuilder;
use serde::{Deserialize, Serialize};

use crate::core::Result;

/// Largest page a client may request
pub const MAX_PAGE_SIZE: u32 = 50;

/// Page size used when the client does not ask for one
pub const DEFAULT_PAGE_SIZE: u32 = 8;

/// Response header carrying [`PaginationMetaData`]
pub const PAGINATION_HEADER: &str = "Pagination";

/// Requested page, already clamped into range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    page_number: u32,
    page_size: u32,
}

impl PaginationParams {
    /// Build from raw query values.
    ///
    /// Page numbers below 1 become 1; sizes are clamped to `1..=MAX_PAGE_SIZE`.
    pub fn new(page_number: Option<i64>, page_size: Option<i64>) -> Self {
        let page_number = page_number.unwrap_or(1).clamp(1, u32::MAX as i64) as u32;
        let page_size = page_size
            .unwrap_or(DEFAULT_PAGE_SIZE as i64)
            .clamp(1, MAX_PAGE_SIZE as i64) as u32;

        Self {
            page_number,
            page_size,
        }
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Row offset of the first item on this page
    pub fn offset(&self) -> u64 {
        (self.page_number as u64 - 1) * self.page_size as u64
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetaData {
    pub current_page: u32,
    pub total_pages: u32,
    pub page_size: u32,
    pub total_count: u64,
}

impl PaginationMetaData {
    pub fn new(total_count: u64, params: PaginationParams) -> Self {
        let page_size = params.page_size();
        let total_pages = total_count.div_ceil(page_size as u64) as u32;

        Self {
            current_page: params.page_number(),
            total_pages,
            page_size,
            total_count,
        }
    }
}

/// One page of items plus its metadata
#[derive(Debug, Clone)]
pub struct PagedList<T> {
    pub items: Vec<T>,
    pub meta: PaginationMetaData,
}

impl<T> PagedList<T> {
    pub fn new(items: Vec<T>, total_count: u64, params: PaginationParams) -> Self {
        Self {
            items,
            meta: PaginationMetaData::new(total_count, params),
        }
    }
}

/// Attach the `Pagination` header to a response under construction
pub fn add_pagination_header(
    builder: &mut HttpResponseBuilder,
    meta: &PaginationMetaData,
) -> Result<()> {
    let value = serde_json::to_string(meta)?;
    builder.insert_header((PAGINATION_HEADER, value));
    Ok(())
}
