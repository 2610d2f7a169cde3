// Catalog query parameters and their normalized form.
//
// Raw query strings arrive as `ProductParams` / `FilterParams`; the service
// turns them into a `ProductQuery` whose fields are already trimmed,
// lower-cased and clamped so repositories only translate, never interpret.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::PaginationParams;

/// Category value that disables category scoping
pub const ALL_CATEGORIES: &str = "All";

/// Query string accepted by the product listing endpoints
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductParams {
    pub order_by: Option<String>,
    pub search_term: Option<String>,
    /// Comma-separated brand names
    pub brands: Option<String>,
    /// Comma-separated product types
    pub types: Option<String>,
    pub business_type: Option<String>,
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
}

/// Query string accepted by `GET /products/filters`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    pub category: Option<String>,
    pub business_type: Option<String>,
    pub search_term: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    #[default]
    Name,
    PriceAsc,
    PriceDesc,
}

impl ProductSort {
    /// `price` and `priceDesc` are recognized; anything else sorts by name
    pub fn from_order_by(order_by: Option<&str>) -> Self {
        match order_by.map(str::trim) {
            Some("price") => ProductSort::PriceAsc,
            Some("priceDesc") => ProductSort::PriceDesc,
            _ => ProductSort::Name,
        }
    }
}

/// Normalized catalog query
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductQuery {
    /// Trimmed search term, matched against the product name
    pub search: Option<String>,
    /// Lower-cased brand names
    pub brands: Vec<String>,
    /// Lower-cased product types
    pub types: Vec<String>,
    /// Lower-cased category; `None` when absent or "All"
    pub category: Option<String>,
    /// Lower-cased business type
    pub business_type: Option<String>,
    pub sort: ProductSort,
    pub pagination: PaginationParams,
}

impl ProductQuery {
    pub fn from_params(params: &ProductParams) -> Self {
        Self {
            search: non_blank(params.search_term.as_deref()),
            brands: split_csv(params.brands.as_deref()),
            types: split_csv(params.types.as_deref()),
            category: None,
            business_type: None,
            sort: ProductSort::from_order_by(params.order_by.as_deref()),
            pagination: PaginationParams::new(params.page_number, params.page_size),
        }
    }

    /// Listing scoped to a category and the request's business type
    pub fn for_category(category: &str, params: &ProductParams) -> Self {
        Self {
            category: category_scope(Some(category)),
            business_type: lowered(params.business_type.as_deref()),
            ..Self::from_params(params)
        }
    }

    /// Scope used to compute facet counts
    pub fn for_filters(params: &FilterParams) -> Self {
        Self {
            search: non_blank(params.search_term.as_deref()),
            category: category_scope(params.category.as_deref()),
            business_type: lowered(params.business_type.as_deref()),
            ..Self::default()
        }
    }
}

/// One facet value and the number of products carrying it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FilterCount {
    pub name: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogFilters {
    pub brands: Vec<FilterCount>,
    pub types: Vec<FilterCount>,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn lowered(value: Option<&str>) -> Option<String> {
    non_blank(value).map(|v| v.to_lowercase())
}

fn category_scope(category: Option<&str>) -> Option<String> {
    lowered(category).filter(|c| !c.eq_ignore_ascii_case(ALL_CATEGORIES))
}

fn split_csv(value: Option<&str>) -> Vec<String> {
    value
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_lowercase)
                .collect()
        })
        .unwrap_or_default()
}
