use std::sync::Arc;

use crate::core::{AppError, PagedList, Result};
use crate::modules::catalog::models::{
    CatalogFilters, FilterParams, Product, ProductParams, ProductQuery,
};
use crate::modules::catalog::repositories::ProductRepository;

/// Read-side catalog operations
pub struct CatalogService {
    product_repo: Arc<dyn ProductRepository>,
}

impl CatalogService {
    pub fn new(product_repo: Arc<dyn ProductRepository>) -> Self {
        Self { product_repo }
    }

    /// Paged listing with search, brand/type filters and sort
    pub async fn list_products(&self, params: &ProductParams) -> Result<PagedList<Product>> {
        let query = ProductQuery::from_params(params);
        self.product_repo.list(&query).await
    }

    /// Paged listing scoped to a category (`All` for every category) and business type
    pub async fn list_products_by_category(
        &self,
        category: &str,
        params: &ProductParams,
    ) -> Result<PagedList<Product>> {
        let query = ProductQuery::for_category(category, params);
        self.product_repo.list(&query).await
    }

    pub async fn get_product(&self, id: i64) -> Result<Product> {
        self.product_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product {} not found", id)))
    }

    /// Brand and type facet counts for the given scope
    pub async fn get_filters(&self, params: &FilterParams) -> Result<CatalogFilters> {
        let query = ProductQuery::for_filters(params);
        self.product_repo.filter_counts(&query).await
    }
}
