use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::pagination::add_pagination_header;
use crate::core::{AppError, PagedList};
use crate::modules::catalog::models::{FilterParams, Product, ProductParams};
use crate::modules::catalog::services::CatalogService;

/// List products
/// GET /products
pub async fn list_products(
    service: web::Data<Arc<CatalogService>>,
    query: web::Query<ProductParams>,
) -> Result<HttpResponse, AppError> {
    let page = service.list_products(&query).await?;
    paged_response(page)
}

/// List products in a category
/// GET /products/category/{category}
pub async fn list_products_by_category(
    service: web::Data<Arc<CatalogService>>,
    path: web::Path<String>,
    query: web::Query<ProductParams>,
) -> Result<HttpResponse, AppError> {
    let category = path.into_inner();
    let page = service.list_products_by_category(&category, &query).await?;
    paged_response(page)
}

/// Get product by ID
/// GET /products/{id}
pub async fn get_product(
    service: web::Data<Arc<CatalogService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let product = service.get_product(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(product))
}

/// Brand and type facet counts
/// GET /products/filters
pub async fn get_filters(
    service: web::Data<Arc<CatalogService>>,
    query: web::Query<FilterParams>,
) -> Result<HttpResponse, AppError> {
    let filters = service.get_filters(&query).await?;
    Ok(HttpResponse::Ok().json(filters))
}

fn paged_response(page: PagedList<Product>) -> Result<HttpResponse, AppError> {
    let mut response = HttpResponse::Ok();
    add_pagination_header(&mut response, &page.meta)?;
    Ok(response.json(page.items))
}

/// Configure product routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/products")
            .route("", web::get().to(list_products))
            .route("/filters", web::get().to(get_filters))
            .route("/category/{category}", web::get().to(list_products_by_category))
            .route("/{id}", web::get().to(get_product)),
    );
}
