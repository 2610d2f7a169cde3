mod product;
mod product_query;

pub use product::{NewProduct, Product};
pub use product_query::{
    CatalogFilters, FilterCount, FilterParams, ProductParams, ProductQuery, ProductSort,
    ALL_CATEGORIES,
};
