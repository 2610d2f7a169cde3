pub mod product_repository;

pub(crate) use product_repository::qualified_product_columns;
pub use product_repository::{Facet, MySqlProductRepository, ProductRepository};
