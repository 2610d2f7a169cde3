// Catalog module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod seed;
pub mod services;

pub use models::{NewProduct, Product, ProductQuery};
pub use repositories::{MySqlProductRepository, ProductRepository};
pub use services::CatalogService;
