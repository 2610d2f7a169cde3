pub mod db_initializer;
pub mod error;
pub mod pagination;

pub use error::{AppError, Result};
pub use pagination::{PagedList, PaginationMetaData, PaginationParams};
