// Test Helper Modules
//
// Contract tests drive the real routes through `actix_web::test` with
// in-memory repositories; integration tests talk to MySQL.
//
// Usage:
//   #[path = "../helpers/mod.rs"]
//   mod helpers;
//   use helpers::*;

#![allow(dead_code)]

pub mod test_app;
pub mod test_data;
pub mod test_database;

pub use memory_repositories::*;
pub use test_app::*;
pub use test_data::*;
pub use test_database::*;
