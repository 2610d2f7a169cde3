// Account module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod seed;
pub mod services;

pub use models::{AccountType, Address, Tier, User};
pub use repositories::{MySqlUserRepository, UserRepository};
pub use services::AccountService;
