pub mod account_service;
pub mod password;

pub use account_service::{AccountService, LOCKOUT_MINUTES, MAX_FAILED_ACCESS_ATTEMPTS};
pub use password::{hash_password, validate_password, verify_password};
