mod address;
mod user;

pub use address::{Address, DEFAULT_COUNTRY};
pub use user::{
    AccountInfoDto, AccountType, LoginQuery, LoginRequest, RegisterDto, RegisteredUser, Tier,
    User,
};

/// Role given to self-registered accounts
pub const ROLE_PUBLIC: &str = "Public";
pub const ROLE_USER: &str = "User";
pub const ROLE_BUSINESS: &str = "Business";
pub const ROLE_ADMIN: &str = "Admin";
