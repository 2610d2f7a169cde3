use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::address::Address;

/// Kind of account; serialized by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccountType {
    #[default]
    Public,
    Business,
    Admin,
}

impl AccountType {
    /// Numeric code of the account type
    pub fn code(&self) -> i32 {
        match self {
            AccountType::Public => 0,
            AccountType::Business => 1,
            AccountType::Admin => 7,
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountType::Public => write!(f, "Public"),
            AccountType::Business => write!(f, "Business"),
            AccountType::Admin => write!(f, "Admin"),
        }
    }
}

impl std::str::FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Public" => Ok(AccountType::Public),
            "Business" => Ok(AccountType::Business),
            "Admin" => Ok(AccountType::Admin),
            _ => Err(format!("Invalid account type: {}", s)),
        }
    }
}

impl TryFrom<String> for AccountType {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

/// Customer tier; lower codes rank higher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tier {
    Platinum,
    Gold,
    Silver,
    #[default]
    Bronze,
}

impl Tier {
    pub fn code(&self) -> i32 {
        match self {
            Tier::Platinum => 0,
            Tier::Gold => 1,
            Tier::Silver => 2,
            Tier::Bronze => 3,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Platinum => write!(f, "Platinum"),
            Tier::Gold => write!(f, "Gold"),
            Tier::Silver => write!(f, "Silver"),
            Tier::Bronze => write!(f, "Bronze"),
        }
    }
}

impl std::str::FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Platinum" => Ok(Tier::Platinum),
            "Gold" => Ok(Tier::Gold),
            "Silver" => Ok(Tier::Silver),
            "Bronze" => Ok(Tier::Bronze),
            _ => Err(format!("Invalid tier: {}", s)),
        }
    }
}

impl TryFrom<String> for Tier {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

/// Stored account
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    pub user_name: String,
    pub password_hash: String,

    #[sqlx(try_from = "String")]
    pub account_type: AccountType,

    /// Required for business accounts
    pub tax_id: Option<String>,
    pub business_name: Option<String>,
    pub business_type: Option<String>,
    pub delivery_notes: Option<String>,

    #[sqlx(json)]
    pub extras: Vec<String>,

    #[sqlx(try_from = "String")]
    pub tier: Tier,

    /// Consecutive failed logins since the last success or lockout
    pub access_failed_count: i32,
    pub lockout_end: Option<DateTime<Utc>>,
}

impl User {
    /// New public account; the email doubles as the user name
    pub fn new(email: &str, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            user_name: email.to_string(),
            password_hash,
            account_type: AccountType::Public,
            tax_id: None,
            business_name: None,
            business_type: None,
            delivery_notes: None,
            extras: Vec::new(),
            tier: Tier::Bronze,
            access_failed_count: 0,
            lockout_end: None,
        }
    }

    pub fn is_locked_out(&self, now: DateTime<Utc>) -> bool {
        self.lockout_end.is_some_and(|end| end > now)
    }
}

/// Registration request body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterDto {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    pub business_name: Option<String>,
    pub shipping_address: Option<Address>,
}

/// Registration response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    pub id: String,
    pub email: String,
    pub account_type: AccountType,
    pub business_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login query string; sessions are always cookie based
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginQuery {
    pub use_cookies: Option<bool>,
}

/// Profile returned by `GET /account/user-info`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfoDto {
    pub id: String,
    pub email: String,
    pub user_name: Option<String>,
    pub account_type: AccountType,
    pub tax_id: Option<String>,
    pub business_name: Option<String>,
    pub business_type: Option<String>,
    pub delivery_notes: Option<String>,
    pub tier: Tier,
    pub extras: Option<Vec<String>>,
    pub roles: Vec<String>,
    pub shipping_address: Option<Address>,
}

impl AccountInfoDto {
    pub fn new(user: User, roles: Vec<String>, shipping_address: Option<Address>) -> Self {
        Self {
            id: user.id,
            email: user.email,
            user_name: Some(user.user_name),
            account_type: user.account_type,
            tax_id: user.tax_id,
            business_name: user.business_name,
            business_type: user.business_type,
            delivery_notes: user.delivery_notes,
            tier: user.tier,
            extras: Some(user.extras),
            roles,
            shipping_address,
        }
    }
}
