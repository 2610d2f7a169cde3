use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::core::{AppError, Result};
use crate::modules::account::models::{
    AccountInfoDto, Address, RegisterDto, RegisteredUser, User, ROLE_PUBLIC,
};
use crate::modules::account::repositories::UserRepository;

use super::password::{hash_password, validate_password, verify_password};

/// Failed logins allowed before the account is locked
pub const MAX_FAILED_ACCESS_ATTEMPTS: i32 = 5;

/// How long a lockout lasts
pub const LOCKOUT_MINUTES: i64 = 60;

/// Width of the `users.email` column
const MAX_EMAIL_LENGTH: usize = 256;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Account business logic
pub struct AccountService {
    repo: Arc<dyn UserRepository>,
}

impl AccountService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Create a public account
    pub async fn register(&self, dto: RegisterDto) -> Result<RegisteredUser> {
        let email = dto.email.trim();
        if email.is_empty() {
            return Err(AppError::validation("Email is required."));
        }
        if email.chars().count() > MAX_EMAIL_LENGTH {
            return Err(AppError::validation(format!(
                "Email must be at most {} characters.",
                MAX_EMAIL_LENGTH
            )));
        }
        if !email.contains('@') {
            return Err(AppError::validation(format!("Email '{}' is invalid.", email)));
        }
        validate_password(&dto.password)?;

        if self.repo.find_by_email(email).await?.is_some() {
            return Err(AppError::validation(format!(
                "Email '{}' is already taken.",
                email
            )));
        }

        let mut address = dto.shipping_address;
        if let Some(address) = address.as_mut() {
            if address.full_name.trim().is_empty() {
                address.full_name = dto.full_name.clone().unwrap_or_default();
            }
            address.validate()?;
        }

        let mut user = User::new(email, hash_password(&dto.password)?);
        user.business_name = dto.business_name.filter(|name| !name.trim().is_empty());

        self.repo.create(&user, address.as_ref()).await?;
        self.repo.ensure_role(ROLE_PUBLIC).await?;
        self.repo.add_to_role(&user.id, ROLE_PUBLIC).await?;

        tracing::info!(user_id = %user.id, "Account registered");

        Ok(RegisteredUser {
            id: user.id,
            email: user.email,
            account_type: user.account_type,
            business_name: user.business_name,
        })
    }

    /// Check credentials, tracking failures and lockout
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let Some(user) = self.repo.find_by_email(email).await? else {
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        let now = Utc::now();
        if user.is_locked_out(now) {
            tracing::warn!(user_id = %user.id, "Login attempt on locked out account");
            return Err(AppError::unauthorized("Account is locked out"));
        }

        if !verify_password(password, &user.password_hash)? {
            let lockout_end = now + Duration::minutes(LOCKOUT_MINUTES);
            let stored = self
                .repo
                .record_failed_access(&user.id, MAX_FAILED_ACCESS_ATTEMPTS, lockout_end)
                .await?;
            if stored.is_some_and(|end| end > now) {
                tracing::warn!(user_id = %user.id, lockout_end = ?stored, "Account locked out");
            }
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        if user.access_failed_count != 0 || user.lockout_end.is_some() {
            self.repo.reset_access_failures(&user.id).await?;
        }

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(user)
    }

    /// Profile, roles and address of the signed-in user
    pub async fn user_info(&self, user_id: &str) -> Result<AccountInfoDto> {
        let user = self.require_user(user_id).await?;
        let roles = self.repo.roles_for(&user.id).await?;
        let address = self.repo.find_address(&user.id).await?;

        Ok(AccountInfoDto::new(user, roles, address))
    }

    pub async fn get_address(&self, user_id: &str) -> Result<Option<Address>> {
        let user = self.require_user(user_id).await?;
        self.repo.find_address(&user.id).await
    }

    /// Replace the user's address, returning what was stored
    pub async fn save_address(&self, user_id: &str, address: Address) -> Result<Address> {
        address.validate()?;
        let user = self.require_user(user_id).await?;
        self.repo.upsert_address(&user.id, &address).await?;

        tracing::info!(user_id = %user.id, "Address saved");
        Ok(address)
    }

    async fn require_user(&self, user_id: &str) -> Result<User> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("User not found"))
    }
}
